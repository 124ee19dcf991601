// src/handlers/inventory.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};

use crate::{
    config::AppState,
    handlers::{body, respond, Key},
    middleware::auth::Credential,
    models::{
        inventory::{CreateInventoryItemRequest, UpdateInventoryItemRequest},
        requests::{DeleteRequest, KeyRequest},
    },
};

pub async fn create_item(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<CreateInventoryItemRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let req = body(payload)?;
    Ok(respond(state.dispatcher.create_inventory_item(credential.as_deref(), req).await))
}

pub async fn update_item(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i64>,
    payload: Result<Json<UpdateInventoryItemRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let mut req = body(payload)?;
    req.inventory_item_id = id;
    Ok(respond(state.dispatcher.update_inventory_item(credential.as_deref(), req).await))
}

pub async fn delete_item(
    State(state): State<AppState>,
    credential: Credential,
    Key((id, version)): Key<(i64, i32)>,
) -> Response {
    let req = DeleteRequest::new(id, version);
    respond(state.dispatcher.delete_inventory_item(credential.as_deref(), req).await)
}

pub async fn get_item(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i64>,
) -> Response {
    respond(state.dispatcher.get_inventory_item(credential.as_deref(), KeyRequest::new(id)).await)
}

// --- Lookups by location or product ---

pub async fn get_items_by_product(
    State(state): State<AppState>,
    credential: Credential,
    Key(product_id): Key<i64>,
) -> Response {
    respond(
        state
            .dispatcher
            .get_inventory_items_by_product(credential.as_deref(), KeyRequest::new(product_id))
            .await,
    )
}

pub async fn get_items_by_subarea(
    State(state): State<AppState>,
    credential: Credential,
    Key(subarea_id): Key<i64>,
) -> Response {
    respond(
        state
            .dispatcher
            .get_inventory_items_by_subarea(credential.as_deref(), KeyRequest::new(subarea_id))
            .await,
    )
}

pub async fn get_items_by_facility(
    State(state): State<AppState>,
    credential: Credential,
    Key(facility_id): Key<i64>,
) -> Response {
    respond(
        state
            .dispatcher
            .get_inventory_items_by_facility(credential.as_deref(), KeyRequest::new(facility_id))
            .await,
    )
}
