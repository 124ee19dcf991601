// src/handlers/catalog.rs

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
        catalog::{CreateItemTypeRequest, CreateSubareaTypeRequest, UpdateItemTypeRequest, UpdateSubareaTypeRequest},
        requests::{DeleteRequest, KeyRequest, TenantRequest},
    },
};

// ---
// Subarea types
// ---

pub async fn create_subarea_type(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<CreateSubareaTypeRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let req = body(payload)?;
    Ok(respond(state.dispatcher.create_subarea_type(credential.as_deref(), req).await))
}

pub async fn update_subarea_type(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i32>,
    payload: Result<Json<UpdateSubareaTypeRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let mut req = body(payload)?;
    req.subarea_type_id = id;
    Ok(respond(state.dispatcher.update_subarea_type(credential.as_deref(), req).await))
}

pub async fn delete_subarea_type(
    State(state): State<AppState>,
    credential: Credential,
    Key((id, version)): Key<(i32, i32)>,
) -> Response {
    let req = DeleteRequest::new(id, version);
    respond(state.dispatcher.delete_subarea_type(credential.as_deref(), req).await)
}

pub async fn get_subarea_type(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i32>,
) -> Response {
    respond(state.dispatcher.get_subarea_type(credential.as_deref(), KeyRequest::new(id)).await)
}

pub async fn get_subarea_types(State(state): State<AppState>, credential: Credential) -> Response {
    respond(
        state
            .dispatcher
            .get_subarea_types(credential.as_deref(), TenantRequest::default())
            .await,
    )
}

// ---
// Item types
// ---

pub async fn create_item_type(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<CreateItemTypeRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let req = body(payload)?;
    Ok(respond(state.dispatcher.create_item_type(credential.as_deref(), req).await))
}

pub async fn update_item_type(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i32>,
    payload: Result<Json<UpdateItemTypeRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let mut req = body(payload)?;
    req.item_type_id = id;
    Ok(respond(state.dispatcher.update_item_type(credential.as_deref(), req).await))
}

pub async fn delete_item_type(
    State(state): State<AppState>,
    credential: Credential,
    Key((id, version)): Key<(i32, i32)>,
) -> Response {
    let req = DeleteRequest::new(id, version);
    respond(state.dispatcher.delete_item_type(credential.as_deref(), req).await)
}

pub async fn get_item_type(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i32>,
) -> Response {
    respond(state.dispatcher.get_item_type(credential.as_deref(), KeyRequest::new(id)).await)
}

pub async fn get_item_types(State(state): State<AppState>, credential: Credential) -> Response {
    respond(
        state
            .dispatcher
            .get_item_types(credential.as_deref(), TenantRequest::default())
            .await,
    )
}
