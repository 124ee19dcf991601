// src/handlers/product.rs

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
        product::{CreateProductRequest, UpdateProductRequest},
        requests::{DeleteRequest, KeyRequest, TenantRequest},
    },
};

pub async fn create_product(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let req = body(payload)?;
    Ok(respond(state.dispatcher.create_product(credential.as_deref(), req).await))
}

pub async fn update_product(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i64>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let mut req = body(payload)?;
    req.product_id = id;
    Ok(respond(state.dispatcher.update_product(credential.as_deref(), req).await))
}

pub async fn delete_product(
    State(state): State<AppState>,
    credential: Credential,
    Key((id, version)): Key<(i64, i32)>,
) -> Response {
    let req = DeleteRequest::new(id, version);
    respond(state.dispatcher.delete_product(credential.as_deref(), req).await)
}

pub async fn get_product(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i64>,
) -> Response {
    respond(state.dispatcher.get_product(credential.as_deref(), KeyRequest::new(id)).await)
}

pub async fn get_products(State(state): State<AppState>, credential: Credential) -> Response {
    respond(
        state
            .dispatcher
            .get_products(credential.as_deref(), TenantRequest::default())
            .await,
    )
}
