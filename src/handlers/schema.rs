// src/handlers/schema.rs

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
        requests::{DeleteRequest, KeyRequest, TenantRequest},
        schema::{CreateEntitySchemaRequest, UpdateEntitySchemaRequest},
    },
};

pub async fn create_schema(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<CreateEntitySchemaRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let req = body(payload)?;
    Ok(respond(state.dispatcher.create_entity_schema(credential.as_deref(), req).await))
}

pub async fn update_schema(
    State(state): State<AppState>,
    credential: Credential,
    Key(name): Key<String>,
    payload: Result<Json<UpdateEntitySchemaRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let mut req = body(payload)?;
    req.entity_name = name;
    Ok(respond(state.dispatcher.update_entity_schema(credential.as_deref(), req).await))
}

pub async fn delete_schema(
    State(state): State<AppState>,
    credential: Credential,
    Key((name, version)): Key<(String, i32)>,
) -> Response {
    let req = DeleteRequest::new(name, version);
    respond(state.dispatcher.delete_entity_schema(credential.as_deref(), req).await)
}

pub async fn get_schema(
    State(state): State<AppState>,
    credential: Credential,
    Key(name): Key<String>,
) -> Response {
    respond(state.dispatcher.get_entity_schema(credential.as_deref(), KeyRequest::new(name)).await)
}

pub async fn get_schemas(State(state): State<AppState>, credential: Credential) -> Response {
    respond(
        state
            .dispatcher
            .get_entity_schemas(credential.as_deref(), TenantRequest::default())
            .await,
    )
}
