// src/handlers/subarea.rs

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
        requests::{DeleteRequest, KeyRequest},
        subarea::{CreateSubareaRequest, UpdateSubareaRequest},
    },
};

pub async fn create_subarea(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<CreateSubareaRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let req = body(payload)?;
    Ok(respond(state.dispatcher.create_subarea(credential.as_deref(), req).await))
}

pub async fn update_subarea(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i64>,
    payload: Result<Json<UpdateSubareaRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let mut req = body(payload)?;
    req.subarea_id = id;
    Ok(respond(state.dispatcher.update_subarea(credential.as_deref(), req).await))
}

pub async fn delete_subarea(
    State(state): State<AppState>,
    credential: Credential,
    Key((id, version)): Key<(i64, i32)>,
) -> Response {
    let req = DeleteRequest::new(id, version);
    respond(state.dispatcher.delete_subarea(credential.as_deref(), req).await)
}

pub async fn get_subarea(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i64>,
) -> Response {
    respond(state.dispatcher.get_subarea(credential.as_deref(), KeyRequest::new(id)).await)
}

pub async fn get_subareas(
    State(state): State<AppState>,
    credential: Credential,
    Key(facility_id): Key<i64>,
) -> Response {
    respond(
        state
            .dispatcher
            .get_subareas(credential.as_deref(), KeyRequest::new(facility_id))
            .await,
    )
}
