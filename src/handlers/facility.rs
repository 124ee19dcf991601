// src/handlers/facility.rs

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
        facility::{CreateFacilityRequest, UpdateFacilityRequest},
        requests::{DeleteRequest, KeyRequest, TenantRequest},
    },
};

pub async fn create_facility(
    State(state): State<AppState>,
    credential: Credential,
    payload: Result<Json<CreateFacilityRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let req = body(payload)?;
    Ok(respond(state.dispatcher.create_facility(credential.as_deref(), req).await))
}

pub async fn update_facility(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i64>,
    payload: Result<Json<UpdateFacilityRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let mut req = body(payload)?;
    req.facility_id = id;
    Ok(respond(state.dispatcher.update_facility(credential.as_deref(), req).await))
}

pub async fn delete_facility(
    State(state): State<AppState>,
    credential: Credential,
    Key((id, version)): Key<(i64, i32)>,
) -> Response {
    let req = DeleteRequest::new(id, version);
    respond(state.dispatcher.delete_facility(credential.as_deref(), req).await)
}

pub async fn get_facility(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i64>,
) -> Response {
    respond(state.dispatcher.get_facility(credential.as_deref(), KeyRequest::new(id)).await)
}

pub async fn get_facilities(State(state): State<AppState>, credential: Credential) -> Response {
    respond(
        state
            .dispatcher
            .get_facilities(credential.as_deref(), TenantRequest::default())
            .await,
    )
}

// Facility plus its nested subarea tree.
pub async fn get_facility_wrapper(
    State(state): State<AppState>,
    credential: Credential,
    Key(id): Key<i64>,
) -> Response {
    respond(
        state
            .dispatcher
            .get_facility_wrapper(credential.as_deref(), KeyRequest::new(id))
            .await,
    )
}
