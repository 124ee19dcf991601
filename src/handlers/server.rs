// src/handlers/server.rs

use axum::{extract::State, response::Response};

use crate::{config::AppState, handlers::respond};

// Health check; takes no credential.
pub async fn server_version(State(state): State<AppState>) -> Response {
    respond(state.dispatcher.server_version())
}
