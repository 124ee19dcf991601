pub mod catalog;
pub mod facility;
pub mod inventory;
pub mod product;
pub mod schema;
pub mod server;
pub mod subarea;

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{common::envelope::Envelope, config::AppState};

// ---
// Envelope <-> HTTP
// ---

/// In-band code 0 is 200; any other code doubles as the HTTP status.
pub(crate) fn respond<T: Serialize>(envelope: Envelope<T>) -> Response {
    let status = if envelope.is_ok() {
        StatusCode::OK
    } else {
        u16::try_from(envelope.error_code)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    };
    (status, Json(envelope)).into_response()
}

/// An unreadable body never reaches the dispatcher: 502, empty body.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::warn!("request body rejected: {}", rejection.body_text());
            Err(StatusCode::BAD_GATEWAY.into_response())
        }
    }
}

// Path keys. A segment that does not parse (e.g. a non-numeric id) matches
// no resource: 404, empty body, nothing dispatched.
pub struct Key<T>(pub T);

impl<T, S> FromRequestParts<S> for Key<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Key(value)),
            Err(rejection) => {
                tracing::debug!("path rejected: {}", rejection.body_text());
                Err(StatusCode::NOT_FOUND.into_response())
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    let facility_routes = Router::new()
        .route("/facility", post(facility::create_facility))
        .route("/facility/{id}", put(facility::update_facility))
        .route("/facility/{id}/{version}", delete(facility::delete_facility))
        .route("/facility/id/{id}", get(facility::get_facility))
        .route("/facility/wrapper/{id}", get(facility::get_facility_wrapper))
        .route("/facilities", get(facility::get_facilities));

    let catalog_routes = Router::new()
        .route("/subareatype", post(catalog::create_subarea_type))
        .route("/subareatype/{id}", put(catalog::update_subarea_type))
        .route("/subareatype/{id}/{version}", delete(catalog::delete_subarea_type))
        .route("/subareatype/id/{id}", get(catalog::get_subarea_type))
        .route("/subareatypes", get(catalog::get_subarea_types))
        .route("/itemtype", post(catalog::create_item_type))
        .route("/itemtype/{id}", put(catalog::update_item_type))
        .route("/itemtype/{id}/{version}", delete(catalog::delete_item_type))
        .route("/itemtype/id/{id}", get(catalog::get_item_type))
        .route("/itemtypes", get(catalog::get_item_types));

    let subarea_routes = Router::new()
        .route("/subarea", post(subarea::create_subarea))
        .route("/subarea/{id}", put(subarea::update_subarea))
        .route("/subarea/{id}/{version}", delete(subarea::delete_subarea))
        .route("/subarea/id/{id}", get(subarea::get_subarea))
        .route("/subareas/{facility}", get(subarea::get_subareas));

    let product_routes = Router::new()
        .route("/product", post(product::create_product))
        .route("/product/{id}", put(product::update_product))
        .route("/product/{id}/{version}", delete(product::delete_product))
        .route("/product/id/{id}", get(product::get_product))
        .route("/products", get(product::get_products));

    let inventory_routes = Router::new()
        .route("/item", post(inventory::create_item))
        .route("/item/{id}", put(inventory::update_item))
        .route("/item/{id}/{version}", delete(inventory::delete_item))
        .route("/item/id/{id}", get(inventory::get_item))
        .route("/items/product/{id}", get(inventory::get_items_by_product))
        .route("/items/subarea/{id}", get(inventory::get_items_by_subarea))
        .route("/items/facility/{id}", get(inventory::get_items_by_facility));

    let schema_routes = Router::new()
        .route("/schema", post(schema::create_schema))
        .route(
            "/schema/{name}",
            put(schema::update_schema).get(schema::get_schema),
        )
        .route("/schema/{name}/{version}", delete(schema::delete_schema))
        .route("/schemas", get(schema::get_schemas));

    let api = Router::new()
        .merge(facility_routes)
        .merge(catalog_routes)
        .merge(subarea_routes)
        .merge(product_routes)
        .merge(inventory_routes)
        .merge(schema_routes)
        .route("/server/version", get(server::server_version));

    Router::new().nest("/api", api).with_state(state)
}
