// src/models/subarea.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::Validate;

use crate::models::requests::{not_blank, tenant_scoped};

/// Parent id of a subarea that sits directly under its facility.
pub const NO_PARENT: i64 = 0;

// Subareas form a tree under each facility through `parent_subarea_id`.
// Reads carry the facility and type names through outer joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subarea {
    pub subarea_id: i64,
    pub mservice_id: i64,
    pub facility_id: i64,
    pub parent_subarea_id: i64,
    pub position: i32,
    pub subarea_type_id: i32,
    pub subarea_name: String,
    pub json_data: Option<Value>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub facility_name: Option<String>,
    pub subarea_type_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSubareaRequest {
    pub mservice_id: i64,
    pub facility_id: i64,
    pub parent_subarea_id: i64,
    pub position: i32,
    pub subarea_type_id: i32,
    #[validate(custom(function = "not_blank"))]
    pub subarea_name: String,
    pub json_data: Option<Value>,
}
tenant_scoped!(CreateSubareaRequest, subarea_name);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSubareaRequest {
    pub mservice_id: i64,
    pub subarea_id: i64,
    pub version: i32,
    pub parent_subarea_id: i64,
    pub position: i32,
    pub subarea_type_id: i32,
    #[validate(custom(function = "not_blank"))]
    pub subarea_name: String,
    pub json_data: Option<Value>,
}
tenant_scoped!(UpdateSubareaRequest, subarea_id);
