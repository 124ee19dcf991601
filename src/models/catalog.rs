// src/models/catalog.rs

// Tenant-scoped type catalogs. Their ids are chosen by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::requests::{not_blank, tenant_scoped};

// --- Subarea types ("room", "shelf", ...) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubareaType {
    pub mservice_id: i64,
    pub subarea_type_id: i32,
    pub subarea_type_name: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSubareaTypeRequest {
    pub mservice_id: i64,
    pub subarea_type_id: i32,
    #[validate(custom(function = "not_blank"))]
    pub subarea_type_name: String,
}
tenant_scoped!(CreateSubareaTypeRequest, subarea_type_id);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSubareaTypeRequest {
    pub mservice_id: i64,
    pub subarea_type_id: i32,
    pub version: i32,
    #[validate(custom(function = "not_blank"))]
    pub subarea_type_name: String,
}
tenant_scoped!(UpdateSubareaTypeRequest, subarea_type_id);

// --- Item types ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ItemType {
    pub mservice_id: i64,
    pub item_type_id: i32,
    pub item_type_name: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateItemTypeRequest {
    pub mservice_id: i64,
    pub item_type_id: i32,
    #[validate(custom(function = "not_blank"))]
    pub item_type_name: String,
}
tenant_scoped!(CreateItemTypeRequest, item_type_id);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateItemTypeRequest {
    pub mservice_id: i64,
    pub item_type_id: i32,
    pub version: i32,
    #[validate(custom(function = "not_blank"))]
    pub item_type_name: String,
}
tenant_scoped!(UpdateItemTypeRequest, item_type_id);
