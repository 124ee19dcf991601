// src/models/schema.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::models::requests::{not_blank, tenant_scoped};

/// Entities whose `jsonData` may be described by a tenant schema.
pub const SUPPORTED_ENTITIES: [&str; 4] = ["facility", "subarea", "product", "inventory_item"];

pub fn is_supported_entity(name: &str) -> bool {
    SUPPORTED_ENTITIES.contains(&name)
}

// Extension-point metadata: a JSON schema document per (tenant, entity name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    pub mservice_id: i64,
    pub entity_name: String,
    pub json_schema: Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

fn present(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Null => Err(ValidationError::new("missing")),
        Value::String(s) if s.trim().is_empty() => Err(ValidationError::new("missing")),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateEntitySchemaRequest {
    pub mservice_id: i64,
    #[validate(custom(function = "not_blank"))]
    pub entity_name: String,
    #[validate(custom(function = "present"))]
    pub json_schema: Value,
}
tenant_scoped!(CreateEntitySchemaRequest, entity_name);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEntitySchemaRequest {
    pub mservice_id: i64,
    #[validate(custom(function = "not_blank"))]
    pub entity_name: String,
    pub version: i32,
    #[validate(custom(function = "present"))]
    pub json_schema: Value,
}
tenant_scoped!(UpdateEntitySchemaRequest, entity_name);
