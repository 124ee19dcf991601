// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::models::requests::tenant_scoped;

// --- Inventory item: a quantity of something stored in a subarea ---
// `item_type_name` and `product_name` come from outer joins, so a dangling
// type or product reference never fails the read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub inventory_item_id: i64,
    pub mservice_id: i64,
    pub subarea_id: i64,
    pub item_type_id: i32,
    pub quantity: i32,
    pub serial_number: String,
    pub product_id: i64,
    pub json_data: Option<Value>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub item_type_name: Option<String>,
    pub product_name: Option<String>,
}

// No required textual fields here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateInventoryItemRequest {
    pub mservice_id: i64,
    pub subarea_id: i64,
    pub item_type_id: i32,
    pub quantity: i32,
    pub serial_number: String,
    pub product_id: i64,
    pub json_data: Option<Value>,
}
tenant_scoped!(CreateInventoryItemRequest, subarea_id);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateInventoryItemRequest {
    pub mservice_id: i64,
    pub inventory_item_id: i64,
    pub version: i32,
    pub subarea_id: i64,
    pub item_type_id: i32,
    pub quantity: i32,
    pub serial_number: String,
    pub product_id: i64,
    pub json_data: Option<Value>,
}
tenant_scoped!(UpdateInventoryItemRequest, inventory_item_id);
