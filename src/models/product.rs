// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::Validate;

use crate::models::requests::{not_blank, tenant_scoped};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i64,
    pub mservice_id: i64,
    pub sku: String,
    pub product_name: String,
    pub comment: String,
    pub json_data: Option<Value>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProductRequest {
    pub mservice_id: i64,
    pub sku: String,
    #[validate(custom(function = "not_blank"))]
    pub product_name: String,
    pub comment: String,
    pub json_data: Option<Value>,
}
tenant_scoped!(CreateProductRequest, product_name);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProductRequest {
    pub mservice_id: i64,
    pub product_id: i64,
    pub version: i32,
    pub sku: String,
    #[validate(custom(function = "not_blank"))]
    pub product_name: String,
    pub comment: String,
    pub json_data: Option<Value>,
}
tenant_scoped!(UpdateProductRequest, product_id);
