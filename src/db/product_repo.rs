// src/db/product_repo.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::{read_failure, write_failure},
        error::AppError,
    },
    models::product::Product,
};

#[derive(Debug, Clone, Copy)]
pub struct ProductFields<'a> {
    pub sku: &'a str,
    pub product_name: &'a str,
    pub comment: &'a str,
    pub json_data: Option<&'a Value>,
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, tenant_id: i64, fields: ProductFields<'_>) -> Result<i64, AppError>;
    async fn update_product(&self, tenant_id: i64, product_id: i64, version: i32, fields: ProductFields<'_>) -> Result<u64, AppError>;
    async fn delete_product(&self, tenant_id: i64, product_id: i64, version: i32) -> Result<u64, AppError>;
    async fn find_product(&self, tenant_id: i64, product_id: i64) -> Result<Option<Product>, AppError>;
    async fn list_products(&self, tenant_id: i64) -> Result<Vec<Product>, AppError>;
}

const PRODUCT_COLUMNS: &str =
    "product_id, mservice_id, sku, product_name, comment, json_data, version, created_at, modified_at";

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn insert_product(&self, tenant_id: i64, fields: ProductFields<'_>) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO products (mservice_id, sku, product_name, comment, json_data)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING product_id
            "#,
        )
        .bind(tenant_id)
        .bind(fields.sku)
        .bind(fields.product_name)
        .bind(fields.comment)
        .bind(fields.json_data.cloned())
        .fetch_one(&self.pool)
        .await
        .map_err(write_failure)
    }

    async fn update_product(&self, tenant_id: i64, product_id: i64, version: i32, fields: ProductFields<'_>) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET modified_at = NOW(), version = version + 1, sku = $1, product_name = $2,
                comment = $3, json_data = $4
            WHERE product_id = $5 AND mservice_id = $6 AND version = $7 AND NOT is_deleted
            "#,
        )
        .bind(fields.sku)
        .bind(fields.product_name)
        .bind(fields.comment)
        .bind(fields.json_data.cloned())
        .bind(product_id)
        .bind(tenant_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;

        Ok(result.rows_affected())
    }

    async fn delete_product(&self, tenant_id: i64, product_id: i64, version: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET deleted_at = NOW(), is_deleted = TRUE, version = version + 1
            WHERE product_id = $1 AND mservice_id = $2 AND version = $3 AND NOT is_deleted
            "#,
        )
        .bind(product_id)
        .bind(tenant_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;

        Ok(result.rows_affected())
    }

    async fn find_product(&self, tenant_id: i64, product_id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "SELECT {} FROM products WHERE product_id = $1 AND mservice_id = $2 AND NOT is_deleted",
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(product_id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_failure)
    }

    async fn list_products(&self, tenant_id: i64) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            "SELECT {} FROM products WHERE mservice_id = $1 AND NOT is_deleted",
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(read_failure)
    }
}
