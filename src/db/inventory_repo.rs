// src/db/inventory_repo.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::{read_failure, write_failure},
        error::AppError,
    },
    models::inventory::InventoryItem,
};

#[derive(Debug, Clone, Copy)]
pub struct ItemFields<'a> {
    pub subarea_id: i64,
    pub item_type_id: i32,
    pub quantity: i32,
    pub serial_number: &'a str,
    pub product_id: i64,
    pub json_data: Option<&'a Value>,
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn insert_item(&self, tenant_id: i64, fields: ItemFields<'_>) -> Result<i64, AppError>;

    async fn update_item(
        &self,
        tenant_id: i64,
        item_id: i64,
        version: i32,
        fields: ItemFields<'_>,
    ) -> Result<u64, AppError>;

    async fn delete_item(&self, tenant_id: i64, item_id: i64, version: i32) -> Result<u64, AppError>;

    async fn find_item(&self, tenant_id: i64, item_id: i64) -> Result<Option<InventoryItem>, AppError>;

    async fn list_items_by_product(&self, tenant_id: i64, product_id: i64) -> Result<Vec<InventoryItem>, AppError>;

    async fn list_items_by_subarea(&self, tenant_id: i64, subarea_id: i64) -> Result<Vec<InventoryItem>, AppError>;

    /// Items stored in any subarea of the facility.
    async fn list_items_by_facility(&self, tenant_id: i64, facility_id: i64) -> Result<Vec<InventoryItem>, AppError>;
}

const ITEM_SELECT: &str = r#"
    SELECT i.inventory_item_id, i.mservice_id, i.subarea_id, i.item_type_id, i.quantity,
           i.serial_number, i.product_id, i.json_data, i.version, i.created_at, i.modified_at,
           t.item_type_name, p.product_name
    FROM inventory_items AS i
    LEFT JOIN item_types AS t
           ON t.mservice_id = i.mservice_id AND t.item_type_id = i.item_type_id AND NOT t.is_deleted
    LEFT JOIN products AS p
           ON p.mservice_id = i.mservice_id AND p.product_id = i.product_id AND NOT p.is_deleted
"#;

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, filter: &str, tenant_id: i64, key: i64) -> Result<Vec<InventoryItem>, AppError> {
        let sql = format!("{} {}", ITEM_SELECT, filter);
        sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(tenant_id)
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(read_failure)
    }
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    async fn insert_item(&self, tenant_id: i64, fields: ItemFields<'_>) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO inventory_items (mservice_id, subarea_id, item_type_id, quantity,
                                         serial_number, product_id, json_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING inventory_item_id
            "#,
        )
        .bind(tenant_id)
        .bind(fields.subarea_id)
        .bind(fields.item_type_id)
        .bind(fields.quantity)
        .bind(fields.serial_number)
        .bind(fields.product_id)
        .bind(fields.json_data.cloned())
        .fetch_one(&self.pool)
        .await
        .map_err(write_failure)
    }

    async fn update_item(
        &self,
        tenant_id: i64,
        item_id: i64,
        version: i32,
        fields: ItemFields<'_>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET modified_at = NOW(), version = version + 1, subarea_id = $1, item_type_id = $2,
                quantity = $3, serial_number = $4, product_id = $5, json_data = $6
            WHERE inventory_item_id = $7 AND mservice_id = $8 AND version = $9 AND NOT is_deleted
            "#,
        )
        .bind(fields.subarea_id)
        .bind(fields.item_type_id)
        .bind(fields.quantity)
        .bind(fields.serial_number)
        .bind(fields.product_id)
        .bind(fields.json_data.cloned())
        .bind(item_id)
        .bind(tenant_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;

        Ok(result.rows_affected())
    }

    async fn delete_item(&self, tenant_id: i64, item_id: i64, version: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET deleted_at = NOW(), is_deleted = TRUE, version = version + 1
            WHERE inventory_item_id = $1 AND mservice_id = $2 AND version = $3 AND NOT is_deleted
            "#,
        )
        .bind(item_id)
        .bind(tenant_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;

        Ok(result.rows_affected())
    }

    async fn find_item(&self, tenant_id: i64, item_id: i64) -> Result<Option<InventoryItem>, AppError> {
        let sql = format!(
            "{} WHERE i.mservice_id = $1 AND i.inventory_item_id = $2 AND NOT i.is_deleted",
            ITEM_SELECT
        );
        sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(tenant_id)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_failure)
    }

    async fn list_items_by_product(&self, tenant_id: i64, product_id: i64) -> Result<Vec<InventoryItem>, AppError> {
        self.list_where(
            "WHERE i.mservice_id = $1 AND i.product_id = $2 AND NOT i.is_deleted",
            tenant_id,
            product_id,
        )
        .await
    }

    async fn list_items_by_subarea(&self, tenant_id: i64, subarea_id: i64) -> Result<Vec<InventoryItem>, AppError> {
        self.list_where(
            "WHERE i.mservice_id = $1 AND i.subarea_id = $2 AND NOT i.is_deleted",
            tenant_id,
            subarea_id,
        )
        .await
    }

    async fn list_items_by_facility(&self, tenant_id: i64, facility_id: i64) -> Result<Vec<InventoryItem>, AppError> {
        self.list_where(
            "JOIN subareas AS a ON a.subarea_id = i.subarea_id AND a.mservice_id = i.mservice_id \
             WHERE i.mservice_id = $1 AND a.facility_id = $2 AND NOT i.is_deleted",
            tenant_id,
            facility_id,
        )
        .await
    }
}
