// src/db/catalog_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::{read_failure, write_failure},
        error::AppError,
    },
    models::catalog::{ItemType, SubareaType},
};

// Type catalogs are keyed by (tenant, caller-chosen id); inserting a key that
// already exists, even soft-deleted, fails at the store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // --- Subarea types ---
    async fn insert_subarea_type(&self, tenant_id: i64, type_id: i32, name: &str) -> Result<(), AppError>;
    async fn update_subarea_type(&self, tenant_id: i64, type_id: i32, version: i32, name: &str) -> Result<u64, AppError>;
    async fn delete_subarea_type(&self, tenant_id: i64, type_id: i32, version: i32) -> Result<u64, AppError>;
    async fn find_subarea_type(&self, tenant_id: i64, type_id: i32) -> Result<Option<SubareaType>, AppError>;
    async fn list_subarea_types(&self, tenant_id: i64) -> Result<Vec<SubareaType>, AppError>;

    // --- Item types ---
    async fn insert_item_type(&self, tenant_id: i64, type_id: i32, name: &str) -> Result<(), AppError>;
    async fn update_item_type(&self, tenant_id: i64, type_id: i32, version: i32, name: &str) -> Result<u64, AppError>;
    async fn delete_item_type(&self, tenant_id: i64, type_id: i32, version: i32) -> Result<u64, AppError>;
    async fn find_item_type(&self, tenant_id: i64, type_id: i32) -> Result<Option<ItemType>, AppError>;
    async fn list_item_types(&self, tenant_id: i64) -> Result<Vec<ItemType>, AppError>;
}

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    // ---
    // Subarea types
    // ---

    async fn insert_subarea_type(&self, tenant_id: i64, type_id: i32, name: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO subarea_types (mservice_id, subarea_type_id, subarea_type_name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(tenant_id)
        .bind(type_id)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;
        Ok(())
    }

    async fn update_subarea_type(&self, tenant_id: i64, type_id: i32, version: i32, name: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE subarea_types
            SET modified_at = NOW(), version = version + 1, subarea_type_name = $1
            WHERE mservice_id = $2 AND subarea_type_id = $3 AND version = $4 AND NOT is_deleted
            "#,
        )
        .bind(name)
        .bind(tenant_id)
        .bind(type_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;
        Ok(result.rows_affected())
    }

    async fn delete_subarea_type(&self, tenant_id: i64, type_id: i32, version: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE subarea_types
            SET deleted_at = NOW(), is_deleted = TRUE, version = version + 1
            WHERE mservice_id = $1 AND subarea_type_id = $2 AND version = $3 AND NOT is_deleted
            "#,
        )
        .bind(tenant_id)
        .bind(type_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;
        Ok(result.rows_affected())
    }

    async fn find_subarea_type(&self, tenant_id: i64, type_id: i32) -> Result<Option<SubareaType>, AppError> {
        sqlx::query_as::<_, SubareaType>(
            r#"
            SELECT mservice_id, subarea_type_id, subarea_type_name, version, created_at, modified_at
            FROM subarea_types
            WHERE mservice_id = $1 AND subarea_type_id = $2 AND NOT is_deleted
            "#,
        )
        .bind(tenant_id)
        .bind(type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_failure)
    }

    async fn list_subarea_types(&self, tenant_id: i64) -> Result<Vec<SubareaType>, AppError> {
        sqlx::query_as::<_, SubareaType>(
            r#"
            SELECT mservice_id, subarea_type_id, subarea_type_name, version, created_at, modified_at
            FROM subarea_types
            WHERE mservice_id = $1 AND NOT is_deleted
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_failure)
    }

    // ---
    // Item types
    // ---

    async fn insert_item_type(&self, tenant_id: i64, type_id: i32, name: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO item_types (mservice_id, item_type_id, item_type_name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(tenant_id)
        .bind(type_id)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;
        Ok(())
    }

    async fn update_item_type(&self, tenant_id: i64, type_id: i32, version: i32, name: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE item_types
            SET modified_at = NOW(), version = version + 1, item_type_name = $1
            WHERE mservice_id = $2 AND item_type_id = $3 AND version = $4 AND NOT is_deleted
            "#,
        )
        .bind(name)
        .bind(tenant_id)
        .bind(type_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;
        Ok(result.rows_affected())
    }

    async fn delete_item_type(&self, tenant_id: i64, type_id: i32, version: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE item_types
            SET deleted_at = NOW(), is_deleted = TRUE, version = version + 1
            WHERE mservice_id = $1 AND item_type_id = $2 AND version = $3 AND NOT is_deleted
            "#,
        )
        .bind(tenant_id)
        .bind(type_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;
        Ok(result.rows_affected())
    }

    async fn find_item_type(&self, tenant_id: i64, type_id: i32) -> Result<Option<ItemType>, AppError> {
        sqlx::query_as::<_, ItemType>(
            r#"
            SELECT mservice_id, item_type_id, item_type_name, version, created_at, modified_at
            FROM item_types
            WHERE mservice_id = $1 AND item_type_id = $2 AND NOT is_deleted
            "#,
        )
        .bind(tenant_id)
        .bind(type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_failure)
    }

    async fn list_item_types(&self, tenant_id: i64) -> Result<Vec<ItemType>, AppError> {
        sqlx::query_as::<_, ItemType>(
            r#"
            SELECT mservice_id, item_type_id, item_type_name, version, created_at, modified_at
            FROM item_types
            WHERE mservice_id = $1 AND NOT is_deleted
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_failure)
    }
}
