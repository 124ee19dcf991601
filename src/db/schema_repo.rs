// src/db/schema_repo.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::{read_failure, write_failure},
        error::AppError,
    },
    models::schema::EntitySchema,
};

#[async_trait]
pub trait SchemaStore: Send + Sync {
    async fn insert_schema(&self, tenant_id: i64, entity_name: &str, json_schema: &Value) -> Result<(), AppError>;
    async fn update_schema(&self, tenant_id: i64, entity_name: &str, version: i32, json_schema: &Value) -> Result<u64, AppError>;
    async fn delete_schema(&self, tenant_id: i64, entity_name: &str, version: i32) -> Result<u64, AppError>;
    async fn find_schema(&self, tenant_id: i64, entity_name: &str) -> Result<Option<EntitySchema>, AppError>;
    async fn list_schemas(&self, tenant_id: i64) -> Result<Vec<EntitySchema>, AppError>;
}

#[derive(Clone)]
pub struct SchemaRepository {
    pool: PgPool,
}

impl SchemaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaStore for SchemaRepository {
    async fn insert_schema(&self, tenant_id: i64, entity_name: &str, json_schema: &Value) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO entity_schemas (mservice_id, entity_name, json_schema)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(tenant_id)
        .bind(entity_name)
        .bind(json_schema)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;
        Ok(())
    }

    async fn update_schema(&self, tenant_id: i64, entity_name: &str, version: i32, json_schema: &Value) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE entity_schemas
            SET modified_at = NOW(), version = version + 1, json_schema = $1
            WHERE mservice_id = $2 AND entity_name = $3 AND version = $4 AND NOT is_deleted
            "#,
        )
        .bind(json_schema)
        .bind(tenant_id)
        .bind(entity_name)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;
        Ok(result.rows_affected())
    }

    async fn delete_schema(&self, tenant_id: i64, entity_name: &str, version: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE entity_schemas
            SET deleted_at = NOW(), is_deleted = TRUE, version = version + 1
            WHERE mservice_id = $1 AND entity_name = $2 AND version = $3 AND NOT is_deleted
            "#,
        )
        .bind(tenant_id)
        .bind(entity_name)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;
        Ok(result.rows_affected())
    }

    async fn find_schema(&self, tenant_id: i64, entity_name: &str) -> Result<Option<EntitySchema>, AppError> {
        sqlx::query_as::<_, EntitySchema>(
            r#"
            SELECT mservice_id, entity_name, json_schema, version, created_at, modified_at
            FROM entity_schemas
            WHERE mservice_id = $1 AND entity_name = $2 AND NOT is_deleted
            "#,
        )
        .bind(tenant_id)
        .bind(entity_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_failure)
    }

    async fn list_schemas(&self, tenant_id: i64) -> Result<Vec<EntitySchema>, AppError> {
        sqlx::query_as::<_, EntitySchema>(
            r#"
            SELECT mservice_id, entity_name, json_schema, version, created_at, modified_at
            FROM entity_schemas
            WHERE mservice_id = $1 AND NOT is_deleted
            ORDER BY entity_name
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_failure)
    }
}
