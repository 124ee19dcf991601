// src/db/subarea_repo.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::{read_failure, write_failure},
        error::AppError,
    },
    models::subarea::Subarea,
};

/// The mutable part of a subarea row. The owning facility is fixed at creation.
#[derive(Debug, Clone, Copy)]
pub struct SubareaFields<'a> {
    pub parent_subarea_id: i64,
    pub position: i32,
    pub subarea_type_id: i32,
    pub subarea_name: &'a str,
    pub json_data: Option<&'a Value>,
}

#[async_trait]
pub trait SubareaStore: Send + Sync {
    async fn insert_subarea(&self, tenant_id: i64, facility_id: i64, fields: SubareaFields<'_>) -> Result<i64, AppError>;

    async fn update_subarea(
        &self,
        tenant_id: i64,
        subarea_id: i64,
        version: i32,
        fields: SubareaFields<'_>,
    ) -> Result<u64, AppError>;

    async fn delete_subarea(&self, tenant_id: i64, subarea_id: i64, version: i32) -> Result<u64, AppError>;

    async fn find_subarea(&self, tenant_id: i64, subarea_id: i64) -> Result<Option<Subarea>, AppError>;

    /// All live subareas of a facility, ordered by parent then position.
    async fn list_subareas(&self, tenant_id: i64, facility_id: i64) -> Result<Vec<Subarea>, AppError>;
}

// Outer joins keep a subarea readable when its facility or type is gone.
const SUBAREA_SELECT: &str = r#"
    SELECT s.subarea_id, s.mservice_id, s.facility_id, s.parent_subarea_id, s.position,
           s.subarea_type_id, s.subarea_name, s.json_data, s.version, s.created_at, s.modified_at,
           f.facility_name, t.subarea_type_name
    FROM subareas AS s
    LEFT JOIN facilities AS f
           ON f.facility_id = s.facility_id AND f.mservice_id = s.mservice_id AND NOT f.is_deleted
    LEFT JOIN subarea_types AS t
           ON t.mservice_id = s.mservice_id AND t.subarea_type_id = s.subarea_type_id AND NOT t.is_deleted
"#;

#[derive(Clone)]
pub struct SubareaRepository {
    pool: PgPool,
}

impl SubareaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubareaStore for SubareaRepository {
    async fn insert_subarea(&self, tenant_id: i64, facility_id: i64, fields: SubareaFields<'_>) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO subareas (mservice_id, facility_id, parent_subarea_id, position,
                                  subarea_type_id, subarea_name, json_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING subarea_id
            "#,
        )
        .bind(tenant_id)
        .bind(facility_id)
        .bind(fields.parent_subarea_id)
        .bind(fields.position)
        .bind(fields.subarea_type_id)
        .bind(fields.subarea_name)
        .bind(fields.json_data.cloned())
        .fetch_one(&self.pool)
        .await
        .map_err(write_failure)
    }

    async fn update_subarea(
        &self,
        tenant_id: i64,
        subarea_id: i64,
        version: i32,
        fields: SubareaFields<'_>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE subareas
            SET modified_at = NOW(), version = version + 1, parent_subarea_id = $1, position = $2,
                subarea_type_id = $3, subarea_name = $4, json_data = $5
            WHERE subarea_id = $6 AND mservice_id = $7 AND version = $8 AND NOT is_deleted
            "#,
        )
        .bind(fields.parent_subarea_id)
        .bind(fields.position)
        .bind(fields.subarea_type_id)
        .bind(fields.subarea_name)
        .bind(fields.json_data.cloned())
        .bind(subarea_id)
        .bind(tenant_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;

        Ok(result.rows_affected())
    }

    async fn delete_subarea(&self, tenant_id: i64, subarea_id: i64, version: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE subareas
            SET deleted_at = NOW(), is_deleted = TRUE, version = version + 1
            WHERE subarea_id = $1 AND mservice_id = $2 AND version = $3 AND NOT is_deleted
            "#,
        )
        .bind(subarea_id)
        .bind(tenant_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;

        Ok(result.rows_affected())
    }

    async fn find_subarea(&self, tenant_id: i64, subarea_id: i64) -> Result<Option<Subarea>, AppError> {
        let sql = format!(
            "{} WHERE s.mservice_id = $1 AND s.subarea_id = $2 AND NOT s.is_deleted",
            SUBAREA_SELECT
        );
        sqlx::query_as::<_, Subarea>(&sql)
            .bind(tenant_id)
            .bind(subarea_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_failure)
    }

    async fn list_subareas(&self, tenant_id: i64, facility_id: i64) -> Result<Vec<Subarea>, AppError> {
        let sql = format!(
            "{} WHERE s.mservice_id = $1 AND s.facility_id = $2 AND NOT s.is_deleted \
             ORDER BY s.parent_subarea_id, s.position",
            SUBAREA_SELECT
        );
        sqlx::query_as::<_, Subarea>(&sql)
            .bind(tenant_id)
            .bind(facility_id)
            .fetch_all(&self.pool)
            .await
            .map_err(read_failure)
    }
}
