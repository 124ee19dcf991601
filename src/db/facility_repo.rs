// src/db/facility_repo.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::{read_failure, write_failure},
        error::AppError,
    },
    models::facility::Facility,
};

// Mutations return the number of rows the version-checked statement touched;
// the gateway turns that into a new version or NotFound.
#[async_trait]
pub trait FacilityStore: Send + Sync {
    async fn insert_facility(&self, tenant_id: i64, name: &str, json_data: Option<&Value>) -> Result<i64, AppError>;

    async fn update_facility(
        &self,
        tenant_id: i64,
        facility_id: i64,
        version: i32,
        name: &str,
        json_data: Option<&Value>,
    ) -> Result<u64, AppError>;

    async fn delete_facility(&self, tenant_id: i64, facility_id: i64, version: i32) -> Result<u64, AppError>;

    async fn find_facility(&self, tenant_id: i64, facility_id: i64) -> Result<Option<Facility>, AppError>;

    async fn list_facilities(&self, tenant_id: i64) -> Result<Vec<Facility>, AppError>;
}

const FACILITY_COLUMNS: &str =
    "facility_id, mservice_id, facility_name, json_data, version, created_at, modified_at";

#[derive(Clone)]
pub struct FacilityRepository {
    pool: PgPool,
}

impl FacilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FacilityStore for FacilityRepository {
    async fn insert_facility(&self, tenant_id: i64, name: &str, json_data: Option<&Value>) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO facilities (mservice_id, facility_name, json_data)
            VALUES ($1, $2, $3)
            RETURNING facility_id
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .bind(json_data.cloned())
        .fetch_one(&self.pool)
        .await
        .map_err(write_failure)
    }

    async fn update_facility(
        &self,
        tenant_id: i64,
        facility_id: i64,
        version: i32,
        name: &str,
        json_data: Option<&Value>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE facilities
            SET modified_at = NOW(), version = version + 1, facility_name = $1, json_data = $2
            WHERE facility_id = $3 AND mservice_id = $4 AND version = $5 AND NOT is_deleted
            "#,
        )
        .bind(name)
        .bind(json_data.cloned())
        .bind(facility_id)
        .bind(tenant_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;

        Ok(result.rows_affected())
    }

    async fn delete_facility(&self, tenant_id: i64, facility_id: i64, version: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE facilities
            SET deleted_at = NOW(), is_deleted = TRUE, version = version + 1
            WHERE facility_id = $1 AND mservice_id = $2 AND version = $3 AND NOT is_deleted
            "#,
        )
        .bind(facility_id)
        .bind(tenant_id)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(write_failure)?;

        Ok(result.rows_affected())
    }

    async fn find_facility(&self, tenant_id: i64, facility_id: i64) -> Result<Option<Facility>, AppError> {
        let sql = format!(
            "SELECT {} FROM facilities WHERE facility_id = $1 AND mservice_id = $2 AND NOT is_deleted",
            FACILITY_COLUMNS
        );
        sqlx::query_as::<_, Facility>(&sql)
            .bind(facility_id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_failure)
    }

    async fn list_facilities(&self, tenant_id: i64) -> Result<Vec<Facility>, AppError> {
        let sql = format!(
            "SELECT {} FROM facilities WHERE mservice_id = $1 AND NOT is_deleted",
            FACILITY_COLUMNS
        );
        sqlx::query_as::<_, Facility>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(read_failure)
    }
}
