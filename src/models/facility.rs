// src/models/facility.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::Validate;

use crate::models::requests::{not_blank, tenant_scoped};
use crate::models::subarea::Subarea;

// --- Facility: root of a physical-location hierarchy ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub facility_id: i64,
    pub mservice_id: i64,
    pub facility_name: String,
    pub json_data: Option<Value>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

// --- Wrapper: a facility plus its nested subarea tree ---
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityWrapper {
    pub facility_id: i64,
    pub mservice_id: i64,
    pub facility_name: String,
    pub json_data: Option<Value>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub child_subareas: Vec<SubareaWrapper>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubareaWrapper {
    pub subarea_id: i64,
    pub mservice_id: i64,
    pub facility_id: i64,
    pub parent_subarea_id: i64,
    pub position: i32,
    pub subarea_type_id: i32,
    pub subarea_type_name: Option<String>,
    pub subarea_name: String,
    pub json_data: Option<Value>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub child_subareas: Vec<SubareaWrapper>,
}

impl From<Facility> for FacilityWrapper {
    fn from(f: Facility) -> Self {
        Self {
            facility_id: f.facility_id,
            mservice_id: f.mservice_id,
            facility_name: f.facility_name,
            json_data: f.json_data,
            version: f.version,
            created_at: f.created_at,
            modified_at: f.modified_at,
            child_subareas: Vec::new(),
        }
    }
}

impl From<&Subarea> for SubareaWrapper {
    fn from(s: &Subarea) -> Self {
        Self {
            subarea_id: s.subarea_id,
            mservice_id: s.mservice_id,
            facility_id: s.facility_id,
            parent_subarea_id: s.parent_subarea_id,
            position: s.position,
            subarea_type_id: s.subarea_type_id,
            subarea_type_name: s.subarea_type_name.clone(),
            subarea_name: s.subarea_name.clone(),
            json_data: s.json_data.clone(),
            version: s.version,
            created_at: s.created_at,
            modified_at: s.modified_at,
            child_subareas: Vec::new(),
        }
    }
}

// ---
// Requests
// ---

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateFacilityRequest {
    pub mservice_id: i64,
    #[validate(custom(function = "not_blank"))]
    pub facility_name: String,
    pub json_data: Option<Value>,
}
tenant_scoped!(CreateFacilityRequest, facility_name);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateFacilityRequest {
    pub mservice_id: i64,
    pub facility_id: i64,
    pub version: i32,
    #[validate(custom(function = "not_blank"))]
    pub facility_name: String,
    pub json_data: Option<Value>,
}
tenant_scoped!(UpdateFacilityRequest, facility_id);
