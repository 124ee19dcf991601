// src/models/requests.rs

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use validator::ValidationError;

// ---
// Tenant stamping
// ---

/// Every request structure carries the tenant field the dispatcher overwrites
/// with the tenant from the verified claims, plus a salient key for the log.
pub trait TenantScoped {
    fn stamp_tenant(&mut self, tenant_id: i64);
    fn log_key(&self) -> String;
}

macro_rules! tenant_scoped {
    ($ty:ty, $key:ident) => {
        impl crate::models::requests::TenantScoped for $ty {
            fn stamp_tenant(&mut self, tenant_id: i64) {
                self.mservice_id = tenant_id;
            }

            fn log_key(&self) -> String {
                self.$key.to_string()
            }
        }
    };
}
pub(crate) use tenant_scoped;

/// Required textual fields must survive trimming.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("missing"));
    }
    Ok(())
}

// ---
// Generic request shapes
// ---

/// A tenant-wide listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantRequest {
    pub mservice_id: i64,
}

impl TenantScoped for TenantRequest {
    fn stamp_tenant(&mut self, tenant_id: i64) {
        self.mservice_id = tenant_id;
    }

    fn log_key(&self) -> String {
        self.mservice_id.to_string()
    }
}

/// Lookup by identifying key, or listing filtered by a foreign key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyRequest<K> {
    pub mservice_id: i64,
    pub key: K,
}

impl<K> KeyRequest<K> {
    pub fn new(key: K) -> Self {
        Self { mservice_id: 0, key }
    }
}

impl<K: Display> TenantScoped for KeyRequest<K> {
    fn stamp_tenant(&mut self, tenant_id: i64) {
        self.mservice_id = tenant_id;
    }

    fn log_key(&self) -> String {
        self.key.to_string()
    }
}

/// Soft delete of the row identified by `key`, at the version the caller read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteRequest<K> {
    pub mservice_id: i64,
    pub key: K,
    pub version: i32,
}

impl<K> DeleteRequest<K> {
    pub fn new(key: K, version: i32) -> Self {
        Self { mservice_id: 0, key, version }
    }
}

impl<K: Display> TenantScoped for DeleteRequest<K> {
    fn stamp_tenant(&mut self, tenant_id: i64) {
        self.mservice_id = tenant_id;
    }

    fn log_key(&self) -> String {
        self.key.to_string()
    }
}

// ---
// Generic response payloads
// ---

/// A freshly inserted row with a generated id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    pub id: i64,
    pub version: i32,
}

/// The version a row holds after a create (caller-keyed), update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versioned {
    pub version: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerVersion {
    pub server_version: String,
    pub server_uptime: i64,
}
