// src/middleware/rbac.rs

use crate::models::auth::Tier;

/// Every entry point the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateFacility,
    UpdateFacility,
    DeleteFacility,
    GetFacility,
    GetFacilities,
    GetFacilityWrapper,

    CreateSubareaType,
    UpdateSubareaType,
    DeleteSubareaType,
    GetSubareaType,
    GetSubareaTypes,

    CreateItemType,
    UpdateItemType,
    DeleteItemType,
    GetItemType,
    GetItemTypes,

    CreateSubarea,
    UpdateSubarea,
    DeleteSubarea,
    GetSubarea,
    GetSubareas,

    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    GetProduct,
    GetProducts,

    CreateInventoryItem,
    UpdateInventoryItem,
    DeleteInventoryItem,
    GetInventoryItem,
    GetInventoryItemsByProduct,
    GetInventoryItemsBySubarea,
    GetInventoryItemsByFacility,

    CreateEntitySchema,
    UpdateEntitySchema,
    DeleteEntitySchema,
    GetEntitySchema,
    GetEntitySchemas,

    GetServerVersion,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        use Operation::*;
        match self {
            CreateFacility => "CreateFacility",
            UpdateFacility => "UpdateFacility",
            DeleteFacility => "DeleteFacility",
            GetFacility => "GetFacility",
            GetFacilities => "GetFacilities",
            GetFacilityWrapper => "GetFacilityWrapper",
            CreateSubareaType => "CreateSubareaType",
            UpdateSubareaType => "UpdateSubareaType",
            DeleteSubareaType => "DeleteSubareaType",
            GetSubareaType => "GetSubareaType",
            GetSubareaTypes => "GetSubareaTypes",
            CreateItemType => "CreateItemType",
            UpdateItemType => "UpdateItemType",
            DeleteItemType => "DeleteItemType",
            GetItemType => "GetItemType",
            GetItemTypes => "GetItemTypes",
            CreateSubarea => "CreateSubarea",
            UpdateSubarea => "UpdateSubarea",
            DeleteSubarea => "DeleteSubarea",
            GetSubarea => "GetSubarea",
            GetSubareas => "GetSubareas",
            CreateProduct => "CreateProduct",
            UpdateProduct => "UpdateProduct",
            DeleteProduct => "DeleteProduct",
            GetProduct => "GetProduct",
            GetProducts => "GetProducts",
            CreateInventoryItem => "CreateInventoryItem",
            UpdateInventoryItem => "UpdateInventoryItem",
            DeleteInventoryItem => "DeleteInventoryItem",
            GetInventoryItem => "GetInventoryItem",
            GetInventoryItemsByProduct => "GetInventoryItemsByProduct",
            GetInventoryItemsBySubarea => "GetInventoryItemsBySubarea",
            GetInventoryItemsByFacility => "GetInventoryItemsByFacility",
            CreateEntitySchema => "CreateEntitySchema",
            UpdateEntitySchema => "UpdateEntitySchema",
            DeleteEntitySchema => "DeleteEntitySchema",
            GetEntitySchema => "GetEntitySchema",
            GetEntitySchemas => "GetEntitySchemas",
            GetServerVersion => "GetServerVersion",
        }
    }

    /// The minimum tier the operation needs; `None` means no credential at all.
    pub fn required_tier(&self) -> Option<Tier> {
        use Operation::*;
        match self {
            CreateFacility | UpdateFacility | DeleteFacility => Some(Tier::Admin),

            CreateSubareaType | UpdateSubareaType | DeleteSubareaType | CreateItemType
            | UpdateItemType | DeleteItemType | CreateSubarea | UpdateSubarea | DeleteSubarea
            | CreateProduct | UpdateProduct | DeleteProduct | CreateInventoryItem
            | UpdateInventoryItem | DeleteInventoryItem | CreateEntitySchema
            | UpdateEntitySchema | DeleteEntitySchema => Some(Tier::ReadWrite),

            GetFacility | GetFacilities | GetFacilityWrapper | GetSubareaType | GetSubareaTypes
            | GetItemType | GetItemTypes | GetSubarea | GetSubareas | GetProduct | GetProducts
            | GetInventoryItem | GetInventoryItemsByProduct | GetInventoryItemsBySubarea
            | GetInventoryItemsByFacility | GetEntitySchema | GetEntitySchemas => {
                Some(Tier::ReadOnly)
            }

            GetServerVersion => None,
        }
    }
}

/// Does a credential holding `tier` reach `required`? A missing or
/// unrecognised tier authorizes nothing.
pub fn authorize(tier: Option<Tier>, required: Tier) -> bool {
    match tier {
        Some(held) => held >= required,
        None => false,
    }
}
