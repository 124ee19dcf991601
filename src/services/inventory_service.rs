// src/services/inventory_service.rs

use validator::Validate;

use crate::{
    common::{db_utils::next_version, error::AppError},
    db::{ItemFields, ProductFields, Stores, SubareaFields},
    models::{
        catalog::{
            CreateItemTypeRequest, CreateSubareaTypeRequest, ItemType, SubareaType, UpdateItemTypeRequest,
            UpdateSubareaTypeRequest,
        },
        facility::{CreateFacilityRequest, Facility, FacilityWrapper, UpdateFacilityRequest},
        inventory::{CreateInventoryItemRequest, InventoryItem, UpdateInventoryItemRequest},
        product::{CreateProductRequest, Product, UpdateProductRequest},
        requests::{Created, DeleteRequest, KeyRequest, TenantRequest, Versioned},
        schema::{is_supported_entity, CreateEntitySchemaRequest, EntitySchema, UpdateEntitySchemaRequest},
        subarea::{CreateSubareaRequest, Subarea, UpdateSubareaRequest},
    },
    services::hierarchy,
};

// Every request reaching this service already carries the tenant from the
// verified token in `mservice_id`; nothing here looks at credentials.
#[derive(Clone)]
pub struct InventoryService {
    stores: Stores,
}

impl InventoryService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    // ---
    // Facilities
    // ---

    pub async fn create_facility(&self, req: &CreateFacilityRequest) -> Result<Created, AppError> {
        req.validate()?;
        let id = self
            .stores
            .facilities
            .insert_facility(req.mservice_id, req.facility_name.trim(), req.json_data.as_ref())
            .await?;
        Ok(Created { id, version: 1 })
    }

    pub async fn update_facility(&self, req: &UpdateFacilityRequest) -> Result<Versioned, AppError> {
        req.validate()?;
        let rows = self
            .stores
            .facilities
            .update_facility(
                req.mservice_id,
                req.facility_id,
                req.version,
                req.facility_name.trim(),
                req.json_data.as_ref(),
            )
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn delete_facility(&self, req: &DeleteRequest<i64>) -> Result<Versioned, AppError> {
        let rows = self
            .stores
            .facilities
            .delete_facility(req.mservice_id, req.key, req.version)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn get_facility(&self, req: &KeyRequest<i64>) -> Result<Facility, AppError> {
        self.stores
            .facilities
            .find_facility(req.mservice_id, req.key)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn get_facilities(&self, req: &TenantRequest) -> Result<Vec<Facility>, AppError> {
        self.stores.facilities.list_facilities(req.mservice_id).await
    }

    /// The facility with its subareas nested. Two independent reads: a failed
    /// facility lookup is returned as-is, a failed subarea read replaces it.
    pub async fn get_facility_wrapper(&self, req: &KeyRequest<i64>) -> Result<FacilityWrapper, AppError> {
        let facility = self.get_facility(req).await?;
        let subareas = self
            .stores
            .subareas
            .list_subareas(req.mservice_id, req.key)
            .await?;

        let tree = hierarchy::assemble(facility, &subareas);
        if tree.dropped > 0 {
            tracing::warn!(
                facility_id = req.key,
                dropped = tree.dropped,
                max_depth = hierarchy::MAX_TREE_DEPTH,
                "subareas unreachable or nested too deep left out of the facility tree"
            );
        }
        Ok(tree.wrapper)
    }

    // ---
    // Subarea types
    // ---

    pub async fn create_subarea_type(&self, req: &CreateSubareaTypeRequest) -> Result<Versioned, AppError> {
        req.validate()?;
        self.stores
            .catalog
            .insert_subarea_type(req.mservice_id, req.subarea_type_id, req.subarea_type_name.trim())
            .await?;
        Ok(Versioned { version: 1 })
    }

    pub async fn update_subarea_type(&self, req: &UpdateSubareaTypeRequest) -> Result<Versioned, AppError> {
        req.validate()?;
        let rows = self
            .stores
            .catalog
            .update_subarea_type(
                req.mservice_id,
                req.subarea_type_id,
                req.version,
                req.subarea_type_name.trim(),
            )
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn delete_subarea_type(&self, req: &DeleteRequest<i32>) -> Result<Versioned, AppError> {
        let rows = self
            .stores
            .catalog
            .delete_subarea_type(req.mservice_id, req.key, req.version)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn get_subarea_type(&self, req: &KeyRequest<i32>) -> Result<SubareaType, AppError> {
        self.stores
            .catalog
            .find_subarea_type(req.mservice_id, req.key)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn get_subarea_types(&self, req: &TenantRequest) -> Result<Vec<SubareaType>, AppError> {
        self.stores.catalog.list_subarea_types(req.mservice_id).await
    }

    // ---
    // Item types
    // ---

    pub async fn create_item_type(&self, req: &CreateItemTypeRequest) -> Result<Versioned, AppError> {
        req.validate()?;
        self.stores
            .catalog
            .insert_item_type(req.mservice_id, req.item_type_id, req.item_type_name.trim())
            .await?;
        Ok(Versioned { version: 1 })
    }

    pub async fn update_item_type(&self, req: &UpdateItemTypeRequest) -> Result<Versioned, AppError> {
        req.validate()?;
        let rows = self
            .stores
            .catalog
            .update_item_type(req.mservice_id, req.item_type_id, req.version, req.item_type_name.trim())
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn delete_item_type(&self, req: &DeleteRequest<i32>) -> Result<Versioned, AppError> {
        let rows = self
            .stores
            .catalog
            .delete_item_type(req.mservice_id, req.key, req.version)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn get_item_type(&self, req: &KeyRequest<i32>) -> Result<ItemType, AppError> {
        self.stores
            .catalog
            .find_item_type(req.mservice_id, req.key)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn get_item_types(&self, req: &TenantRequest) -> Result<Vec<ItemType>, AppError> {
        self.stores.catalog.list_item_types(req.mservice_id).await
    }

    // ---
    // Subareas
    // ---

    pub async fn create_subarea(&self, req: &CreateSubareaRequest) -> Result<Created, AppError> {
        req.validate()?;
        let fields = SubareaFields {
            parent_subarea_id: req.parent_subarea_id,
            position: req.position,
            subarea_type_id: req.subarea_type_id,
            subarea_name: req.subarea_name.trim(),
            json_data: req.json_data.as_ref(),
        };
        let id = self
            .stores
            .subareas
            .insert_subarea(req.mservice_id, req.facility_id, fields)
            .await?;
        Ok(Created { id, version: 1 })
    }

    pub async fn update_subarea(&self, req: &UpdateSubareaRequest) -> Result<Versioned, AppError> {
        req.validate()?;
        let fields = SubareaFields {
            parent_subarea_id: req.parent_subarea_id,
            position: req.position,
            subarea_type_id: req.subarea_type_id,
            subarea_name: req.subarea_name.trim(),
            json_data: req.json_data.as_ref(),
        };
        let rows = self
            .stores
            .subareas
            .update_subarea(req.mservice_id, req.subarea_id, req.version, fields)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn delete_subarea(&self, req: &DeleteRequest<i64>) -> Result<Versioned, AppError> {
        let rows = self
            .stores
            .subareas
            .delete_subarea(req.mservice_id, req.key, req.version)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn get_subarea(&self, req: &KeyRequest<i64>) -> Result<Subarea, AppError> {
        self.stores
            .subareas
            .find_subarea(req.mservice_id, req.key)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Flat list for one facility; `key` is the facility id.
    pub async fn get_subareas(&self, req: &KeyRequest<i64>) -> Result<Vec<Subarea>, AppError> {
        self.stores.subareas.list_subareas(req.mservice_id, req.key).await
    }

    // ---
    // Products
    // ---

    pub async fn create_product(&self, req: &CreateProductRequest) -> Result<Created, AppError> {
        req.validate()?;
        let fields = ProductFields {
            sku: &req.sku,
            product_name: req.product_name.trim(),
            comment: &req.comment,
            json_data: req.json_data.as_ref(),
        };
        let id = self.stores.products.insert_product(req.mservice_id, fields).await?;
        Ok(Created { id, version: 1 })
    }

    pub async fn update_product(&self, req: &UpdateProductRequest) -> Result<Versioned, AppError> {
        req.validate()?;
        let fields = ProductFields {
            sku: &req.sku,
            product_name: req.product_name.trim(),
            comment: &req.comment,
            json_data: req.json_data.as_ref(),
        };
        let rows = self
            .stores
            .products
            .update_product(req.mservice_id, req.product_id, req.version, fields)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn delete_product(&self, req: &DeleteRequest<i64>) -> Result<Versioned, AppError> {
        let rows = self
            .stores
            .products
            .delete_product(req.mservice_id, req.key, req.version)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn get_product(&self, req: &KeyRequest<i64>) -> Result<Product, AppError> {
        self.stores
            .products
            .find_product(req.mservice_id, req.key)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn get_products(&self, req: &TenantRequest) -> Result<Vec<Product>, AppError> {
        self.stores.products.list_products(req.mservice_id).await
    }

    // ---
    // Inventory items
    // ---

    pub async fn create_inventory_item(&self, req: &CreateInventoryItemRequest) -> Result<Created, AppError> {
        let fields = ItemFields {
            subarea_id: req.subarea_id,
            item_type_id: req.item_type_id,
            quantity: req.quantity,
            serial_number: &req.serial_number,
            product_id: req.product_id,
            json_data: req.json_data.as_ref(),
        };
        let id = self.stores.items.insert_item(req.mservice_id, fields).await?;
        Ok(Created { id, version: 1 })
    }

    pub async fn update_inventory_item(&self, req: &UpdateInventoryItemRequest) -> Result<Versioned, AppError> {
        let fields = ItemFields {
            subarea_id: req.subarea_id,
            item_type_id: req.item_type_id,
            quantity: req.quantity,
            serial_number: &req.serial_number,
            product_id: req.product_id,
            json_data: req.json_data.as_ref(),
        };
        let rows = self
            .stores
            .items
            .update_item(req.mservice_id, req.inventory_item_id, req.version, fields)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn delete_inventory_item(&self, req: &DeleteRequest<i64>) -> Result<Versioned, AppError> {
        let rows = self
            .stores
            .items
            .delete_item(req.mservice_id, req.key, req.version)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn get_inventory_item(&self, req: &KeyRequest<i64>) -> Result<InventoryItem, AppError> {
        self.stores
            .items
            .find_item(req.mservice_id, req.key)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn get_inventory_items_by_product(&self, req: &KeyRequest<i64>) -> Result<Vec<InventoryItem>, AppError> {
        self.stores.items.list_items_by_product(req.mservice_id, req.key).await
    }

    pub async fn get_inventory_items_by_subarea(&self, req: &KeyRequest<i64>) -> Result<Vec<InventoryItem>, AppError> {
        self.stores.items.list_items_by_subarea(req.mservice_id, req.key).await
    }

    pub async fn get_inventory_items_by_facility(&self, req: &KeyRequest<i64>) -> Result<Vec<InventoryItem>, AppError> {
        self.stores.items.list_items_by_facility(req.mservice_id, req.key).await
    }

    // ---
    // Entity schemas
    // ---

    pub async fn create_entity_schema(&self, req: &CreateEntitySchemaRequest) -> Result<Versioned, AppError> {
        req.validate()?;
        let entity_name = req.entity_name.trim();
        if !is_supported_entity(entity_name) {
            return Err(AppError::UnsupportedEntity(entity_name.to_string()));
        }
        self.stores
            .schemas
            .insert_schema(req.mservice_id, entity_name, &req.json_schema)
            .await?;
        Ok(Versioned { version: 1 })
    }

    pub async fn update_entity_schema(&self, req: &UpdateEntitySchemaRequest) -> Result<Versioned, AppError> {
        req.validate()?;
        let rows = self
            .stores
            .schemas
            .update_schema(req.mservice_id, req.entity_name.trim(), req.version, &req.json_schema)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn delete_entity_schema(&self, req: &DeleteRequest<String>) -> Result<Versioned, AppError> {
        let rows = self
            .stores
            .schemas
            .delete_schema(req.mservice_id, req.key.trim(), req.version)
            .await?;
        let version = next_version(req.version, rows)?;
        Ok(Versioned { version })
    }

    pub async fn get_entity_schema(&self, req: &KeyRequest<String>) -> Result<EntitySchema, AppError> {
        self.stores
            .schemas
            .find_schema(req.mservice_id, req.key.trim())
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn get_entity_schemas(&self, req: &TenantRequest) -> Result<Vec<EntitySchema>, AppError> {
        self.stores.schemas.list_schemas(req.mservice_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SubareaStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    const TENANT: i64 = 7;

    fn service() -> InventoryService {
        InventoryService::new(Stores::memory())
    }

    fn key<K>(key: K) -> KeyRequest<K> {
        KeyRequest { mservice_id: TENANT, key }
    }

    fn tenant() -> TenantRequest {
        TenantRequest { mservice_id: TENANT }
    }

    async fn facility(svc: &InventoryService, name: &str) -> i64 {
        let req = CreateFacilityRequest {
            mservice_id: TENANT,
            facility_name: name.into(),
            json_data: None,
        };
        svc.create_facility(&req).await.unwrap().id
    }

    async fn subarea(svc: &InventoryService, facility_id: i64, parent: i64, position: i32, name: &str) -> i64 {
        let req = CreateSubareaRequest {
            mservice_id: TENANT,
            facility_id,
            parent_subarea_id: parent,
            position,
            subarea_type_id: 1,
            subarea_name: name.into(),
            json_data: None,
        };
        svc.create_subarea(&req).await.unwrap().id
    }

    #[tokio::test]
    async fn create_stores_trimmed_name_at_version_one() {
        let svc = service();
        let req = CreateFacilityRequest {
            mservice_id: TENANT,
            facility_name: "  North yard \n".into(),
            json_data: Some(json!({"dock": 4})),
        };
        let created = svc.create_facility(&req).await.unwrap();
        assert_eq!(created.version, 1);

        let read = svc.get_facility(&key(created.id)).await.unwrap();
        assert_eq!(read.facility_name, "North yard");
        assert_eq!(read.json_data, Some(json!({"dock": 4})));
        assert_eq!(read.version, 1);
    }

    #[tokio::test]
    async fn blank_required_field_is_a_validation_failure() {
        let svc = service();
        let req = CreateProductRequest {
            mservice_id: TENANT,
            sku: "SKU-1".into(),
            product_name: "   ".into(),
            ..Default::default()
        };
        let err = svc.create_product(&req).await.unwrap_err();
        assert_eq!(err, AppError::Validation("product_name missing".into()));
        assert!(svc.get_products(&tenant()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn updates_apply_once_per_version() {
        let svc = service();
        let id = facility(&svc, "Depot").await;
        let update = UpdateFacilityRequest {
            mservice_id: TENANT,
            facility_id: id,
            version: 1,
            facility_name: "Depot 2".into(),
            json_data: None,
        };
        assert_eq!(svc.update_facility(&update).await.unwrap().version, 2);
        assert_eq!(svc.update_facility(&update).await.unwrap_err(), AppError::NotFound);
    }

    #[tokio::test]
    async fn concurrent_updates_at_one_version_let_exactly_one_through() {
        let svc = service();
        let id = facility(&svc, "Depot").await;
        let update = |name: &str| UpdateFacilityRequest {
            mservice_id: TENANT,
            facility_id: id,
            version: 1,
            facility_name: name.into(),
            json_data: None,
        };
        let (left, right) = (update("Left"), update("Right"));

        let (a, b) = tokio::join!(svc.update_facility(&left), svc.update_facility(&right));

        let outcomes = [a, b];
        let winners: Vec<_> = outcomes.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].version, 2);
        assert!(outcomes.iter().any(|r| r.as_ref().err() == Some(&AppError::NotFound)));

        let read = svc.get_facility(&key(id)).await.unwrap();
        assert_eq!(read.version, 2);
        assert!(read.facility_name == "Left" || read.facility_name == "Right");
    }

    #[tokio::test]
    async fn soft_deleted_rows_leave_every_read() {
        let svc = service();
        let req = CreateProductRequest {
            mservice_id: TENANT,
            sku: "SKU-9".into(),
            product_name: "Bolt".into(),
            ..Default::default()
        };
        let id = svc.create_product(&req).await.unwrap().id;

        let deleted = svc
            .delete_product(&DeleteRequest { mservice_id: TENANT, key: id, version: 1 })
            .await
            .unwrap();
        assert_eq!(deleted.version, 2);
        assert_eq!(svc.get_product(&key(id)).await.unwrap_err(), AppError::NotFound);
        assert!(svc.get_products(&tenant()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn caller_keyed_catalog_rejects_a_second_create() {
        let svc = service();
        let req = CreateSubareaTypeRequest {
            mservice_id: TENANT,
            subarea_type_id: 3,
            subarea_type_name: "shelf".into(),
        };
        assert_eq!(svc.create_subarea_type(&req).await.unwrap().version, 1);
        assert_eq!(svc.create_subarea_type(&req).await.unwrap_err().code(), 501);
        assert_eq!(svc.get_subarea_type(&key(3)).await.unwrap().subarea_type_name, "shelf");
    }

    #[tokio::test]
    async fn item_reads_carry_type_and_product_names() {
        let svc = service();
        svc.create_item_type(&CreateItemTypeRequest {
            mservice_id: TENANT,
            item_type_id: 2,
            item_type_name: "pallet".into(),
        })
        .await
        .unwrap();
        let product_id = svc
            .create_product(&CreateProductRequest {
                mservice_id: TENANT,
                product_name: "Bolt".into(),
                ..Default::default()
            })
            .await
            .unwrap()
            .id;
        let facility_id = facility(&svc, "Depot").await;
        let subarea_id = subarea(&svc, facility_id, 0, 0, "Aisle 1").await;

        let item_id = svc
            .create_inventory_item(&CreateInventoryItemRequest {
                mservice_id: TENANT,
                subarea_id,
                item_type_id: 2,
                quantity: 40,
                serial_number: "SN-1".into(),
                product_id,
                json_data: None,
            })
            .await
            .unwrap()
            .id;

        let item = svc.get_inventory_item(&key(item_id)).await.unwrap();
        assert_eq!(item.item_type_name.as_deref(), Some("pallet"));
        assert_eq!(item.product_name.as_deref(), Some("Bolt"));

        // A dangling type reference does not fail the read.
        let orphan_id = svc
            .create_inventory_item(&CreateInventoryItemRequest {
                mservice_id: TENANT,
                subarea_id,
                item_type_id: 99,
                ..Default::default()
            })
            .await
            .unwrap()
            .id;
        assert_eq!(svc.get_inventory_item(&key(orphan_id)).await.unwrap().item_type_name, None);

        assert_eq!(svc.get_inventory_items_by_product(&key(product_id)).await.unwrap().len(), 1);
        assert_eq!(svc.get_inventory_items_by_subarea(&key(subarea_id)).await.unwrap().len(), 2);
        assert_eq!(svc.get_inventory_items_by_facility(&key(facility_id)).await.unwrap().len(), 2);
        assert!(svc.get_inventory_items_by_facility(&key(facility_id + 1000)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn subareas_list_by_parent_then_position() {
        let svc = service();
        let facility_id = facility(&svc, "Depot").await;
        let b = subarea(&svc, facility_id, 0, 1, "B").await;
        let a = subarea(&svc, facility_id, 0, 0, "A").await;
        subarea(&svc, facility_id, a, 0, "A1").await;

        let names: Vec<String> = svc
            .get_subareas(&key(facility_id))
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.subarea_name)
            .collect();
        assert_eq!(names, ["A", "B", "A1"]);
        assert_eq!(
            svc.get_subarea(&key(b)).await.unwrap().facility_name.as_deref(),
            Some("Depot")
        );
    }

    #[tokio::test]
    async fn wrapper_nests_the_tree() {
        let svc = service();
        let facility_id = facility(&svc, "Depot").await;
        let a = subarea(&svc, facility_id, 0, 0, "A").await;
        subarea(&svc, facility_id, 0, 1, "B").await;
        subarea(&svc, facility_id, a, 0, "C").await;
        subarea(&svc, facility_id, 5_000, 0, "Lost").await;

        let wrapper = svc.get_facility_wrapper(&key(facility_id)).await.unwrap();
        let roots: Vec<&str> = wrapper.child_subareas.iter().map(|s| s.subarea_name.as_str()).collect();
        assert_eq!(roots, ["A", "B"]);
        assert_eq!(wrapper.child_subareas[0].child_subareas[0].subarea_name, "C");
    }

    #[tokio::test]
    async fn wrapper_of_a_missing_facility_is_not_found() {
        let svc = service();
        assert_eq!(svc.get_facility_wrapper(&key(404)).await.unwrap_err(), AppError::NotFound);
    }

    struct BrokenSubareas;

    #[async_trait]
    impl SubareaStore for BrokenSubareas {
        async fn insert_subarea(&self, _: i64, _: i64, _: SubareaFields<'_>) -> Result<i64, AppError> {
            Err(AppError::Internal("connection reset".into()))
        }
        async fn update_subarea(&self, _: i64, _: i64, _: i32, _: SubareaFields<'_>) -> Result<u64, AppError> {
            Err(AppError::Internal("connection reset".into()))
        }
        async fn delete_subarea(&self, _: i64, _: i64, _: i32) -> Result<u64, AppError> {
            Err(AppError::Internal("connection reset".into()))
        }
        async fn find_subarea(&self, _: i64, _: i64) -> Result<Option<Subarea>, AppError> {
            Err(AppError::Internal("connection reset".into()))
        }
        async fn list_subareas(&self, _: i64, _: i64) -> Result<Vec<Subarea>, AppError> {
            Err(AppError::Internal("connection reset".into()))
        }
    }

    #[tokio::test]
    async fn wrapper_reports_a_failed_subarea_read() {
        let stores = Stores {
            subareas: Arc::new(BrokenSubareas),
            ..Stores::memory()
        };
        let svc = InventoryService::new(stores);
        let facility_id = facility(&svc, "Depot").await;

        let err = svc.get_facility_wrapper(&key(facility_id)).await.unwrap_err();
        assert_eq!(err, AppError::Internal("connection reset".into()));
        assert_eq!(err.code(), 500);
    }

    #[tokio::test]
    async fn schemas_are_limited_to_known_entities() {
        let svc = service();
        let unsupported = CreateEntitySchemaRequest {
            mservice_id: TENANT,
            entity_name: "customer".into(),
            json_schema: json!({"type": "object"}),
        };
        let err = svc.create_entity_schema(&unsupported).await.unwrap_err();
        assert_eq!(err, AppError::UnsupportedEntity("customer".into()));
        assert_eq!(err.code(), 401);

        let blank = CreateEntitySchemaRequest {
            mservice_id: TENANT,
            entity_name: " ".into(),
            json_schema: json!({"type": "object"}),
        };
        assert_eq!(svc.create_entity_schema(&blank).await.unwrap_err().code(), 510);

        let supported = CreateEntitySchemaRequest {
            mservice_id: TENANT,
            entity_name: " product ".into(),
            json_schema: json!({"type": "object"}),
        };
        assert_eq!(svc.create_entity_schema(&supported).await.unwrap().version, 1);

        let update = UpdateEntitySchemaRequest {
            mservice_id: TENANT,
            entity_name: "product".into(),
            version: 1,
            json_schema: json!({"type": "object", "required": ["color"]}),
        };
        assert_eq!(svc.update_entity_schema(&update).await.unwrap().version, 2);
        let stored = svc.get_entity_schema(&key("product".to_string())).await.unwrap();
        assert_eq!(stored.json_schema["required"], json!(["color"]));
        assert_eq!(svc.get_entity_schemas(&tenant()).await.unwrap().len(), 1);
    }
}
