// src/db/memory.rs

// In-memory stand-in for the Postgres repositories, used by the service,
// dispatcher and router tests. It follows the same rules as the SQL: every
// statement is tenant-scoped, updates are version-checked, deletes are soft
// and name columns are resolved at read time like the outer joins.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use crate::{
    common::error::AppError,
    db::{
        CatalogStore, FacilityStore, InventoryStore, ItemFields, ProductFields, ProductStore, SchemaStore,
        SubareaFields, SubareaStore,
    },
    models::{
        catalog::{ItemType, SubareaType},
        facility::Facility,
        inventory::InventoryItem,
        product::Product,
        schema::EntitySchema,
        subarea::Subarea,
    },
};

struct Row<T> {
    value: T,
    deleted: bool,
}

impl<T> Row<T> {
    fn new(value: T) -> Self {
        Self { value, deleted: false }
    }
}

trait Record {
    fn tenant(&self) -> i64;
    fn version(&self) -> i32;
    fn bump(&mut self);
}

macro_rules! record {
    ($($ty:ty),*) => {$(
        impl Record for $ty {
            fn tenant(&self) -> i64 {
                self.mservice_id
            }

            fn version(&self) -> i32 {
                self.version
            }

            fn bump(&mut self) {
                self.version += 1;
                self.modified_at = Utc::now();
            }
        }
    )*};
}

record!(Facility, SubareaType, ItemType, Subarea, Product, InventoryItem, EntitySchema);

fn live<T: Record + Clone>(row: Option<&Row<T>>, tenant_id: i64) -> Option<T> {
    row.filter(|r| !r.deleted && r.value.tenant() == tenant_id)
        .map(|r| r.value.clone())
}

// Mirrors `WHERE id AND mservice_id AND version AND NOT is_deleted`.
fn matches<T: Record>(row: &Row<T>, tenant_id: i64, version: i32) -> bool {
    !row.deleted && row.value.tenant() == tenant_id && row.value.version() == version
}

fn versioned<T: Record>(row: Option<&mut Row<T>>, tenant_id: i64, version: i32, apply: impl FnOnce(&mut T)) -> u64 {
    match row {
        Some(r) if matches(r, tenant_id, version) => {
            apply(&mut r.value);
            r.value.bump();
            1
        }
        _ => 0,
    }
}

fn retire<T: Record>(row: Option<&mut Row<T>>, tenant_id: i64, version: i32) -> u64 {
    match row {
        Some(r) if matches(r, tenant_id, version) => {
            r.value.bump();
            r.deleted = true;
            1
        }
        _ => 0,
    }
}

fn duplicate(table: &str) -> AppError {
    AppError::Execution(format!(
        "duplicate key value violates unique constraint \"{}_pkey\"",
        table
    ))
}

#[derive(Default)]
struct Tables {
    last_id: i64,
    facilities: BTreeMap<i64, Row<Facility>>,
    subarea_types: BTreeMap<(i64, i32), Row<SubareaType>>,
    item_types: BTreeMap<(i64, i32), Row<ItemType>>,
    subareas: BTreeMap<i64, Row<Subarea>>,
    products: BTreeMap<i64, Row<Product>>,
    items: BTreeMap<i64, Row<InventoryItem>>,
    schemas: BTreeMap<(i64, String), Row<EntitySchema>>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn subarea_view(&self, subarea: &Subarea) -> Subarea {
        let tenant_id = subarea.mservice_id;
        let mut view = subarea.clone();
        view.facility_name = live(self.facilities.get(&subarea.facility_id), tenant_id).map(|f| f.facility_name);
        view.subarea_type_name = live(
            self.subarea_types.get(&(tenant_id, subarea.subarea_type_id)),
            tenant_id,
        )
        .map(|t| t.subarea_type_name);
        view
    }

    fn item_view(&self, item: &InventoryItem) -> InventoryItem {
        let tenant_id = item.mservice_id;
        let mut view = item.clone();
        view.item_type_name = live(self.item_types.get(&(tenant_id, item.item_type_id)), tenant_id).map(|t| t.item_type_name);
        view.product_name = live(self.products.get(&item.product_id), tenant_id).map(|p| p.product_name);
        view
    }

    fn items_where(&self, tenant_id: i64, keep: impl Fn(&InventoryItem) -> bool) -> Vec<InventoryItem> {
        self.items
            .values()
            .filter(|r| !r.deleted && r.value.mservice_id == tenant_id && keep(&r.value))
            .map(|r| self.item_view(&r.value))
            .collect()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl FacilityStore for MemoryStore {
    async fn insert_facility(&self, tenant_id: i64, name: &str, json_data: Option<&Value>) -> Result<i64, AppError> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let now = Utc::now();
        tables.facilities.insert(
            id,
            Row::new(Facility {
                facility_id: id,
                mservice_id: tenant_id,
                facility_name: name.to_string(),
                json_data: json_data.cloned(),
                version: 1,
                created_at: now,
                modified_at: now,
            }),
        );
        Ok(id)
    }

    async fn update_facility(
        &self,
        tenant_id: i64,
        facility_id: i64,
        version: i32,
        name: &str,
        json_data: Option<&Value>,
    ) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(versioned(tables.facilities.get_mut(&facility_id), tenant_id, version, |f| {
            f.facility_name = name.to_string();
            f.json_data = json_data.cloned();
        }))
    }

    async fn delete_facility(&self, tenant_id: i64, facility_id: i64, version: i32) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(retire(tables.facilities.get_mut(&facility_id), tenant_id, version))
    }

    async fn find_facility(&self, tenant_id: i64, facility_id: i64) -> Result<Option<Facility>, AppError> {
        Ok(live(self.lock().facilities.get(&facility_id), tenant_id))
    }

    async fn list_facilities(&self, tenant_id: i64) -> Result<Vec<Facility>, AppError> {
        let tables = self.lock();
        Ok(tables.facilities.values().filter_map(|r| live(Some(r), tenant_id)).collect())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_subarea_type(&self, tenant_id: i64, type_id: i32, name: &str) -> Result<(), AppError> {
        let mut tables = self.lock();
        if tables.subarea_types.contains_key(&(tenant_id, type_id)) {
            return Err(duplicate("subarea_types"));
        }
        let now = Utc::now();
        tables.subarea_types.insert(
            (tenant_id, type_id),
            Row::new(SubareaType {
                mservice_id: tenant_id,
                subarea_type_id: type_id,
                subarea_type_name: name.to_string(),
                version: 1,
                created_at: now,
                modified_at: now,
            }),
        );
        Ok(())
    }

    async fn update_subarea_type(&self, tenant_id: i64, type_id: i32, version: i32, name: &str) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(versioned(tables.subarea_types.get_mut(&(tenant_id, type_id)), tenant_id, version, |t| {
            t.subarea_type_name = name.to_string();
        }))
    }

    async fn delete_subarea_type(&self, tenant_id: i64, type_id: i32, version: i32) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(retire(tables.subarea_types.get_mut(&(tenant_id, type_id)), tenant_id, version))
    }

    async fn find_subarea_type(&self, tenant_id: i64, type_id: i32) -> Result<Option<SubareaType>, AppError> {
        Ok(live(self.lock().subarea_types.get(&(tenant_id, type_id)), tenant_id))
    }

    async fn list_subarea_types(&self, tenant_id: i64) -> Result<Vec<SubareaType>, AppError> {
        let tables = self.lock();
        Ok(tables.subarea_types.values().filter_map(|r| live(Some(r), tenant_id)).collect())
    }

    async fn insert_item_type(&self, tenant_id: i64, type_id: i32, name: &str) -> Result<(), AppError> {
        let mut tables = self.lock();
        if tables.item_types.contains_key(&(tenant_id, type_id)) {
            return Err(duplicate("item_types"));
        }
        let now = Utc::now();
        tables.item_types.insert(
            (tenant_id, type_id),
            Row::new(ItemType {
                mservice_id: tenant_id,
                item_type_id: type_id,
                item_type_name: name.to_string(),
                version: 1,
                created_at: now,
                modified_at: now,
            }),
        );
        Ok(())
    }

    async fn update_item_type(&self, tenant_id: i64, type_id: i32, version: i32, name: &str) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(versioned(tables.item_types.get_mut(&(tenant_id, type_id)), tenant_id, version, |t| {
            t.item_type_name = name.to_string();
        }))
    }

    async fn delete_item_type(&self, tenant_id: i64, type_id: i32, version: i32) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(retire(tables.item_types.get_mut(&(tenant_id, type_id)), tenant_id, version))
    }

    async fn find_item_type(&self, tenant_id: i64, type_id: i32) -> Result<Option<ItemType>, AppError> {
        Ok(live(self.lock().item_types.get(&(tenant_id, type_id)), tenant_id))
    }

    async fn list_item_types(&self, tenant_id: i64) -> Result<Vec<ItemType>, AppError> {
        let tables = self.lock();
        Ok(tables.item_types.values().filter_map(|r| live(Some(r), tenant_id)).collect())
    }
}

#[async_trait]
impl SubareaStore for MemoryStore {
    async fn insert_subarea(&self, tenant_id: i64, facility_id: i64, fields: SubareaFields<'_>) -> Result<i64, AppError> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let now = Utc::now();
        tables.subareas.insert(
            id,
            Row::new(Subarea {
                subarea_id: id,
                mservice_id: tenant_id,
                facility_id,
                parent_subarea_id: fields.parent_subarea_id,
                position: fields.position,
                subarea_type_id: fields.subarea_type_id,
                subarea_name: fields.subarea_name.to_string(),
                json_data: fields.json_data.cloned(),
                version: 1,
                created_at: now,
                modified_at: now,
                facility_name: None,
                subarea_type_name: None,
            }),
        );
        Ok(id)
    }

    async fn update_subarea(
        &self,
        tenant_id: i64,
        subarea_id: i64,
        version: i32,
        fields: SubareaFields<'_>,
    ) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(versioned(tables.subareas.get_mut(&subarea_id), tenant_id, version, |s| {
            s.parent_subarea_id = fields.parent_subarea_id;
            s.position = fields.position;
            s.subarea_type_id = fields.subarea_type_id;
            s.subarea_name = fields.subarea_name.to_string();
            s.json_data = fields.json_data.cloned();
        }))
    }

    async fn delete_subarea(&self, tenant_id: i64, subarea_id: i64, version: i32) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(retire(tables.subareas.get_mut(&subarea_id), tenant_id, version))
    }

    async fn find_subarea(&self, tenant_id: i64, subarea_id: i64) -> Result<Option<Subarea>, AppError> {
        let tables = self.lock();
        Ok(live(tables.subareas.get(&subarea_id), tenant_id).map(|s| tables.subarea_view(&s)))
    }

    async fn list_subareas(&self, tenant_id: i64, facility_id: i64) -> Result<Vec<Subarea>, AppError> {
        let tables = self.lock();
        let mut rows: Vec<Subarea> = tables
            .subareas
            .values()
            .filter(|r| !r.deleted && r.value.mservice_id == tenant_id && r.value.facility_id == facility_id)
            .map(|r| tables.subarea_view(&r.value))
            .collect();
        rows.sort_by_key(|s| (s.parent_subarea_id, s.position));
        Ok(rows)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, tenant_id: i64, fields: ProductFields<'_>) -> Result<i64, AppError> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let now = Utc::now();
        tables.products.insert(
            id,
            Row::new(Product {
                product_id: id,
                mservice_id: tenant_id,
                sku: fields.sku.to_string(),
                product_name: fields.product_name.to_string(),
                comment: fields.comment.to_string(),
                json_data: fields.json_data.cloned(),
                version: 1,
                created_at: now,
                modified_at: now,
            }),
        );
        Ok(id)
    }

    async fn update_product(&self, tenant_id: i64, product_id: i64, version: i32, fields: ProductFields<'_>) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(versioned(tables.products.get_mut(&product_id), tenant_id, version, |p| {
            p.sku = fields.sku.to_string();
            p.product_name = fields.product_name.to_string();
            p.comment = fields.comment.to_string();
            p.json_data = fields.json_data.cloned();
        }))
    }

    async fn delete_product(&self, tenant_id: i64, product_id: i64, version: i32) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(retire(tables.products.get_mut(&product_id), tenant_id, version))
    }

    async fn find_product(&self, tenant_id: i64, product_id: i64) -> Result<Option<Product>, AppError> {
        Ok(live(self.lock().products.get(&product_id), tenant_id))
    }

    async fn list_products(&self, tenant_id: i64) -> Result<Vec<Product>, AppError> {
        let tables = self.lock();
        Ok(tables.products.values().filter_map(|r| live(Some(r), tenant_id)).collect())
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn insert_item(&self, tenant_id: i64, fields: ItemFields<'_>) -> Result<i64, AppError> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let now = Utc::now();
        tables.items.insert(
            id,
            Row::new(InventoryItem {
                inventory_item_id: id,
                mservice_id: tenant_id,
                subarea_id: fields.subarea_id,
                item_type_id: fields.item_type_id,
                quantity: fields.quantity,
                serial_number: fields.serial_number.to_string(),
                product_id: fields.product_id,
                json_data: fields.json_data.cloned(),
                version: 1,
                created_at: now,
                modified_at: now,
                item_type_name: None,
                product_name: None,
            }),
        );
        Ok(id)
    }

    async fn update_item(
        &self,
        tenant_id: i64,
        item_id: i64,
        version: i32,
        fields: ItemFields<'_>,
    ) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(versioned(tables.items.get_mut(&item_id), tenant_id, version, |i| {
            i.subarea_id = fields.subarea_id;
            i.item_type_id = fields.item_type_id;
            i.quantity = fields.quantity;
            i.serial_number = fields.serial_number.to_string();
            i.product_id = fields.product_id;
            i.json_data = fields.json_data.cloned();
        }))
    }

    async fn delete_item(&self, tenant_id: i64, item_id: i64, version: i32) -> Result<u64, AppError> {
        let mut tables = self.lock();
        Ok(retire(tables.items.get_mut(&item_id), tenant_id, version))
    }

    async fn find_item(&self, tenant_id: i64, item_id: i64) -> Result<Option<InventoryItem>, AppError> {
        let tables = self.lock();
        Ok(live(tables.items.get(&item_id), tenant_id).map(|i| tables.item_view(&i)))
    }

    async fn list_items_by_product(&self, tenant_id: i64, product_id: i64) -> Result<Vec<InventoryItem>, AppError> {
        Ok(self.lock().items_where(tenant_id, |i| i.product_id == product_id))
    }

    async fn list_items_by_subarea(&self, tenant_id: i64, subarea_id: i64) -> Result<Vec<InventoryItem>, AppError> {
        Ok(self.lock().items_where(tenant_id, |i| i.subarea_id == subarea_id))
    }

    async fn list_items_by_facility(&self, tenant_id: i64, facility_id: i64) -> Result<Vec<InventoryItem>, AppError> {
        let tables = self.lock();
        Ok(tables.items_where(tenant_id, |i| {
            tables
                .subareas
                .get(&i.subarea_id)
                .is_some_and(|s| s.value.mservice_id == tenant_id && s.value.facility_id == facility_id)
        }))
    }
}

#[async_trait]
impl SchemaStore for MemoryStore {
    async fn insert_schema(&self, tenant_id: i64, entity_name: &str, json_schema: &Value) -> Result<(), AppError> {
        let mut tables = self.lock();
        let key = (tenant_id, entity_name.to_string());
        if tables.schemas.contains_key(&key) {
            return Err(duplicate("entity_schemas"));
        }
        let now = Utc::now();
        tables.schemas.insert(
            key,
            Row::new(EntitySchema {
                mservice_id: tenant_id,
                entity_name: entity_name.to_string(),
                json_schema: json_schema.clone(),
                version: 1,
                created_at: now,
                modified_at: now,
            }),
        );
        Ok(())
    }

    async fn update_schema(&self, tenant_id: i64, entity_name: &str, version: i32, json_schema: &Value) -> Result<u64, AppError> {
        let mut tables = self.lock();
        let key = (tenant_id, entity_name.to_string());
        Ok(versioned(tables.schemas.get_mut(&key), tenant_id, version, |s| {
            s.json_schema = json_schema.clone();
        }))
    }

    async fn delete_schema(&self, tenant_id: i64, entity_name: &str, version: i32) -> Result<u64, AppError> {
        let mut tables = self.lock();
        let key = (tenant_id, entity_name.to_string());
        Ok(retire(tables.schemas.get_mut(&key), tenant_id, version))
    }

    async fn find_schema(&self, tenant_id: i64, entity_name: &str) -> Result<Option<EntitySchema>, AppError> {
        let key = (tenant_id, entity_name.to_string());
        Ok(live(self.lock().schemas.get(&key), tenant_id))
    }

    async fn list_schemas(&self, tenant_id: i64) -> Result<Vec<EntitySchema>, AppError> {
        let tables = self.lock();
        Ok(tables.schemas.values().filter_map(|r| live(Some(r), tenant_id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn caller_keyed_rows_reject_duplicates_even_after_delete() {
        let store = MemoryStore::default();
        store.insert_item_type(7, 1, "pallet").await.unwrap();
        assert_eq!(store.delete_item_type(7, 1, 1).await.unwrap(), 1);

        let err = store.insert_item_type(7, 1, "pallet").await.unwrap_err();
        assert_eq!(err.code(), 501);
        // Same id under another tenant is a different key.
        store.insert_item_type(8, 1, "pallet").await.unwrap();
    }

    #[tokio::test]
    async fn version_check_guards_updates_and_deletes() {
        let store = MemoryStore::default();
        let id = store.insert_facility(7, "Depot", None).await.unwrap();

        assert_eq!(store.update_facility(7, id, 2, "Stale", None).await.unwrap(), 0);
        assert_eq!(store.update_facility(8, id, 1, "Foreign", None).await.unwrap(), 0);
        assert_eq!(store.update_facility(7, id, 1, "Depot 2", None).await.unwrap(), 1);
        assert_eq!(store.delete_facility(7, id, 2).await.unwrap(), 1);
        assert_eq!(store.delete_facility(7, id, 3).await.unwrap(), 0);
        assert!(store.find_facility(7, id).await.unwrap().is_none());
    }
}
