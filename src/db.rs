pub mod catalog_repo;
pub mod facility_repo;
pub mod inventory_repo;
pub mod product_repo;
pub mod schema_repo;
pub mod subarea_repo;
#[cfg(test)]
pub mod memory;

pub use catalog_repo::{CatalogRepository, CatalogStore};
pub use facility_repo::{FacilityRepository, FacilityStore};
pub use inventory_repo::{InventoryRepository, InventoryStore, ItemFields};
pub use product_repo::{ProductFields, ProductRepository, ProductStore};
pub use schema_repo::{SchemaRepository, SchemaStore};
pub use subarea_repo::{SubareaFields, SubareaRepository, SubareaStore};

use sqlx::PgPool;
use std::sync::Arc;

// One handle per entity family. The gateway only sees the traits, so tests
// can swap the whole set for an in-memory one.
#[derive(Clone)]
pub struct Stores {
    pub facilities: Arc<dyn FacilityStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub subareas: Arc<dyn SubareaStore>,
    pub products: Arc<dyn ProductStore>,
    pub items: Arc<dyn InventoryStore>,
    pub schemas: Arc<dyn SchemaStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            facilities: Arc::new(FacilityRepository::new(pool.clone())),
            catalog: Arc::new(CatalogRepository::new(pool.clone())),
            subareas: Arc::new(SubareaRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool.clone())),
            items: Arc::new(InventoryRepository::new(pool.clone())),
            schemas: Arc::new(SchemaRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            facilities: store.clone(),
            catalog: store.clone(),
            subareas: store.clone(),
            products: store.clone(),
            items: store.clone(),
            schemas: store,
        }
    }
}
