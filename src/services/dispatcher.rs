// src/services/dispatcher.rs

use std::{future::Future, time::Instant};

use uuid::Uuid;

use crate::{
    common::{envelope::Envelope, error::AppError},
    middleware::rbac::{authorize, Operation},
    models::{
        auth::AccessClaims,
        catalog::{
            CreateItemTypeRequest, CreateSubareaTypeRequest, ItemType, SubareaType, UpdateItemTypeRequest,
            UpdateSubareaTypeRequest,
        },
        facility::{CreateFacilityRequest, Facility, FacilityWrapper, UpdateFacilityRequest},
        inventory::{CreateInventoryItemRequest, InventoryItem, UpdateInventoryItemRequest},
        product::{CreateProductRequest, Product, UpdateProductRequest},
        requests::{Created, DeleteRequest, KeyRequest, ServerVersion, TenantRequest, TenantScoped, Versioned},
        schema::{CreateEntitySchemaRequest, EntitySchema, UpdateEntitySchemaRequest},
        subarea::{CreateSubareaRequest, Subarea, UpdateSubareaRequest},
    },
    services::{auth::TokenVerifier, inventory_service::InventoryService},
};

/// Front door for every operation: verifies the bearer token, applies the
/// access policy, stamps the tenant from the token onto the request and only
/// then hands it to the gateway. Every outcome comes back as an envelope.
pub struct Dispatcher {
    verifier: TokenVerifier,
    service: InventoryService,
    started: Instant,
}

impl Dispatcher {
    pub fn new(verifier: TokenVerifier, service: InventoryService) -> Self {
        Self {
            verifier,
            service,
            started: Instant::now(),
        }
    }

    fn admit(&self, operation: Operation, token: Option<&str>) -> Result<AccessClaims, AppError> {
        let token = token.ok_or(AppError::InvalidToken)?;
        let claims = self.verifier.verify(token)?;

        if let Some(required) = operation.required_tier() {
            if !authorize(claims.tier, required) {
                return Err(AppError::NotAuthorized);
            }
        }
        Ok(claims)
    }

    async fn dispatch<Req, T, F, Fut>(
        &self,
        operation: Operation,
        token: Option<&str>,
        mut req: Req,
        handler: F,
    ) -> Envelope<T>
    where
        Req: TenantScoped,
        F: FnOnce(Req) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let key = req.log_key();

        let mut caller = None;
        let result = match self.admit(operation, token) {
            Ok(claims) => {
                req.stamp_tenant(claims.tenant_id);
                caller = Some(claims);
                handler(req).await
            }
            Err(e) => Err(e),
        };
        let subject = caller.as_ref().and_then(|c| c.subject.as_deref()).unwrap_or("-");
        let tier = caller.as_ref().and_then(|c| c.tier).map_or("-", |t| t.claim());

        let envelope = Envelope::from(result);
        let duration_us = started.elapsed().as_micros() as u64;
        if envelope.error_code == AppError::ExpiredToken.code() {
            tracing::warn!(
                operation = operation.name(),
                key = %key,
                request_id = %request_id,
                code = envelope.error_code,
                duration_us,
                "expired token"
            );
        } else {
            tracing::info!(
                operation = operation.name(),
                key = %key,
                request_id = %request_id,
                subject,
                tier,
                code = envelope.error_code,
                duration_us,
                "handled"
            );
        }
        envelope
    }

    /// Static version string and seconds since start. No credential needed.
    pub fn server_version(&self) -> Envelope<ServerVersion> {
        let payload = ServerVersion {
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            server_uptime: self.started.elapsed().as_secs() as i64,
        };
        tracing::info!(
            operation = Operation::GetServerVersion.name(),
            request_id = %Uuid::new_v4(),
            code = 0,
            "handled"
        );
        Envelope::ok(payload)
    }

    // ---
    // Facilities
    // ---

    pub async fn create_facility(&self, token: Option<&str>, req: CreateFacilityRequest) -> Envelope<Created> {
        self.dispatch(Operation::CreateFacility, token, req, move |req| async move {
            self.service.create_facility(&req).await
        })
        .await
    }

    pub async fn update_facility(&self, token: Option<&str>, req: UpdateFacilityRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::UpdateFacility, token, req, move |req| async move {
            self.service.update_facility(&req).await
        })
        .await
    }

    pub async fn delete_facility(&self, token: Option<&str>, req: DeleteRequest<i64>) -> Envelope<Versioned> {
        self.dispatch(Operation::DeleteFacility, token, req, move |req| async move {
            self.service.delete_facility(&req).await
        })
        .await
    }

    pub async fn get_facility(&self, token: Option<&str>, req: KeyRequest<i64>) -> Envelope<Facility> {
        self.dispatch(Operation::GetFacility, token, req, move |req| async move {
            self.service.get_facility(&req).await
        })
        .await
    }

    pub async fn get_facilities(&self, token: Option<&str>, req: TenantRequest) -> Envelope<Vec<Facility>> {
        self.dispatch(Operation::GetFacilities, token, req, move |req| async move {
            self.service.get_facilities(&req).await
        })
        .await
    }

    pub async fn get_facility_wrapper(&self, token: Option<&str>, req: KeyRequest<i64>) -> Envelope<FacilityWrapper> {
        self.dispatch(Operation::GetFacilityWrapper, token, req, move |req| async move {
            self.service.get_facility_wrapper(&req).await
        })
        .await
    }

    // ---
    // Subarea types
    // ---

    pub async fn create_subarea_type(&self, token: Option<&str>, req: CreateSubareaTypeRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::CreateSubareaType, token, req, move |req| async move {
            self.service.create_subarea_type(&req).await
        })
        .await
    }

    pub async fn update_subarea_type(&self, token: Option<&str>, req: UpdateSubareaTypeRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::UpdateSubareaType, token, req, move |req| async move {
            self.service.update_subarea_type(&req).await
        })
        .await
    }

    pub async fn delete_subarea_type(&self, token: Option<&str>, req: DeleteRequest<i32>) -> Envelope<Versioned> {
        self.dispatch(Operation::DeleteSubareaType, token, req, move |req| async move {
            self.service.delete_subarea_type(&req).await
        })
        .await
    }

    pub async fn get_subarea_type(&self, token: Option<&str>, req: KeyRequest<i32>) -> Envelope<SubareaType> {
        self.dispatch(Operation::GetSubareaType, token, req, move |req| async move {
            self.service.get_subarea_type(&req).await
        })
        .await
    }

    pub async fn get_subarea_types(&self, token: Option<&str>, req: TenantRequest) -> Envelope<Vec<SubareaType>> {
        self.dispatch(Operation::GetSubareaTypes, token, req, move |req| async move {
            self.service.get_subarea_types(&req).await
        })
        .await
    }

    // ---
    // Item types
    // ---

    pub async fn create_item_type(&self, token: Option<&str>, req: CreateItemTypeRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::CreateItemType, token, req, move |req| async move {
            self.service.create_item_type(&req).await
        })
        .await
    }

    pub async fn update_item_type(&self, token: Option<&str>, req: UpdateItemTypeRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::UpdateItemType, token, req, move |req| async move {
            self.service.update_item_type(&req).await
        })
        .await
    }

    pub async fn delete_item_type(&self, token: Option<&str>, req: DeleteRequest<i32>) -> Envelope<Versioned> {
        self.dispatch(Operation::DeleteItemType, token, req, move |req| async move {
            self.service.delete_item_type(&req).await
        })
        .await
    }

    pub async fn get_item_type(&self, token: Option<&str>, req: KeyRequest<i32>) -> Envelope<ItemType> {
        self.dispatch(Operation::GetItemType, token, req, move |req| async move {
            self.service.get_item_type(&req).await
        })
        .await
    }

    pub async fn get_item_types(&self, token: Option<&str>, req: TenantRequest) -> Envelope<Vec<ItemType>> {
        self.dispatch(Operation::GetItemTypes, token, req, move |req| async move {
            self.service.get_item_types(&req).await
        })
        .await
    }

    // ---
    // Subareas
    // ---

    pub async fn create_subarea(&self, token: Option<&str>, req: CreateSubareaRequest) -> Envelope<Created> {
        self.dispatch(Operation::CreateSubarea, token, req, move |req| async move {
            self.service.create_subarea(&req).await
        })
        .await
    }

    pub async fn update_subarea(&self, token: Option<&str>, req: UpdateSubareaRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::UpdateSubarea, token, req, move |req| async move {
            self.service.update_subarea(&req).await
        })
        .await
    }

    pub async fn delete_subarea(&self, token: Option<&str>, req: DeleteRequest<i64>) -> Envelope<Versioned> {
        self.dispatch(Operation::DeleteSubarea, token, req, move |req| async move {
            self.service.delete_subarea(&req).await
        })
        .await
    }

    pub async fn get_subarea(&self, token: Option<&str>, req: KeyRequest<i64>) -> Envelope<Subarea> {
        self.dispatch(Operation::GetSubarea, token, req, move |req| async move {
            self.service.get_subarea(&req).await
        })
        .await
    }

    pub async fn get_subareas(&self, token: Option<&str>, req: KeyRequest<i64>) -> Envelope<Vec<Subarea>> {
        self.dispatch(Operation::GetSubareas, token, req, move |req| async move {
            self.service.get_subareas(&req).await
        })
        .await
    }

    // ---
    // Products
    // ---

    pub async fn create_product(&self, token: Option<&str>, req: CreateProductRequest) -> Envelope<Created> {
        self.dispatch(Operation::CreateProduct, token, req, move |req| async move {
            self.service.create_product(&req).await
        })
        .await
    }

    pub async fn update_product(&self, token: Option<&str>, req: UpdateProductRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::UpdateProduct, token, req, move |req| async move {
            self.service.update_product(&req).await
        })
        .await
    }

    pub async fn delete_product(&self, token: Option<&str>, req: DeleteRequest<i64>) -> Envelope<Versioned> {
        self.dispatch(Operation::DeleteProduct, token, req, move |req| async move {
            self.service.delete_product(&req).await
        })
        .await
    }

    pub async fn get_product(&self, token: Option<&str>, req: KeyRequest<i64>) -> Envelope<Product> {
        self.dispatch(Operation::GetProduct, token, req, move |req| async move {
            self.service.get_product(&req).await
        })
        .await
    }

    pub async fn get_products(&self, token: Option<&str>, req: TenantRequest) -> Envelope<Vec<Product>> {
        self.dispatch(Operation::GetProducts, token, req, move |req| async move {
            self.service.get_products(&req).await
        })
        .await
    }

    // ---
    // Inventory items
    // ---

    pub async fn create_inventory_item(&self, token: Option<&str>, req: CreateInventoryItemRequest) -> Envelope<Created> {
        self.dispatch(Operation::CreateInventoryItem, token, req, move |req| async move {
            self.service.create_inventory_item(&req).await
        })
        .await
    }

    pub async fn update_inventory_item(&self, token: Option<&str>, req: UpdateInventoryItemRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::UpdateInventoryItem, token, req, move |req| async move {
            self.service.update_inventory_item(&req).await
        })
        .await
    }

    pub async fn delete_inventory_item(&self, token: Option<&str>, req: DeleteRequest<i64>) -> Envelope<Versioned> {
        self.dispatch(Operation::DeleteInventoryItem, token, req, move |req| async move {
            self.service.delete_inventory_item(&req).await
        })
        .await
    }

    pub async fn get_inventory_item(&self, token: Option<&str>, req: KeyRequest<i64>) -> Envelope<InventoryItem> {
        self.dispatch(Operation::GetInventoryItem, token, req, move |req| async move {
            self.service.get_inventory_item(&req).await
        })
        .await
    }

    pub async fn get_inventory_items_by_product(
        &self,
        token: Option<&str>,
        req: KeyRequest<i64>,
    ) -> Envelope<Vec<InventoryItem>> {
        self.dispatch(Operation::GetInventoryItemsByProduct, token, req, move |req| async move {
            self.service.get_inventory_items_by_product(&req).await
        })
        .await
    }

    pub async fn get_inventory_items_by_subarea(
        &self,
        token: Option<&str>,
        req: KeyRequest<i64>,
    ) -> Envelope<Vec<InventoryItem>> {
        self.dispatch(Operation::GetInventoryItemsBySubarea, token, req, move |req| async move {
            self.service.get_inventory_items_by_subarea(&req).await
        })
        .await
    }

    pub async fn get_inventory_items_by_facility(
        &self,
        token: Option<&str>,
        req: KeyRequest<i64>,
    ) -> Envelope<Vec<InventoryItem>> {
        self.dispatch(Operation::GetInventoryItemsByFacility, token, req, move |req| async move {
            self.service.get_inventory_items_by_facility(&req).await
        })
        .await
    }

    // ---
    // Entity schemas
    // ---

    pub async fn create_entity_schema(&self, token: Option<&str>, req: CreateEntitySchemaRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::CreateEntitySchema, token, req, move |req| async move {
            self.service.create_entity_schema(&req).await
        })
        .await
    }

    pub async fn update_entity_schema(&self, token: Option<&str>, req: UpdateEntitySchemaRequest) -> Envelope<Versioned> {
        self.dispatch(Operation::UpdateEntitySchema, token, req, move |req| async move {
            self.service.update_entity_schema(&req).await
        })
        .await
    }

    pub async fn delete_entity_schema(&self, token: Option<&str>, req: DeleteRequest<String>) -> Envelope<Versioned> {
        self.dispatch(Operation::DeleteEntitySchema, token, req, move |req| async move {
            self.service.delete_entity_schema(&req).await
        })
        .await
    }

    pub async fn get_entity_schema(&self, token: Option<&str>, req: KeyRequest<String>) -> Envelope<EntitySchema> {
        self.dispatch(Operation::GetEntitySchema, token, req, move |req| async move {
            self.service.get_entity_schema(&req).await
        })
        .await
    }

    pub async fn get_entity_schemas(&self, token: Option<&str>, req: TenantRequest) -> Envelope<Vec<EntitySchema>> {
        self.dispatch(Operation::GetEntitySchemas, token, req, move |req| async move {
            self.service.get_entity_schemas(&req).await
        })
        .await
    }
}
