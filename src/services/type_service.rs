// ============================================================================
// TYPE SERVICE - /types (SOLO comunicación HTTP)
// ============================================================================

use std::rc::Rc;

use crate::models::api::Envelope;
use crate::models::type_composant::{TypeComposant, TypeForm};
use crate::services::error::ApiError;
use crate::services::gateway::{Gateway, RequestOptions};
use crate::services::transport::HttpMethod;

#[derive(Clone)]
pub struct TypeService {
    gateway: Rc<Gateway>,
}

impl TypeService {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<TypeComposant>, ApiError> {
        let types: Envelope<Vec<TypeComposant>> = self.gateway.get("/types").await?;
        Ok(types.into_inner())
    }

    pub async fn create(&self, form: &TypeForm) -> Result<TypeComposant, ApiError> {
        let created: Envelope<TypeComposant> = self.gateway.post("/types", form).await?;
        Ok(created.into_inner())
    }

    pub async fn update(&self, id: u64, form: &TypeForm) -> Result<TypeComposant, ApiError> {
        let updated: Envelope<TypeComposant> = self.gateway.put(&format!("/types/{}", id), form).await?;
        Ok(updated.into_inner())
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.gateway
            .send(HttpMethod::Delete, &format!("/types/{}", id), RequestOptions::default())
            .await
    }

    pub async fn toggle_actif(&self, id: u64) -> Result<TypeComposant, ApiError> {
        let toggled: Envelope<TypeComposant> = self
            .gateway
            .patch(&format!("/types/{}/toggle-actif", id), &serde_json::json!({}))
            .await?;
        Ok(toggled.into_inner())
    }
}
