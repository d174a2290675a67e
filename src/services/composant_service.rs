// ============================================================================
// COMPOSANT SERVICE - /composants (SOLO comunicación HTTP)
// ============================================================================

use std::rc::Rc;

use crate::models::api::Envelope;
use crate::models::composant::{Composant, ComposantForm};
use crate::services::error::ApiError;
use crate::services::gateway::{Gateway, RequestOptions};
use crate::services::transport::HttpMethod;
use crate::utils::image::ImageFile;

#[derive(Clone)]
pub struct ComposantService {
    gateway: Rc<Gateway>,
}

impl ComposantService {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `machine_id` filtra en el servidor (`?machine_id=`)
    pub async fn list(&self, machine_id: Option<u64>) -> Result<Vec<Composant>, ApiError> {
        let path = match machine_id {
            Some(id) => format!("/composants?machine_id={}", id),
            None => "/composants".to_string(),
        };
        let composants: Envelope<Vec<Composant>> = self.gateway.get(&path).await?;
        Ok(composants.into_inner())
    }

    pub async fn get(&self, id: u64) -> Result<Composant, ApiError> {
        let composant: Envelope<Composant> = self.gateway.get(&format!("/composants/{}", id)).await?;
        Ok(composant.into_inner())
    }

    pub async fn create(&self, form: &ComposantForm, image: Option<&ImageFile>) -> Result<Composant, ApiError> {
        log::info!("🔩 Creando composant {}", form.nom);
        let composant: Envelope<Composant> = self
            .gateway
            .send_form(HttpMethod::Post, "/composants", form, image)
            .await?;
        Ok(composant.into_inner())
    }

    pub async fn update(&self, id: u64, form: &ComposantForm) -> Result<Composant, ApiError> {
        let composant: Envelope<Composant> = self.gateway.put(&format!("/composants/{}", id), form).await?;
        Ok(composant.into_inner())
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.gateway
            .send(HttpMethod::Delete, &format!("/composants/{}", id), RequestOptions::default())
            .await
    }

    pub async fn upload_image(&self, id: u64, image: &ImageFile) -> Result<Composant, ApiError> {
        let composant: Envelope<Composant> = self
            .gateway
            .send_form(HttpMethod::Post, &format!("/composants/{}/image", id), &serde_json::json!({}), Some(image))
            .await?;
        Ok(composant.into_inner())
    }

    pub async fn delete_image(&self, id: u64) -> Result<(), ApiError> {
        self.gateway
            .send(HttpMethod::Delete, &format!("/composants/{}/image", id), RequestOptions::default())
            .await
    }
}
