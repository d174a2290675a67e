// ============================================================================
// MACHINE SERVICE - /machines (SOLO comunicación HTTP)
// ============================================================================

use std::rc::Rc;

use crate::models::api::Envelope;
use crate::models::machine::{Machine, MachineForm};
use crate::services::error::ApiError;
use crate::services::gateway::{Gateway, RequestOptions};
use crate::services::transport::HttpMethod;
use crate::utils::image::ImageFile;

#[derive(Clone)]
pub struct MachineService {
    gateway: Rc<Gateway>,
}

impl MachineService {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Machine>, ApiError> {
        let machines: Envelope<Vec<Machine>> = self.gateway.get("/machines").await?;
        Ok(machines.into_inner())
    }

    /// Máquinas activas (selectores de composants y demandes)
    pub async fn actives(&self) -> Result<Vec<Machine>, ApiError> {
        let machines: Envelope<Vec<Machine>> = self.gateway.get("/machines/actives").await?;
        Ok(machines.into_inner())
    }

    pub async fn get(&self, id: u64) -> Result<Machine, ApiError> {
        let machine: Envelope<Machine> = self.gateway.get(&format!("/machines/{}", id)).await?;
        Ok(machine.into_inner())
    }

    pub async fn create(&self, form: &MachineForm, image: Option<&ImageFile>) -> Result<Machine, ApiError> {
        log::info!("🏭 Creando máquina {}", form.nom);
        let machine: Envelope<Machine> = self
            .gateway
            .send_form(HttpMethod::Post, "/machines", form, image)
            .await?;
        Ok(machine.into_inner())
    }

    pub async fn update(&self, id: u64, form: &MachineForm) -> Result<Machine, ApiError> {
        let machine: Envelope<Machine> = self.gateway.put(&format!("/machines/{}", id), form).await?;
        Ok(machine.into_inner())
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        log::info!("🗑️ Eliminando máquina {}", id);
        self.gateway
            .send(HttpMethod::Delete, &format!("/machines/{}", id), RequestOptions::default())
            .await
    }

    pub async fn upload_image(&self, id: u64, image: &ImageFile) -> Result<Machine, ApiError> {
        let machine: Envelope<Machine> = self
            .gateway
            .send_form(HttpMethod::Post, &format!("/machines/{}/image", id), &serde_json::json!({}), Some(image))
            .await?;
        Ok(machine.into_inner())
    }

    pub async fn delete_image(&self, id: u64) -> Result<(), ApiError> {
        self.gateway
            .send(HttpMethod::Delete, &format!("/machines/{}/image", id), RequestOptions::default())
            .await
    }
}
