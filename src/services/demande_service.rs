// ============================================================================
// DEMANDE SERVICE - /demandes (SOLO comunicación HTTP)
// ============================================================================

use std::rc::Rc;

use crate::models::api::Envelope;
use crate::models::demande::{Demande, DemandeDecision, DemandeForm};
use crate::services::error::ApiError;
use crate::services::gateway::Gateway;

#[derive(Clone)]
pub struct DemandeService {
    gateway: Rc<Gateway>,
}

impl DemandeService {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Demande>, ApiError> {
        let demandes: Envelope<Vec<Demande>> = self.gateway.get("/demandes").await?;
        Ok(demandes.into_inner())
    }

    pub async fn get(&self, id: u64) -> Result<Demande, ApiError> {
        let demande: Envelope<Demande> = self.gateway.get(&format!("/demandes/{}", id)).await?;
        Ok(demande.into_inner())
    }

    pub async fn create(&self, form: &DemandeForm) -> Result<Demande, ApiError> {
        log::info!("🛠️ Nueva demande: {}", form.titre);
        let demande: Envelope<Demande> = self.gateway.post("/demandes", form).await?;
        Ok(demande.into_inner())
    }

    pub async fn accept(&self, id: u64, decision: &DemandeDecision) -> Result<Demande, ApiError> {
        let demande: Envelope<Demande> = self
            .gateway
            .patch(&format!("/demandes/{}/accepter", id), decision)
            .await?;
        Ok(demande.into_inner())
    }

    pub async fn refuse(&self, id: u64, decision: &DemandeDecision) -> Result<Demande, ApiError> {
        let demande: Envelope<Demande> = self
            .gateway
            .patch(&format!("/demandes/{}/refuser", id), decision)
            .await?;
        Ok(demande.into_inner())
    }
}
