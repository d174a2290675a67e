// ============================================================================
// DASHBOARD SERVICE - /dashboard (SOLO comunicación HTTP)
// ============================================================================

use std::rc::Rc;

use crate::models::api::Envelope;
use crate::models::dashboard::{Alerte, DashboardStats, StatistiquesRapides};
use crate::services::error::ApiError;
use crate::services::gateway::Gateway;

#[derive(Clone)]
pub struct DashboardService {
    gateway: Rc<Gateway>,
}

impl DashboardService {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        let stats: Envelope<DashboardStats> = self.gateway.get("/dashboard").await?;
        Ok(stats.into_inner())
    }

    pub async fn alertes(&self) -> Result<Vec<Alerte>, ApiError> {
        let alertes: Envelope<Vec<Alerte>> = self.gateway.get("/dashboard/alertes").await?;
        Ok(alertes.into_inner())
    }

    pub async fn statistiques_rapides(&self) -> Result<StatistiquesRapides, ApiError> {
        let stats: Envelope<StatistiquesRapides> = self.gateway.get("/dashboard/statistiques-rapides").await?;
        Ok(stats.into_inner())
    }
}
