// ============================================================================
// DASHBOARD VIEWMODEL - Las tres llamadas del tablero en paralelo
// ============================================================================

use std::rc::Rc;

use crate::models::dashboard::{Alerte, DashboardStats, StatistiquesRapides};
use crate::services::{ApiError, DashboardService, Gateway};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub alertes: Vec<Alerte>,
    pub rapides: StatistiquesRapides,
}

#[derive(Clone)]
pub struct DashboardViewModel {
    service: DashboardService,
}

impl DashboardViewModel {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self {
            service: DashboardService::new(gateway),
        }
    }

    /// Las alertas y estadísticas rápidas son opcionales: si fallan se muestran vacías
    pub async fn load(&self) -> Result<DashboardData, ApiError> {
        let (stats, alertes, rapides) = futures::join!(
            self.service.stats(),
            self.service.alertes(),
            self.service.statistiques_rapides()
        );
        Ok(DashboardData {
            stats: stats?,
            alertes: alertes.unwrap_or_default(),
            rapides: rapides.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::services::gateway::test_support::gateway;

    #[test]
    fn test_missing_alerts_do_not_fail_dashboard() {
        let (gateway, transport, _) = gateway();
        transport.respond(200, r#"{"data":{"total_machines":4,"machines_actives":3}}"#);
        transport.respond(500, r#"{"message":"boom"}"#);
        transport.respond(200, r#"{"taux_disponibilite":97.5}"#);
        let vm = DashboardViewModel::new(gateway);

        let data = block_on(vm.load()).unwrap();

        assert_eq!(data.stats.total_machines, 4);
        assert!(data.alertes.is_empty());
        assert_eq!(data.rapides.taux_disponibilite, 97.5);
    }
}
