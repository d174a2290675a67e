// ============================================================================
// DEMANDE VIEWMODEL - Solicitudes de intervención
// ============================================================================

use std::rc::Rc;

use crate::models::demande::{Demande, DemandeDecision, DemandeForm, DemandeStatus, Priorite};
use crate::services::{ApiError, DemandeService, Gateway};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Refuse,
}

#[derive(Clone)]
pub struct DemandeViewModel {
    service: DemandeService,
}

impl DemandeViewModel {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self {
            service: DemandeService::new(gateway),
        }
    }

    pub async fn load(&self) -> Result<Vec<Demande>, ApiError> {
        self.service.list().await
    }

    pub async fn create(&self, form: &DemandeForm) -> Result<Demande, ApiError> {
        form.validate().map_err(ApiError::invalid_form)?;
        self.service.create(form).await
    }

    /// Aceptar/rechazar y reemplazar la demande en la lista
    pub async fn decide(
        &self,
        demandes: &mut [Demande],
        id: u64,
        decision: Decision,
        commentaire: &str,
    ) -> Result<Demande, ApiError> {
        let body = DemandeDecision {
            commentaire_admin: Some(commentaire.trim().to_string()).filter(|c| !c.is_empty()),
        };
        let updated = match decision {
            Decision::Accept => self.service.accept(id, &body).await?,
            Decision::Refuse => self.service.refuse(id, &body).await?,
        };
        if let Some(slot) = demandes.iter_mut().find(|d| d.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub fn filter<'a>(
        demandes: &'a [Demande],
        statut: Option<DemandeStatus>,
        priorite: Option<Priorite>,
    ) -> Vec<&'a Demande> {
        demandes
            .iter()
            .filter(|d| statut.map(|s| d.statut == s).unwrap_or(true))
            .filter(|d| priorite.map(|p| d.priorite == p).unwrap_or(true))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::Value;

    use super::*;
    use crate::services::gateway::test_support::gateway;
    use crate::services::transport::RequestBody;

    fn demande(id: u64, statut: DemandeStatus, priorite: Priorite) -> Demande {
        Demande {
            id,
            titre: format!("Fuite {}", id),
            description: "Fuite d'huile".to_string(),
            machine_id: 1,
            user_id: Some(2),
            statut,
            priorite,
            commentaire_admin: None,
            created_at: None,
            machine: None,
            user: None,
        }
    }

    #[test]
    fn test_refuse_replaces_demande_in_list() {
        let (gateway, transport, _) = gateway();
        transport.respond(
            200,
            r#"{"data":{"id":4,"titre":"Fuite 4","description":"x","machine_id":1,"statut":"refusee","priorite":"haute","commentaire_admin":"Doublon"}}"#,
        );
        let vm = DemandeViewModel::new(gateway);
        let mut demandes = vec![demande(4, DemandeStatus::EnAttente, Priorite::Haute)];

        block_on(vm.decide(&mut demandes, 4, Decision::Refuse, "  Doublon ")).unwrap();

        assert_eq!(demandes[0].statut, DemandeStatus::Refusee);
        let request = transport.last_request().unwrap();
        assert!(request.url.ends_with("/demandes/4/refuser"));
        let RequestBody::Json(body) = request.body else {
            panic!("expected json body");
        };
        assert_eq!(body["commentaire_admin"], Value::from("Doublon"));
    }

    #[test]
    fn test_blank_comment_is_omitted() {
        let (gateway, transport, _) = gateway();
        transport.respond(
            200,
            r#"{"id":4,"titre":"t","description":"d","machine_id":1,"statut":"acceptee","priorite":"normale"}"#,
        );
        let vm = DemandeViewModel::new(gateway);

        block_on(vm.decide(&mut [], 4, Decision::Accept, "   ")).unwrap();

        let RequestBody::Json(body) = transport.last_request().unwrap().body else {
            panic!("expected json body");
        };
        assert!(body.get("commentaire_admin").is_none());
    }

    #[test]
    fn test_create_requires_machine() {
        let (gateway, transport, _) = gateway();
        let vm = DemandeViewModel::new(gateway);
        let form = DemandeForm {
            titre: "Bruit".to_string(),
            description: "Bruit anormal".to_string(),
            ..DemandeForm::default()
        };

        let err = block_on(vm.create(&form)).unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("machine_id"), Some("La machine est obligatoire"));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_filter_by_status_and_priority() {
        let demandes = vec![
            demande(1, DemandeStatus::EnAttente, Priorite::Critique),
            demande(2, DemandeStatus::EnAttente, Priorite::Basse),
            demande(3, DemandeStatus::Acceptee, Priorite::Critique),
        ];
        let result = DemandeViewModel::filter(&demandes, Some(DemandeStatus::EnAttente), Some(Priorite::Critique));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }
}
