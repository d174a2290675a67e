// ============================================================================
// TYPE VIEWMODEL - Tipos de composant (sólo admin)
// ============================================================================

use std::rc::Rc;

use crate::models::type_composant::{TypeComposant, TypeForm};
use crate::services::{ApiError, Gateway, TypeService};
use crate::viewmodels::{conflict_to_blocked, DeleteOutcome};

#[derive(Clone)]
pub struct TypeViewModel {
    service: TypeService,
}

impl TypeViewModel {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self {
            service: TypeService::new(gateway),
        }
    }

    pub async fn load(&self) -> Result<Vec<TypeComposant>, ApiError> {
        self.service.list().await
    }

    pub async fn save(&self, id: Option<u64>, form: &TypeForm) -> Result<TypeComposant, ApiError> {
        form.validate().map_err(ApiError::invalid_form)?;
        match id {
            None => self.service.create(form).await,
            Some(id) => self.service.update(id, form).await,
        }
    }

    pub async fn toggle(&self, types: &mut [TypeComposant], id: u64) -> Result<(), ApiError> {
        let updated = self.service.toggle_actif(id).await?;
        if let Some(slot) = types.iter_mut().find(|t| t.id == id) {
            *slot = updated;
        }
        Ok(())
    }

    /// Un tipo con composants asociados no se borra (409)
    pub async fn delete(&self, types: &mut Vec<TypeComposant>, id: u64) -> Result<DeleteOutcome, ApiError> {
        let outcome = conflict_to_blocked(self.service.delete(id).await)?;
        if outcome == DeleteOutcome::Deleted {
            types.retain(|t| t.id != id);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::services::gateway::test_support::gateway;

    fn type_composant(id: u64, actif: bool) -> TypeComposant {
        TypeComposant {
            id,
            nom: "Hydraulique".to_string(),
            description: None,
            couleur: "#10b981".to_string(),
            actif,
            composants_count: None,
        }
    }

    #[test]
    fn test_toggle_updates_list_entry() {
        let (gateway, transport, _) = gateway();
        transport.respond(200, r##"{"data":{"id":2,"nom":"Hydraulique","couleur":"#10b981","actif":false}}"##);
        let vm = TypeViewModel::new(gateway);
        let mut types = vec![type_composant(1, true), type_composant(2, true)];

        block_on(vm.toggle(&mut types, 2)).unwrap();

        assert!(types[0].actif);
        assert!(!types[1].actif);
    }

    #[test]
    fn test_delete_in_use_type_is_blocked() {
        let (gateway, transport, _) = gateway();
        transport.respond(409, r#"{"message":"Type utilisé par des composants"}"#);
        let vm = TypeViewModel::new(gateway);
        let mut types = vec![type_composant(1, true)];

        let outcome = block_on(vm.delete(&mut types, 1)).unwrap();

        assert_eq!(
            outcome,
            DeleteOutcome::Blocked("Suppression impossible : Type utilisé par des composants".to_string())
        );
        assert_eq!(types.len(), 1);
    }

    #[test]
    fn test_invalid_color_never_reaches_network() {
        let (gateway, transport, _) = gateway();
        let vm = TypeViewModel::new(gateway);
        let form = TypeForm {
            nom: "Pneumatique".to_string(),
            couleur: "#12345".to_string(),
            ..TypeForm::default()
        };

        assert!(block_on(vm.save(None, &form)).is_err());
        assert_eq!(transport.request_count(), 0);
    }
}
