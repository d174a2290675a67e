// ============================================================================
// COMPOSANT VIEWMODEL
// ============================================================================

use std::rc::Rc;

use crate::models::composant::{Composant, ComposantForm, ComposantStatus};
use crate::services::{ApiError, ComposantService, Gateway};
use crate::utils::image::ImageFile;
use crate::viewmodels::{conflict_to_blocked, validate_with_image, DeleteOutcome};

/// Filtros de la lista de composants
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComposantFilter {
    pub search: String,
    pub machine_id: Option<u64>,
    pub type_id: Option<u64>,
    pub statut: Option<ComposantStatus>,
}

impl ComposantFilter {
    pub fn matches(&self, composant: &Composant) -> bool {
        let needle = self.search.trim().to_lowercase();
        self.machine_id.map(|id| composant.machine_id == id).unwrap_or(true)
            && self.type_id.map(|id| composant.type_id == id).unwrap_or(true)
            && self.statut.map(|s| composant.statut == s).unwrap_or(true)
            && (needle.is_empty()
                || composant.nom.to_lowercase().contains(&needle)
                || composant.reference.to_lowercase().contains(&needle))
    }
}

#[derive(Clone)]
pub struct ComposantViewModel {
    service: ComposantService,
}

impl ComposantViewModel {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self {
            service: ComposantService::new(gateway),
        }
    }

    pub async fn load(&self, machine_id: Option<u64>) -> Result<Vec<Composant>, ApiError> {
        self.service.list(machine_id).await
    }

    /// Los cuatro campos obligatorios se comprueban antes de cualquier request
    pub async fn save(&self, id: Option<u64>, form: &ComposantForm, image: Option<&ImageFile>) -> Result<Composant, ApiError> {
        validate_with_image(form.validate(), image)?;
        match id {
            None => self.service.create(form, image).await,
            Some(id) => {
                let updated = self.service.update(id, form).await?;
                match image {
                    Some(image) => self.service.upload_image(id, image).await,
                    None => Ok(updated),
                }
            }
        }
    }

    pub async fn remove_image(&self, composant: &mut Composant) -> Result<(), ApiError> {
        self.service.delete_image(composant.id).await?;
        composant.image = None;
        Ok(())
    }

    pub async fn delete(&self, composants: &mut Vec<Composant>, id: u64) -> Result<DeleteOutcome, ApiError> {
        let outcome = conflict_to_blocked(self.service.delete(id).await)?;
        if outcome == DeleteOutcome::Deleted {
            composants.retain(|c| c.id != id);
        }
        Ok(outcome)
    }

    pub fn filter<'a>(composants: &'a [Composant], filter: &ComposantFilter) -> Vec<&'a Composant> {
        composants.iter().filter(|c| filter.matches(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::services::gateway::test_support::gateway;

    fn composant(id: u64, machine_id: u64, statut: ComposantStatus) -> Composant {
        Composant {
            id,
            nom: format!("Roulement {}", id),
            reference: format!("RLT-{}", id),
            machine_id,
            type_id: 1,
            statut,
            description: None,
            date_installation: None,
            image: None,
            machine: None,
            type_composant: None,
        }
    }

    #[test]
    fn test_empty_nom_and_reference_rejected_without_request() {
        let (gateway, transport, toasts) = gateway();
        let vm = ComposantViewModel::new(gateway);

        let err = block_on(vm.save(None, &ComposantForm::blank(), None)).unwrap_err();

        let fields = err.field_errors().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.fields().collect::<Vec<_>>(), vec!["nom", "reference"]);
        assert_eq!(transport.request_count(), 0);
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_missing_machine_and_type_are_left_to_the_server() {
        let (gateway, transport, toasts) = gateway();
        transport.respond(
            422,
            r#"{"message":"Données invalides","errors":{
                "machine_id":["La machine est obligatoire"],
                "type_id":["Le type est obligatoire"]}}"#,
        );
        let vm = ComposantViewModel::new(gateway);
        let form = ComposantForm {
            nom: "Courroie".to_string(),
            reference: "CR-1".to_string(),
            ..ComposantForm::blank()
        };

        let err = block_on(vm.save(None, &form, None)).unwrap_err();

        assert_eq!(transport.request_count(), 1);
        assert_eq!(err.field_errors().unwrap().fields().collect::<Vec<_>>(), vec!["machine_id", "type_id"]);
        assert_eq!(toasts.len(), 2);
    }

    #[test]
    fn test_create_without_image_posts_json() {
        let (gateway, transport, _) = gateway();
        transport.respond(
            201,
            r#"{"data":{"id":9,"nom":"Courroie","reference":"CR-1","machine_id":1,"type_id":2,"statut":"bon"}}"#,
        );
        let vm = ComposantViewModel::new(gateway);
        let form = ComposantForm {
            nom: "Courroie".to_string(),
            reference: "CR-1".to_string(),
            machine_id: Some(1),
            type_id: Some(2),
            ..ComposantForm::default()
        };

        let created = block_on(vm.save(None, &form, None)).unwrap();

        assert_eq!(created.id, 9);
        let request = transport.last_request().unwrap();
        assert!(request.url.ends_with("/composants"));
        assert!(!request.body.is_multipart());
    }

    #[test]
    fn test_filter_combines_criteria() {
        let composants = vec![
            composant(1, 1, ComposantStatus::Bon),
            composant(2, 1, ComposantStatus::Defaillant),
            composant(3, 2, ComposantStatus::Defaillant),
        ];
        let filter = ComposantFilter {
            machine_id: Some(1),
            statut: Some(ComposantStatus::Defaillant),
            ..ComposantFilter::default()
        };

        let ids: Vec<u64> = ComposantViewModel::filter(&composants, &filter).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);

        let search = ComposantFilter {
            search: "rlt-3".to_string(),
            ..ComposantFilter::default()
        };
        assert_eq!(ComposantViewModel::filter(&composants, &search).len(), 1);
    }
}
