// ============================================================================
// MACHINE VIEWMODEL
// ============================================================================

use std::rc::Rc;

use crate::models::machine::{Machine, MachineForm, MachineStatus};
use crate::services::{ApiError, Gateway, MachineService};
use crate::utils::image::ImageFile;
use crate::viewmodels::{conflict_to_blocked, validate_with_image, DeleteOutcome};

#[derive(Clone)]
pub struct MachineViewModel {
    service: MachineService,
}

impl MachineViewModel {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self {
            service: MachineService::new(gateway),
        }
    }

    pub async fn load(&self) -> Result<Vec<Machine>, ApiError> {
        self.service.list().await
    }

    pub async fn load_actives(&self) -> Result<Vec<Machine>, ApiError> {
        self.service.actives().await
    }

    pub async fn load_one(&self, id: u64) -> Result<Machine, ApiError> {
        self.service.get(id).await
    }

    /// Crear (id None) o actualizar; la imagen va en multipart al crear
    /// y por `/machines/:id/image` al editar
    pub async fn save(&self, id: Option<u64>, form: &MachineForm, image: Option<&ImageFile>) -> Result<Machine, ApiError> {
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

    pub async fn remove_image(&self, machine: &mut Machine) -> Result<(), ApiError> {
        self.service.delete_image(machine.id).await?;
        machine.image = None;
        Ok(())
    }

    /// Con composants no se llama a la API; un 409 del servidor también bloquea
    pub async fn delete(&self, machines: &mut Vec<Machine>, id: u64) -> Result<DeleteOutcome, ApiError> {
        if let Some(machine) = machines.iter().find(|m| m.id == id) {
            if machine.has_composants() {
                return Ok(DeleteOutcome::Blocked(format!(
                    "Suppression impossible : la machine « {} » possède {} composant(s)",
                    machine.nom,
                    machine.composants_count.unwrap_or(0)
                )));
            }
        }

        let outcome = conflict_to_blocked(self.service.delete(id).await)?;
        if outcome == DeleteOutcome::Deleted {
            machines.retain(|m| m.id != id);
        }
        Ok(outcome)
    }

    pub fn filter<'a>(machines: &'a [Machine], search: &str, statut: Option<MachineStatus>) -> Vec<&'a Machine> {
        machines
            .iter()
            .filter(|m| statut.map(|s| m.statut == s).unwrap_or(true))
            .filter(|m| m.matches(search))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::services::gateway::test_support::gateway;

    fn machine(id: u64, composants: Option<u32>) -> Machine {
        Machine {
            id,
            nom: format!("Machine {}", id),
            numero_serie: format!("SN-{}", id),
            modele: None,
            localisation: None,
            description: None,
            statut: MachineStatus::Actif,
            date_installation: None,
            image: None,
            composants_count: composants,
            demandes_count: None,
        }
    }

    #[test]
    fn test_delete_with_known_composants_is_blocked_locally() {
        let (gateway, transport, _) = gateway();
        let vm = MachineViewModel::new(gateway);
        let mut machines = vec![machine(1, Some(3)), machine(2, Some(0))];

        let outcome = block_on(vm.delete(&mut machines, 1)).unwrap();

        assert!(matches!(outcome, DeleteOutcome::Blocked(ref m) if m.starts_with("Suppression impossible")));
        assert_eq!(machines.len(), 2);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_delete_conflict_from_server_keeps_machine_in_list() {
        let (gateway, transport, toasts) = gateway();
        transport.respond(409, r#"{"message":"Cette machine possède des composants"}"#);
        let vm = MachineViewModel::new(gateway);
        let mut machines = vec![machine(1, None)];

        let outcome = block_on(vm.delete(&mut machines, 1)).unwrap();

        let DeleteOutcome::Blocked(message) = outcome else {
            panic!("expected blocked");
        };
        assert!(message.to_lowercase().contains("suppression impossible"));
        assert_eq!(machines.len(), 1);
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_delete_success_removes_from_list() {
        let (gateway, transport, _) = gateway();
        transport.respond(204, "");
        let vm = MachineViewModel::new(gateway);
        let mut machines = vec![machine(1, Some(0)), machine(2, None)];

        let outcome = block_on(vm.delete(&mut machines, 2)).unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(machines.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1]);
        assert!(transport.last_request().unwrap().url.ends_with("/machines/2"));
    }

    #[test]
    fn test_save_with_oversized_image_makes_no_request() {
        let (gateway, transport, _) = gateway();
        let vm = MachineViewModel::new(gateway);
        let form = MachineForm {
            nom: "Tour CN".to_string(),
            numero_serie: "TCN-1".to_string(),
            ..MachineForm::default()
        };
        let image = ImageFile {
            name: "huge.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0; 5 * 1024 * 1024 + 1],
        };

        let err = block_on(vm.save(None, &form, Some(&image))).unwrap_err();

        assert_eq!(err.field_errors().unwrap().fields().collect::<Vec<_>>(), vec!["image"]);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_edit_with_image_uploads_after_update() {
        let (gateway, transport, _) = gateway();
        let body = r#"{"data":{"id":5,"nom":"Tour CN","numero_serie":"TCN-1","statut":"actif"}}"#;
        transport.respond(200, body);
        transport.respond(200, body);
        let vm = MachineViewModel::new(gateway);
        let form = MachineForm {
            nom: "Tour CN".to_string(),
            numero_serie: "TCN-1".to_string(),
            ..MachineForm::default()
        };
        let image = ImageFile {
            name: "tour.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
        };

        let saved = block_on(vm.save(Some(5), &form, Some(&image))).unwrap();

        assert_eq!(saved.id, 5);
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].url.ends_with("/machines/5/image"));
        assert!(requests[1].body.is_multipart());
    }

    #[test]
    fn test_filter_by_status_and_search() {
        let mut maintenance = machine(3, None);
        maintenance.statut = MachineStatus::Maintenance;
        let machines = vec![machine(1, None), machine(2, None), maintenance];

        assert_eq!(MachineViewModel::filter(&machines, "", Some(MachineStatus::Maintenance)).len(), 1);
        assert_eq!(MachineViewModel::filter(&machines, "sn-2", None).len(), 1);
        assert_eq!(MachineViewModel::filter(&machines, "", None).len(), 3);
    }
}
