// ============================================================================
// VIEWMODELS - Lógica de cada pantalla (validación, resultados), sin DOM
// ============================================================================

pub mod machine_viewmodel;
pub mod composant_viewmodel;
pub mod demande_viewmodel;
pub mod type_viewmodel;
pub mod notification_viewmodel;
pub mod dashboard_viewmodel;
pub mod reset_viewmodel;

pub use machine_viewmodel::MachineViewModel;
pub use composant_viewmodel::ComposantViewModel;
pub use demande_viewmodel::DemandeViewModel;
pub use type_viewmodel::TypeViewModel;
pub use notification_viewmodel::NotificationViewModel;
pub use dashboard_viewmodel::{DashboardData, DashboardViewModel};
pub use reset_viewmodel::{ResetFlow, ResetViewModel};

use crate::services::ApiError;
use crate::utils::image::{self, ImageFile};
use crate::utils::FieldErrors;

/// Resultado de un borrado desde una lista
#[derive(Clone, Debug, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    /// Bloqueado por regla de negocio (local o 409); la lista no cambia
    Blocked(String),
}

/// Añade los problemas de la imagen al campo `image`
pub(crate) fn check_image(errors: &mut FieldErrors, image: Option<&ImageFile>) {
    if let Some(file) = image {
        for violation in image::validate(file) {
            errors.add("image", violation);
        }
    }
}

/// Valida formulario + imagen; error de formulario sin tocar la red
pub(crate) fn validate_with_image(
    form_result: Result<(), FieldErrors>,
    image: Option<&ImageFile>,
) -> Result<(), ApiError> {
    let mut errors = form_result.err().unwrap_or_default();
    check_image(&mut errors, image);
    errors.into_result().map_err(ApiError::invalid_form)
}

/// Traduce un 409 a bloqueo visible; el resto de errores se propaga
pub(crate) fn conflict_to_blocked(result: Result<(), ApiError>) -> Result<DeleteOutcome, ApiError> {
    match result {
        Ok(()) => Ok(DeleteOutcome::Deleted),
        Err(ApiError::Conflict(reason)) => Ok(DeleteOutcome::Blocked(format!("Suppression impossible : {}", reason))),
        Err(e) => Err(e),
    }
}
