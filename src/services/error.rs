// ============================================================================
// API ERROR - Taxonomía de errores del gateway
// ============================================================================

use thiserror::Error;

use crate::utils::FieldErrors;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// 401: la sesión ya no es válida
    #[error("{0}")]
    Unauthorized(String),

    /// 422 (o validación local del formulario)
    #[error("{message}")]
    Validation { message: String, fields: FieldErrors },

    /// 409: regla de negocio que bloquea la operación
    #[error("{0}")]
    Conflict(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Erreur réseau : {0}")]
    Network(String),

    #[error("Le serveur ne répond pas (délai dépassé)")]
    Timeout,

    #[error("Réponse invalide du serveur : {0}")]
    Decode(String),
}

impl ApiError {
    /// Error de validación local: nunca llega a la red
    pub fn invalid_form(fields: FieldErrors) -> Self {
        ApiError::Validation {
            message: "Le formulaire contient des erreurs".to_string(),
            fields,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Validation { .. } => Some(422),
            ApiError::Conflict(_) => Some(409),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Errores por campo para mostrar bajo cada input
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }
}
