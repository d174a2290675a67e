// ============================================================================
// RESET VIEWMODEL - Asistente de 3 pasos para recuperar la contraseña
// ============================================================================
//
// email → código de 6 dígitos (15 min) → nueva contraseña.
// El estado del flujo vive sólo en memoria.

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::auth::ResetPasswordRequest;
use crate::routes::Route;
use crate::services::{ApiError, AuthService, Gateway};
use crate::utils::validation::is_valid_reset_code;
use crate::utils::FieldErrors;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResetFlow {
    pub email: Option<String>,
    pub reset_token: Option<String>,
}

impl ResetFlow {
    /// Paso 3: sin email y token se vuelve al paso 1
    pub fn completion_target(&self) -> Result<(String, String), Route> {
        match (&self.email, &self.reset_token) {
            (Some(email), Some(token)) => Ok((email.clone(), token.clone())),
            _ => Err(Route::ForgotPassword),
        }
    }

    /// Paso 2: sin email no hay código que verificar
    pub fn verification_target(&self) -> Result<String, Route> {
        self.email.clone().ok_or(Route::ForgotPassword)
    }
}

#[derive(Clone)]
pub struct ResetViewModel {
    auth: AuthService,
    flow: Rc<RefCell<ResetFlow>>,
}

impl ResetViewModel {
    pub fn new(gateway: Rc<Gateway>, flow: Rc<RefCell<ResetFlow>>) -> Self {
        Self {
            auth: AuthService::new(gateway),
            flow,
        }
    }

    pub fn flow(&self) -> ResetFlow {
        self.flow.borrow().clone()
    }

    /// Paso 1 (y reenvío desde el paso 2)
    pub async fn request_code(&self, email: &str) -> Result<String, ApiError> {
        let email = email.trim().to_string();
        let mut errors = FieldErrors::new();
        errors.email("email", &email);
        errors.into_result().map_err(ApiError::invalid_form)?;

        let response = self.auth.forgot_password(&email).await?;
        *self.flow.borrow_mut() = ResetFlow {
            email: Some(email),
            reset_token: None,
        };
        Ok(response
            .message
            .unwrap_or_else(|| "Un code de vérification a été envoyé".to_string()))
    }

    pub async fn verify_code(&self, code: &str) -> Result<(), ApiError> {
        let email = self
            .flow
            .borrow()
            .email
            .clone()
            .ok_or_else(|| invalid("email", "Adresse email manquante, recommencez la procédure"))?;
        let code = code.trim();
        if !is_valid_reset_code(code) {
            return Err(invalid("code", "Le code doit contenir 6 chiffres"));
        }

        let response = self.auth.verify_reset_code(&email, code).await?;
        self.flow.borrow_mut().reset_token = Some(response.reset_token);
        Ok(())
    }

    /// Paso 3; al terminar se olvida el flujo
    pub async fn complete(&self, password: &str, confirmation: &str) -> Result<(), ApiError> {
        let (email, token) = self
            .flow
            .borrow()
            .completion_target()
            .map_err(|_| invalid("token", "Session de réinitialisation expirée, recommencez"))?;

        let mut errors = FieldErrors::new();
        errors.password("password", password, confirmation);
        errors.into_result().map_err(ApiError::invalid_form)?;

        let request = ResetPasswordRequest {
            email,
            token,
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
        };
        self.auth.reset_password(&request).await?;
        *self.flow.borrow_mut() = ResetFlow::default();
        log::info!("🔑 Contraseña restablecida");
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ApiError {
    let mut errors = FieldErrors::new();
    errors.add(field, message);
    ApiError::invalid_form(errors)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::services::gateway::test_support::gateway;
    use crate::services::transport::RequestBody;

    fn viewmodel() -> (ResetViewModel, Rc<crate::services::transport::mock::MockTransport>) {
        let (gateway, transport, _) = gateway();
        (ResetViewModel::new(gateway, Rc::new(RefCell::new(ResetFlow::default()))), transport)
    }

    #[test]
    fn test_step_three_without_token_goes_back_to_step_one() {
        let flow = ResetFlow {
            email: Some("a@usine.fr".to_string()),
            reset_token: None,
        };
        assert_eq!(flow.completion_target(), Err(Route::ForgotPassword));
        assert_eq!(ResetFlow::default().verification_target(), Err(Route::ForgotPassword));
    }

    #[test]
    fn test_full_flow_forwards_email_and_token() {
        let (vm, transport) = viewmodel();
        transport.respond(200, r#"{"message":"Code envoyé"}"#);
        transport.respond(200, r#"{"reset_token":"tok-123"}"#);
        transport.respond(200, r#"{"message":"Mot de passe réinitialisé"}"#);

        assert_eq!(block_on(vm.request_code(" chef@usine.fr ")).unwrap(), "Code envoyé");
        block_on(vm.verify_code("123456")).unwrap();
        assert_eq!(vm.flow().reset_token.as_deref(), Some("tok-123"));
        block_on(vm.complete("nouveaupass", "nouveaupass")).unwrap();

        let RequestBody::Json(body) = transport.last_request().unwrap().body else {
            panic!("expected json body");
        };
        assert_eq!(body["email"], "chef@usine.fr");
        assert_eq!(body["token"], "tok-123");
        assert_eq!(vm.flow(), ResetFlow::default());
    }

    #[test]
    fn test_malformed_code_rejected_locally() {
        let (vm, transport) = viewmodel();
        transport.respond(200, "{}");
        block_on(vm.request_code("chef@usine.fr")).unwrap();

        let err = block_on(vm.verify_code("12a456")).unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("code"), Some("Le code doit contenir 6 chiffres"));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_password_mismatch_rejected_locally() {
        let (vm, transport) = viewmodel();
        *vm.flow.borrow_mut() = ResetFlow {
            email: Some("chef@usine.fr".to_string()),
            reset_token: Some("tok".to_string()),
        };

        let err = block_on(vm.complete("motdepasse1", "motdepasse2")).unwrap_err();
        assert!(err.field_errors().unwrap().get("password_confirmation").is_some());
        assert_eq!(transport.request_count(), 0);
    }
}
