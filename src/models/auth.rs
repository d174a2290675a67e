use serde::{Deserialize, Serialize};

use crate::utils::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Iniciales para el avatar del header
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.email("email", &self.email);
        errors.required("password", &self.password, "Le mot de passe est obligatoire");
        errors.into_result()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("name", &self.name, "Le nom est obligatoire");
        errors.email("email", &self.email);
        errors.password("password", &self.password, &self.password_confirmation);
        errors.into_result()
    }
}

/// Respuesta de login/register
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /auth/me` y `PUT /auth/profile`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserResponse {
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

/// Cambio de perfil; la contraseña es opcional
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("name", &self.name, "Le nom est obligatoire");
        errors.email("email", &self.email);
        if let Some(ref password) = self.password {
            let confirmation = self.password_confirmation.as_deref().unwrap_or("");
            errors.password("password", password, confirmation);
            if self.current_password.as_deref().unwrap_or("").is_empty() {
                errors.add("current_password", "Le mot de passe actuel est obligatoire");
            }
        }
        errors.into_result()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerifyResetCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VerifyResetCodeResponse {
    pub reset_token: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub token: String,
    pub password: String,
    pub password_confirmation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_defaults_to_user() {
        let user: User = serde_json::from_str(r#"{"id":1,"name":"Ana","email":"a@b.fr"}"#).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());

        let admin: User =
            serde_json::from_str(r#"{"id":2,"name":"Luc","email":"l@b.fr","role":"admin"}"#).unwrap();
        assert!(admin.is_admin());
    }

    #[test]
    fn test_initials() {
        let user = User {
            id: 1,
            name: "marie claire dupont".to_string(),
            email: "m@d.fr".to_string(),
            role: Role::User,
            created_at: None,
        };
        assert_eq!(user.initials(), "MC");
    }

    #[test]
    fn test_profile_update_skips_empty_password_fields() {
        let update = ProfileUpdate {
            name: "Ana".to_string(),
            email: "ana@usine.fr".to_string(),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("password").is_none());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_profile_password_change_needs_current_password() {
        let update = ProfileUpdate {
            name: "Ana".to_string(),
            email: "ana@usine.fr".to_string(),
            current_password: None,
            password: Some("nouveaumdp".to_string()),
            password_confirmation: Some("nouveaumdp".to_string()),
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["current_password"]);
    }

    #[test]
    fn test_register_validation() {
        let request = RegisterRequest {
            name: String::new(),
            email: "pas-un-email".to_string(),
            password: "court".to_string(),
            password_confirmation: "court".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
