// ============================================================================
// VALIDACIÓN - Errores por campo (formularios y respuestas 422)
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::constants::{MIN_PASSWORD_LENGTH, RESET_CODE_LENGTH};

/// Mensajes por campo. Mismo formato que el cuerpo de un 422: `{ "nom": ["..."] }`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Número de campos con error
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Primer mensaje del campo
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|msgs| msgs.first()).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Un mensaje por campo (el primero)
    pub fn first_messages(&self) -> Vec<String> {
        self.0.values().filter_map(|msgs| msgs.first().cloned()).collect()
    }

    /// Descarta campos sin mensajes (`"nom": []` en un 422)
    pub fn without_empty(mut self) -> Self {
        self.0.retain(|_, msgs| !msgs.is_empty());
        self
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    // ---- reglas comunes ----

    pub fn required(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    pub fn required_id(&mut self, field: &str, value: Option<u64>, message: &str) {
        if value.is_none() {
            self.add(field, message);
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "L'email est obligatoire");
        } else if !is_valid_email(value) {
            self.add(field, "L'email n'est pas valide");
        }
    }

    pub fn password(&mut self, field: &str, value: &str, confirmation: &str) {
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            self.add(
                field,
                format!("Le mot de passe doit contenir au moins {} caractères", MIN_PASSWORD_LENGTH),
            );
        } else if value != confirmation {
            self.add("password_confirmation", "Les mots de passe ne correspondent pas");
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Código de verificación: exactamente 6 dígitos
pub fn is_valid_reset_code(code: &str) -> bool {
    code.len() == RESET_CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}

/// Color `#RRGGBB`
pub fn is_valid_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_counts_fields_not_messages() {
        let mut errors = FieldErrors::new();
        errors.add("nom", "Le nom est obligatoire");
        errors.add("nom", "Le nom est trop court");
        errors.add("reference", "La référence est obligatoire");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("nom"), Some("Le nom est obligatoire"));
        assert_eq!(errors.first_messages().len(), 2);
    }

    #[test]
    fn test_field_errors_deserialize_from_422_body() {
        let errors: FieldErrors =
            serde_json::from_str(r#"{"email":["Déjà utilisé"],"name":["Requis"]}"#).unwrap();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email", "name"]);
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("tech@usine.fr"));
        assert!(!is_valid_email("tech@usine"));
        assert!(!is_valid_email("@usine.fr"));
        assert!(!is_valid_email("te ch@usine.fr"));
        assert!(!is_valid_email("tech@@usine.fr"));
    }

    #[test]
    fn test_password_rules() {
        let mut errors = FieldErrors::new();
        errors.password("password", "court", "court");
        assert!(errors.get("password").is_some());

        let mut errors = FieldErrors::new();
        errors.password("password", "motdepasse1", "motdepasse2");
        assert!(errors.get("password_confirmation").is_some());

        let mut errors = FieldErrors::new();
        errors.password("password", "motdepasse1", "motdepasse1");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_reset_code_and_color() {
        assert!(is_valid_reset_code("012345"));
        assert!(!is_valid_reset_code("12345"));
        assert!(!is_valid_reset_code("12a456"));
        assert!(is_valid_hex_color("#1A2b3C"));
        assert!(!is_valid_hex_color("1A2B3C"));
        assert!(!is_valid_hex_color("#12345G"));
    }
}
