use serde::{Deserialize, Serialize};

use crate::utils::validation::is_valid_hex_color;
use crate::utils::FieldErrors;

/// Etiqueta/categoría de composant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeComposant {
    pub id: u64,
    pub nom: String,
    #[serde(default)]
    pub description: Option<String>,
    pub couleur: String,
    pub actif: bool,
    #[serde(default)]
    pub composants_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeForm {
    pub nom: String,
    pub description: Option<String>,
    pub couleur: String,
    pub actif: bool,
}

impl Default for TypeForm {
    fn default() -> Self {
        Self {
            nom: String::new(),
            description: None,
            couleur: "#3b82f6".to_string(),
            actif: true,
        }
    }
}

impl From<&TypeComposant> for TypeForm {
    fn from(t: &TypeComposant) -> Self {
        Self {
            nom: t.nom.clone(),
            description: t.description.clone(),
            couleur: t.couleur.clone(),
            actif: t.actif,
        }
    }
}

impl TypeForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("nom", &self.nom, "Le nom est obligatoire");
        if !is_valid_hex_color(&self.couleur) {
            errors.add("couleur", "La couleur doit être au format #RRGGBB");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_form_color_rule() {
        let form = TypeForm {
            nom: "Électrique".to_string(),
            couleur: "rouge".to_string(),
            ..TypeForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["couleur"]);
        assert!(TypeForm { nom: "Électrique".to_string(), ..TypeForm::default() }.validate().is_ok());
    }
}
