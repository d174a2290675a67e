use serde::{Deserialize, Serialize};

use crate::utils::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposantStatus {
    Bon,
    Usure,
    Defaillant,
    Remplace,
}

impl ComposantStatus {
    pub const ALL: [ComposantStatus; 4] = [Self::Bon, Self::Usure, Self::Defaillant, Self::Remplace];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bon => "Bon état",
            Self::Usure => "Usure",
            Self::Defaillant => "Défaillant",
            Self::Remplace => "Remplacé",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bon => "bon",
            Self::Usure => "usure",
            Self::Defaillant => "defaillant",
            Self::Remplace => "remplace",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Bon => "badge badge-success",
            Self::Usure => "badge badge-warning",
            Self::Defaillant => "badge badge-danger",
            Self::Remplace => "badge badge-muted",
        }
    }
}

/// Referencia embebida (`machine`, `type`) en la respuesta de un composant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Related {
    pub id: u64,
    pub nom: String,
    #[serde(default)]
    pub couleur: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Composant {
    pub id: u64,
    pub nom: String,
    pub reference: String,
    pub machine_id: u64,
    pub type_id: u64,
    pub statut: ComposantStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_installation: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub machine: Option<Related>,
    #[serde(default, rename = "type")]
    pub type_composant: Option<Related>,
}

impl Composant {
    pub fn machine_name(&self) -> String {
        self.machine
            .as_ref()
            .map(|m| m.nom.clone())
            .unwrap_or_else(|| format!("Machine #{}", self.machine_id))
    }

    pub fn type_name(&self) -> String {
        self.type_composant
            .as_ref()
            .map(|t| t.nom.clone())
            .unwrap_or_else(|| format!("Type #{}", self.type_id))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ComposantForm {
    pub nom: String,
    pub reference: String,
    pub machine_id: Option<u64>,
    pub type_id: Option<u64>,
    pub statut: Option<ComposantStatus>,
    pub description: Option<String>,
    pub date_installation: Option<String>,
}

impl From<&Composant> for ComposantForm {
    fn from(composant: &Composant) -> Self {
        Self {
            nom: composant.nom.clone(),
            reference: composant.reference.clone(),
            machine_id: Some(composant.machine_id),
            type_id: Some(composant.type_id),
            statut: Some(composant.statut),
            description: composant.description.clone(),
            date_installation: composant.date_installation.clone(),
        }
    }
}

impl ComposantForm {
    /// Formulario vacío del modal de creación
    pub fn blank() -> Self {
        Self {
            statut: Some(ComposantStatus::Bon),
            ..Self::default()
        }
    }

    /// Machine y type los valida el servidor (422)
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("nom", &self.nom, "Le nom est obligatoire");
        errors.required("reference", &self.reference, "La référence est obligatoire");
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_nom_and_reference_give_two_errors() {
        let errors = ComposantForm::blank().validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["nom", "reference"]);
    }

    #[test]
    fn test_embedded_type_uses_type_key() {
        let json = r##"{"id":1,"nom":"Roulement","reference":"R-6204","machine_id":4,"type_id":2,
            "statut":"usure","type":{"id":2,"nom":"Mécanique","couleur":"#ff8800"}}"##;
        let composant: Composant = serde_json::from_str(json).unwrap();
        assert_eq!(composant.type_name(), "Mécanique");
        assert_eq!(composant.machine_name(), "Machine #4");
        assert_eq!(composant.statut, ComposantStatus::Usure);
    }
}
