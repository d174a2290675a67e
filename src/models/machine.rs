use serde::{Deserialize, Serialize};

use crate::utils::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    Actif,
    Inactif,
    Maintenance,
}

impl MachineStatus {
    pub const ALL: [MachineStatus; 3] = [Self::Actif, Self::Inactif, Self::Maintenance];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Actif => "Actif",
            Self::Inactif => "Inactif",
            Self::Maintenance => "En maintenance",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actif => "actif",
            Self::Inactif => "inactif",
            Self::Maintenance => "maintenance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Actif => "badge badge-success",
            Self::Inactif => "badge badge-muted",
            Self::Maintenance => "badge badge-warning",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: u64,
    pub nom: String,
    pub numero_serie: String,
    #[serde(default)]
    pub modele: Option<String>,
    #[serde(default)]
    pub localisation: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub statut: MachineStatus,
    #[serde(default)]
    pub date_installation: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub composants_count: Option<u32>,
    #[serde(default)]
    pub demandes_count: Option<u32>,
}

impl Machine {
    /// Con composants asociados no se puede borrar desde la UI
    pub fn has_composants(&self) -> bool {
        self.composants_count.unwrap_or(0) > 0
    }

    /// Búsqueda por nombre, número de serie o localización
    pub fn matches(&self, search: &str) -> bool {
        let search = search.trim().to_lowercase();
        if search.is_empty() {
            return true;
        }
        self.nom.to_lowercase().contains(&search)
            || self.numero_serie.to_lowercase().contains(&search)
            || self
                .localisation
                .as_deref()
                .map(|l| l.to_lowercase().contains(&search))
                .unwrap_or(false)
    }
}

/// Formulario de creación/edición
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MachineForm {
    pub nom: String,
    pub numero_serie: String,
    pub modele: Option<String>,
    pub localisation: Option<String>,
    pub description: Option<String>,
    pub statut: MachineStatus,
    pub date_installation: Option<String>,
}

impl Default for MachineForm {
    fn default() -> Self {
        Self {
            nom: String::new(),
            numero_serie: String::new(),
            modele: None,
            localisation: None,
            description: None,
            statut: MachineStatus::Actif,
            date_installation: None,
        }
    }
}

impl From<&Machine> for MachineForm {
    fn from(machine: &Machine) -> Self {
        Self {
            nom: machine.nom.clone(),
            numero_serie: machine.numero_serie.clone(),
            modele: machine.modele.clone(),
            localisation: machine.localisation.clone(),
            description: machine.description.clone(),
            statut: machine.statut,
            date_installation: machine.date_installation.clone(),
        }
    }
}

impl MachineForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("nom", &self.nom, "Le nom est obligatoire");
        errors.required("numero_serie", &self.numero_serie, "Le numéro de série est obligatoire");
        if let Some(ref date) = self.date_installation {
            if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                errors.add("date_installation", "La date d'installation n'est pas valide");
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(composants: Option<u32>) -> Machine {
        Machine {
            id: 1,
            nom: "Presse hydraulique".to_string(),
            numero_serie: "PH-2201".to_string(),
            modele: None,
            localisation: Some("Atelier B".to_string()),
            description: None,
            statut: MachineStatus::Actif,
            date_installation: None,
            image: None,
            composants_count: composants,
            demandes_count: None,
        }
    }

    #[test]
    fn test_has_composants() {
        assert!(machine(Some(2)).has_composants());
        assert!(!machine(Some(0)).has_composants());
        assert!(!machine(None).has_composants());
    }

    #[test]
    fn test_search_matches_serial_and_location() {
        let m = machine(None);
        assert!(m.matches("ph-22"));
        assert!(m.matches("atelier"));
        assert!(m.matches("  "));
        assert!(!m.matches("tour"));
    }

    #[test]
    fn test_status_wire_format() {
        let json = r#"{"id":3,"nom":"Tour","numero_serie":"T1","statut":"maintenance"}"#;
        let m: Machine = serde_json::from_str(json).unwrap();
        assert_eq!(m.statut, MachineStatus::Maintenance);
        assert_eq!(MachineStatus::parse("inactif"), Some(MachineStatus::Inactif));
    }

    #[test]
    fn test_form_rejects_bad_date() {
        let form = MachineForm {
            nom: "Tour".to_string(),
            numero_serie: "T1".to_string(),
            date_installation: Some("31/12/2023".to_string()),
            ..MachineForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("date_installation").is_some());
    }
}
