use serde::{Deserialize, Serialize};

use crate::models::composant::Related;
use crate::utils::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandeStatus {
    EnAttente,
    EnCours,
    Acceptee,
    Refusee,
}

impl DemandeStatus {
    pub const ALL: [DemandeStatus; 4] = [Self::EnAttente, Self::EnCours, Self::Acceptee, Self::Refusee];

    pub fn label(&self) -> &'static str {
        match self {
            Self::EnAttente => "En attente",
            Self::EnCours => "En cours",
            Self::Acceptee => "Acceptée",
            Self::Refusee => "Refusée",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnAttente => "en_attente",
            Self::EnCours => "en_cours",
            Self::Acceptee => "acceptee",
            Self::Refusee => "refusee",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::EnAttente => "badge badge-warning",
            Self::EnCours => "badge badge-info",
            Self::Acceptee => "badge badge-success",
            Self::Refusee => "badge badge-danger",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priorite {
    Basse,
    Normale,
    Haute,
    Critique,
}

impl Priorite {
    pub const ALL: [Priorite; 4] = [Self::Basse, Self::Normale, Self::Haute, Self::Critique];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Basse => "Basse",
            Self::Normale => "Normale",
            Self::Haute => "Haute",
            Self::Critique => "Critique",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basse => "basse",
            Self::Normale => "normale",
            Self::Haute => "haute",
            Self::Critique => "critique",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Basse => "badge badge-muted",
            Self::Normale => "badge badge-info",
            Self::Haute => "badge badge-warning",
            Self::Critique => "badge badge-danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Demandeur {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Demande {
    pub id: u64,
    pub titre: String,
    pub description: String,
    pub machine_id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub statut: DemandeStatus,
    pub priorite: Priorite,
    #[serde(default)]
    pub commentaire_admin: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub machine: Option<Related>,
    #[serde(default)]
    pub user: Option<Demandeur>,
}

impl Demande {
    /// Sólo las demandes abiertas se pueden aceptar o rechazar
    pub fn is_open(&self) -> bool {
        matches!(self.statut, DemandeStatus::EnAttente | DemandeStatus::EnCours)
    }

    pub fn machine_name(&self) -> String {
        self.machine
            .as_ref()
            .map(|m| m.nom.clone())
            .unwrap_or_else(|| format!("Machine #{}", self.machine_id))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemandeForm {
    pub titre: String,
    pub description: String,
    pub machine_id: Option<u64>,
    pub priorite: Priorite,
}

impl Default for DemandeForm {
    fn default() -> Self {
        Self {
            titre: String::new(),
            description: String::new(),
            machine_id: None,
            priorite: Priorite::Normale,
        }
    }
}

impl DemandeForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("titre", &self.titre, "Le titre est obligatoire");
        errors.required("description", &self.description, "La description est obligatoire");
        errors.required_id("machine_id", self.machine_id, "La machine est obligatoire");
        errors.into_result()
    }
}

/// Cuerpo de `PATCH /demandes/:id/accepter|refuser`
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DemandeDecision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentaire_admin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_priority_wire_names() {
        let json = r#"{"id":9,"titre":"Fuite","description":"Fuite d'huile","machine_id":2,
            "statut":"en_attente","priorite":"critique"}"#;
        let demande: Demande = serde_json::from_str(json).unwrap();
        assert_eq!(demande.statut, DemandeStatus::EnAttente);
        assert_eq!(demande.priorite, Priorite::Critique);
        assert!(demande.is_open());
        assert_eq!(serde_json::to_string(&DemandeStatus::Refusee).unwrap(), "\"refusee\"");
    }

    #[test]
    fn test_decision_without_comment_is_empty_object() {
        let body = serde_json::to_string(&DemandeDecision::default()).unwrap();
        assert_eq!(body, "{}");
    }
}
