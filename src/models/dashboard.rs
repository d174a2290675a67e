use serde::{Deserialize, Serialize};

/// `GET /dashboard`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_machines: u32,
    pub machines_actives: u32,
    pub machines_en_maintenance: u32,
    pub total_composants: u32,
    pub composants_defaillants: u32,
    pub demandes_en_attente: u32,
    pub demandes_en_cours: u32,
    pub notifications_non_lues: u32,
}

/// `GET /dashboard/alertes`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alerte {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default = "default_niveau")]
    pub niveau: String,
    #[serde(default)]
    pub machine_id: Option<u64>,
}

fn default_niveau() -> String {
    "info".to_string()
}

impl Alerte {
    pub fn css_class(&self) -> &'static str {
        match self.niveau.as_str() {
            "critique" | "danger" => "alert alert-danger",
            "warning" | "attention" => "alert alert-warning",
            _ => "alert alert-info",
        }
    }
}

/// `GET /dashboard/statistiques-rapides`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatistiquesRapides {
    pub demandes_semaine: u32,
    pub composants_remplaces_mois: u32,
    pub taux_disponibilite: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_tolerate_missing_fields() {
        let stats: DashboardStats = serde_json::from_str(r#"{"total_machines":12}"#).unwrap();
        assert_eq!(stats.total_machines, 12);
        assert_eq!(stats.demandes_en_attente, 0);
    }

    #[test]
    fn test_alert_level_class() {
        let alerte: Alerte =
            serde_json::from_str(r#"{"type":"composant","message":"3 composants défaillants","niveau":"critique"}"#)
                .unwrap();
        assert_eq!(alerte.css_class(), "alert alert-danger");
    }
}
