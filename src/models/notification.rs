use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub titre: String,
    pub message: String,
    pub lue: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Notification {
    /// "il y a 5 min", "il y a 2 h", "il y a 3 j"
    pub fn age_label(&self, now: DateTime<Utc>) -> Option<String> {
        let created = DateTime::parse_from_rfc3339(self.created_at.as_deref()?).ok()?;
        let minutes = now.signed_duration_since(created.with_timezone(&Utc)).num_minutes().max(0);
        Some(match minutes {
            0 => "à l'instant".to_string(),
            m if m < 60 => format!("il y a {} min", m),
            m if m < 60 * 24 => format!("il y a {} h", m / 60),
            m => format!("il y a {} j", m / (60 * 24)),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct NotificationCount {
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_label() {
        let notification = Notification {
            id: 1,
            titre: "Demande acceptée".to_string(),
            message: "Votre demande #4 a été acceptée".to_string(),
            lue: false,
            kind: None,
            created_at: Some("2024-03-01T10:00:00.000000Z".to_string()),
        };
        let now = DateTime::parse_from_rfc3339("2024-03-01T12:30:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(notification.age_label(now).as_deref(), Some("il y a 2 h"));

        let now = DateTime::parse_from_rfc3339("2024-03-01T10:07:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(notification.age_label(now).as_deref(), Some("il y a 7 min"));
    }
}
