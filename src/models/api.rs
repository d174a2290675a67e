use serde::{Deserialize, Serialize};

/// Respuesta de la API: envuelta en `{ "data": ... }` o directa
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Respuestas que sólo traen un mensaje (`{ "message": "..." }`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: u64,
    }

    #[test]
    fn test_envelope_accepts_wrapped_and_bare_lists() {
        let wrapped: Envelope<Vec<Item>> = serde_json::from_str(r#"{"data":[{"id":1}]}"#).unwrap();
        let bare: Envelope<Vec<Item>> = serde_json::from_str(r#"[{"id":1}]"#).unwrap();
        assert_eq!(wrapped.into_inner(), vec![Item { id: 1 }]);
        assert_eq!(bare.into_inner(), vec![Item { id: 1 }]);
    }

    #[test]
    fn test_envelope_paginated_body_keeps_data() {
        let page: Envelope<Vec<Item>> =
            serde_json::from_str(r#"{"data":[{"id":2}],"current_page":1,"total":1}"#).unwrap();
        assert_eq!(page.into_inner(), vec![Item { id: 2 }]);
    }
}
