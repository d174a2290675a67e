// ============================================================================
// GATEWAY - Punto único de salida HTTP hacia la API
// ============================================================================
// - Adjunta `Authorization: Bearer <token>` si hay token
// - JSON o multipart según haya imagen
// - Normaliza errores: 401 → evento unauthorized, 422 → un toast por campo,
//   resto → un toast genérico. Los llamadores sólo tratan el caso de éxito
//   (y opcionalmente los errores por campo del formulario)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::services::error::ApiError;
use crate::services::transport::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport, TransportError};
use crate::state::toast_state::{Notifier, ToastLevel};
use crate::utils::constants::FALLBACK_ERROR_MESSAGE;
use crate::utils::image::ImageFile;
use crate::utils::FieldErrors;

const SESSION_EXPIRED_MESSAGE: &str = "Session expirée, veuillez vous reconnecter";
const NETWORK_ERROR_MESSAGE: &str = "Impossible de joindre le serveur";

/// Opciones por request
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// No emitir toasts globales (logout, comprobación de sesión al arrancar)
    pub silent: bool,
}

impl RequestOptions {
    pub fn silent() -> Self {
        Self { silent: true }
    }
}

/// Cuerpo de error de la API (`{ message, errors }`)
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

/// Traduce un status no-2xx a ApiError (sin efectos secundarios)
pub fn classify_error(status: u16, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|m| !m.trim().is_empty());

    match status {
        401 => ApiError::Unauthorized(message.unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string())),
        422 => ApiError::Validation {
            message: message.unwrap_or_else(|| "Données invalides".to_string()),
            fields: parsed.errors.map(FieldErrors::without_empty).unwrap_or_default(),
        },
        409 => ApiError::Conflict(message.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())),
        _ => ApiError::Http {
            status,
            message: message.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
        },
    }
}

pub struct Gateway {
    base_url: String,
    timeout_ms: u32,
    token: RefCell<Option<String>>,
    transport: Rc<dyn Transport>,
    notifier: Rc<dyn Notifier>,
    unauthorized_listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

impl Gateway {
    pub fn new(
        base_url: impl Into<String>,
        timeout_ms: u32,
        transport: Rc<dyn Transport>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
            token: RefCell::new(None),
            transport,
            notifier,
            unauthorized_listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn has_token(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Suscribirse al evento 401 (Session Store, navegación a /login)
    pub fn on_unauthorized(&self, listener: impl Fn() + 'static) {
        self.unauthorized_listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn build_request(&self, method: HttpMethod, path: &str, body: RequestBody) -> HttpRequest {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(ref token) = *self.token.borrow() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
            timeout_ms: self.timeout_ms,
        }
    }

    /// Envía y clasifica; devuelve la respuesta 2xx cruda
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(method, path, body);
        log::debug!("➡️ {} {}", method.as_str(), request.url);

        let result = match self.transport.send(request).await {
            Ok(response) if response.is_success() => return Ok(response),
            Ok(response) => {
                log::warn!("⚠️ {} {} → HTTP {}", method.as_str(), path, response.status);
                classify_error(response.status, &response.body)
            }
            Err(TransportError::Timeout) => {
                log::error!("⏱️ Timeout en {} {}", method.as_str(), path);
                ApiError::Timeout
            }
            Err(TransportError::Network(e)) => {
                log::error!("❌ Error de red en {} {}: {}", method.as_str(), path, e);
                ApiError::Network(e)
            }
        };
        self.handle_error(&result, options);
        Err(result)
    }

    /// Efectos globales de un error: limpieza de sesión y toasts
    fn handle_error(&self, error: &ApiError, options: RequestOptions) {
        if let ApiError::Unauthorized(_) = error {
            self.set_token(None);
            // Copia: un listener puede registrar otros al re-renderizar
            let listeners: Vec<Rc<dyn Fn()>> = self.unauthorized_listeners.borrow().clone();
            log::warn!("🔒 401 recibido, notificando {} listeners", listeners.len());
            for listener in listeners {
                listener();
            }
        }

        if options.silent {
            return;
        }

        match error {
            ApiError::Validation { message, fields } => {
                if fields.is_empty() {
                    self.notifier.notify(ToastLevel::Warning, message);
                }
                for field_message in fields.first_messages() {
                    self.notifier.notify(ToastLevel::Warning, &field_message);
                }
            }
            ApiError::Network(_) => self.notifier.notify(ToastLevel::Error, NETWORK_ERROR_MESSAGE),
            other => self.notifier.notify(ToastLevel::Error, &other.to_string()),
        }
    }

    fn decode<T: DeserializeOwned>(&self, response: HttpResponse, options: RequestOptions) -> Result<T, ApiError> {
        let body = if response.body.trim().is_empty() { "null" } else { response.body.as_str() };
        serde_json::from_str(body).map_err(|e| {
            log::error!("❌ Respuesta no decodificable: {}", e);
            let error = ApiError::Decode(e.to_string());
            self.handle_error(&error, options);
            error
        })
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.execute(method, path, body, options).await?;
        self.decode(response, options)
    }

    fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
        serde_json::to_value(body)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpMethod::Get, path, RequestBody::Empty, RequestOptions::default()).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = Self::json_body(body)?;
        self.request(HttpMethod::Post, path, body, RequestOptions::default()).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = Self::json_body(body)?;
        self.request(HttpMethod::Put, path, body, RequestOptions::default()).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = Self::json_body(body)?;
        self.request(HttpMethod::Patch, path, body, RequestOptions::default()).await
    }

    /// Request cuyo cuerpo de respuesta no interesa (DELETE, PATCH de marcado, logout)
    pub async fn send(&self, method: HttpMethod, path: &str, options: RequestOptions) -> Result<(), ApiError> {
        self.execute(method, path, RequestBody::Empty, options).await.map(|_| ())
    }

    /// Formulario con imagen opcional: multipart si hay imagen, JSON si no
    pub async fn send_form<F: Serialize, T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        form: &F,
        image: Option<&ImageFile>,
    ) -> Result<T, ApiError> {
        let fields = serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))?;
        let body = RequestBody::form(fields, image.map(|img| ("image", img)));
        self.request(method, path, body, RequestOptions::default()).await
    }
}

#[cfg(test)]
pub mod test_support {
    use std::rc::Rc;

    use super::Gateway;
    use crate::services::transport::mock::MockTransport;
    use crate::state::toast_state::ToastStore;

    /// Gateway con transporte simulado y toasts inspeccionables
    pub fn gateway() -> (Rc<Gateway>, Rc<MockTransport>, Rc<ToastStore>) {
        let transport = Rc::new(MockTransport::new());
        let toasts = Rc::new(ToastStore::new());
        let gateway = Rc::new(Gateway::new(
            "http://api.test/api",
            15_000,
            transport.clone(),
            toasts.clone(),
        ));
        (gateway, transport, toasts)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;
    use serde_json::Value;

    use super::test_support::gateway;
    use super::*;

    #[test]
    fn test_bearer_token_and_accept_header() {
        let (gateway, transport, _) = gateway();
        transport.respond(200, "[]");
        transport.respond(200, "[]");

        let _: Value = block_on(gateway.get("/machines")).unwrap();
        assert_eq!(transport.last_request().unwrap().header("Authorization"), None);

        gateway.set_token(Some("tok-123".to_string()));
        let _: Value = block_on(gateway.get("machines")).unwrap();
        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/api/machines");
        assert_eq!(request.header("authorization"), Some("Bearer tok-123"));
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.timeout_ms, 15_000);
    }

    #[test]
    fn test_401_clears_token_and_fires_listeners() {
        let (gateway, transport, toasts) = gateway();
        gateway.set_token(Some("expired".to_string()));
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        gateway.on_unauthorized(move || f.set(f.get() + 1));

        transport.respond(401, r#"{"message":"Unauthenticated."}"#);
        let err = block_on(gateway.get::<Value>("/machines")).unwrap_err();

        assert_eq!(err, ApiError::Unauthorized("Unauthenticated.".to_string()));
        assert!(!gateway.has_token());
        assert_eq!(fired.get(), 1);
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_422_emits_one_toast_per_field() {
        let (gateway, transport, toasts) = gateway();
        transport.respond(
            422,
            r#"{"message":"The given data was invalid.","errors":{
                "nom":["Le nom est obligatoire"],
                "reference":["La référence existe déjà","Trop longue"],
                "machine_id":["Machine inconnue"]}}"#,
        );

        let err = block_on(gateway.post::<_, Value>("/composants", &serde_json::json!({}))).unwrap_err();

        assert_eq!(err.field_errors().map(|f| f.len()), Some(3));
        assert_eq!(toasts.len(), 3);
        assert!(toasts.messages().contains(&"La référence existe déjà".to_string()));
    }

    #[test]
    fn test_422_without_fields_uses_message() {
        let (gateway, transport, toasts) = gateway();
        transport.respond(422, r#"{"message":"Code invalide"}"#);
        let _ = block_on(gateway.post::<_, Value>("/auth/verify-reset-code", &serde_json::json!({})));
        assert_eq!(toasts.messages(), vec!["Code invalide".to_string()]);
    }

    #[test]
    fn test_422_ignores_fields_without_messages() {
        let (gateway, transport, toasts) = gateway();
        transport.respond(422, r#"{"message":"Données invalides","errors":{"nom":[],"reference":["Requis"]}}"#);
        transport.respond(422, r#"{"message":"Données invalides","errors":{"nom":[]}}"#);

        let first = block_on(gateway.post::<_, Value>("/composants", &serde_json::json!({}))).unwrap_err();
        assert_eq!(first.field_errors().map(|f| f.len()), Some(1));
        assert_eq!(toasts.messages(), vec!["Requis".to_string()]);

        let second = block_on(gateway.post::<_, Value>("/composants", &serde_json::json!({}))).unwrap_err();
        assert_eq!(second.field_errors().map(|f| f.len()), Some(0));
        assert_eq!(toasts.messages(), vec!["Requis".to_string(), "Données invalides".to_string()]);
    }

    #[test]
    fn test_other_errors_emit_single_generic_toast() {
        let (gateway, transport, toasts) = gateway();
        transport.respond(500, "<html>boom</html>");
        transport.respond(404, r#"{"message":"Machine introuvable"}"#);

        let first = block_on(gateway.get::<Value>("/dashboard")).unwrap_err();
        let second = block_on(gateway.get::<Value>("/machines/99")).unwrap_err();

        assert_eq!(first, ApiError::Http { status: 500, message: FALLBACK_ERROR_MESSAGE.to_string() });
        assert_eq!(second.status(), Some(404));
        assert_eq!(
            toasts.messages(),
            vec![FALLBACK_ERROR_MESSAGE.to_string(), "Machine introuvable".to_string()]
        );
    }

    #[test]
    fn test_409_is_conflict() {
        let (gateway, transport, _) = gateway();
        transport.respond(409, r#"{"message":"Cette machine possède des composants"}"#);
        let err = block_on(gateway.send(HttpMethod::Delete, "/machines/1", RequestOptions::default())).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_silent_requests_do_not_toast() {
        let (gateway, transport, toasts) = gateway();
        transport.fail(TransportError::Timeout);
        let err = block_on(gateway.send(HttpMethod::Post, "/auth/logout", RequestOptions::silent())).unwrap_err();
        assert_eq!(err, ApiError::Timeout);
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_network_failure_and_decode_failure() {
        let (gateway, transport, toasts) = gateway();
        transport.fail(TransportError::Network("connection refused".to_string()));
        transport.respond(200, r#"{"unexpected":true}"#);

        let network = block_on(gateway.get::<Vec<u64>>("/types")).unwrap_err();
        let decode = block_on(gateway.get::<Vec<u64>>("/types")).unwrap_err();

        assert!(matches!(network, ApiError::Network(_)));
        assert!(matches!(decode, ApiError::Decode(_)));
        assert_eq!(toasts.len(), 2);
    }

    #[test]
    fn test_empty_success_body_decodes_as_unit() {
        let (gateway, transport, _) = gateway();
        transport.respond(204, "");
        let result: Result<(), ApiError> =
            block_on(gateway.request(HttpMethod::Delete, "/types/1", RequestBody::Empty, RequestOptions::default()));
        assert!(result.is_ok());
    }

    #[test]
    fn test_send_form_switches_to_multipart_with_image() {
        let (gateway, transport, _) = gateway();
        transport.respond(201, r#"{"ok":true}"#);
        let image = ImageFile {
            name: "m.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1],
        };
        let _: Value = block_on(gateway.send_form(
            HttpMethod::Post,
            "/machines",
            &serde_json::json!({"nom": "Tour"}),
            Some(&image),
        ))
        .unwrap();
        assert!(transport.last_request().unwrap().body.is_multipart());
    }
}
