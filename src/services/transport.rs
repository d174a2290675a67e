// ============================================================================
// TRANSPORT - SOLO envío HTTP (stateless)
// ============================================================================
// El Gateway construye HttpRequest y clasifica HttpResponse; el transporte
// sólo los mueve por la red. GlooTransport en el navegador, MockTransport en tests.
// ============================================================================

use futures::future::{self, Either, LocalBoxFuture};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::FormData;

use crate::utils::image::{bytes_to_blob, ImageFile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormField {
    Text(String),
    File(ImageFile),
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<(String, FormField)>),
}

impl RequestBody {
    /// JSON si no hay imagen; multipart (campos como texto + fichero) si la hay
    pub fn form(fields: serde_json::Value, image: Option<(&str, &ImageFile)>) -> Self {
        let Some((image_field, image)) = image else {
            return RequestBody::Json(fields);
        };

        let mut parts = Vec::new();
        if let serde_json::Value::Object(map) = fields {
            for (name, value) in map {
                let text = match value {
                    serde_json::Value::Null => continue,
                    serde_json::Value::Bool(b) => if b { "1" } else { "0" }.to_string(),
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                parts.push((name, FormField::Text(text)));
            }
        }
        parts.push((image_field.to_string(), FormField::File(image.clone())));
        RequestBody::Multipart(parts)
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout_ms: u32,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
    #[error("timeout")]
    Timeout,
}

pub trait Transport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, TransportError>>;
}

/// Transporte real con gloo-net (fetch)
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let timeout = Box::pin(TimeoutFuture::new(request.timeout_ms));
            let dispatch = Box::pin(dispatch(request));
            // Sin cancelación: si gana el timeout el fetch sigue en vuelo y se descarta
            match future::select(dispatch, timeout).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => Err(TransportError::Timeout),
            }
        })
    }
}

async fn dispatch(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let network = |e: gloo_net::Error| TransportError::Network(e.to_string());

    let mut builder = match request.method {
        HttpMethod::Get => Request::get(&request.url),
        HttpMethod::Post => Request::post(&request.url),
        HttpMethod::Put => Request::put(&request.url),
        HttpMethod::Patch => Request::patch(&request.url),
        HttpMethod::Delete => Request::delete(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let built = match request.body {
        RequestBody::Empty => builder.build().map_err(network)?,
        RequestBody::Json(value) => builder.json(&value).map_err(network)?,
        RequestBody::Multipart(fields) => {
            let form = to_form_data(&fields).map_err(TransportError::Network)?;
            builder.body(form).map_err(network)?
        }
    };

    let response = built.send().await.map_err(network)?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Ok(HttpResponse { status, body })
}

fn to_form_data(fields: &[(String, FormField)]) -> Result<FormData, String> {
    let js_err = |e: JsValue| format!("FormData: {:?}", e);
    let form = FormData::new().map_err(js_err)?;
    for (name, field) in fields {
        match field {
            FormField::Text(value) => form.append_with_str(name, value).map_err(js_err)?,
            FormField::File(image) => {
                let blob = bytes_to_blob(&image.bytes, &image.mime)?;
                form.append_with_blob_and_filename(name, &blob, &image.name).map_err(js_err)?
            }
        }
    }
    Ok(form)
}

#[cfg(test)]
pub mod mock {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// Respuestas en cola + registro de requests enviados
    #[derive(Default)]
    pub struct MockTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: &str) {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
        }

        pub fn fail(&self, error: TransportError) {
            self.responses.borrow_mut().push_back(Err(error));
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    impl Transport for MockTransport {
        fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, TransportError>> {
            self.requests.borrow_mut().push(request);
            let response = self
                .responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("no mock response queued".to_string())));
            Box::pin(async move { response })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_without_image_is_json() {
        let body = RequestBody::form(json!({"nom": "Tour"}), None);
        assert_eq!(body, RequestBody::Json(json!({"nom": "Tour"})));
    }

    #[test]
    fn test_form_with_image_is_multipart_text_fields() {
        let image = ImageFile {
            name: "tour.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8],
        };
        let body = RequestBody::form(
            json!({"nom": "Tour", "machine_id": 4, "actif": true, "description": null}),
            Some(("image", &image)),
        );
        let RequestBody::Multipart(parts) = body else {
            panic!("expected multipart");
        };
        assert!(parts.contains(&("nom".to_string(), FormField::Text("Tour".to_string()))));
        assert!(parts.contains(&("machine_id".to_string(), FormField::Text("4".to_string()))));
        assert!(parts.contains(&("actif".to_string(), FormField::Text("1".to_string()))));
        assert!(parts.iter().all(|(name, _)| name != "description"));
        assert_eq!(parts.last(), Some(&("image".to_string(), FormField::File(image))));
    }
}
