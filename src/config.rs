use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub request_timeout_ms: u32,
    pub token_storage_key: String,
    pub log_level: String,
    pub notification_poll_seconds: u32,
    pub toast_duration_ms: u32,
    pub image_config: ImageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub max_bytes: u64,
    pub max_dimension: u32,
    pub quality: f64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            max_dimension: 800,
            quality: 0.8,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            environment: "development".to_string(),
            request_timeout_ms: 15_000,
            token_storage_key: "auth_token".to_string(),
            log_level: "info".to_string(),
            notification_poll_seconds: 60,
            toast_duration_ms: 4_000,
            image_config: ImageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            request_timeout_ms: option_env!("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            token_storage_key: option_env!("TOKEN_STORAGE_KEY")
                .unwrap_or("auth_token").to_string(),
            log_level: option_env!("LOG_LEVEL")
                .unwrap_or("info").to_string(),
            notification_poll_seconds: option_env!("NOTIFICATION_POLL_SECONDS")
                .and_then(|v| v.parse::<u32>().ok())
                .map(|seconds| seconds.max(1))
                .unwrap_or(defaults.notification_poll_seconds),
            toast_duration_ms: option_env!("TOAST_DURATION_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.toast_duration_ms),
            image_config: ImageConfig {
                quality: option_env!("IMAGE_QUALITY")
                    .and_then(|v| v.parse::<f64>().ok())
                    .filter(|q| (0.0..=1.0).contains(q))
                    .unwrap_or(defaults.image_config.quality),
                ..defaults.image_config
            },
        }
    }

    /// URL base de la API REST (`<backend>/api`)
    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.backend_url)
    }

    /// Las imágenes llegan como ruta relativa del storage o como URL completa
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
            path.to_string()
        } else {
            format!("{}/storage/{}", self.backend_url, path.trim_start_matches('/'))
        }
    }

    /// Periodo del polling de notificaciones; nunca por debajo de 1 s
    pub fn notification_poll_ms(&self) -> u32 {
        self.notification_poll_seconds.max(1).saturating_mul(1_000)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log para wasm-logger
    pub fn log_level(&self) -> log::Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => log::Level::Trace,
            "debug" => log::Level::Debug,
            "warn" => log::Level::Warn,
            "error" => log::Level::Error,
            _ => log::Level::Info,
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url_appends_api() {
        let config = AppConfig {
            backend_url: "https://parc.example.com".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.api_base_url(), "https://parc.example.com/api");
    }

    #[test]
    fn test_asset_url_keeps_absolute_urls() {
        let config = AppConfig::default();
        assert_eq!(config.asset_url("machines/tour.jpg"), "http://localhost:8000/storage/machines/tour.jpg");
        assert_eq!(config.asset_url("/machines/tour.jpg"), "http://localhost:8000/storage/machines/tour.jpg");
        assert_eq!(config.asset_url("https://cdn.test/a.png"), "https://cdn.test/a.png");
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "verbose".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);

        let config = AppConfig {
            log_level: "WARN".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Warn);
    }

    #[test]
    fn test_notification_poll_never_below_one_second() {
        let config = AppConfig {
            notification_poll_seconds: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.notification_poll_ms(), 1_000);
        assert_eq!(AppConfig::default().notification_poll_ms(), 60_000);
    }

    #[test]
    fn test_image_defaults() {
        let image = ImageConfig::default();
        assert_eq!(image.max_bytes, 5_242_880);
        assert_eq!(image.max_dimension, 800);
    }
}
