// ============================================================================
// SERVICES - SOLO comunicación con la API (sin estado de UI)
// ============================================================================

pub mod error;
pub mod transport;
pub mod gateway;
pub mod auth_service;
pub mod machine_service;
pub mod composant_service;
pub mod demande_service;
pub mod type_service;
pub mod notification_service;
pub mod dashboard_service;

pub use error::ApiError;
pub use gateway::{Gateway, RequestOptions};
pub use transport::{GlooTransport, HttpMethod, RequestBody, Transport};
pub use auth_service::AuthService;
pub use machine_service::MachineService;
pub use composant_service::ComposantService;
pub use demande_service::DemandeService;
pub use type_service::TypeService;
pub use notification_service::NotificationService;
pub use dashboard_service::DashboardService;
