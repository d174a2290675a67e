// ============================================================================
// VIEWS - Una página por ruta
// ============================================================================

pub mod auth;
pub mod dashboard;
pub mod machines;
pub mod composants;
pub mod demandes;
pub mod types;
pub mod notifications;
pub mod profile;
pub mod not_found;

pub use dashboard::DashboardPage;
pub use machines::{MachineDetailPage, MachinesPage};
pub use composants::ComposantsPage;
pub use demandes::DemandesPage;
pub use types::TypesPage;
pub use notifications::NotificationsPage;
pub use profile::ProfilePage;
pub use not_found::NotFoundPage;
