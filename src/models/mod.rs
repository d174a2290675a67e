pub mod api;
pub mod auth;
pub mod machine;
pub mod composant;
pub mod demande;
pub mod type_composant;
pub mod notification;
pub mod dashboard;

pub use api::{Envelope, MessageResponse};
pub use auth::{Role, User};
pub use machine::{Machine, MachineForm, MachineStatus};
pub use composant::{Composant, ComposantForm, ComposantStatus};
pub use demande::{Demande, DemandeDecision, DemandeForm, DemandeStatus, Priorite};
pub use type_composant::{TypeComposant, TypeForm};
pub use notification::{Notification, NotificationCount};
pub use dashboard::{Alerte, DashboardStats, StatistiquesRapides};
