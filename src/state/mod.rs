// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod toast_state;
pub mod session_store;

pub use reactivity::{ReactiveState, SubscriptionId};
pub use toast_state::{Notifier, Toast, ToastLevel, ToastStore};
pub use session_store::{SessionState, SessionStore};
