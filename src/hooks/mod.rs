pub mod session_context;
pub mod use_session;
pub mod use_toasts;
pub mod use_route;
pub mod use_countdown;

pub use session_context::{use_app_context, AppContext, AppContextProvider};
pub use use_session::{use_session, UseSessionHandle};
pub use use_toasts::{use_toasts, UseToastsHandle};
pub use use_route::use_route;
pub use use_countdown::{use_countdown, UseCountdownHandle};
