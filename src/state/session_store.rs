// ============================================================================
// SESSION STORE - Usuario autenticado + token persistido
// ============================================================================
// Estados: Anonymous | Loading | Authenticated(User)
// Una sola instancia por aplicación, inyectada por contexto (no global)
// ============================================================================

use std::rc::Rc;

use crate::models::auth::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, User};
use crate::services::auth_service::AuthService;
use crate::services::error::ApiError;
use crate::services::gateway::Gateway;
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::utils::storage::KeyValueStore;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Anonymous,
    Loading,
    Authenticated(User),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        self.user().map(User::is_admin).unwrap_or(false)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

pub struct SessionStore {
    state: ReactiveState<SessionState>,
    gateway: Rc<Gateway>,
    auth: AuthService,
    storage: Rc<dyn KeyValueStore>,
    token_key: String,
}

impl SessionStore {
    /// Crea el store en `Loading` y se engancha al evento 401 del gateway
    pub fn new(gateway: Rc<Gateway>, storage: Rc<dyn KeyValueStore>, token_key: impl Into<String>) -> Rc<Self> {
        let store = Rc::new(Self {
            state: ReactiveState::new(SessionState::Loading),
            auth: AuthService::new(gateway.clone()),
            gateway: gateway.clone(),
            storage,
            token_key: token_key.into(),
        });

        let weak = Rc::downgrade(&store);
        gateway.on_unauthorized(move || {
            if let Some(store) = weak.upgrade() {
                store.clear("401 recibido");
            }
        });

        store
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.state.with(SessionState::is_admin)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(SessionState::is_loading)
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> SubscriptionId {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state.unsubscribe(id);
    }

    pub fn gateway(&self) -> Rc<Gateway> {
        self.gateway.clone()
    }

    pub fn persisted_token(&self) -> Option<String> {
        self.storage.get(&self.token_key)
    }

    /// Al arrancar: si hay token guardado se valida con `/auth/me`
    pub async fn restore(&self) {
        let Some(token) = self.storage.get(&self.token_key) else {
            log::info!("ℹ️ Sin token guardado, sesión anónima");
            self.state.set(SessionState::Anonymous);
            return;
        };

        self.state.set(SessionState::Loading);
        self.gateway.set_token(Some(token));

        match self.auth.me().await {
            Ok(user) => {
                log::info!("✅ Sesión restaurada: {}", user.email);
                self.state.set(SessionState::Authenticated(user));
            }
            Err(e) => {
                log::warn!("⚠️ Token guardado rechazado: {}", e);
                self.clear("restore fallido");
            }
        }
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<User, ApiError> {
        credentials.validate().map_err(ApiError::invalid_form)?;
        let response = self.auth.login(&credentials).await?;
        Ok(self.establish(response))
    }

    pub async fn register(&self, data: RegisterRequest) -> Result<User, ApiError> {
        data.validate().map_err(ApiError::invalid_form)?;
        let response = self.auth.register(&data).await?;
        Ok(self.establish(response))
    }

    /// Aviso al servidor best-effort; la limpieza local es incondicional
    pub async fn logout(&self) {
        if self.gateway.has_token() {
            if let Err(e) = self.auth.logout().await {
                log::warn!("⚠️ Logout en servidor falló (se ignora): {}", e);
            }
        }
        self.clear("logout");
    }

    pub async fn update_profile(&self, data: ProfileUpdate) -> Result<User, ApiError> {
        data.validate().map_err(ApiError::invalid_form)?;
        let response = self.auth.update_profile(&data).await?;
        let user = response.user;
        self.state.update(|state| {
            if let SessionState::Authenticated(current) = state {
                *current = user.clone();
            }
        });
        Ok(user)
    }

    fn establish(&self, response: AuthResponse) -> User {
        let AuthResponse { user, token, .. } = response;
        if let Err(e) = self.storage.set(&self.token_key, &token) {
            log::error!("❌ No se pudo persistir el token: {}", e);
        }
        self.gateway.set_token(Some(token));
        log::info!("✅ Sesión iniciada: {} ({:?})", user.email, user.role);
        self.state.set(SessionState::Authenticated(user.clone()));
        user
    }

    /// Idempotente: un 401 que llega durante un logout limpia dos veces sin efecto
    fn clear(&self, reason: &str) {
        log::info!("👋 Limpiando sesión ({})", reason);
        self.storage.remove(&self.token_key);
        self.gateway.set_token(None);
        if self.state.with(|s| *s != SessionState::Anonymous) {
            self.state.set(SessionState::Anonymous);
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use std::rc::Rc;

    use super::SessionStore;
    use crate::services::gateway::test_support::gateway;
    use crate::services::transport::mock::MockTransport;
    use crate::state::toast_state::ToastStore;
    use crate::utils::storage::MemoryStorage;

    pub const TOKEN_KEY: &str = "auth_token";

    pub const USER_JSON: &str = r#"{"id":7,"name":"Chloé Martin","email":"chloe@usine.fr","role":"user"}"#;
    pub const ADMIN_JSON: &str = r#"{"id":1,"name":"Admin Parc","email":"admin@usine.fr","role":"admin"}"#;

    pub fn auth_body(user_json: &str, token: &str) -> String {
        format!(r#"{{"user":{},"token":"{}"}}"#, user_json, token)
    }

    pub struct Harness {
        pub session: Rc<SessionStore>,
        pub transport: Rc<MockTransport>,
        pub toasts: Rc<ToastStore>,
        pub storage: Rc<MemoryStorage>,
    }

    pub fn harness() -> Harness {
        let (gateway, transport, toasts) = gateway();
        let storage = Rc::new(MemoryStorage::new());
        let session = SessionStore::new(gateway, storage.clone(), TOKEN_KEY);
        Harness {
            session,
            transport,
            toasts,
            storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::test_support::*;
    use super::*;
    use crate::models::auth::Role;
    use crate::routes::{guard, GuardDecision, Route};

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "chloe@usine.fr".to_string(),
            password: "motdepasse".to_string(),
        }
    }

    #[test]
    fn test_restore_without_token_is_anonymous_and_offline() {
        let h = harness();
        assert!(h.session.is_loading());
        block_on(h.session.restore());
        assert_eq!(h.session.state(), SessionState::Anonymous);
        assert_eq!(h.transport.request_count(), 0);
    }

    #[test]
    fn test_restore_with_valid_token() {
        let h = harness();
        h.storage.set(TOKEN_KEY, "tok-ok").unwrap();
        h.transport.respond(200, &format!(r#"{{"user":{}}}"#, USER_JSON));

        block_on(h.session.restore());

        assert!(h.session.is_authenticated());
        let request = h.transport.last_request().unwrap();
        assert!(request.url.ends_with("/auth/me"));
        assert_eq!(request.header("Authorization"), Some("Bearer tok-ok"));
    }

    #[test]
    fn test_restore_with_rejected_token_clears_it() {
        let h = harness();
        h.storage.set(TOKEN_KEY, "tok-old").unwrap();
        h.transport.respond(401, r#"{"message":"Unauthenticated."}"#);

        block_on(h.session.restore());

        assert_eq!(h.session.state(), SessionState::Anonymous);
        assert_eq!(h.storage.get(TOKEN_KEY), None);
        assert!(!h.session.gateway().has_token());
        // /auth/me es silencioso
        assert!(h.toasts.is_empty());
    }

    #[test]
    fn test_login_flow_and_guard() {
        let h = harness();
        block_on(h.session.restore());
        assert_eq!(guard(&h.session.state(), &Route::Machines), GuardDecision::Redirect(Route::Login));
        assert_eq!(guard(&h.session.state(), &Route::Login), GuardDecision::Admit);

        let transitions = Rc::new(RefCell::new(Vec::new()));
        let t = transitions.clone();
        let weak = Rc::downgrade(&h.session);
        h.session.subscribe(move || {
            if let Some(s) = weak.upgrade() {
                t.borrow_mut().push(s.state());
            }
        });

        h.transport.respond(200, &auth_body(USER_JSON, "tok-new"));
        let user = block_on(h.session.login(credentials())).unwrap();

        assert_eq!(user.role, Role::User);
        assert_eq!(transitions.borrow().len(), 1);
        assert!(transitions.borrow()[0].is_authenticated());
        assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("tok-new"));

        let state = h.session.state();
        assert_eq!(guard(&state, &Route::Machines), GuardDecision::Admit);
        assert_eq!(guard(&state, &Route::Dashboard), GuardDecision::Admit);
        assert_eq!(guard(&state, &Route::Login), GuardDecision::Redirect(Route::Dashboard));
        assert_eq!(guard(&state, &Route::ForgotPassword), GuardDecision::Redirect(Route::Dashboard));
    }

    #[test]
    fn test_login_failure_stays_anonymous() {
        let h = harness();
        block_on(h.session.restore());
        h.transport.respond(401, r#"{"message":"Identifiants invalides"}"#);

        let err = block_on(h.session.login(credentials())).unwrap_err();

        assert_eq!(err.to_string(), "Identifiants invalides");
        assert_eq!(h.session.state(), SessionState::Anonymous);
        assert_eq!(h.toasts.messages(), vec!["Identifiants invalides".to_string()]);
    }

    #[test]
    fn test_invalid_login_form_makes_no_request() {
        let h = harness();
        let err = block_on(h.session.login(LoginRequest::default())).unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.get("email").is_some());
        assert!(fields.get("password").is_some());
        assert_eq!(h.transport.request_count(), 0);
    }

    #[test]
    fn test_any_401_ends_anonymous_with_token_cleared() {
        let h = harness();
        h.transport.respond(200, &auth_body(ADMIN_JSON, "tok-admin"));
        block_on(h.session.login(credentials())).unwrap();
        assert!(h.session.is_admin());

        // Cualquier endpoint, no sólo /auth
        h.transport.respond(401, "");
        let _ = block_on(h.session.gateway().get::<serde_json::Value>("/dashboard"));

        assert_eq!(h.session.state(), SessionState::Anonymous);
        assert_eq!(h.storage.get(TOKEN_KEY), None);
        assert!(!h.session.gateway().has_token());
    }

    #[test]
    fn test_logout_clears_even_if_server_fails() {
        let h = harness();
        h.transport.respond(200, &auth_body(USER_JSON, "tok"));
        block_on(h.session.login(credentials())).unwrap();

        h.transport.respond(500, "");
        block_on(h.session.logout());

        assert_eq!(h.session.state(), SessionState::Anonymous);
        assert_eq!(h.storage.get(TOKEN_KEY), None);
        assert!(h.toasts.is_empty());
        assert!(h.transport.last_request().unwrap().url.ends_with("/auth/logout"));
    }

    #[test]
    fn test_register_establishes_session() {
        let h = harness();
        h.transport.respond(201, &auth_body(USER_JSON, "tok-reg"));
        let data = RegisterRequest {
            name: "Chloé Martin".to_string(),
            email: "chloe@usine.fr".to_string(),
            password: "motdepasse".to_string(),
            password_confirmation: "motdepasse".to_string(),
        };
        block_on(h.session.register(data)).unwrap();
        assert!(h.session.is_authenticated());
        assert!(h.transport.last_request().unwrap().url.ends_with("/auth/register"));
    }

    #[test]
    fn test_update_profile_replaces_held_user() {
        let h = harness();
        h.transport.respond(200, &auth_body(USER_JSON, "tok"));
        block_on(h.session.login(credentials())).unwrap();

        h.transport.respond(
            200,
            r#"{"message":"Profil mis à jour","user":{"id":7,"name":"Chloé Bernard","email":"chloe@usine.fr","role":"user"}}"#,
        );
        let update = ProfileUpdate {
            name: "Chloé Bernard".to_string(),
            email: "chloe@usine.fr".to_string(),
            ..ProfileUpdate::default()
        };
        block_on(h.session.update_profile(update)).unwrap();

        assert_eq!(h.session.user().unwrap().name, "Chloé Bernard");
    }
}
