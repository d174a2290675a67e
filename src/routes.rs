// ============================================================================
// ROUTES + GUARD - Navegación por hash (#/machines/3) y control de acceso
// ============================================================================

use crate::state::session_store::SessionState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    VerifyResetCode,
    ResetPassword,
    Dashboard,
    Machines,
    MachineDetail(u64),
    Composants,
    Demandes,
    Types,
    Notifications,
    Profile,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let path = path.trim_start_matches('#');
        let path = path.split('?').next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["dashboard"] => Route::Dashboard,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["forgot-password"] => Route::ForgotPassword,
            ["verify-reset-code"] => Route::VerifyResetCode,
            ["reset-password"] => Route::ResetPassword,
            ["machines"] => Route::Machines,
            ["machines", id] => id.parse().map(Route::MachineDetail).unwrap_or(Route::NotFound),
            ["composants"] => Route::Composants,
            ["demandes"] => Route::Demandes,
            ["types"] => Route::Types,
            ["notifications"] => Route::Notifications,
            ["profile"] => Route::Profile,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::VerifyResetCode => "/verify-reset-code".to_string(),
            Route::ResetPassword => "/reset-password".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Machines => "/machines".to_string(),
            Route::MachineDetail(id) => format!("/machines/{}", id),
            Route::Composants => "/composants".to_string(),
            Route::Demandes => "/demandes".to_string(),
            Route::Types => "/types".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    /// Pantallas de autenticación: sólo para usuarios no autenticados
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Route::Login | Route::Register | Route::ForgotPassword | Route::VerifyResetCode | Route::ResetPassword
        )
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Types)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// La sesión se está restaurando: mostrar indicador de espera
    Wait,
    Admit,
    Redirect(Route),
}

/// Función pura del estado de sesión
pub fn guard(session: &SessionState, route: &Route) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Wait;
    }
    if *route == Route::NotFound {
        return GuardDecision::Admit;
    }

    let authenticated = session.is_authenticated();
    if route.is_public() {
        return if authenticated {
            GuardDecision::Redirect(Route::Dashboard)
        } else {
            GuardDecision::Admit
        };
    }

    if !authenticated {
        GuardDecision::Redirect(Route::Login)
    } else if route.requires_admin() && !session.is_admin() {
        GuardDecision::Redirect(Route::Dashboard)
    } else {
        GuardDecision::Admit
    }
}

/// Hash actual de la URL como Route
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| Route::parse(&hash))
        .unwrap_or(Route::Dashboard)
}

/// Navega cambiando el hash (dispara `hashchange`)
pub fn navigate(route: &Route) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_hash(&route.path()) {
            log::error!("❌ Error navegando a {}: {:?}", route.path(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{Role, User};

    fn authenticated(role: Role) -> SessionState {
        SessionState::Authenticated(User {
            id: 1,
            name: "Test".to_string(),
            email: "t@usine.fr".to_string(),
            role,
            created_at: None,
        })
    }

    #[test]
    fn test_parse_and_format_roundtrip_for_detail() {
        assert_eq!(Route::parse("#/machines/42"), Route::MachineDetail(42));
        assert_eq!(Route::MachineDetail(42).href(), "#/machines/42");
        assert_eq!(Route::parse("#/machines/abc"), Route::NotFound);
        assert_eq!(Route::parse(""), Route::Dashboard);
        assert_eq!(Route::parse("#/demandes?statut=en_attente"), Route::Demandes);
    }

    #[test]
    fn test_loading_waits_everywhere() {
        for route in [Route::Login, Route::Machines, Route::Types] {
            assert_eq!(guard(&SessionState::Loading, &route), GuardDecision::Wait);
        }
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        assert_eq!(guard(&SessionState::Anonymous, &Route::Profile), GuardDecision::Redirect(Route::Login));
        assert_eq!(guard(&SessionState::Anonymous, &Route::ResetPassword), GuardDecision::Admit);
    }

    #[test]
    fn test_admin_only_routes() {
        assert_eq!(guard(&authenticated(Role::User), &Route::Types), GuardDecision::Redirect(Route::Dashboard));
        assert_eq!(guard(&authenticated(Role::Admin), &Route::Types), GuardDecision::Admit);
    }
}
