// ============================================================================
// SESSION CONTEXT - Stores compartidos entre componentes
// ============================================================================
// Un único Gateway + SessionStore + ToastStore por aplicación, inyectados con
// ContextProvider. Ninguna vista crea los suyos.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::config::CONFIG;
use crate::routes::{navigate, Route};
use crate::services::{Gateway, GlooTransport};
use crate::state::{SessionStore, ToastStore};
use crate::utils::{BrowserStorage, KeyValueStore, MemoryStorage};
use crate::viewmodels::ResetFlow;

#[derive(Clone)]
pub struct AppContext {
    pub session: Rc<SessionStore>,
    pub toasts: Rc<ToastStore>,
    /// Email y token del asistente de contraseña (sólo en memoria)
    pub reset_flow: Rc<RefCell<ResetFlow>>,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
            && Rc::ptr_eq(&self.toasts, &other.toasts)
            && Rc::ptr_eq(&self.reset_flow, &other.reset_flow)
    }
}

impl AppContext {
    pub fn new() -> Self {
        let toasts = Rc::new(ToastStore::new());
        let gateway = Rc::new(Gateway::new(
            CONFIG.api_base_url(),
            CONFIG.request_timeout_ms,
            Rc::new(GlooTransport),
            toasts.clone(),
        ));

        let storage: Rc<dyn KeyValueStore> = if BrowserStorage::is_available() {
            Rc::new(BrowserStorage)
        } else {
            log::warn!("⚠️ localStorage no disponible, el token no sobrevivirá a una recarga");
            Rc::new(MemoryStorage::new())
        };

        let session = SessionStore::new(gateway.clone(), storage, CONFIG.token_storage_key.clone());

        // El store ya se limpia solo; aquí sólo se redirige
        gateway.on_unauthorized(|| {
            log::info!("🔒 Sesión expirada, redirigiendo a login");
            navigate(&Route::Login);
        });

        log::info!("🔧 Contexto creado (API: {})", CONFIG.api_base_url());
        Self {
            session,
            toasts,
            reset_flow: Rc::new(RefCell::new(ResetFlow::default())),
        }
    }

    pub fn gateway(&self) -> Rc<Gateway> {
        self.session.gateway()
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Properties, PartialEq)]
pub struct AppContextProviderProps {
    pub children: Children,
}

/// Crea el contexto una sola vez y restaura la sesión guardada
#[function_component(AppContextProvider)]
pub fn app_context_provider(props: &AppContextProviderProps) -> Html {
    let context = use_memo((), |_| AppContext::new());

    {
        let session = context.session.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                session.restore().await;
            });
            || ()
        });
    }

    html! {
        <ContextProvider<AppContext> context={(*context).clone()}>
            {props.children.clone()}
        </ContextProvider<AppContext>>
    }
}

/// Falla sólo si el componente está fuera de AppContextProvider (error de programación)
#[hook]
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContextProvider ausente en el árbol de componentes")
}
