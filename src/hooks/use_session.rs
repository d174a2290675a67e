// ============================================================================
// USE SESSION - Estado de sesión reactivo para componentes
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::hooks::session_context::use_app_context;
use crate::state::{SessionState, SessionStore};

#[derive(Clone)]
pub struct UseSessionHandle {
    pub state: SessionState,
    pub store: Rc<SessionStore>,
}

impl UseSessionHandle {
    pub fn is_admin(&self) -> bool {
        self.state.is_admin()
    }
}

/// Re-renderiza el componente en cada transición de la sesión
#[hook]
pub fn use_session() -> UseSessionHandle {
    let context = use_app_context();
    let state = use_state(|| context.session.state());

    {
        let state = state.clone();
        use_effect_with(context.clone(), move |context| {
            let store = context.session.clone();
            state.set(store.state());

            let weak = Rc::downgrade(&store);
            let subscription = store.subscribe(move || {
                if let Some(store) = weak.upgrade() {
                    state.set(store.state());
                }
            });
            move || store.unsubscribe(subscription)
        });
    }

    UseSessionHandle {
        state: (*state).clone(),
        store: context.session,
    }
}
