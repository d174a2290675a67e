// ============================================================================
// TOAST LIST - Mensajes globales del Gateway y de las vistas
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::hooks::use_toasts;
use crate::state::ToastStore;

#[function_component(ToastList)]
pub fn toast_list() -> Html {
    let handle = use_toasts();
    // Un Timeout por toast visible; al desmontar se cancelan todos
    let timers = use_mut_ref(HashMap::<u64, Timeout>::new);

    {
        let timers = timers.clone();
        let store = handle.store.clone();
        let ids: Vec<u64> = handle.toasts.iter().map(|t| t.id).collect();
        use_effect_with(ids, move |ids| {
            schedule_expiry(&timers, ids, &store);
            || ()
        });
    }

    let toasts = handle.toasts.iter().map(|toast| {
        let store = handle.store.clone();
        let id = toast.id;
        html! {
            <div class={toast.level.css_class()} key={toast.id}>
                <span class="toast-message">{toast.message.clone()}</span>
                <button class="toast-close" onclick={Callback::from(move |_| store.dismiss(id))}>{"✕"}</button>
            </div>
        }
    });

    html! {
        <div class="toast-container">
            { for toasts }
        </div>
    }
}

/// El Timeout de un toast descartado se suelta en el siguiente render, nunca dentro de su callback
fn schedule_expiry(timers: &Rc<RefCell<HashMap<u64, Timeout>>>, ids: &[u64], store: &Rc<ToastStore>) {
    let mut timers = timers.borrow_mut();
    timers.retain(|id, _| ids.contains(id));
    for &id in ids {
        if timers.contains_key(&id) {
            continue;
        }
        let store = store.clone();
        let timeout = Timeout::new(CONFIG.toast_duration_ms, move || store.dismiss(id));
        timers.insert(id, timeout);
    }
}
