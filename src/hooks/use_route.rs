// ============================================================================
// USE ROUTE - Ruta actual a partir de `window.location.hash`
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::routes::{current_route, Route};

#[hook]
pub fn use_route() -> Route {
    let route = use_state(current_route);

    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let listener = Closure::wrap(Box::new(move |_: web_sys::Event| {
                let next = current_route();
                log::debug!("🧭 Ruta: {}", next.path());
                route.set(next);
            }) as Box<dyn FnMut(_)>);

            let window = web_sys::window();
            if let Some(ref window) = window {
                if let Err(e) = window.add_event_listener_with_callback("hashchange", listener.as_ref().unchecked_ref()) {
                    log::error!("❌ No se pudo escuchar hashchange: {:?}", e);
                }
            }

            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback("hashchange", listener.as_ref().unchecked_ref());
                }
            }
        });
    }

    (*route).clone()
}
