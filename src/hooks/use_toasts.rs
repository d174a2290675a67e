use std::rc::Rc;

use yew::prelude::*;

use crate::hooks::session_context::use_app_context;
use crate::state::{Toast, ToastStore};

#[derive(Clone)]
pub struct UseToastsHandle {
    pub toasts: Vec<Toast>,
    pub store: Rc<ToastStore>,
}

#[hook]
pub fn use_toasts() -> UseToastsHandle {
    let context = use_app_context();
    let toasts = use_state(|| context.toasts.toasts());

    {
        let toasts = toasts.clone();
        use_effect_with(context.clone(), move |context| {
            let store = context.toasts.clone();
            let weak = Rc::downgrade(&store);
            let subscription = store.subscribe(move || {
                if let Some(store) = weak.upgrade() {
                    toasts.set(store.toasts());
                }
            });
            move || store.unsubscribe(subscription)
        });
    }

    UseToastsHandle {
        toasts: (*toasts).clone(),
        store: context.toasts,
    }
}
