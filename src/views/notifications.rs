// ============================================================================
// NOTIFICATIONS - Lista, filtro no leídas, marcar y borrar
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::Spinner;
use crate::hooks::use_app_context;
use crate::models::notification::Notification;
use crate::viewmodels::NotificationViewModel;

#[function_component(NotificationsPage)]
pub fn notifications_page() -> Html {
    let context = use_app_context();
    let vm = NotificationViewModel::new(context.gateway());
    let notifications = use_state(Vec::<Notification>::new);
    let unread_only = use_state(|| false);
    let loading = use_state(|| true);

    {
        let notifications = notifications.clone();
        let loading = loading.clone();
        let vm = vm.clone();
        use_effect_with(*unread_only, move |unread_only| {
            let unread_only = *unread_only;
            loading.set(true);
            spawn_local(async move {
                if let Ok(list) = vm.load(unread_only).await {
                    notifications.set(list);
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_mark_read = {
        let notifications = notifications.clone();
        let vm = vm.clone();
        Callback::from(move |id: u64| {
            let notifications = notifications.clone();
            let vm = vm.clone();
            spawn_local(async move {
                let mut list = (*notifications).clone();
                if vm.mark_read(&mut list, id).await.is_ok() {
                    notifications.set(list);
                }
            });
        })
    };

    let on_mark_all = {
        let notifications = notifications.clone();
        let vm = vm.clone();
        let toasts = context.toasts.clone();
        Callback::from(move |_| {
            let notifications = notifications.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                let mut list = (*notifications).clone();
                if vm.mark_all_read(&mut list).await.is_ok() {
                    toasts.success("Toutes les notifications sont lues");
                    notifications.set(list);
                }
            });
        })
    };

    let on_delete = {
        let notifications = notifications.clone();
        let vm = vm.clone();
        Callback::from(move |id: u64| {
            let notifications = notifications.clone();
            let vm = vm.clone();
            spawn_local(async move {
                let mut list = (*notifications).clone();
                if vm.delete(&mut list, id).await.is_ok() {
                    notifications.set(list);
                }
            });
        })
    };

    let now = chrono::Utc::now();
    let unread = NotificationViewModel::unread_in(&notifications);

    html! {
        <div class="page">
            <div class="page-header">
                <h1>{"Notifications"}</h1>
                <label class="toggle">
                    <input type="checkbox" checked={*unread_only} onchange={{
                        let unread_only = unread_only.clone();
                        Callback::from(move |_: Event| unread_only.set(!*unread_only))
                    }} />
                    {" Non lues uniquement"}
                </label>
                <button class="btn btn-secondary" disabled={unread == 0} onclick={on_mark_all}>
                    {"Tout marquer comme lu"}
                </button>
            </div>

            if *loading {
                <Spinner />
            } else if notifications.is_empty() {
                <p class="empty-state">{"Aucune notification"}</p>
            } else {
                <ul class="notification-list">
                    { for notifications.iter().map(|n| {
                        let id = n.id;
                        html! {
                            <li class={classes!("notification", (!n.lue).then_some("unread"))} key={id}>
                                <div class="notification-body">
                                    <strong>{n.titre.clone()}</strong>
                                    <p>{n.message.clone()}</p>
                                    if let Some(age) = n.age_label(now) {
                                        <span class="muted">{age}</span>
                                    }
                                </div>
                                <div class="actions">
                                    if !n.lue {
                                        <button class="btn btn-small" onclick={on_mark_read.reform(move |_: MouseEvent| id)}>
                                            {"Marquer comme lu"}
                                        </button>
                                    }
                                    <button class="btn btn-small btn-danger" onclick={on_delete.reform(move |_: MouseEvent| id)}>
                                        {"Supprimer"}
                                    </button>
                                </div>
                            </li>
                        }
                    }) }
                </ul>
            }
        </div>
    }
}
