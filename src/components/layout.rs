// ============================================================================
// LAYOUT - Navegación lateral, usuario y contador de notificaciones
// ============================================================================

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::hooks::{use_app_context, use_session};
use crate::routes::{navigate, Route};
use crate::viewmodels::NotificationViewModel;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub route: Route,
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let context = use_app_context();
    let session = use_session();
    let unread = use_state(|| 0u32);

    // Polling del badge + refresco en cada cambio de ruta
    {
        let unread = unread.clone();
        let vm = NotificationViewModel::new(context.gateway());
        use_effect_with(props.route.clone(), move |_| {
            let refresh = move || {
                let unread = unread.clone();
                let vm = vm.clone();
                spawn_local(async move {
                    if let Some(count) = vm.unread_count().await {
                        unread.set(count);
                    }
                });
            };
            refresh();
            let interval = Interval::new(CONFIG.notification_poll_ms(), refresh);
            move || drop(interval)
        });
    }

    let on_logout = {
        let store = session.store.clone();
        Callback::from(move |_| {
            let store = store.clone();
            spawn_local(async move {
                store.logout().await;
                navigate(&Route::Login);
            });
        })
    };

    let link = |route: Route, icon: &'static str, label: &'static str| {
        let active = props.route == route
            || matches!((&props.route, &route), (Route::MachineDetail(_), Route::Machines));
        html! {
            <a href={route.href()} class={classes!("nav-link", active.then_some("active"))}>
                <span class="nav-icon">{icon}</span>
                <span class="nav-label">{label}</span>
            </a>
        }
    };

    let user = session.state.user().cloned();

    html! {
        <div class="app-layout">
            <aside class="sidebar">
                <div class="sidebar-header">
                    <span class="logo">{"🏭"}</span>
                    <span class="app-name">{"Parc Machines"}</span>
                </div>
                <nav class="sidebar-nav">
                    { link(Route::Dashboard, "📊", "Tableau de bord") }
                    { link(Route::Machines, "🏭", "Machines") }
                    { link(Route::Composants, "🔩", "Composants") }
                    { link(Route::Demandes, "📝", "Demandes") }
                    if session.is_admin() {
                        { link(Route::Types, "🏷️", "Types") }
                    }
                    <a href={Route::Notifications.href()}
                       class={classes!("nav-link", (props.route == Route::Notifications).then_some("active"))}>
                        <span class="nav-icon">{"🔔"}</span>
                        <span class="nav-label">{"Notifications"}</span>
                        if *unread > 0 {
                            <span class="badge badge-count">{*unread}</span>
                        }
                    </a>
                </nav>
            </aside>

            <div class="main">
                <header class="topbar">
                    if let Some(user) = user {
                        <a href={Route::Profile.href()} class="user-chip">
                            <span class="avatar">{user.initials()}</span>
                            <span class="user-name">{user.name.clone()}</span>
                            if user.is_admin() {
                                <span class="badge badge-info">{"Admin"}</span>
                            }
                        </a>
                    }
                    <button class="btn btn-secondary" onclick={on_logout}>{"Déconnexion"}</button>
                </header>
                <main class="content">
                    {props.children.clone()}
                </main>
            </div>
        </div>
    }
}
