// ============================================================================
// DASHBOARD - Estadísticas, alertas y estadísticas rápidas
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::Spinner;
use crate::hooks::{use_app_context, use_session};
use crate::routes::Route;
use crate::viewmodels::{DashboardData, DashboardViewModel};

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let context = use_app_context();
    let session = use_session();
    let data = use_state(|| None::<DashboardData>);
    let failed = use_state(|| false);

    {
        let data = data.clone();
        let failed = failed.clone();
        let vm = DashboardViewModel::new(context.gateway());
        use_effect_with((), move |_| {
            spawn_local(async move {
                match vm.load().await {
                    Ok(loaded) => data.set(Some(loaded)),
                    Err(e) => {
                        log::error!("❌ Dashboard no disponible: {}", e);
                        failed.set(true);
                    }
                }
            });
            || ()
        });
    }

    let greeting = session
        .state
        .user()
        .map(|u| format!("Bonjour {}", u.name))
        .unwrap_or_else(|| "Bonjour".to_string());

    let Some(data) = (*data).clone() else {
        return html! {
            <div class="page">
                <h1>{greeting}</h1>
                if *failed {
                    <p class="empty-state">{"Impossible de charger le tableau de bord"}</p>
                } else {
                    <Spinner />
                }
            </div>
        };
    };

    let stat = |label: &'static str, value: u32, route: Route, accent: &'static str| html! {
        <a class={classes!("stat-card", accent)} href={route.href()}>
            <span class="stat-value">{value}</span>
            <span class="stat-label">{label}</span>
        </a>
    };
    let stats = &data.stats;

    html! {
        <div class="page">
            <h1>{greeting}</h1>

            <div class="stat-grid">
                { stat("Machines", stats.total_machines, Route::Machines, "accent-blue") }
                { stat("Machines actives", stats.machines_actives, Route::Machines, "accent-green") }
                { stat("En maintenance", stats.machines_en_maintenance, Route::Machines, "accent-orange") }
                { stat("Composants", stats.total_composants, Route::Composants, "accent-blue") }
                { stat("Composants défaillants", stats.composants_defaillants, Route::Composants, "accent-red") }
                { stat("Demandes en attente", stats.demandes_en_attente, Route::Demandes, "accent-orange") }
                { stat("Demandes en cours", stats.demandes_en_cours, Route::Demandes, "accent-blue") }
                { stat("Notifications non lues", stats.notifications_non_lues, Route::Notifications, "accent-purple") }
            </div>

            <div class="detail-grid">
                <section class="card">
                    <h2>{"Alertes"}</h2>
                    if data.alertes.is_empty() {
                        <p class="muted">{"Aucune alerte"}</p>
                    } else {
                        { for data.alertes.iter().map(|alerte| html! {
                            <div class={alerte.css_class()}>
                                {alerte.message.clone()}
                                if let Some(id) = alerte.machine_id {
                                    <a href={Route::MachineDetail(id).href()}>{" Voir la machine →"}</a>
                                }
                            </div>
                        }) }
                    }
                </section>
                <section class="card">
                    <h2>{"Statistiques rapides"}</h2>
                    <div class="info-row">
                        <span class="info-label">{"Demandes cette semaine"}</span>
                        <span class="info-value">{data.rapides.demandes_semaine}</span>
                    </div>
                    <div class="info-row">
                        <span class="info-label">{"Composants remplacés ce mois"}</span>
                        <span class="info-value">{data.rapides.composants_remplaces_mois}</span>
                    </div>
                    <div class="info-row">
                        <span class="info-label">{"Taux de disponibilité"}</span>
                        <span class="info-value">{format!("{:.1} %", data.rapides.taux_disponibilite)}</span>
                    </div>
                </section>
            </div>
        </div>
    }
}
