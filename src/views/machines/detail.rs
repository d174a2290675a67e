// ============================================================================
// MACHINE DETAIL - Ficha, imagen y composants de una máquina
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::Spinner;
use crate::config::CONFIG;
use crate::hooks::use_app_context;
use crate::models::composant::Composant;
use crate::models::machine::Machine;
use crate::routes::Route;
use crate::viewmodels::{ComposantViewModel, MachineViewModel};
use crate::views::machines::MachineFormModal;

#[derive(Properties, PartialEq)]
pub struct MachineDetailProps {
    pub id: u64,
}

#[function_component(MachineDetailPage)]
pub fn machine_detail_page(props: &MachineDetailProps) -> Html {
    let context = use_app_context();
    let machine_vm = MachineViewModel::new(context.gateway());
    let composant_vm = ComposantViewModel::new(context.gateway());
    let machine = use_state(|| None::<Machine>);
    let composants = use_state(Vec::<Composant>::new);
    let not_found = use_state(|| false);
    let editing = use_state(|| false);

    {
        let machine = machine.clone();
        let composants = composants.clone();
        let not_found = not_found.clone();
        let machine_vm = machine_vm.clone();
        use_effect_with(props.id, move |id| {
            let id = *id;
            spawn_local(async move {
                let (loaded, parts) = futures::join!(machine_vm.load_one(id), composant_vm.load(Some(id)));
                match loaded {
                    Ok(m) => machine.set(Some(m)),
                    Err(e) => {
                        log::error!("❌ Máquina {} no disponible: {}", id, e);
                        not_found.set(true);
                    }
                }
                composants.set(parts.unwrap_or_default());
            });
            || ()
        });
    }

    let on_remove_image = {
        let machine = machine.clone();
        let vm = machine_vm.clone();
        let toasts = context.toasts.clone();
        Callback::from(move |_| {
            let Some(mut current) = (*machine).clone() else {
                return;
            };
            let machine = machine.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                if vm.remove_image(&mut current).await.is_ok() {
                    toasts.success("Image supprimée");
                    machine.set(Some(current));
                }
            });
        })
    };

    let on_saved = {
        let machine = machine.clone();
        let editing = editing.clone();
        Callback::from(move |updated: Machine| {
            machine.set(Some(updated));
            editing.set(false);
        })
    };

    if *not_found {
        return html! {
            <div class="page">
                <p class="empty-state">{"Machine introuvable"}</p>
                <a href={Route::Machines.href()}>{"← Retour aux machines"}</a>
            </div>
        };
    }
    let Some(current) = (*machine).clone() else {
        return html! { <Spinner /> };
    };

    let info = |label: &'static str, value: Option<String>| html! {
        <div class="info-row">
            <span class="info-label">{label}</span>
            <span class="info-value">{value.unwrap_or_else(|| "—".to_string())}</span>
        </div>
    };

    html! {
        <div class="page">
            <a href={Route::Machines.href()} class="back-link">{"← Machines"}</a>
            <div class="page-header">
                <h1>{current.nom.clone()}</h1>
                <span class={current.statut.badge_class()}>{current.statut.label()}</span>
                <button class="btn btn-primary" onclick={{
                    let editing = editing.clone();
                    Callback::from(move |_| editing.set(true))
                }}>{"Modifier"}</button>
            </div>

            <div class="detail-grid">
                <div class="card">
                    { info("N° de série", Some(current.numero_serie.clone())) }
                    { info("Modèle", current.modele.clone()) }
                    { info("Localisation", current.localisation.clone()) }
                    { info("Installée le", current.date_installation.clone()) }
                    { info("Demandes", current.demandes_count.map(|n| n.to_string())) }
                    if let Some(description) = current.description.clone() {
                        <p class="description">{description}</p>
                    }
                </div>
                <div class="card image-card">
                    if let Some(path) = current.image.clone() {
                        <img src={CONFIG.asset_url(&path)} alt={current.nom.clone()} />
                        <button class="btn btn-small btn-danger" onclick={on_remove_image}>{"Supprimer l'image"}</button>
                    } else {
                        <div class="image-placeholder">{"🏭"}</div>
                    }
                </div>
            </div>

            <h2>{format!("Composants ({})", composants.len())}</h2>
            if composants.is_empty() {
                <p class="empty-state">{"Aucun composant sur cette machine"}</p>
            } else {
                <table class="data-table">
                    <thead>
                        <tr><th>{"Nom"}</th><th>{"Référence"}</th><th>{"Type"}</th><th>{"Statut"}</th></tr>
                    </thead>
                    <tbody>
                        { for composants.iter().map(|c| html! {
                            <tr key={c.id}>
                                <td>{c.nom.clone()}</td>
                                <td>{c.reference.clone()}</td>
                                <td>{c.type_name()}</td>
                                <td><span class={c.statut.badge_class()}>{c.statut.label()}</span></td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }

            if *editing {
                <MachineFormModal machine={current.clone()} on_saved={on_saved}
                    on_close={{
                        let editing = editing.clone();
                        Callback::from(move |_| editing.set(false))
                    }} />
            }
        </div>
    }
}
