// ============================================================================
// COMPOSANTS - Lista filtrable por máquina, tipo y estado
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::{input_value, Spinner};
use crate::hooks::use_app_context;
use crate::models::composant::{Composant, ComposantStatus};
use crate::models::machine::Machine;
use crate::models::type_composant::TypeComposant;
use crate::state::ToastLevel;
use crate::viewmodels::composant_viewmodel::ComposantFilter;
use crate::viewmodels::{ComposantViewModel, DeleteOutcome, MachineViewModel, TypeViewModel};
use crate::views::composants::ComposantFormModal;

#[derive(Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(Composant),
}

#[function_component(ComposantsPage)]
pub fn composants_page() -> Html {
    let context = use_app_context();
    let vm = ComposantViewModel::new(context.gateway());
    let composants = use_state(Vec::<Composant>::new);
    let machines = use_state(Vec::<Machine>::new);
    let types = use_state(Vec::<TypeComposant>::new);
    let loading = use_state(|| true);
    let filter = use_state(ComposantFilter::default);
    let editing = use_state(|| Editing::Closed);
    let reload = use_state(|| 0u32);

    // Selectores: máquinas activas y tipos (una sola vez)
    {
        let machines = machines.clone();
        let types = types.clone();
        let machine_vm = MachineViewModel::new(context.gateway());
        let type_vm = TypeViewModel::new(context.gateway());
        use_effect_with((), move |_| {
            spawn_local(async move {
                let (m, t) = futures::join!(machine_vm.load_actives(), type_vm.load());
                machines.set(m.unwrap_or_default());
                types.set(t.unwrap_or_default());
            });
            || ()
        });
    }

    {
        let composants = composants.clone();
        let loading = loading.clone();
        let vm = vm.clone();
        use_effect_with(*reload, move |_| {
            loading.set(true);
            spawn_local(async move {
                if let Ok(list) = vm.load(None).await {
                    log::info!("🔩 {} composants cargados", list.len());
                    composants.set(list);
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_delete = {
        let composants = composants.clone();
        let vm = vm.clone();
        let toasts = context.toasts.clone();
        Callback::from(move |id: u64| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Supprimer ce composant ?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let composants = composants.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                let mut list = (*composants).clone();
                match vm.delete(&mut list, id).await {
                    Ok(DeleteOutcome::Deleted) => {
                        toasts.success("Composant supprimé");
                        composants.set(list);
                    }
                    Ok(DeleteOutcome::Blocked(message)) => {
                        toasts.push(ToastLevel::Warning, message);
                    }
                    Err(e) => log::error!("❌ Error eliminando composant {}: {}", id, e),
                }
            });
        })
    };

    let on_search = {
        let filter = filter.clone();
        Callback::from(move |e: InputEvent| {
            filter.set(ComposantFilter { search: input_value(&e), ..(*filter).clone() })
        })
    };
    let select = |apply: fn(&mut ComposantFilter, String)| {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let mut next = (*filter).clone();
            apply(&mut next, e.target_unchecked_into::<HtmlSelectElement>().value());
            filter.set(next);
        })
    };

    let on_saved = {
        let editing = editing.clone();
        let reload = reload.clone();
        Callback::from(move |_: Composant| {
            editing.set(Editing::Closed);
            reload.set(*reload + 1);
        })
    };
    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(Editing::Closed))
    };
    let on_new = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(Editing::New))
    };

    let visible = ComposantViewModel::filter(&composants, &filter);
    let rows = visible.iter().map(|composant| {
        let id = composant.id;
        let on_edit = {
            let editing = editing.clone();
            let composant = (*composant).clone();
            Callback::from(move |_| editing.set(Editing::Existing(composant.clone())))
        };
        html! {
            <tr key={id}>
                <td>{composant.nom.clone()}</td>
                <td>{composant.reference.clone()}</td>
                <td>{composant.machine_name()}</td>
                <td>{composant.type_name()}</td>
                <td><span class={composant.statut.badge_class()}>{composant.statut.label()}</span></td>
                <td class="actions">
                    <button class="btn btn-small" onclick={on_edit}>{"Modifier"}</button>
                    <button class="btn btn-small btn-danger" onclick={on_delete.reform(move |_: MouseEvent| id)}>
                        {"Supprimer"}
                    </button>
                </td>
            </tr>
        }
    });

    let form_modal = |composant: Option<Composant>| html! {
        <ComposantFormModal composant={composant} machines={(*machines).clone()} types={(*types).clone()}
            on_saved={on_saved.clone()} on_close={on_close.clone()} />
    };

    html! {
        <div class="page">
            <div class="page-header">
                <h1>{"Composants"}</h1>
                <button class="btn btn-primary" onclick={on_new}>{"+ Nouveau composant"}</button>
            </div>

            <div class="filters">
                <input type="search" placeholder="Rechercher (nom, référence)" value={filter.search.clone()}
                    oninput={on_search} />
                <select onchange={select(|f, v| f.machine_id = v.parse().ok())}>
                    <option value="">{"Toutes les machines"}</option>
                    { for machines.iter().map(|m| html! {
                        <option value={m.id.to_string()} selected={filter.machine_id == Some(m.id)}>{m.nom.clone()}</option>
                    }) }
                </select>
                <select onchange={select(|f, v| f.type_id = v.parse().ok())}>
                    <option value="">{"Tous les types"}</option>
                    { for types.iter().map(|t| html! {
                        <option value={t.id.to_string()} selected={filter.type_id == Some(t.id)}>{t.nom.clone()}</option>
                    }) }
                </select>
                <select onchange={select(|f, v| f.statut = ComposantStatus::parse(&v))}>
                    <option value="">{"Tous les statuts"}</option>
                    { for ComposantStatus::ALL.iter().map(|s| html! {
                        <option value={s.as_str()} selected={filter.statut == Some(*s)}>{s.label()}</option>
                    }) }
                </select>
            </div>

            if *loading {
                <Spinner />
            } else if visible.is_empty() {
                <p class="empty-state">{"Aucun composant trouvé"}</p>
            } else {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Nom"}</th>
                            <th>{"Référence"}</th>
                            <th>{"Machine"}</th>
                            <th>{"Type"}</th>
                            <th>{"Statut"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{ for rows }</tbody>
                </table>
            }

            {
                match (*editing).clone() {
                    Editing::Closed => html! {},
                    Editing::New => form_modal(None),
                    Editing::Existing(composant) => form_modal(Some(composant)),
                }
            }
        </div>
    }
}
