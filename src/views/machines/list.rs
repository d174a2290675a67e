// ============================================================================
// MACHINES - Lista con búsqueda, filtro por estado y borrado protegido
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{input_value, Spinner};
use crate::hooks::use_app_context;
use crate::models::machine::{Machine, MachineStatus};
use crate::routes::Route;
use crate::state::ToastLevel;
use crate::viewmodels::{DeleteOutcome, MachineViewModel};
use crate::views::machines::MachineFormModal;

/// Modal abierto: creación o edición de una máquina
#[derive(Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(Machine),
}

#[function_component(MachinesPage)]
pub fn machines_page() -> Html {
    let context = use_app_context();
    let vm = MachineViewModel::new(context.gateway());
    let machines = use_state(Vec::<Machine>::new);
    let loading = use_state(|| true);
    let search = use_state(String::new);
    let statut = use_state(|| None::<MachineStatus>);
    let editing = use_state(|| Editing::Closed);
    let reload = use_state(|| 0u32);

    {
        let machines = machines.clone();
        let loading = loading.clone();
        let vm = vm.clone();
        use_effect_with(*reload, move |_| {
            loading.set(true);
            spawn_local(async move {
                match vm.load().await {
                    Ok(list) => {
                        log::info!("🏭 {} máquinas cargadas", list.len());
                        machines.set(list);
                    }
                    Err(e) => log::error!("❌ Error cargando máquinas: {}", e),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_delete = {
        let machines = machines.clone();
        let vm = vm.clone();
        let toasts = context.toasts.clone();
        Callback::from(move |id: u64| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Supprimer cette machine ?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let machines = machines.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                let mut list = (*machines).clone();
                match vm.delete(&mut list, id).await {
                    Ok(DeleteOutcome::Deleted) => {
                        toasts.success("Machine supprimée");
                        machines.set(list);
                    }
                    Ok(DeleteOutcome::Blocked(message)) => {
                        toasts.push(ToastLevel::Warning, message);
                    }
                    Err(e) => log::error!("❌ Error eliminando máquina {}: {}", id, e),
                }
            });
        })
    };

    let on_saved = {
        let editing = editing.clone();
        let reload = reload.clone();
        Callback::from(move |_: Machine| {
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
    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| search.set(input_value(&e)))
    };
    let on_statut = {
        let statut = statut.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<web_sys::HtmlSelectElement>().value();
            statut.set(MachineStatus::parse(&value));
        })
    };

    let visible = MachineViewModel::filter(&machines, &search, *statut);

    let rows = visible.iter().map(|machine| {
        let id = machine.id;
        let on_edit = {
            let editing = editing.clone();
            let machine = (*machine).clone();
            Callback::from(move |_| editing.set(Editing::Existing(machine.clone())))
        };
        let on_delete = on_delete.reform(move |_: MouseEvent| id);
        html! {
            <tr key={id}>
                <td><a href={Route::MachineDetail(id).href()}>{machine.nom.clone()}</a></td>
                <td>{machine.numero_serie.clone()}</td>
                <td>{machine.localisation.clone().unwrap_or_else(|| "—".to_string())}</td>
                <td><span class={machine.statut.badge_class()}>{machine.statut.label()}</span></td>
                <td>{machine.composants_count.unwrap_or(0)}</td>
                <td class="actions">
                    <button class="btn btn-small" onclick={on_edit}>{"Modifier"}</button>
                    <button class="btn btn-small btn-danger" onclick={on_delete}
                        title={if machine.has_composants() { "La machine possède des composants" } else { "" }}>
                        {"Supprimer"}
                    </button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="page">
            <div class="page-header">
                <h1>{"Machines"}</h1>
                <button class="btn btn-primary" onclick={on_new}>{"+ Nouvelle machine"}</button>
            </div>

            <div class="filters">
                <input type="search" placeholder="Rechercher (nom, n° de série, localisation)"
                    value={(*search).clone()} oninput={on_search} />
                <select onchange={on_statut}>
                    <option value="" selected={statut.is_none()}>{"Tous les statuts"}</option>
                    { for MachineStatus::ALL.iter().map(|s| html! {
                        <option value={s.as_str()} selected={*statut == Some(*s)}>{s.label()}</option>
                    }) }
                </select>
            </div>

            if *loading {
                <Spinner />
            } else if visible.is_empty() {
                <p class="empty-state">{"Aucune machine trouvée"}</p>
            } else {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Nom"}</th>
                            <th>{"N° de série"}</th>
                            <th>{"Localisation"}</th>
                            <th>{"Statut"}</th>
                            <th>{"Composants"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{ for rows }</tbody>
                </table>
            }

            {
                match (*editing).clone() {
                    Editing::Closed => html! {},
                    Editing::New => html! { <MachineFormModal on_saved={on_saved.clone()} on_close={on_close.clone()} /> },
                    Editing::Existing(machine) => html! {
                        <MachineFormModal machine={machine} on_saved={on_saved.clone()} on_close={on_close.clone()} />
                    },
                }
            }
        </div>
    }
}
