// ============================================================================
// TYPES - Tipos de composant (sólo admin): CRUD + activar/desactivar
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{errors_of, field_error, non_empty, Modal, Spinner, TextAreaField, TextField};
use crate::hooks::use_app_context;
use crate::models::type_composant::{TypeComposant, TypeForm};
use crate::state::ToastLevel;
use crate::utils::FieldErrors;
use crate::viewmodels::{DeleteOutcome, TypeViewModel};

#[derive(Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(TypeComposant),
}

#[function_component(TypesPage)]
pub fn types_page() -> Html {
    let context = use_app_context();
    let vm = TypeViewModel::new(context.gateway());
    let types = use_state(Vec::<TypeComposant>::new);
    let loading = use_state(|| true);
    let editing = use_state(|| Editing::Closed);
    let reload = use_state(|| 0u32);

    {
        let types = types.clone();
        let loading = loading.clone();
        let vm = vm.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                if let Ok(list) = vm.load().await {
                    types.set(list);
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_toggle = {
        let types = types.clone();
        let vm = vm.clone();
        Callback::from(move |id: u64| {
            let types = types.clone();
            let vm = vm.clone();
            spawn_local(async move {
                let mut list = (*types).clone();
                if vm.toggle(&mut list, id).await.is_ok() {
                    types.set(list);
                }
            });
        })
    };

    let on_delete = {
        let types = types.clone();
        let vm = vm.clone();
        let toasts = context.toasts.clone();
        Callback::from(move |id: u64| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Supprimer ce type ?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let types = types.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                let mut list = (*types).clone();
                match vm.delete(&mut list, id).await {
                    Ok(DeleteOutcome::Deleted) => {
                        toasts.success("Type supprimé");
                        types.set(list);
                    }
                    Ok(DeleteOutcome::Blocked(message)) => {
                        toasts.push(ToastLevel::Warning, message);
                    }
                    Err(e) => log::error!("❌ Error eliminando tipo {}: {}", id, e),
                }
            });
        })
    };

    let on_saved = {
        let editing = editing.clone();
        let reload = reload.clone();
        Callback::from(move |_: TypeComposant| {
            editing.set(Editing::Closed);
            reload.set(*reload + 1);
        })
    };
    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(Editing::Closed))
    };

    let cards = types.iter().map(|t| {
        let id = t.id;
        let on_edit = {
            let editing = editing.clone();
            let t = t.clone();
            Callback::from(move |_| editing.set(Editing::Existing(t.clone())))
        };
        html! {
            <div class={classes!("type-card", (!t.actif).then_some("inactive"))} key={id}>
                <span class="color-dot" style={format!("background-color: {}", t.couleur)}></span>
                <div class="type-info">
                    <strong>{t.nom.clone()}</strong>
                    if let Some(description) = t.description.clone() {
                        <p class="muted">{description}</p>
                    }
                    <span class="muted">{format!("{} composant(s)", t.composants_count.unwrap_or(0))}</span>
                </div>
                <div class="actions">
                    <label class="switch">
                        <input type="checkbox" checked={t.actif} onchange={on_toggle.reform(move |_: Event| id)} />
                        <span>{if t.actif { "Actif" } else { "Inactif" }}</span>
                    </label>
                    <button class="btn btn-small" onclick={on_edit}>{"Modifier"}</button>
                    <button class="btn btn-small btn-danger" onclick={on_delete.reform(move |_: MouseEvent| id)}>
                        {"Supprimer"}
                    </button>
                </div>
            </div>
        }
    });

    html! {
        <div class="page">
            <div class="page-header">
                <h1>{"Types de composants"}</h1>
                <button class="btn btn-primary" onclick={{
                    let editing = editing.clone();
                    Callback::from(move |_| editing.set(Editing::New))
                }}>{"+ Nouveau type"}</button>
            </div>

            if *loading {
                <Spinner />
            } else if types.is_empty() {
                <p class="empty-state">{"Aucun type défini"}</p>
            } else {
                <div class="type-grid">{ for cards }</div>
            }

            {
                match (*editing).clone() {
                    Editing::Closed => html! {},
                    Editing::New => html! { <TypeFormModal on_saved={on_saved.clone()} on_close={on_close.clone()} /> },
                    Editing::Existing(t) => html! {
                        <TypeFormModal type_composant={t} on_saved={on_saved.clone()} on_close={on_close.clone()} />
                    },
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TypeFormModalProps {
    #[prop_or_default]
    type_composant: Option<TypeComposant>,
    on_saved: Callback<TypeComposant>,
    on_close: Callback<()>,
}

#[function_component(TypeFormModal)]
fn type_form_modal(props: &TypeFormModalProps) -> Html {
    let context = use_app_context();
    let initial = props.type_composant.as_ref().map(TypeForm::from).unwrap_or_default();
    let form = use_state(move || initial);
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);
    let editing_id = props.type_composant.as_ref().map(|t| t.id);

    let update = |apply: fn(&mut TypeForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let on_actif = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let actif = e.target_unchecked_into::<web_sys::HtmlInputElement>().checked();
            form.set(TypeForm { actif, ..(*form).clone() });
        })
    };

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let vm = TypeViewModel::new(context.gateway());
        let toasts = context.toasts.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = (*form).clone();
            let errors = errors.clone();
            let submitting = submitting.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            let on_saved = on_saved.clone();
            submitting.set(true);
            spawn_local(async move {
                match vm.save(editing_id, &data).await {
                    Ok(saved) => {
                        toasts.success("Type enregistré");
                        on_saved.emit(saved);
                    }
                    Err(e) => errors.set(errors_of(&e)),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <Modal title={if editing_id.is_some() { "Modifier le type" } else { "Nouveau type" }}
            on_close={props.on_close.clone()}>
            <form class="entity-form" onsubmit={on_submit}>
                <TextField label="Nom *" name="nom" value={form.nom.clone()}
                    on_change={update(|f, v| f.nom = v)} error={field_error(&errors, "nom")} />
                <div class="form-row">
                    <TextField label="Couleur" name="couleur" input_type="color" value={form.couleur.clone()}
                        on_change={update(|f, v| f.couleur = v)} error={field_error(&errors, "couleur")} />
                    <div class="form-group">
                        <label>
                            <input type="checkbox" checked={form.actif} onchange={on_actif} />
                            {" Actif"}
                        </label>
                    </div>
                </div>
                <TextAreaField label="Description" name="description"
                    value={form.description.clone().unwrap_or_default()}
                    on_change={update(|f, v| f.description = non_empty(v))} />
                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" onclick={props.on_close.reform(|_| ())}>
                        {"Annuler"}
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>{"Enregistrer"}</button>
                </div>
            </form>
        </Modal>
    }
}
