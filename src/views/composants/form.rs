// ============================================================================
// COMPOSANT FORM - Modal de creación / edición
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{errors_of, field_error, non_empty, ImagePicker, Modal, SelectField, TextAreaField, TextField};
use crate::config::CONFIG;
use crate::hooks::use_app_context;
use crate::models::composant::{Composant, ComposantForm, ComposantStatus};
use crate::models::machine::Machine;
use crate::models::type_composant::TypeComposant;
use crate::utils::image::ImageFile;
use crate::utils::FieldErrors;
use crate::viewmodels::ComposantViewModel;

#[derive(Properties, PartialEq)]
pub struct ComposantFormModalProps {
    #[prop_or_default]
    pub composant: Option<Composant>,
    pub machines: Vec<Machine>,
    pub types: Vec<TypeComposant>,
    pub on_saved: Callback<Composant>,
    pub on_close: Callback<()>,
}

#[function_component(ComposantFormModal)]
pub fn composant_form_modal(props: &ComposantFormModalProps) -> Html {
    let context = use_app_context();
    let initial = props
        .composant
        .as_ref()
        .map(ComposantForm::from)
        .unwrap_or_else(ComposantForm::blank);
    let form = use_state(move || initial);
    let image = use_state(|| None::<ImageFile>);
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);
    let editing_id = props.composant.as_ref().map(|c| c.id);

    let update = |apply: fn(&mut ComposantForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let on_image = {
        let image = image.clone();
        Callback::from(move |file: Option<ImageFile>| image.set(file))
    };

    let on_submit = {
        let form = form.clone();
        let image = image.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let vm = ComposantViewModel::new(context.gateway());
        let toasts = context.toasts.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = (*form).clone();
            let file = (*image).clone();
            let errors = errors.clone();
            let submitting = submitting.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            let on_saved = on_saved.clone();
            submitting.set(true);
            spawn_local(async move {
                match vm.save(editing_id, &data, file.as_ref()).await {
                    Ok(composant) => {
                        toasts.success(if editing_id.is_some() { "Composant mis à jour" } else { "Composant créé" });
                        on_saved.emit(composant);
                    }
                    Err(e) => errors.set(errors_of(&e)),
                }
                submitting.set(false);
            });
        })
    };

    let machine_options: Vec<(String, String)> =
        props.machines.iter().map(|m| (m.id.to_string(), m.nom.clone())).collect();
    let type_options: Vec<(String, String)> = props
        .types
        .iter()
        .filter(|t| t.actif || Some(t.id) == form.type_id)
        .map(|t| (t.id.to_string(), t.nom.clone()))
        .collect();
    let status_options: Vec<(String, String)> = ComposantStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let current_image = props
        .composant
        .as_ref()
        .and_then(|c| c.image.as_deref())
        .map(|path| AttrValue::from(CONFIG.asset_url(path)));
    let id_value = |id: Option<u64>| id.map(|id| id.to_string()).unwrap_or_default();

    html! {
        <Modal title={if editing_id.is_some() { "Modifier le composant" } else { "Nouveau composant" }}
            on_close={props.on_close.clone()}>
            <form class="entity-form" onsubmit={on_submit}>
                <div class="form-row">
                    <TextField label="Nom *" name="nom" value={form.nom.clone()}
                        on_change={update(|f, v| f.nom = v)} error={field_error(&errors, "nom")} />
                    <TextField label="Référence *" name="reference" value={form.reference.clone()}
                        on_change={update(|f, v| f.reference = v)} error={field_error(&errors, "reference")} />
                </div>
                <div class="form-row">
                    <SelectField label="Machine *" name="machine_id" value={id_value(form.machine_id)}
                        options={machine_options} placeholder="Choisir une machine"
                        on_change={update(|f, v| f.machine_id = v.parse().ok())}
                        error={field_error(&errors, "machine_id")} />
                    <SelectField label="Type *" name="type_id" value={id_value(form.type_id)}
                        options={type_options} placeholder="Choisir un type"
                        on_change={update(|f, v| f.type_id = v.parse().ok())}
                        error={field_error(&errors, "type_id")} />
                </div>
                <div class="form-row">
                    <SelectField label="Statut" name="statut"
                        value={form.statut.map(|s| s.as_str()).unwrap_or("bon")} options={status_options}
                        on_change={update(|f, v| f.statut = ComposantStatus::parse(&v))}
                        error={field_error(&errors, "statut")} />
                    <TextField label="Date d'installation" name="date_installation" input_type="date"
                        value={form.date_installation.clone().unwrap_or_default()}
                        on_change={update(|f, v| f.date_installation = non_empty(v))}
                        error={field_error(&errors, "date_installation")} />
                </div>
                <TextAreaField label="Description" name="description"
                    value={form.description.clone().unwrap_or_default()}
                    on_change={update(|f, v| f.description = non_empty(v))} />
                <ImagePicker current_url={current_image} on_select={on_image} error={field_error(&errors, "image")} />
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
