// ============================================================================
// MACHINE FORM - Modal de creación / edición con imagen
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{errors_of, field_error, non_empty, ImagePicker, Modal, SelectField, TextAreaField, TextField};
use crate::config::CONFIG;
use crate::hooks::use_app_context;
use crate::models::machine::{Machine, MachineForm, MachineStatus};
use crate::utils::image::ImageFile;
use crate::utils::FieldErrors;
use crate::viewmodels::MachineViewModel;

#[derive(Properties, PartialEq)]
pub struct MachineFormModalProps {
    /// `None` = creación
    #[prop_or_default]
    pub machine: Option<Machine>,
    pub on_saved: Callback<Machine>,
    pub on_close: Callback<()>,
}

#[function_component(MachineFormModal)]
pub fn machine_form_modal(props: &MachineFormModalProps) -> Html {
    let context = use_app_context();
    let initial = props.machine.as_ref().map(MachineForm::from).unwrap_or_default();
    let form = use_state(move || initial);
    let image = use_state(|| None::<ImageFile>);
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);
    let editing_id = props.machine.as_ref().map(|m| m.id);

    let update = |apply: fn(&mut MachineForm, String)| {
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
        let vm = MachineViewModel::new(context.gateway());
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
                    Ok(machine) => {
                        toasts.success(if editing_id.is_some() { "Machine mise à jour" } else { "Machine créée" });
                        on_saved.emit(machine);
                    }
                    Err(e) => errors.set(errors_of(&e)),
                }
                submitting.set(false);
            });
        })
    };

    let status_options: Vec<(String, String)> = MachineStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let current_image = props
        .machine
        .as_ref()
        .and_then(|m| m.image.as_deref())
        .map(|path| AttrValue::from(CONFIG.asset_url(path)));
    let title = if editing_id.is_some() { "Modifier la machine" } else { "Nouvelle machine" };

    html! {
        <Modal {title} on_close={props.on_close.clone()}>
            <form class="entity-form" onsubmit={on_submit}>
                <TextField label="Nom *" name="nom" value={form.nom.clone()}
                    on_change={update(|f, v| f.nom = v)} error={field_error(&errors, "nom")} />
                <TextField label="Numéro de série *" name="numero_serie" value={form.numero_serie.clone()}
                    on_change={update(|f, v| f.numero_serie = v)} error={field_error(&errors, "numero_serie")} />
                <div class="form-row">
                    <TextField label="Modèle" name="modele" value={form.modele.clone().unwrap_or_default()}
                        on_change={update(|f, v| f.modele = non_empty(v))} error={field_error(&errors, "modele")} />
                    <TextField label="Localisation" name="localisation"
                        value={form.localisation.clone().unwrap_or_default()}
                        on_change={update(|f, v| f.localisation = non_empty(v))}
                        error={field_error(&errors, "localisation")} />
                </div>
                <div class="form-row">
                    <SelectField label="Statut" name="statut" value={form.statut.as_str()} options={status_options}
                        on_change={update(|f, v| f.statut = MachineStatus::parse(&v).unwrap_or(f.statut))}
                        error={field_error(&errors, "statut")} />
                    <TextField label="Date d'installation" name="date_installation" input_type="date"
                        value={form.date_installation.clone().unwrap_or_default()}
                        on_change={update(|f, v| f.date_installation = non_empty(v))}
                        error={field_error(&errors, "date_installation")} />
                </div>
                <TextAreaField label="Description" name="description"
                    value={form.description.clone().unwrap_or_default()}
                    on_change={update(|f, v| f.description = non_empty(v))}
                    error={field_error(&errors, "description")} />
                <ImagePicker current_url={current_image} on_select={on_image} error={field_error(&errors, "image")} />
                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" onclick={props.on_close.reform(|_| ())}>
                        {"Annuler"}
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>
                        {"Enregistrer"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
