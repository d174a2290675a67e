// ============================================================================
// PROFILE - Nombre, email y cambio de contraseña opcional
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{errors_of, field_error, non_empty, TextField};
use crate::hooks::{use_app_context, use_session};
use crate::models::auth::ProfileUpdate;
use crate::utils::FieldErrors;

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let context = use_app_context();
    let session = use_session();
    let initial = session
        .state
        .user()
        .map(|u| ProfileUpdate {
            name: u.name.clone(),
            email: u.email.clone(),
            ..ProfileUpdate::default()
        })
        .unwrap_or_default();
    let form = use_state(move || initial);
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);

    let update = |apply: fn(&mut ProfileUpdate, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let store = session.store.clone();
        let toasts = context.toasts.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = (*form).clone();
            let form = form.clone();
            let errors = errors.clone();
            let submitting = submitting.clone();
            let store = store.clone();
            let toasts = toasts.clone();
            submitting.set(true);
            spawn_local(async move {
                match store.update_profile(data.clone()).await {
                    Ok(_) => {
                        toasts.success("Profil mis à jour");
                        errors.set(FieldErrors::new());
                        // Los campos de contraseña no se conservan
                        form.set(ProfileUpdate {
                            current_password: None,
                            password: None,
                            password_confirmation: None,
                            ..data
                        });
                    }
                    Err(e) => errors.set(errors_of(&e)),
                }
                submitting.set(false);
            });
        })
    };

    let user = session.state.user().cloned();

    html! {
        <div class="page page-narrow">
            <div class="page-header">
                <h1>{"Mon profil"}</h1>
                if let Some(user) = user {
                    <span class={if user.is_admin() { "badge badge-info" } else { "badge badge-muted" }}>
                        {if user.is_admin() { "Administrateur" } else { "Utilisateur" }}
                    </span>
                }
            </div>
            <form class="entity-form card" onsubmit={on_submit}>
                <TextField label="Nom" name="name" value={form.name.clone()}
                    on_change={update(|f, v| f.name = v)} error={field_error(&errors, "name")} />
                <TextField label="Email" name="email" input_type="email" value={form.email.clone()}
                    on_change={update(|f, v| f.email = v)} error={field_error(&errors, "email")} />

                <h2>{"Changer le mot de passe"}</h2>
                <p class="muted">{"Laisser vide pour conserver le mot de passe actuel"}</p>
                <TextField label="Mot de passe actuel" name="current_password" input_type="password"
                    value={form.current_password.clone().unwrap_or_default()}
                    on_change={update(|f, v| f.current_password = non_empty(v))}
                    error={field_error(&errors, "current_password")} />
                <TextField label="Nouveau mot de passe" name="password" input_type="password"
                    value={form.password.clone().unwrap_or_default()}
                    on_change={update(|f, v| f.password = non_empty(v))}
                    error={field_error(&errors, "password")} />
                <TextField label="Confirmation" name="password_confirmation" input_type="password"
                    value={form.password_confirmation.clone().unwrap_or_default()}
                    on_change={update(|f, v| f.password_confirmation = non_empty(v))}
                    error={field_error(&errors, "password_confirmation")} />

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>{"Enregistrer"}</button>
                </div>
            </form>
        </div>
    }
}
