use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{errors_of, field_error, TextField};
use crate::hooks::{use_app_context, use_session};
use crate::models::auth::RegisterRequest;
use crate::routes::{navigate, Route};
use crate::utils::FieldErrors;
use crate::views::auth::AuthCard;

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let context = use_app_context();
    let session = use_session();
    let form = use_state(RegisterRequest::default);
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);

    let update = |apply: fn(&mut RegisterRequest, String)| {
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
            let errors = errors.clone();
            let submitting = submitting.clone();
            let store = store.clone();
            let toasts = toasts.clone();
            submitting.set(true);
            spawn_local(async move {
                match store.register(data).await {
                    Ok(user) => {
                        toasts.success(format!("Bienvenue {} !", user.name));
                        navigate(&Route::Dashboard);
                    }
                    Err(e) => errors.set(errors_of(&e)),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <AuthCard title="Créer un compte">
            <form class="auth-form" onsubmit={on_submit}>
                <TextField label="Nom" name="name" value={form.name.clone()}
                    on_change={update(|f, v| f.name = v)} error={field_error(&errors, "name")} />
                <TextField label="Email" name="email" input_type="email" value={form.email.clone()}
                    on_change={update(|f, v| f.email = v)} error={field_error(&errors, "email")} />
                <TextField label="Mot de passe" name="password" input_type="password" value={form.password.clone()}
                    on_change={update(|f, v| f.password = v)} error={field_error(&errors, "password")} />
                <TextField label="Confirmation" name="password_confirmation" input_type="password"
                    value={form.password_confirmation.clone()}
                    on_change={update(|f, v| f.password_confirmation = v)}
                    error={field_error(&errors, "password_confirmation")} />
                <button type="submit" class="btn btn-primary btn-block" disabled={*submitting}>
                    {"S'inscrire"}
                </button>
            </form>
            <div class="auth-links">
                <a href={Route::Login.href()}>{"Déjà un compte ? Se connecter"}</a>
            </div>
        </AuthCard>
    }
}
