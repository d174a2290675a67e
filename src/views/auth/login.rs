// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{errors_of, field_error, TextField};
use crate::hooks::use_session;
use crate::models::auth::LoginRequest;
use crate::routes::{navigate, Route};
use crate::utils::FieldErrors;
use crate::views::auth::AuthCard;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let form = use_state(LoginRequest::default);
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);

    let on_email = {
        let form = form.clone();
        Callback::from(move |email: String| form.set(LoginRequest { email, ..(*form).clone() }))
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |password: String| form.set(LoginRequest { password, ..(*form).clone() }))
    };

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let store = session.store.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let credentials = (*form).clone();
            let errors = errors.clone();
            let submitting = submitting.clone();
            let store = store.clone();
            submitting.set(true);
            spawn_local(async move {
                match store.login(credentials).await {
                    Ok(user) => {
                        log::info!("✅ Login correcto: {}", user.email);
                        errors.set(FieldErrors::new());
                        navigate(&Route::Dashboard);
                    }
                    Err(e) => {
                        log::warn!("⚠️ Login rechazado: {}", e);
                        errors.set(errors_of(&e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <AuthCard title="Connexion" subtitle="Gestion du parc machines">
            <form class="auth-form" onsubmit={on_submit}>
                <TextField label="Email" name="email" input_type="email"
                    value={form.email.clone()} on_change={on_email}
                    error={field_error(&errors, "email")} />
                <TextField label="Mot de passe" name="password" input_type="password"
                    value={form.password.clone()} on_change={on_password}
                    error={field_error(&errors, "password")} />
                <button type="submit" class="btn btn-primary btn-block" disabled={*submitting}>
                    { if *submitting { "Connexion..." } else { "Se connecter" } }
                </button>
            </form>
            <div class="auth-links">
                <a href={Route::ForgotPassword.href()}>{"Mot de passe oublié ?"}</a>
                <a href={Route::Register.href()}>{"Créer un compte"}</a>
            </div>
        </AuthCard>
    }
}
