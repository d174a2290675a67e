// ============================================================================
// FORGOT PASSWORD - Paso 1: pedir el código por email
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{errors_of, field_error, TextField};
use crate::hooks::use_app_context;
use crate::routes::{navigate, Route};
use crate::utils::FieldErrors;
use crate::viewmodels::ResetViewModel;
use crate::views::auth::AuthCard;

#[function_component(ForgotPasswordPage)]
pub fn forgot_password_page() -> Html {
    let context = use_app_context();
    let email = use_state(|| context.reset_flow.borrow().email.clone().unwrap_or_default());
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);

    let on_email = {
        let email = email.clone();
        Callback::from(move |value: String| email.set(value))
    };

    let on_submit = {
        let email = email.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let vm = ResetViewModel::new(context.gateway(), context.reset_flow.clone());
        let toasts = context.toasts.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let address = (*email).clone();
            let errors = errors.clone();
            let submitting = submitting.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            submitting.set(true);
            spawn_local(async move {
                match vm.request_code(&address).await {
                    Ok(message) => {
                        toasts.success(message);
                        navigate(&Route::VerifyResetCode);
                    }
                    Err(e) => errors.set(errors_of(&e)),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <AuthCard title="Mot de passe oublié" subtitle="Un code à 6 chiffres vous sera envoyé par email">
            <form class="auth-form" onsubmit={on_submit}>
                <TextField label="Email" name="email" input_type="email" value={(*email).clone()}
                    on_change={on_email} error={field_error(&errors, "email")} />
                <button type="submit" class="btn btn-primary btn-block" disabled={*submitting}>
                    {"Envoyer le code"}
                </button>
            </form>
            <div class="auth-links">
                <a href={Route::Login.href()}>{"Retour à la connexion"}</a>
            </div>
        </AuthCard>
    }
}
