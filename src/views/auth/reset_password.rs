// ============================================================================
// RESET PASSWORD - Paso 3: nueva contraseña (requiere email + token)
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{errors_of, field_error, TextField};
use crate::hooks::use_app_context;
use crate::routes::{navigate, Route};
use crate::utils::FieldErrors;
use crate::viewmodels::ResetViewModel;
use crate::views::auth::AuthCard;

#[function_component(ResetPasswordPage)]
pub fn reset_password_page() -> Html {
    let context = use_app_context();
    let ready = context.reset_flow.borrow().completion_target().is_ok();
    let password = use_state(String::new);
    let confirmation = use_state(String::new);
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);

    use_effect_with(ready, |ready| {
        if !*ready {
            log::warn!("⚠️ Reseteo sin email/token, volviendo al paso 1");
            navigate(&Route::ForgotPassword);
        }
        || ()
    });

    let on_password = {
        let password = password.clone();
        Callback::from(move |value: String| password.set(value))
    };
    let on_confirmation = {
        let confirmation = confirmation.clone();
        Callback::from(move |value: String| confirmation.set(value))
    };

    let on_submit = {
        let password = password.clone();
        let confirmation = confirmation.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let vm = ResetViewModel::new(context.gateway(), context.reset_flow.clone());
        let toasts = context.toasts.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (password, confirmation) = ((*password).clone(), (*confirmation).clone());
            let errors = errors.clone();
            let submitting = submitting.clone();
            let vm = vm.clone();
            let toasts = toasts.clone();
            submitting.set(true);
            spawn_local(async move {
                match vm.complete(&password, &confirmation).await {
                    Ok(()) => {
                        toasts.success("Mot de passe réinitialisé, vous pouvez vous connecter");
                        navigate(&Route::Login);
                    }
                    Err(e) => errors.set(errors_of(&e)),
                }
                submitting.set(false);
            });
        })
    };

    if !ready {
        return html! {};
    }

    html! {
        <AuthCard title="Nouveau mot de passe">
            <form class="auth-form" onsubmit={on_submit}>
                <TextField label="Nouveau mot de passe" name="password" input_type="password"
                    value={(*password).clone()} on_change={on_password} error={field_error(&errors, "password")} />
                <TextField label="Confirmation" name="password_confirmation" input_type="password"
                    value={(*confirmation).clone()} on_change={on_confirmation}
                    error={field_error(&errors, "password_confirmation")} />
                <button type="submit" class="btn btn-primary btn-block" disabled={*submitting}>
                    {"Réinitialiser"}
                </button>
            </form>
        </AuthCard>
    }
}
