// ============================================================================
// VERIFY CODE - Paso 2: código de 6 dígitos con cuenta atrás de 15 min
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{errors_of, field_error, TextField};
use crate::hooks::{use_app_context, use_countdown};
use crate::routes::{navigate, Route};
use crate::utils::{FieldErrors, RESET_CODE_TTL_SECONDS};
use crate::viewmodels::ResetViewModel;
use crate::views::auth::AuthCard;

#[function_component(VerifyCodePage)]
pub fn verify_code_page() -> Html {
    let context = use_app_context();
    let target = context.reset_flow.borrow().verification_target();
    let countdown = use_countdown(RESET_CODE_TTL_SECONDS);
    let code = use_state(String::new);
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);
    let vm = ResetViewModel::new(context.gateway(), context.reset_flow.clone());

    // Sin email no hay nada que verificar: volver al paso 1
    use_effect_with(target.clone(), |target| {
        if let Err(route) = target {
            navigate(route);
        }
        || ()
    });

    let on_code = {
        let code = code.clone();
        Callback::from(move |value: String| {
            code.set(value.chars().filter(char::is_ascii_digit).take(6).collect())
        })
    };

    let on_submit = {
        let code = code.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let vm = vm.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let value = (*code).clone();
            let errors = errors.clone();
            let submitting = submitting.clone();
            let vm = vm.clone();
            submitting.set(true);
            spawn_local(async move {
                match vm.verify_code(&value).await {
                    Ok(()) => navigate(&Route::ResetPassword),
                    Err(e) => errors.set(errors_of(&e)),
                }
                submitting.set(false);
            });
        })
    };

    let on_resend = {
        let restart = countdown.restart.clone();
        let toasts = context.toasts.clone();
        let vm = vm.clone();
        let email = target.clone().unwrap_or_default();
        Callback::from(move |_| {
            let restart = restart.clone();
            let toasts = toasts.clone();
            let vm = vm.clone();
            let email = email.clone();
            spawn_local(async move {
                if let Ok(message) = vm.request_code(&email).await {
                    toasts.success(message);
                    restart.emit(());
                }
            });
        })
    };

    let Ok(email) = target else {
        return html! {};
    };

    html! {
        <AuthCard title="Vérification" subtitle={format!("Code envoyé à {}", email)}>
            <form class="auth-form" onsubmit={on_submit}>
                <TextField label="Code de vérification" name="code" value={(*code).clone()}
                    placeholder="123456" on_change={on_code} error={field_error(&errors, "code")} />
                <div class={if countdown.expired { "countdown expired" } else { "countdown" }}>
                    if countdown.expired {
                        {"Le code a expiré"}
                    } else {
                        {format!("Le code expire dans {}", countdown.display)}
                    }
                </div>
                <button type="submit" class="btn btn-primary btn-block" disabled={*submitting || countdown.expired}>
                    {"Vérifier"}
                </button>
                <button type="button" class="btn btn-link" disabled={!countdown.expired} onclick={on_resend}>
                    {"Renvoyer le code"}
                </button>
            </form>
        </AuthCard>
    }
}
