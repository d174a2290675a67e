pub mod login;
pub mod register;
pub mod forgot_password;
pub mod verify_code;
pub mod reset_password;

pub use login::LoginPage;
pub use register::RegisterPage;
pub use forgot_password::ForgotPasswordPage;
pub use verify_code::VerifyCodePage;
pub use reset_password::ResetPasswordPage;

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AuthCardProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub subtitle: AttrValue,
    pub children: Children,
}

/// Tarjeta centrada común a las pantallas de autenticación
#[function_component(AuthCard)]
pub fn auth_card(props: &AuthCardProps) -> Html {
    html! {
        <div class="auth-screen">
            <div class="auth-card">
                <div class="auth-header">
                    <div class="auth-logo">{"🏭"}</div>
                    <h1>{props.title.clone()}</h1>
                    if !props.subtitle.is_empty() {
                        <p>{props.subtitle.clone()}</p>
                    }
                </div>
                {props.children.clone()}
            </div>
        </div>
    }
}
