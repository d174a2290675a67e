// ============================================================================
// APP - Raíz: contexto, router con guard y toasts
// ============================================================================

use yew::prelude::*;

use crate::components::{Layout, Spinner, ToastList};
use crate::hooks::{use_route, use_session, AppContextProvider};
use crate::routes::{guard, navigate, GuardDecision, Route};
use crate::views::auth::{ForgotPasswordPage, LoginPage, RegisterPage, ResetPasswordPage, VerifyCodePage};
use crate::views::{
    ComposantsPage, DashboardPage, DemandesPage, MachineDetailPage, MachinesPage, NotFoundPage, NotificationsPage,
    ProfilePage, TypesPage,
};

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <AppContextProvider>
            <Router />
            <ToastList />
        </AppContextProvider>
    }
}

#[function_component(Router)]
fn router() -> Html {
    let session = use_session();
    let route = use_route();
    let decision = guard(&session.state, &route);

    // La redirección se hace fuera del render
    use_effect_with(decision.clone(), |decision| {
        if let GuardDecision::Redirect(target) = decision {
            log::info!("🧭 Guard: redirigiendo a {}", target.path());
            navigate(target);
        }
        || ()
    });

    match decision {
        GuardDecision::Wait | GuardDecision::Redirect(_) => html! { <Spinner /> },
        GuardDecision::Admit if route.is_public() => public_page(&route),
        GuardDecision::Admit if route == Route::NotFound && !session.state.is_authenticated() => {
            html! { <NotFoundPage /> }
        }
        GuardDecision::Admit => html! {
            <Layout route={route.clone()}>
                { protected_page(&route) }
            </Layout>
        },
    }
}

fn public_page(route: &Route) -> Html {
    match route {
        Route::Register => html! { <RegisterPage /> },
        Route::ForgotPassword => html! { <ForgotPasswordPage /> },
        Route::VerifyResetCode => html! { <VerifyCodePage /> },
        Route::ResetPassword => html! { <ResetPasswordPage /> },
        _ => html! { <LoginPage /> },
    }
}

fn protected_page(route: &Route) -> Html {
    match route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Machines => html! { <MachinesPage /> },
        Route::MachineDetail(id) => html! { <MachineDetailPage id={*id} /> },
        Route::Composants => html! { <ComposantsPage /> },
        Route::Demandes => html! { <DemandesPage /> },
        Route::Types => html! { <TypesPage /> },
        Route::Notifications => html! { <NotificationsPage /> },
        Route::Profile => html! { <ProfilePage /> },
        _ => html! { <NotFoundPage /> },
    }
}
