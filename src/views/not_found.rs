use yew::prelude::*;

use crate::routes::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="page not-found">
            <h1>{"404"}</h1>
            <p>{"Cette page n'existe pas"}</p>
            <a href={Route::Dashboard.href()} class="btn btn-primary">{"Retour au tableau de bord"}</a>
        </div>
    }
}
