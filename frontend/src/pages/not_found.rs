use collections_client::Route;
use yew::prelude::*;

use crate::hooks::use_app;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    let app = use_app();
    html! {
        <div class="page not-found">
            <h2>{"Page not found"}</h2>
            <p>{"The page you are looking for does not exist or you do not have access to it."}</p>
            <a href="/customers" onclick={app.go(Route::Customers)}>{"Back to customers"}</a>
        </div>
    }
}
