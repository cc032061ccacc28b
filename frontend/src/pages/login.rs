use shared::forms::LoginForm;
use shared::User;
use yew::prelude::*;

use crate::components::fields::TextField;
use crate::hooks::{use_app, use_form};
use crate::services::logging::Logger;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let app = use_app();
    let form = use_form(LoginForm::default());

    // The session announces the sign-in; App swaps the page.
    let on_submit = form.submit_callback(
        {
            let client = app.client.clone();
            move |credentials| {
                let client = client.clone();
                async move { client.login(&credentials).await }
            }
        },
        Callback::from(|user: User| {
            Logger::info_with_component("LoginPage", &format!("Signed in as {}", user.username));
        }),
    );

    let state = &form.state;
    html! {
        <div class="login-page">
            <form class="login-card" onsubmit={on_submit}>
                <h1>{"Collections"}</h1>
                <p class="login-subtitle">{"Sign in to continue"}</p>
                if let Some(message) = &state.message {
                    <div class="form-error">{message}</div>
                }
                <TextField label="Username" bind={form.bind("username")} required=true />
                <TextField label="Password" kind="password" bind={form.bind("password")} required=true />
                <button type="submit" class="btn btn-primary btn-block" disabled={state.submitting}>
                    { if state.submitting { "Signing in..." } else { "Sign in" } }
                </button>
            </form>
        </div>
    }
}
