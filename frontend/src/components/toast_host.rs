use yew::prelude::*;

use crate::hooks::use_app;
use crate::services::toasts::{Toast, ToastKind};

#[derive(Properties, PartialEq)]
pub struct ToastHostProps {
    pub toasts: Vec<Toast>,
}

#[function_component(ToastHost)]
pub fn toast_host(props: &ToastHostProps) -> Html {
    let app = use_app();
    let on_dismiss = app.dismiss_callback();

    html! {
        <div class="toast-container" role="status">
            { for props.toasts.iter().map(|toast| {
                let class = match toast.kind {
                    ToastKind::Success => "toast toast-success",
                    ToastKind::Error => "toast toast-error",
                    ToastKind::Info => "toast toast-info",
                };
                let id = toast.id;
                let on_dismiss = on_dismiss.clone();
                html! {
                    <div key={id.to_string()} class={class}>
                        <span>{&toast.message}</span>
                        <button class="toast-close" onclick={move |_| on_dismiss.emit(id)}>{"×"}</button>
                    </div>
                }
            }) }
        </div>
    }
}
