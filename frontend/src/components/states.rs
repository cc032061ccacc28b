use collections_client::views::DetailState;
use yew::prelude::*;

#[function_component(Loading)]
pub fn loading() -> Html {
    html! { <div class="loading">{"Loading..."}</div> }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    html! {
        <div class="error-banner" role="alert">
            <span>{props.message.clone()}</span>
            { match &props.on_dismiss {
                Some(on_dismiss) => {
                    let on_dismiss = on_dismiss.clone();
                    html! { <button class="btn btn-link" onclick={move |_| on_dismiss.emit(())}>{"Dismiss"}</button> }
                }
                None => html! {},
            } }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub message: AttrValue,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! { <div class="empty-state">{props.message.clone()}</div> }
}

/// What a detail page shows until its entity is ready. Forbidden entities
/// look exactly like missing ones.
pub fn detail_placeholder<T>(state: &DetailState<T>, noun: &str) -> Option<Html> {
    match state {
        DetailState::Loading => Some(html! { <Loading /> }),
        DetailState::NotFound | DetailState::Forbidden => Some(html! {
            <EmptyState message={format!("{noun} not found.")} />
        }),
        DetailState::Failed(message) => Some(html! { <ErrorBanner message={message.clone()} /> }),
        DetailState::Ready { .. } => None,
    }
}
