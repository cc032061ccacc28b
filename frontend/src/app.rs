use collections_client::routes::navigation;
use collections_client::{ApiClient, ApiError, Route, Services, SessionEvent};
use gloo::timers::future::TimeoutFuture;
use shared::{capabilities, Action, Capabilities, Resource, User};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::layout::Layout;
use crate::components::toast_host::ToastHost;
use crate::pages;
use crate::services::logging::Logger;
use crate::services::navigator::{self, Navigator};
use crate::services::toasts::{Toast, ToastAction, Toasts};

const TOAST_MILLIS: u32 = 5_000;

/// What `main` wires up before the first render.
#[derive(Clone, PartialEq)]
pub struct Runtime {
    pub client: ApiClient,
    pub services: Services,
}

/// Shared with every page through a context provider.
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub client: ApiClient,
    pub services: Services,
    pub user: Option<User>,
    pub route: Route,
    pub navigator: Navigator,
    toasts: UseReducerDispatcher<Toasts>,
}

impl AppContext {
    pub fn capabilities(&self, resource: Resource) -> Capabilities {
        match &self.user {
            Some(user) => capabilities(user, resource),
            None => Capabilities::default(),
        }
    }

    pub fn can(&self, resource: Resource, action: Action) -> bool {
        self.capabilities(resource).can(action)
    }

    /// Show a toast that dismisses itself.
    pub fn notify(&self, toast: Toast) {
        let id = toast.id;
        self.toasts.dispatch(ToastAction::Push(toast));
        let toasts = self.toasts.clone();
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MILLIS).await;
            toasts.dispatch(ToastAction::Dismiss(id));
        });
    }

    pub fn dismiss_callback(&self) -> Callback<uuid::Uuid> {
        let toasts = self.toasts.clone();
        Callback::from(move |id| toasts.dispatch(ToastAction::Dismiss(id)))
    }

    /// Log a failed request and tell the user. An expired session is
    /// already handled by the redirect to the login page.
    pub fn report(&self, component: &str, error: &ApiError) {
        Logger::warn_with_component(component, &error.to_string());
        if !error.requires_login() {
            self.notify(Toast::error(error.user_message()));
        }
    }

    pub fn go(&self, route: Route) -> Callback<MouseEvent> {
        let navigator = self.navigator.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            navigator.push(route.clone());
        })
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub runtime: Runtime,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let runtime = &props.runtime;
    let route = use_state_eq(navigator::current_route);
    let user = use_state_eq(|| runtime.client.session().user());
    let toasts = use_reducer(Toasts::default);

    let navigator = {
        let route = route.setter();
        (*use_memo((), move |_| Navigator::new(Callback::from(move |next| route.set(next))))).clone()
    };

    // Back and forward buttons.
    use_effect_with((), {
        let route = route.setter();
        move |_| {
            let listener = navigator::listen(Callback::from(move |next| route.set(next)));
            move || drop(listener)
        }
    });

    // Sign-in, sign-out and expiry all come through the session.
    use_effect_with((), {
        let user = user.setter();
        let navigator = navigator.clone();
        let session = runtime.client.session().clone();
        move |_| {
            session.subscribe(move |event| match event {
                SessionEvent::SignedIn(signed_in) => user.set(Some(signed_in.clone())),
                SessionEvent::SignedOut | SessionEvent::Expired => {
                    user.set(None);
                    navigator.replace(Route::Login);
                }
            });
            || ()
        }
    });

    let current = (*route).clone().canonical();

    // Keep the address bar honest about where the guard sent the user.
    use_effect_with((user.is_some(), current.clone()), {
        let navigator = navigator.clone();
        move |(signed_in, current): &(bool, Route)| {
            match (signed_in, current) {
                (false, route) if *route != Route::Login => navigator.replace(Route::Login),
                (true, Route::Login) => navigator.replace(Route::Customers),
                _ => {}
            }
            || ()
        }
    });

    let context = AppContext {
        client: runtime.client.clone(),
        services: runtime.services.clone(),
        user: (*user).clone(),
        route: current.clone(),
        navigator,
        toasts: toasts.dispatcher(),
    };

    let content = match &*user {
        None => html! { <pages::login::LoginPage /> },
        Some(signed_in) => {
            let page = if current == Route::Login {
                html! {}
            } else if current.allows(signed_in) {
                pages::switch(&current)
            } else {
                Logger::info_with_component("App", &format!("{} may not open {}", signed_in.username, current));
                html! { <pages::not_found::NotFoundPage /> }
            };
            html! {
                <Layout entries={navigation(signed_in)} user={signed_in.clone()}>
                    { page }
                </Layout>
            }
        }
    };

    html! {
        <ContextProvider<AppContext> context={context}>
            { content }
            <ToastHost toasts={toasts.items.clone()} />
        </ContextProvider<AppContext>>
    }
}
