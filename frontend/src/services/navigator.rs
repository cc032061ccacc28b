use collections_client::Route;
use gloo::history::{BrowserHistory, History, HistoryListener};
use yew::Callback;

/// Moves between routes through the browser history.
#[derive(Clone, PartialEq)]
pub struct Navigator {
    on_change: Callback<Route>,
}

impl Navigator {
    pub fn new(on_change: Callback<Route>) -> Self {
        Self { on_change }
    }

    pub fn push(&self, route: Route) {
        BrowserHistory::new().push(route.to_path());
        self.on_change.emit(route);
    }

    pub fn replace(&self, route: Route) {
        BrowserHistory::new().replace(route.to_path());
        self.on_change.emit(route);
    }

    pub fn back(&self) {
        BrowserHistory::new().back();
    }
}

/// The route the address bar currently shows.
pub fn current_route() -> Route {
    let location = BrowserHistory::new().location();
    Route::parse(&format!("{}{}", location.path(), location.query_str()))
}

/// Report back/forward navigation. Keep the listener alive for as long as
/// updates are wanted.
pub fn listen(on_change: Callback<Route>) -> HistoryListener {
    BrowserHistory::new().listen(move || on_change.emit(current_route()))
}
