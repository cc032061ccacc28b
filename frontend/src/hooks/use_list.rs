use collections_client::views::{Entity, ListAction, ListState};
use shared::{Id, ListQuery};
use std::ops::Deref;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::sources::ListSource;
use super::use_app::use_app;
use crate::services::logging::Logger;
use crate::services::toasts::Toast;

#[derive(PartialEq)]
pub struct ListModel<T>(ListState<T>);

impl<T> Deref for ListModel<T> {
    type Target = ListState<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Entity + Clone + PartialEq + 'static> Reducible for ListModel<T> {
    type Action = ListAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        state.reduce(action);
        Rc::new(ListModel(state))
    }
}

pub struct UseListResult<T: Entity + Clone + PartialEq + 'static> {
    pub state: UseReducerHandle<ListModel<T>>,
    /// Row waiting for delete confirmation.
    pub confirming: Option<Id>,
    pub actions: UseListActions,
}

#[derive(Clone)]
pub struct UseListActions {
    pub on_search: Callback<String>,
    pub on_filter: Callback<(String, Option<String>)>,
    pub on_clear_filters: Callback<()>,
    pub on_page: Callback<u32>,
    pub on_delete: Callback<Id>,
    pub on_confirm_delete: Callback<()>,
    pub on_cancel_delete: Callback<()>,
    pub on_dismiss_error: Callback<()>,
}

/// A paginated, filterable table backed by `source`. `initial` carries
/// filters fixed by the page, such as a preselected status.
#[hook]
pub fn use_list<T, S>(source: S, initial: ListQuery) -> UseListResult<T>
where
    T: Entity + Clone + PartialEq + 'static,
    S: ListSource<T>,
{
    let app = use_app();
    let page_size = app.client.config().page_size;
    let state = use_reducer(move || ListModel(ListState::with_query(initial, page_size)));
    let tickets = use_mut_ref(|| 0u64);
    let confirming = use_state(|| None::<Id>);

    use_effect_with(state.load_key(), {
        let dispatcher = state.dispatcher();
        let source = source.clone();
        move |(query, _)| {
            let ticket = {
                let mut last = tickets.borrow_mut();
                *last += 1;
                *last
            };
            dispatcher.dispatch(ListAction::Load { ticket });

            let query = query.clone();
            spawn_local(async move {
                match source.fetch(query).await {
                    Ok(page) => dispatcher.dispatch(ListAction::Loaded { ticket, page }),
                    Err(e) => {
                        Logger::warn_with_component("use_list", &format!("Load failed: {}", e));
                        dispatcher.dispatch(ListAction::Failed {
                            ticket,
                            message: e.user_message(),
                        });
                    }
                }
            });
            || ()
        }
    });

    let dispatch = |make: fn(String) -> ListAction<T>| {
        let dispatcher = state.dispatcher();
        Callback::from(move |value: String| dispatcher.dispatch(make(value)))
    };

    let on_filter = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(key, value): (String, Option<String>)| {
            dispatcher.dispatch(ListAction::SetFilter { key, value })
        })
    };

    let on_clear_filters = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(ListAction::ClearFilters))
    };

    let on_page = {
        let dispatcher = state.dispatcher();
        Callback::from(move |page: u32| dispatcher.dispatch(ListAction::GoToPage(page)))
    };

    let on_delete = {
        let confirming = confirming.clone();
        Callback::from(move |id: Id| confirming.set(Some(id)))
    };

    let on_cancel_delete = {
        let confirming = confirming.clone();
        Callback::from(move |_| confirming.set(None))
    };

    let on_confirm_delete = {
        let confirming = confirming.clone();
        let dispatcher = state.dispatcher();
        let source = source.clone();
        let app = app.clone();
        Callback::from(move |_| {
            let Some(id) = (*confirming).clone() else {
                return;
            };
            confirming.set(None);
            dispatcher.dispatch(ListAction::DeleteStarted(id.clone()));

            let dispatcher = dispatcher.clone();
            let source = source.clone();
            let app = app.clone();
            spawn_local(async move {
                match source.remove(id.clone()).await {
                    Ok(()) => {
                        dispatcher.dispatch(ListAction::DeleteSucceeded(id));
                        app.notify(Toast::success("Deleted successfully"));
                    }
                    Err(e) => {
                        dispatcher.dispatch(ListAction::DeleteFailed {
                            id,
                            message: e.user_message(),
                        });
                        app.report("use_list", &e);
                    }
                }
            });
        })
    };

    let on_dismiss_error = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(ListAction::DismissError))
    };

    UseListResult {
        actions: UseListActions {
            on_search: dispatch(ListAction::SetSearch),
            on_filter,
            on_clear_filters,
            on_page,
            on_delete,
            on_confirm_delete,
            on_cancel_delete,
            on_dismiss_error,
        },
        confirming: (*confirming).clone(),
        state,
    }
}
