use collections_client::views::{DetailAction, DetailState};
use collections_client::ApiResult;
use shared::Id;
use std::future::Future;
use std::ops::Deref;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::sources::DetailSource;
use super::use_app::use_app;
use crate::app::AppContext;
use crate::services::toasts::Toast;

#[derive(PartialEq)]
pub struct DetailModel<T>(DetailState<T>);

impl<T> Default for DetailModel<T> {
    fn default() -> Self {
        DetailModel(DetailState::Loading)
    }
}

impl<T> Deref for DetailModel<T> {
    type Target = DetailState<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Clone + PartialEq + 'static> Reducible for DetailModel<T> {
    type Action = DetailAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(DetailModel(self.0.clone().reduce(action)))
    }
}

pub struct UseDetailResult<T: Clone + PartialEq + 'static, S> {
    pub state: UseReducerHandle<DetailModel<T>>,
    id: Id,
    source: S,
    app: AppContext,
}

impl<T, S> UseDetailResult<T, S>
where
    T: Clone + PartialEq + 'static,
    S: DetailSource<T>,
{
    pub fn entity(&self) -> Option<&T> {
        self.state.entity()
    }

    /// Reload the entity without leaving the page, e.g. after a modal form
    /// changed it.
    pub fn refresh_callback<E: 'static>(&self) -> Callback<E> {
        let dispatcher = self.state.dispatcher();
        let source = self.source.clone();
        let id = self.id.clone();
        Callback::from(move |_: E| {
            let dispatcher = dispatcher.clone();
            let source = source.clone();
            let id = id.clone();
            spawn_local(async move {
                if let Ok(entity) = source.fetch_one(id).await {
                    dispatcher.dispatch(DetailAction::SubmitSucceeded(Some(entity)));
                }
            });
        })
    }

    /// Button handler for a state-changing action such as `approve`. After
    /// the action the entity is shown as the server now has it. Clicks are
    /// ignored while another action is running.
    pub fn perform_callback<F, Fut>(&self, success: &'static str, action: F) -> Callback<()>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ApiResult<()>> + 'static,
    {
        let state = self.state.clone();
        let source = self.source.clone();
        let id = self.id.clone();
        let app = self.app.clone();
        Callback::from(move |_: ()| {
            if state.is_submitting() || state.entity().is_none() {
                return;
            }
            state.dispatch(DetailAction::SubmitStarted);

            let dispatcher = state.dispatcher();
            let source = source.clone();
            let id = id.clone();
            let app = app.clone();
            let pending = action();
            spawn_local(async move {
                match pending.await {
                    Ok(()) => {
                        let fresh = source.fetch_one(id).await.ok();
                        dispatcher.dispatch(DetailAction::SubmitSucceeded(fresh));
                        app.notify(Toast::success(success));
                    }
                    Err(e) => {
                        dispatcher.dispatch(DetailAction::SubmitFailed(e.user_message()));
                        app.report("use_detail", &e);
                    }
                }
            });
        })
    }
}

/// Load one entity by id and keep it current across actions.
#[hook]
pub fn use_detail<T, S>(source: S, id: Id) -> UseDetailResult<T, S>
where
    T: Clone + PartialEq + 'static,
    S: DetailSource<T>,
{
    let app = use_app();
    let state = use_reducer(DetailModel::<T>::default);

    use_effect_with(id.clone(), {
        let dispatcher = state.dispatcher();
        let source = source.clone();
        move |id: &Id| {
            dispatcher.dispatch(DetailAction::Load);
            let id = id.clone();
            spawn_local(async move {
                match source.fetch_one(id).await {
                    Ok(entity) => dispatcher.dispatch(DetailAction::Loaded(entity)),
                    Err(e) => dispatcher.dispatch(DetailAction::LoadFailed(e)),
                }
            });
            || ()
        }
    });

    UseDetailResult {
        state,
        id,
        source,
        app,
    }
}
