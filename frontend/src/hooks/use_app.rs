use yew::prelude::*;

use crate::app::AppContext;

/// The application context. Only valid below `App`.
#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("use_app called outside of App")
}
