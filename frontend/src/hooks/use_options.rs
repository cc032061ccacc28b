use shared::{Id, ListQuery};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::sources::ListSource;
use crate::services::logging::Logger;

/// Largest page the API serves; select boxes show one page.
const OPTION_PAGE_SIZE: u32 = 100;

/// `(value, label)` pairs for a select box that points at other entities,
/// e.g. the officer a customer is assigned to.
#[hook]
pub fn use_options<T, S>(source: S, query: ListQuery, describe: fn(&T) -> (Id, String)) -> Vec<(String, String)>
where
    T: 'static,
    S: ListSource<T>,
{
    let options = use_state(Vec::<(String, String)>::new);

    use_effect_with(query, {
        let options = options.clone();
        move |query: &ListQuery| {
            let query = query.clone().page(1).page_size(OPTION_PAGE_SIZE);
            spawn_local(async move {
                match source.fetch(query).await {
                    Ok(page) => options.set(
                        page.results
                            .iter()
                            .map(describe)
                            .map(|(id, label)| (id.to_string(), label))
                            .collect(),
                    ),
                    Err(e) => {
                        Logger::warn_with_component("use_options", &format!("Could not load options: {}", e))
                    }
                }
            });
            || ()
        }
    });

    (*options).clone()
}
