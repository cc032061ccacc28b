use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct FilterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub options: Vec<(String, String)>,
}

impl FilterSpec {
    pub fn new(key: &'static str, label: &'static str, options: Vec<(String, String)>) -> Self {
        Self { key, label, options }
    }
}

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    /// Current search text; `None` hides the search box.
    #[prop_or_default]
    pub search: Option<String>,
    #[prop_or_default]
    pub filters: Vec<(FilterSpec, Option<String>)>,
    #[prop_or_default]
    pub on_search: Callback<String>,
    #[prop_or_default]
    pub on_filter: Callback<(String, Option<String>)>,
    pub on_clear: Callback<()>,
}

/// Search box and select filters above a list. Search is applied on Enter
/// or when the box loses focus.
#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let on_search_change = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_search.emit(input.value());
        })
    };

    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    html! {
        <div class="filter-bar">
            { match &props.search {
                Some(search) => html! {
                    <input
                        type="search"
                        class="form-input filter-search"
                        placeholder="Search..."
                        value={search.clone()}
                        onchange={on_search_change}
                    />
                },
                None => html! {},
            } }
            { for props.filters.iter().map(|(spec, current)| {
                let key = spec.key;
                let on_filter = props.on_filter.clone();
                let onchange = Callback::from(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    let value = select.value();
                    on_filter.emit((key.to_string(), (!value.is_empty()).then_some(value)));
                });
                let current = current.clone().unwrap_or_default();
                html! {
                    <select class="form-input filter-select" aria-label={spec.label} {onchange}>
                        <option value="" selected={current.is_empty()}>{format!("All {}", spec.label)}</option>
                        { for spec.options.iter().map(|(value, label)| html! {
                            <option value={value.clone()} selected={*value == current}>{label}</option>
                        }) }
                    </select>
                }
            }) }
            <button type="button" class="btn btn-secondary" onclick={on_clear}>{"Clear filters"}</button>
        </div>
    }
}
