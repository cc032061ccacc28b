use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub page: u32,
    pub total_pages: u32,
    pub count: u64,
    pub on_page: Callback<u32>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    if props.total_pages <= 1 {
        return html! {
            <div class="pagination">
                <span class="pagination-info">{format!("{} records", props.count)}</span>
            </div>
        };
    }

    let go = |page: u32| {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(page))
    };

    html! {
        <div class="pagination">
            <button class="btn btn-secondary" disabled={props.page <= 1} onclick={go(props.page.saturating_sub(1))}>
                {"Previous"}
            </button>
            <span class="pagination-info">
                {format!("Page {} of {} ({} records)", props.page, props.total_pages, props.count)}
            </span>
            <button class="btn btn-secondary" disabled={props.page >= props.total_pages} onclick={go(props.page + 1)}>
                {"Next"}
            </button>
        </div>
    }
}
