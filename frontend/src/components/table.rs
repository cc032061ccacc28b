use collections_client::views::LoadStatus;
use collections_client::Route;
use yew::prelude::*;

use super::states::{EmptyState, ErrorBanner, Loading};
use crate::hooks::use_app;

#[derive(Properties, PartialEq)]
pub struct DataTableProps {
    pub headers: Vec<&'static str>,
    pub status: LoadStatus,
    pub is_empty: bool,
    #[prop_or(AttrValue::from("No records found."))]
    pub empty_message: AttrValue,
    /// Table rows.
    #[prop_or_default]
    pub children: Html,
}

/// A list table with its loading, error and empty states.
#[function_component(DataTable)]
pub fn data_table(props: &DataTableProps) -> Html {
    match &props.status {
        LoadStatus::Loading => return html! { <Loading /> },
        LoadStatus::Failed(message) => return html! { <ErrorBanner message={message.clone()} /> },
        LoadStatus::Loaded if props.is_empty => {
            return html! { <EmptyState message={props.empty_message.clone()} /> }
        }
        LoadStatus::Loaded => {}
    }

    html! {
        <table class="data-table">
            <thead>
                <tr>
                    { for props.headers.iter().map(|h| html! { <th>{*h}</th> }) }
                </tr>
            </thead>
            <tbody>
                { props.children.clone() }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct RowActionsProps {
    #[prop_or_default]
    pub view: Option<Route>,
    #[prop_or_default]
    pub edit: Option<Route>,
    #[prop_or_default]
    pub payments: Option<Route>,
    #[prop_or_default]
    pub on_delete: Option<Callback<()>>,
    #[prop_or_default]
    pub deleting: bool,
}

/// View, edit, payments and delete links for one row; each only when allowed.
#[function_component(RowActions)]
pub fn row_actions(props: &RowActionsProps) -> Html {
    let app = use_app();
    let delete = match &props.on_delete {
        Some(on_delete) => {
            let on_delete = on_delete.clone();
            html! {
                <button
                    class="btn btn-link btn-danger-text"
                    disabled={props.deleting}
                    onclick={move |_| on_delete.emit(())}
                >
                    { if props.deleting { "Deleting..." } else { "Delete" } }
                </button>
            }
        }
        None => html! {},
    };

    html! {
        <td class="row-actions">
            if let Some(route) = &props.view {
                <a href={route.to_path()} onclick={app.go(route.clone())}>{"View"}</a>
            }
            if let Some(route) = &props.edit {
                <a href={route.to_path()} onclick={app.go(route.clone())}>{"Edit"}</a>
            }
            if let Some(route) = &props.payments {
                <a href={route.to_path()} onclick={app.go(route.clone())}>{"Payments"}</a>
            }
            { delete }
        </td>
    }
}
