use collections_client::views::LoadStatus;
use collections_client::Route;
use shared::format::display_datetime;
use shared::forms::{FormContext, HierarchyForm};
use shared::{Action, Hierarchy, Id, ListQuery, Resource, Role, User};
use yew::prelude::*;

use super::{navigate_to, on_saved, text_or_dash};
use crate::components::fields::{FormActions, SelectField};
use crate::components::layout::PageHeader;
use crate::components::modal::ConfirmDialog;
use crate::components::pagination::Pagination;
use crate::components::states::{ErrorBanner, Loading};
use crate::components::table::{DataTable, RowActions};
use crate::hooks::{use_app, use_edit_form, use_list, use_options};

fn user_option(user: &User) -> (Id, String) {
    (user.id.clone(), user.display_name())
}

/// Which officers report to which manager.
#[function_component(HierarchyListPage)]
pub fn hierarchy_list_page() -> Html {
    let app = use_app();
    let list = use_list((*app.services.hierarchies).clone(), ListQuery::new());
    let caps = app.capabilities(Resource::Hierarchies);
    let offset = use_memo((), |_| FormContext::current().offset);
    let state = &list.state;
    let actions = &list.actions;

    html! {
        <div class="page">
            <PageHeader
                title="Hierarchies"
                action={caps.can(Action::Create).then_some((Route::HierarchyNew, "New assignment"))}
            />
            if let Some(error) = &state.error {
                <ErrorBanner message={error.clone()} on_dismiss={actions.on_dismiss_error.clone()} />
            }
            <DataTable
                headers={vec!["Manager", "Collection officer", "Since", ""]}
                status={state.status.clone()}
                is_empty={state.rows().is_empty()}
                empty_message="No officers are assigned to managers yet."
            >
                { for state.rows().iter().map(|hierarchy| {
                    let id = hierarchy.id.clone();
                    let on_delete = actions.on_delete.clone();
                    html! {
                        <tr key={id.to_string()}>
                            <td>{text_or_dash(&hierarchy.manager_name)}</td>
                            <td>{text_or_dash(&hierarchy.collection_officer_name)}</td>
                            <td>{hierarchy.created_at.map(|t| display_datetime(t, *offset)).unwrap_or_else(|| "—".into())}</td>
                            <RowActions
                                edit={caps.can(Action::Edit).then(|| Route::HierarchyEdit(id.clone()))}
                                on_delete={caps.can(Action::Delete).then(|| {
                                    let id = id.clone();
                                    Callback::from(move |_: ()| on_delete.emit(id.clone()))
                                })}
                                deleting={state.is_deleting(&id)}
                            />
                        </tr>
                    }
                }) }
            </DataTable>
            <Pagination
                page={state.current_page()}
                total_pages={state.total_pages()}
                count={state.page.count}
                on_page={actions.on_page.clone()}
            />
            if list.confirming.is_some() {
                <ConfirmDialog
                    title="Remove assignment"
                    message="The officer will no longer report to this manager."
                    confirm_label="Remove"
                    on_confirm={actions.on_confirm_delete.clone()}
                    on_cancel={actions.on_cancel_delete.clone()}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct HierarchyFormProps {
    #[prop_or_default]
    pub id: Option<Id>,
}

#[function_component(HierarchyFormPage)]
pub fn hierarchy_form_page(props: &HierarchyFormProps) -> Html {
    let app = use_app();
    let hierarchies = (*app.services.hierarchies).clone();
    let (form, status) = use_edit_form(
        hierarchies.clone(),
        props.id.clone(),
        HierarchyForm::default(),
        |hierarchy: &Hierarchy, _| HierarchyForm::from_entity(hierarchy),
    );
    let managers = use_options(
        (*app.services.users).clone(),
        ListQuery::new().filter("role", Role::Manager.as_str()),
        user_option,
    );
    let officers = use_options(
        (*app.services.users).clone(),
        ListQuery::new().filter("role", Role::CollectionOfficer.as_str()),
        user_option,
    );

    let editing = props.id.clone();
    let on_submit = form.submit_callback(
        move |payload| {
            let hierarchies = hierarchies.clone();
            let editing = editing.clone();
            async move {
                match editing {
                    Some(id) => hierarchies.update(&id, &payload).await,
                    None => hierarchies.create(&payload).await,
                }
            }
        },
        on_saved::<Hierarchy>(&app, "Assignment saved"),
    );
    let on_cancel = navigate_to(&app, Route::Hierarchies);

    match &status {
        LoadStatus::Loading => return html! { <Loading /> },
        LoadStatus::Failed(message) => return html! { <ErrorBanner message={message.clone()} /> },
        LoadStatus::Loaded => {}
    }

    let state = &form.state;
    html! {
        <div class="page">
            <PageHeader title={if props.id.is_some() { "Edit assignment" } else { "New assignment" }} />
            <form class="entity-form" onsubmit={on_submit}>
                <SelectField label="Manager" bind={form.bind("manager")} options={managers} required=true />
                <SelectField label="Collection officer" bind={form.bind("collection_officer")} options={officers} required=true />
                <FormActions
                    submitting={state.submitting}
                    submit_label="Save"
                    {on_cancel}
                    message={state.message.clone()}
                />
            </form>
        </div>
    }
}
