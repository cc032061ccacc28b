use collections_client::views::LoadStatus;
use collections_client::Route;
use shared::forms::UserForm;
use shared::{Action, Id, ListQuery, Resource, Role, User};
use yew::prelude::*;

use super::{navigate_to, on_saved, text_or_dash};
use crate::components::badge::ActiveBadge;
use crate::components::fields::{choice_options, CheckboxField, FormActions, SelectField, TextField};
use crate::components::filter_bar::{FilterBar, FilterSpec};
use crate::components::layout::PageHeader;
use crate::components::modal::ConfirmDialog;
use crate::components::pagination::Pagination;
use crate::components::states::{ErrorBanner, Loading};
use crate::components::table::{DataTable, RowActions};
use crate::hooks::{use_app, use_edit_form, use_list};

#[function_component(UserListPage)]
pub fn user_list_page() -> Html {
    let app = use_app();
    let list = use_list((*app.services.users).clone(), ListQuery::new());
    let caps = app.capabilities(Resource::Users);
    let state = &list.state;
    let actions = &list.actions;
    let me = app.user.as_ref().map(|u| u.id.clone());

    let filters = vec![(
        FilterSpec::new("role", "roles", choice_options::<Role>()),
        state.filter("role").map(str::to_string),
    )];

    html! {
        <div class="page">
            <PageHeader
                title="Users"
                action={caps.can(Action::Create).then_some((Route::UserNew, "New user"))}
            />
            <FilterBar
                search={Some(state.filter("search").unwrap_or_default().to_string())}
                {filters}
                on_search={actions.on_search.clone()}
                on_filter={actions.on_filter.clone()}
                on_clear={actions.on_clear_filters.clone()}
            />
            if let Some(error) = &state.error {
                <ErrorBanner message={error.clone()} on_dismiss={actions.on_dismiss_error.clone()} />
            }
            <DataTable
                headers={vec!["Username", "Name", "Email", "Phone", "Role", "Status", ""]}
                status={state.status.clone()}
                is_empty={state.rows().is_empty()}
                empty_message="No users match these filters."
            >
                { for state.rows().iter().map(|user| {
                    let id = user.id.clone();
                    let on_delete = actions.on_delete.clone();
                    // Nobody deletes their own account.
                    let deletable = caps.can(Action::Delete) && me.as_ref() != Some(&id);
                    html! {
                        <tr key={id.to_string()}>
                            <td>{&user.username}</td>
                            <td>{user.display_name()}</td>
                            <td>{&user.email}</td>
                            <td>{text_or_dash(&user.phone_number)}</td>
                            <td>{user.role.label()}</td>
                            <td><ActiveBadge active={user.is_active} /></td>
                            <RowActions
                                edit={caps.can(Action::Edit).then(|| Route::UserEdit(id.clone()))}
                                on_delete={deletable.then(|| {
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
                    title="Delete user"
                    message="The account will be removed. Their customers keep their history."
                    on_confirm={actions.on_confirm_delete.clone()}
                    on_cancel={actions.on_cancel_delete.clone()}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct UserFormProps {
    #[prop_or_default]
    pub id: Option<Id>,
}

#[function_component(UserFormPage)]
pub fn user_form_page(props: &UserFormProps) -> Html {
    let app = use_app();
    let users = (*app.services.users).clone();
    let (form, status) = use_edit_form(users.clone(), props.id.clone(), UserForm::blank(), |user: &User, _| {
        UserForm::from_entity(user)
    });

    let editing = props.id.clone();
    let on_submit = form.submit_callback(
        move |payload| {
            let users = users.clone();
            let editing = editing.clone();
            async move {
                match editing {
                    Some(id) => users.update(&id, &payload).await,
                    None => users.create(&payload).await,
                }
            }
        },
        on_saved::<User>(&app, "User saved"),
    );
    let on_cancel = navigate_to(&app, Route::Users);

    match &status {
        LoadStatus::Loading => return html! { <Loading /> },
        LoadStatus::Failed(message) => return html! { <ErrorBanner message={message.clone()} /> },
        LoadStatus::Loaded => {}
    }

    let state = &form.state;
    let editing = props.id.is_some();
    html! {
        <div class="page">
            <PageHeader title={if editing { "Edit user" } else { "New user" }} />
            <form class="entity-form" onsubmit={on_submit}>
                <div class="form-row">
                    <TextField label="Username" bind={form.bind("username")} required=true />
                    <TextField label="Email" kind="email" bind={form.bind("email")} required=true />
                </div>
                <div class="form-row">
                    <TextField label="First name" bind={form.bind("first_name")} required=true />
                    <TextField label="Last name" bind={form.bind("last_name")} required=true />
                </div>
                <div class="form-row">
                    <SelectField label="Role" bind={form.bind("role")} options={choice_options::<Role>()} required=true />
                    <TextField label="Phone number" kind="tel" bind={form.bind("phone_number")} />
                </div>
                <fieldset>
                    <legend>{ if editing { "Change password (optional)" } else { "Password" } }</legend>
                    <div class="form-row">
                        <TextField label="Password" kind="password" bind={form.bind("password")} required={!editing} />
                        <TextField label="Confirm password" kind="password" bind={form.bind("confirm_password")} required={!editing} />
                    </div>
                </fieldset>
                <CheckboxField label="Active" bind={form.bind("is_active")} />
                <FormActions
                    submitting={state.submitting}
                    submit_label="Save user"
                    {on_cancel}
                    message={state.message.clone()}
                />
            </form>
        </div>
    }
}
