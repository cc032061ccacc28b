use collections_client::views::LoadStatus;
use collections_client::{Route, RowLinks};
use shared::format::{display_datetime, display_optional_date, format_optional_money};
use shared::forms::CustomerForm;
use shared::{Action, Customer, Gender, Id, ListQuery, Resource, Role, User};
use yew::prelude::*;

use super::{detail_row, detail_text, navigate_to, on_saved, text_or_dash};
use crate::components::badge::{ActiveBadge, Badge};
use crate::components::fields::{choice_options, CheckboxField, FormActions, SelectField, TextAreaField, TextField};
use crate::components::filter_bar::{FilterBar, FilterSpec};
use crate::components::layout::PageHeader;
use crate::components::modal::ConfirmDialog;
use crate::components::pagination::Pagination;
use crate::components::states::{detail_placeholder, ErrorBanner, Loading};
use crate::components::table::{DataTable, RowActions};
use crate::hooks::{
    use_app, use_detail, use_edit_form, use_list, use_options, CustomerInteractions, CustomerLoans,
};

fn officer_option(user: &User) -> (Id, String) {
    (user.id.clone(), user.display_name())
}

fn officer_query() -> ListQuery {
    ListQuery::new().filter("role", Role::CollectionOfficer.as_str())
}

#[function_component(CustomerListPage)]
pub fn customer_list_page() -> Html {
    let app = use_app();
    let list = use_list((*app.services.customers).clone(), ListQuery::new());
    let officers = use_options((*app.services.users).clone(), officer_query(), officer_option);
    let caps = app.capabilities(Resource::Customers);
    let state = &list.state;
    let actions = &list.actions;

    let filters = vec![
        (
            FilterSpec::new(
                "is_active",
                "statuses",
                vec![("true".into(), "Active".into()), ("false".into(), "Inactive".into())],
            ),
            state.filter("is_active").map(str::to_string),
        ),
        (
            FilterSpec::new("assigned_officer", "officers", officers),
            state.filter("assigned_officer").map(str::to_string),
        ),
    ];

    html! {
        <div class="page">
            <PageHeader
                title="Customers"
                action={caps.can(Action::Create).then_some((Route::CustomerNew, "New customer"))}
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
                headers={vec!["Name", "Phone", "City", "Officer", "Status", ""]}
                status={state.status.clone()}
                is_empty={state.rows().is_empty()}
                empty_message="No customers match these filters."
            >
                { for state.rows().iter().map(|customer| {
                    let id = customer.id.clone();
                    let on_delete = actions.on_delete.clone();
                    html! {
                        <tr key={id.to_string()}>
                            <td>{customer.full_name()}</td>
                            <td>{&customer.primary_phone}</td>
                            <td>{&customer.city}</td>
                            <td>{text_or_dash(&customer.assigned_officer_name)}</td>
                            <td><ActiveBadge active={customer.is_active} /></td>
                            <RowActions
                                view={Some(Route::CustomerDetail(id.clone()))}
                                edit={caps.can(Action::Edit).then(|| Route::CustomerEdit(id.clone()))}
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
                    title="Delete customer"
                    message="This customer and their history will be removed. This cannot be undone."
                    on_confirm={actions.on_confirm_delete.clone()}
                    on_cancel={actions.on_cancel_delete.clone()}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CustomerFormProps {
    #[prop_or_default]
    pub id: Option<Id>,
}

#[function_component(CustomerFormPage)]
pub fn customer_form_page(props: &CustomerFormProps) -> Html {
    let app = use_app();
    let customers = (*app.services.customers).clone();
    let (form, status) = use_edit_form(
        customers.clone(),
        props.id.clone(),
        CustomerForm::blank(),
        |customer: &Customer, _| CustomerForm::from_entity(customer),
    );
    let officers = use_options((*app.services.users).clone(), officer_query(), officer_option);

    let editing = props.id.clone();
    let on_submit = form.submit_callback(
        move |payload| {
            let customers = customers.clone();
            let editing = editing.clone();
            async move {
                match editing {
                    Some(id) => customers.update(&id, &payload).await,
                    None => customers.create(&payload).await,
                }
            }
        },
        on_saved::<Customer>(&app, "Customer saved"),
    );
    let on_cancel = navigate_to(
        &app,
        props.id.clone().map(Route::CustomerDetail).unwrap_or(Route::Customers),
    );

    let title = if props.id.is_some() { "Edit customer" } else { "New customer" };
    match &status {
        LoadStatus::Loading => return html! { <Loading /> },
        LoadStatus::Failed(message) => return html! { <ErrorBanner message={message.clone()} /> },
        LoadStatus::Loaded => {}
    }

    let state = &form.state;
    html! {
        <div class="page">
            <PageHeader title={title} />
            <form class="entity-form" onsubmit={on_submit}>
                <fieldset>
                    <legend>{"Personal details"}</legend>
                    <div class="form-row">
                        <TextField label="First name" bind={form.bind("first_name")} required=true />
                        <TextField label="Middle name" bind={form.bind("middle_name")} />
                        <TextField label="Last name" bind={form.bind("last_name")} required=true />
                    </div>
                    <div class="form-row">
                        <TextField label="Date of birth" kind="date" bind={form.bind("date_of_birth")} />
                        <SelectField label="Gender" bind={form.bind("gender")} options={choice_options::<Gender>()} />
                        <TextField label="National ID" bind={form.bind("national_id")} />
                    </div>
                </fieldset>
                <fieldset>
                    <legend>{"Contact"}</legend>
                    <div class="form-row">
                        <TextField label="Primary phone" kind="tel" bind={form.bind("primary_phone")} required=true placeholder="+15551234567" />
                        <TextField label="Secondary phone" kind="tel" bind={form.bind("secondary_phone")} />
                        <TextField label="Email" kind="email" bind={form.bind("email")} />
                    </div>
                    <TextField label="Address" bind={form.bind("address")} required=true />
                    <div class="form-row">
                        <TextField label="City" bind={form.bind("city")} required=true />
                        <TextField label="State" bind={form.bind("state")} />
                        <TextField label="Postal code" bind={form.bind("postal_code")} />
                        <TextField label="Country" bind={form.bind("country")} />
                    </div>
                </fieldset>
                <fieldset>
                    <legend>{"Employment"}</legend>
                    <div class="form-row">
                        <TextField label="Employer" bind={form.bind("employer")} />
                        <TextField label="Occupation" bind={form.bind("occupation")} />
                        <TextField label="Monthly income" kind="number" bind={form.bind("monthly_income")} />
                    </div>
                </fieldset>
                <fieldset>
                    <legend>{"Account"}</legend>
                    <SelectField label="Assigned officer" bind={form.bind("assigned_officer")} options={officers} placeholder="Unassigned" />
                    <CheckboxField label="Active" bind={form.bind("is_active")} />
                    <TextAreaField label="Notes" bind={form.bind("notes")} />
                </fieldset>
                <FormActions
                    submitting={state.submitting}
                    submit_label="Save customer"
                    {on_cancel}
                    message={state.message.clone()}
                />
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CustomerDetailProps {
    pub id: Id,
}

#[function_component(CustomerDetailPage)]
pub fn customer_detail_page(props: &CustomerDetailProps) -> Html {
    let app = use_app();
    let detail = use_detail((*app.services.customers).clone(), props.id.clone());

    if let Some(placeholder) = detail_placeholder(&detail.state, "Customer") {
        return placeholder;
    }
    let Some(customer) = detail.entity() else {
        return html! {};
    };

    let caps = app.capabilities(Resource::Customers);
    let id = customer.id.clone();
    let can_add_loan = app.can(Resource::Loans, Action::Create);
    let can_log = app.can(Resource::Interactions, Action::Create);

    html! {
        <div class="page">
            <PageHeader title={customer.full_name()}>
                if caps.can(Action::Edit) {
                    <a class="btn btn-secondary" href={Route::CustomerEdit(id.clone()).to_path()} onclick={app.go(Route::CustomerEdit(id.clone()))}>{"Edit"}</a>
                }
                if can_add_loan {
                    <a class="btn btn-secondary" href={Route::LoanNew { customer: Some(id.clone()) }.to_path()} onclick={app.go(Route::LoanNew { customer: Some(id.clone()) })}>{"New loan"}</a>
                }
                if can_log {
                    <a class="btn btn-secondary" href={Route::InteractionNew { customer: Some(id.clone()) }.to_path()} onclick={app.go(Route::InteractionNew { customer: Some(id.clone()) })}>{"Log interaction"}</a>
                }
                if caps.can(Action::ScheduleFollowUp) {
                    <a class="btn btn-secondary" href={Route::FollowUpNew { customer: Some(id.clone()) }.to_path()} onclick={app.go(Route::FollowUpNew { customer: Some(id.clone()) })}>{"Schedule follow-up"}</a>
                }
            </PageHeader>
            <div class="detail-grid">
                <dl class="detail-card">
                    { detail_row("Status", html! { <ActiveBadge active={customer.is_active} /> }) }
                    { detail_text("Date of birth", display_optional_date(customer.date_of_birth)) }
                    { detail_text("Gender", customer.gender.map(|g| g.label()).unwrap_or("—")) }
                    { detail_text("National ID", text_or_dash(&customer.national_id)) }
                    { detail_text("Primary phone", &customer.primary_phone) }
                    { detail_text("Secondary phone", text_or_dash(&customer.secondary_phone)) }
                    { detail_text("Email", text_or_dash(&customer.email)) }
                </dl>
                <dl class="detail-card">
                    { detail_text("Address", &customer.address) }
                    { detail_text("City", &customer.city) }
                    { detail_text("Country", text_or_dash(&customer.country)) }
                    { detail_text("Employer", text_or_dash(&customer.employer)) }
                    { detail_text("Occupation", text_or_dash(&customer.occupation)) }
                    { detail_text("Monthly income", format_optional_money(customer.monthly_income)) }
                    { detail_text("Assigned officer", text_or_dash(&customer.assigned_officer_name)) }
                </dl>
            </div>
            if let Some(notes) = customer.notes.as_ref().filter(|n| !n.trim().is_empty()) {
                <div class="detail-notes"><h4>{"Notes"}</h4><p>{notes}</p></div>
            }
            <CustomerLoanTable customer={id.clone()} />
            <CustomerInteractionTable customer={id} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CustomerSectionProps {
    customer: Id,
}

#[function_component(CustomerLoanTable)]
fn customer_loan_table(props: &CustomerSectionProps) -> Html {
    let app = use_app();
    let source = CustomerLoans {
        customers: app.services.customers.clone(),
        loans: app.services.loans.clone(),
        customer: props.customer.clone(),
    };
    let list = use_list(source, ListQuery::new());
    let state = &list.state;

    html! {
        <section class="detail-section">
            <h3>{"Loans"}</h3>
            <DataTable
                headers={vec!["Reference", "Principal", "Balance", "Status", ""]}
                status={state.status.clone()}
                is_empty={state.rows().is_empty()}
                empty_message="No loans for this customer."
            >
                { for state.rows().iter().map(|loan| {
                    let links = RowLinks::loan(&app.capabilities(Resource::Loan(loan.status)), &loan.id);
                    html! {
                        <tr key={loan.id.to_string()}>
                            <td>{loan.display_reference()}</td>
                            <td>{format_optional_money(Some(loan.principal_amount))}</td>
                            <td>{format_optional_money(loan.remaining_balance)}</td>
                            <td><Badge class={loan.status.badge_class()} label={loan.status.label()} /></td>
                            <RowActions view={links.view} payments={links.payments} />
                        </tr>
                    }
                }) }
            </DataTable>
            <Pagination
                page={state.current_page()}
                total_pages={state.total_pages()}
                count={state.page.count}
                on_page={list.actions.on_page.clone()}
            />
        </section>
    }
}

#[function_component(CustomerInteractionTable)]
fn customer_interaction_table(props: &CustomerSectionProps) -> Html {
    let app = use_app();
    let source = CustomerInteractions {
        customers: app.services.customers.clone(),
        interactions: (*app.services.interactions).clone(),
        customer: props.customer.clone(),
    };
    let list = use_list(source, ListQuery::new());
    let state = &list.state;
    let offset = shared::forms::FormContext::current().offset;

    html! {
        <section class="detail-section">
            <h3>{"Interactions"}</h3>
            <DataTable
                headers={vec!["Started", "Type", "Outcome", "Agent", ""]}
                status={state.status.clone()}
                is_empty={state.rows().is_empty()}
                empty_message="No interactions logged yet."
            >
                { for state.rows().iter().map(|interaction| html! {
                    <tr key={interaction.id.to_string()}>
                        <td>{display_datetime(interaction.start_time, offset)}</td>
                        <td>{interaction.interaction_type.label()}</td>
                        <td>{interaction.outcome.map(|o| o.label()).unwrap_or("Open")}</td>
                        <td>{text_or_dash(&interaction.agent_name)}</td>
                        <RowActions view={Some(Route::InteractionDetail(interaction.id.clone()))} />
                    </tr>
                }) }
            </DataTable>
            <Pagination
                page={state.current_page()}
                total_pages={state.total_pages()}
                count={state.page.count}
                on_page={list.actions.on_page.clone()}
            />
        </section>
    }
}
