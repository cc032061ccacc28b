use collections_client::views::LoadStatus;
use collections_client::{Route, RowLinks};
use shared::format::{display_datetime, display_optional_date, format_optional_money};
use shared::forms::{CompleteInteractionForm, FollowUpForm, FormContext, InteractionForm};
use shared::{
    Action, ContactType, Customer, Id, Interaction, ListQuery, Loan, Outcome, Priority, Resource,
    ScheduleFollowUpPayload, User,
};
use yew::prelude::*;

use super::{detail_row, detail_text, navigate_to, on_saved, text_or_dash};
use crate::components::badge::Badge;
use crate::components::fields::{choice_options, FormActions, SelectField, TextAreaField, TextField};
use crate::components::filter_bar::{FilterBar, FilterSpec};
use crate::components::layout::PageHeader;
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::pagination::Pagination;
use crate::components::states::{detail_placeholder, ErrorBanner, Loading};
use crate::components::table::{DataTable, RowActions};
use crate::hooks::{use_app, use_detail, use_edit_form, use_form, use_list, use_options};
use crate::services::toasts::Toast;

fn outcome_badge(outcome: Option<Outcome>) -> Html {
    match outcome {
        Some(outcome) => html! { <Badge class="badge badge-secondary" label={outcome.label()} /> },
        None => html! { <Badge class="badge badge-info" label="Open" /> },
    }
}

pub(crate) fn customer_option(customer: &Customer) -> (Id, String) {
    (customer.id.clone(), customer.full_name())
}

pub(crate) fn staff_option(user: &User) -> (Id, String) {
    (user.id.clone(), format!("{} ({})", user.display_name(), user.role.label()))
}

/// Open interactions have no outcome yet.
fn open_filter() -> FilterSpec {
    FilterSpec::new(
        "outcome__isnull",
        "states",
        vec![
            ("true".to_string(), "Open".to_string()),
            ("false".to_string(), "Completed".to_string()),
        ],
    )
}

#[function_component(InteractionListPage)]
pub fn interaction_list_page() -> Html {
    let app = use_app();
    let list = use_list((*app.services.interactions).clone(), ListQuery::new());
    let caps = app.capabilities(Resource::Interactions);
    let offset = use_memo((), |_| FormContext::current().offset);
    let state = &list.state;
    let actions = &list.actions;

    let filters = vec![
        (
            FilterSpec::new("interaction_type", "types", choice_options::<ContactType>()),
            state.filter("interaction_type").map(str::to_string),
        ),
        (
            FilterSpec::new("outcome", "outcomes", choice_options::<Outcome>()),
            state.filter("outcome").map(str::to_string),
        ),
        (open_filter(), state.filter("outcome__isnull").map(str::to_string)),
    ];

    html! {
        <div class="page">
            <PageHeader
                title="Interactions"
                action={caps.can(Action::Create).then_some((Route::InteractionNew { customer: None }, "Log interaction"))}
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
                headers={vec!["Started", "Customer", "Type", "Outcome", "Agent", ""]}
                status={state.status.clone()}
                is_empty={state.rows().is_empty()}
                empty_message="No interactions match these filters."
            >
                { for state.rows().iter().map(|interaction| {
                    let id = interaction.id.clone();
                    let on_delete = actions.on_delete.clone();
                    let links = RowLinks::interaction(&caps, &id);
                    html! {
                        <tr key={id.to_string()}>
                            <td>{display_datetime(interaction.start_time, *offset)}</td>
                            <td>{text_or_dash(&interaction.customer_name)}</td>
                            <td>{interaction.interaction_type.label()}</td>
                            <td>{outcome_badge(interaction.outcome)}</td>
                            <td>{text_or_dash(&interaction.agent_name)}</td>
                            <RowActions
                                view={links.view}
                                edit={links.edit}
                                on_delete={links.delete.then(|| {
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
                    title="Delete interaction"
                    message="The interaction record will be removed."
                    on_confirm={actions.on_confirm_delete.clone()}
                    on_cancel={actions.on_cancel_delete.clone()}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct InteractionFormProps {
    #[prop_or_default]
    pub id: Option<Id>,
    #[prop_or_default]
    pub customer: Option<Id>,
}

/// Logs the start of a contact, or corrects one already logged. The outcome
/// is recorded from the detail page.
#[function_component(InteractionFormPage)]
pub fn interaction_form_page(props: &InteractionFormProps) -> Html {
    let app = use_app();
    let interactions = (*app.services.interactions).clone();
    let (form, status) = use_edit_form(
        interactions.clone(),
        props.id.clone(),
        InteractionForm::blank(props.customer.as_ref().map(Id::as_str), &FormContext::current()),
        InteractionForm::from_entity,
    );
    let customers = use_options(
        (*app.services.customers).clone(),
        ListQuery::new().filter("is_active", "true"),
        customer_option,
    );
    // Loans follow the selected customer.
    let selected = form.state.values.customer.clone();
    let loans = use_options(
        (*app.services.loans).clone(),
        ListQuery::new().filter("customer", selected.clone()),
        |loan: &Loan| (loan.id.clone(), loan.display_reference()),
    );

    let editing = props.id.clone();
    let on_submit = form.submit_callback(
        move |payload| {
            let interactions = interactions.clone();
            let editing = editing.clone();
            async move {
                match editing {
                    Some(id) => interactions.update(&id, &payload).await,
                    None => interactions.create(&payload).await,
                }
            }
        },
        on_saved::<Interaction>(&app, if props.id.is_some() { "Interaction updated" } else { "Interaction logged" }),
    );
    let back = match (&props.id, &props.customer) {
        (Some(id), _) => Route::InteractionDetail(id.clone()),
        (None, Some(customer)) => Route::CustomerDetail(customer.clone()),
        (None, None) => Route::Interactions,
    };
    let on_cancel = navigate_to(&app, back);

    match &status {
        LoadStatus::Loading => return html! { <Loading /> },
        LoadStatus::Failed(message) => return html! { <ErrorBanner message={message.clone()} /> },
        LoadStatus::Loaded => {}
    }

    let state = &form.state;
    html! {
        <div class="page">
            <PageHeader title={if props.id.is_some() { "Edit interaction" } else { "Log interaction" }} />
            <form class="entity-form" onsubmit={on_submit}>
                <SelectField
                    label="Customer"
                    bind={form.bind("customer")}
                    options={customers}
                    required=true
                    disabled={props.customer.is_some() || props.id.is_some()}
                />
                <SelectField
                    label="Loan"
                    bind={form.bind("loan")}
                    options={loans}
                    placeholder="Not about a specific loan"
                    disabled={selected.is_empty()}
                />
                <div class="form-row">
                    <SelectField
                        label="Type"
                        bind={form.bind("interaction_type")}
                        options={choice_options::<ContactType>()}
                        required=true
                    />
                    <TextField label="Start time" kind="datetime-local" bind={form.bind("start_time")} required=true />
                </div>
                <TextAreaField label="Notes" bind={form.bind("notes")} />
                <FormActions
                    submitting={state.submitting}
                    submit_label={if props.id.is_some() { "Save interaction" } else { "Log interaction" }}
                    {on_cancel}
                    message={state.message.clone()}
                />
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct InteractionDetailProps {
    pub id: Id,
}

#[derive(Clone, Copy, PartialEq)]
enum InteractionDialog {
    Complete,
    ScheduleFollowUp,
}

#[function_component(InteractionDetailPage)]
pub fn interaction_detail_page(props: &InteractionDetailProps) -> Html {
    let app = use_app();
    let detail = use_detail((*app.services.interactions).clone(), props.id.clone());
    let dialog = use_state(|| None::<InteractionDialog>);
    let offset = use_memo((), |_| FormContext::current().offset);

    if let Some(placeholder) = detail_placeholder(&detail.state, "Interaction") {
        return placeholder;
    }
    let Some(interaction) = detail.entity() else {
        return html! {};
    };

    let caps = app.capabilities(Resource::Interaction {
        open: interaction.is_open(),
    });
    let open = |which: InteractionDialog| {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(Some(which)))
    };
    let close = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(None))
    };
    let on_changed = {
        let refresh = detail.refresh_callback::<()>();
        let dialog = dialog.clone();
        Callback::from(move |_: ()| {
            dialog.set(None);
            refresh.emit(());
        })
    };

    let dialog_html = match *dialog {
        Some(InteractionDialog::Complete) => html! {
            <CompleteInteractionDialog interaction={interaction.clone()} on_close={close.clone()} on_done={on_changed.clone()} />
        },
        Some(InteractionDialog::ScheduleFollowUp) => html! {
            <ScheduleFollowUpDialog interaction={interaction.clone()} on_close={close.clone()} on_done={close.clone()} />
        },
        None => html! {},
    };

    let customer_link = html! {
        <a href={Route::CustomerDetail(interaction.customer.clone()).to_path()} onclick={app.go(Route::CustomerDetail(interaction.customer.clone()))}>
            { interaction.customer_name.clone().unwrap_or_else(|| format!("Customer #{}", interaction.customer)) }
        </a>
    };
    let loan_link = match &interaction.loan {
        Some(loan) => html! {
            <a href={Route::LoanDetail(loan.clone()).to_path()} onclick={app.go(Route::LoanDetail(loan.clone()))}>
                { format!("Loan #{loan}") }
            </a>
        },
        None => html! { {"—"} },
    };

    html! {
        <div class="page">
            <PageHeader title={format!("{} with {}", interaction.interaction_type.label(), interaction.customer_name.clone().unwrap_or_else(|| "customer".into()))}>
                if caps.can(Action::Edit) {
                    <a class="btn btn-secondary" href={Route::InteractionEdit(props.id.clone()).to_path()} onclick={app.go(Route::InteractionEdit(props.id.clone()))}>{"Edit"}</a>
                }
                if caps.can(Action::Complete) {
                    <button class="btn btn-primary" onclick={open(InteractionDialog::Complete)}>{"Record outcome"}</button>
                }
                if caps.can(Action::ScheduleFollowUp) {
                    <button class="btn btn-secondary" onclick={open(InteractionDialog::ScheduleFollowUp)}>{"Schedule follow-up"}</button>
                }
            </PageHeader>
            <div class="detail-grid">
                <dl class="detail-card">
                    { detail_row("Outcome", outcome_badge(interaction.outcome)) }
                    { detail_row("Customer", customer_link) }
                    { detail_row("Loan", loan_link) }
                    { detail_text("Agent", text_or_dash(&interaction.agent_name)) }
                </dl>
                <dl class="detail-card">
                    { detail_text("Started", display_datetime(interaction.start_time, *offset)) }
                    { detail_text("Ended", interaction.end_time.map(|t| display_datetime(t, *offset)).unwrap_or_else(|| "—".into())) }
                    { detail_text("Duration", interaction.duration_minutes.map(|m| format!("{m} min")).unwrap_or_else(|| "—".into())) }
                    if interaction.payment_promise_amount.is_some() || interaction.payment_promise_date.is_some() {
                        <>
                        { detail_text("Promised amount", format_optional_money(interaction.payment_promise_amount)) }
                        { detail_text("Promised date", display_optional_date(interaction.payment_promise_date)) }
                        </>
                    }
                </dl>
            </div>
            if let Some(notes) = interaction.notes.as_ref().filter(|n| !n.trim().is_empty()) {
                <div class="detail-notes"><h4>{"Notes"}</h4><p>{notes}</p></div>
            }
            { dialog_html }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct InteractionDialogProps {
    interaction: Interaction,
    on_close: Callback<()>,
    on_done: Callback<()>,
}

#[function_component(CompleteInteractionDialog)]
fn complete_interaction_dialog(props: &InteractionDialogProps) -> Html {
    let app = use_app();
    let form = use_form(CompleteInteractionForm::for_interaction(
        &props.interaction,
        &FormContext::current(),
    ));

    let on_submit = form.submit_callback(
        {
            let interactions = app.services.interactions.clone();
            let id = props.interaction.id.clone();
            move |payload| {
                let interactions = interactions.clone();
                let id = id.clone();
                async move { interactions.complete(&id, &payload).await }
            }
        },
        {
            let app = app.clone();
            let on_done = props.on_done.clone();
            Callback::from(move |_: Interaction| {
                app.notify(Toast::success("Outcome recorded"));
                on_done.emit(());
            })
        },
    );

    let state = &form.state;
    html! {
        <Modal title="Record outcome" on_close={props.on_close.clone()}>
            <form class="modal-form" onsubmit={on_submit}>
                <div class="form-row">
                    <SelectField
                        label="Outcome"
                        bind={form.bind("outcome")}
                        options={choice_options::<Outcome>()}
                        required=true
                    />
                    <TextField label="End time" kind="datetime-local" bind={form.bind("end_time")} required=true />
                </div>
                if state.values.promise_required() {
                    <div class="form-row">
                        <TextField label="Promised amount" kind="number" bind={form.bind("payment_promise_amount")} required=true />
                        <TextField label="Promised date" kind="date" bind={form.bind("payment_promise_date")} required=true />
                    </div>
                }
                <TextAreaField label="Notes" bind={form.bind("notes")} />
                <FormActions
                    submitting={state.submitting}
                    submit_label="Save outcome"
                    on_cancel={props.on_close.clone()}
                    message={state.message.clone()}
                />
            </form>
        </Modal>
    }
}

#[function_component(ScheduleFollowUpDialog)]
fn schedule_follow_up_dialog(props: &InteractionDialogProps) -> Html {
    let app = use_app();
    let me = app.user.as_ref().map(|u| u.id.to_string());
    let form = use_form(FollowUpForm {
        interaction: props.interaction.id.to_string(),
        ..FollowUpForm::blank(Some(props.interaction.customer.as_str()), me.as_deref())
    });
    let staff = use_options(
        (*app.services.users).clone(),
        ListQuery::new().filter("is_active", "true"),
        staff_option,
    );

    let on_submit = form.submit_callback(
        {
            let interactions = app.services.interactions.clone();
            let id = props.interaction.id.clone();
            move |payload| {
                let interactions = interactions.clone();
                let id = id.clone();
                async move {
                    interactions
                        .create_follow_up(&id, &ScheduleFollowUpPayload::from(payload))
                        .await
                }
            }
        },
        {
            let app = app.clone();
            let on_done = props.on_done.clone();
            Callback::from(move |_: ()| {
                app.notify(Toast::success("Follow-up scheduled"));
                on_done.emit(());
            })
        },
    );

    let state = &form.state;
    html! {
        <Modal title="Schedule follow-up" on_close={props.on_close.clone()}>
            <form class="modal-form" onsubmit={on_submit}>
                <div class="form-row">
                    <TextField label="When" kind="datetime-local" bind={form.bind("scheduled_date")} required=true />
                    <SelectField
                        label="Type"
                        bind={form.bind("follow_up_type")}
                        options={choice_options::<ContactType>()}
                        required=true
                    />
                </div>
                <div class="form-row">
                    <SelectField label="Assigned to" bind={form.bind("assigned_to")} options={staff} required=true />
                    <SelectField
                        label="Priority"
                        bind={form.bind("priority")}
                        options={choice_options::<Priority>()}
                        required=true
                    />
                </div>
                <TextAreaField label="Notes" bind={form.bind("notes")} />
                <FormActions
                    submitting={state.submitting}
                    submit_label="Schedule"
                    on_cancel={props.on_close.clone()}
                    message={state.message.clone()}
                />
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_filter_asks_for_missing_outcome() {
        let spec = open_filter();
        assert_eq!(spec.options[0], ("true".to_string(), "Open".to_string()));

        let mut query = ListQuery::new();
        query.set(spec.key, Some(spec.options[0].0.clone()));
        assert_eq!(
            query.to_pairs(),
            vec![("outcome__isnull".to_string(), "true".to_string())]
        );
    }
}
