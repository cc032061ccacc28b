use collections_client::views::LoadStatus;
use collections_client::{Route, RowLinks};
use shared::format::{display_date, display_optional_date, format_money, format_optional_money};
use shared::forms::{FormContext, LoanForm, RestructureForm, WriteOffForm};
use shared::{Action, Customer, Id, ListQuery, Loan, LoanStatus, PaymentFrequency, Resource, Role, User};
use yew::prelude::*;

use super::payments::payment_table;
use super::{detail_row, detail_text, navigate_to, on_saved, text_or_dash};
use crate::components::badge::Badge;
use crate::components::fields::{choice_options, FormActions, SelectField, TextAreaField, TextField};
use crate::components::filter_bar::{FilterBar, FilterSpec};
use crate::components::layout::PageHeader;
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::pagination::Pagination;
use crate::components::states::{detail_placeholder, ErrorBanner, Loading};
use crate::components::table::{DataTable, RowActions};
use crate::hooks::{use_app, use_detail, use_edit_form, use_form, use_list, use_options, LoanPayments};
use crate::services::toasts::Toast;

fn status_badge(status: LoanStatus) -> Html {
    html! { <Badge class={status.badge_class()} label={status.label()} /> }
}

#[function_component(LoanListPage)]
pub fn loan_list_page() -> Html {
    let app = use_app();
    let list = use_list((*app.services.loans).clone(), ListQuery::new());
    let caps = app.capabilities(Resource::Loans);
    let state = &list.state;
    let actions = &list.actions;

    let filters = vec![(
        FilterSpec::new("status", "statuses", choice_options::<LoanStatus>()),
        state.filter("status").map(str::to_string),
    )];

    html! {
        <div class="page">
            <PageHeader
                title="Loans"
                action={caps.can(Action::Create).then_some((Route::LoanNew { customer: None }, "New loan"))}
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
                headers={vec!["Reference", "Customer", "Principal", "Balance", "Days past due", "Status", ""]}
                status={state.status.clone()}
                is_empty={state.rows().is_empty()}
                empty_message="No loans match these filters."
            >
                { for state.rows().iter().map(|loan| {
                    let id = loan.id.clone();
                    let on_delete = actions.on_delete.clone();
                    let links = RowLinks::loan(&app.capabilities(Resource::Loan(loan.status)), &id);
                    html! {
                        <tr key={id.to_string()} class={classes!(loan.is_overdue().then_some("row-overdue"))}>
                            <td>{loan.display_reference()}</td>
                            <td>{text_or_dash(&loan.customer_name)}</td>
                            <td>{format_money(loan.principal_amount)}</td>
                            <td>{format_optional_money(loan.remaining_balance)}</td>
                            <td>{loan.days_past_due.unwrap_or(0)}</td>
                            <td>{status_badge(loan.status)}</td>
                            <RowActions
                                view={links.view}
                                edit={links.edit}
                                payments={links.payments}
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
                    title="Delete loan"
                    message="The loan and its payment history will be removed. This cannot be undone."
                    on_confirm={actions.on_confirm_delete.clone()}
                    on_cancel={actions.on_cancel_delete.clone()}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoanFormProps {
    #[prop_or_default]
    pub id: Option<Id>,
    /// Preselected customer for a new loan.
    #[prop_or_default]
    pub customer: Option<Id>,
}

#[function_component(LoanFormPage)]
pub fn loan_form_page(props: &LoanFormProps) -> Html {
    let app = use_app();
    let loans = (*app.services.loans).clone();
    let initial_ctx = FormContext::current();
    let blank = match &props.customer {
        Some(customer) => LoanForm::for_customer(customer.as_str(), &initial_ctx),
        None => LoanForm::blank(&initial_ctx),
    };
    let (form, status) = use_edit_form(loans.clone(), props.id.clone(), blank, |loan: &Loan, _| {
        LoanForm::from_entity(loan)
    });
    let customers = use_options(
        (*app.services.customers).clone(),
        ListQuery::new().filter("is_active", "true"),
        |c: &Customer| (c.id.clone(), c.full_name()),
    );
    let officers = use_options(
        (*app.services.users).clone(),
        ListQuery::new().filter("role", Role::CollectionOfficer.as_str()),
        |u: &User| (u.id.clone(), u.display_name()),
    );

    let editing = props.id.clone();
    let on_submit = form.submit_callback(
        move |payload| {
            let loans = loans.clone();
            let editing = editing.clone();
            async move {
                match editing {
                    Some(id) => loans.update(&id, &payload).await,
                    None => loans.create(&payload).await,
                }
            }
        },
        on_saved::<Loan>(&app, "Loan saved"),
    );
    let back = match (&props.id, &props.customer) {
        (Some(id), _) => Route::LoanDetail(id.clone()),
        (None, Some(customer)) => Route::CustomerDetail(customer.clone()),
        (None, None) => Route::Loans,
    };
    let on_cancel = navigate_to(&app, back);

    match &status {
        LoadStatus::Loading => return html! { <Loading /> },
        LoadStatus::Failed(message) => return html! { <ErrorBanner message={message.clone()} /> },
        LoadStatus::Loaded => {}
    }

    let state = &form.state;
    let title = if props.id.is_some() { "Edit loan" } else { "New loan" };
    html! {
        <div class="page">
            <PageHeader title={title} />
            <form class="entity-form" onsubmit={on_submit}>
                <SelectField
                    label="Customer"
                    bind={form.bind("customer")}
                    options={customers}
                    required=true
                    disabled={props.id.is_some()}
                />
                <div class="form-row">
                    <TextField label="Principal amount" kind="number" bind={form.bind("principal_amount")} required=true />
                    <TextField label="Interest rate (%)" kind="number" bind={form.bind("interest_rate")} required=true />
                    <TextField label="Term (months)" kind="number" bind={form.bind("term_months")} required=true />
                </div>
                <div class="form-row">
                    <SelectField
                        label="Payment frequency"
                        bind={form.bind("payment_frequency")}
                        options={choice_options::<PaymentFrequency>()}
                        required=true
                    />
                    <SelectField label="Assigned officer" bind={form.bind("assigned_officer")} options={officers} placeholder="Unassigned" />
                </div>
                <div class="form-row">
                    <TextField label="Application date" kind="date" bind={form.bind("application_date")} required=true />
                    <TextField label="Disbursement date" kind="date" bind={form.bind("disbursement_date")} />
                    <TextField label="First payment date" kind="date" bind={form.bind("first_payment_date")} />
                </div>
                <TextField label="Purpose" bind={form.bind("purpose")} />
                <TextAreaField label="Notes" bind={form.bind("notes")} />
                <FormActions
                    submitting={state.submitting}
                    submit_label="Save loan"
                    {on_cancel}
                    message={state.message.clone()}
                />
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoanDetailProps {
    pub id: Id,
}

#[derive(Clone, Copy, PartialEq)]
enum LoanDialog {
    Approve,
    Restructure,
    WriteOff,
}

#[function_component(LoanDetailPage)]
pub fn loan_detail_page(props: &LoanDetailProps) -> Html {
    let app = use_app();
    let detail = use_detail((*app.services.loans).clone(), props.id.clone());
    let dialog = use_state(|| None::<LoanDialog>);

    if let Some(placeholder) = detail_placeholder(&detail.state, "Loan") {
        return placeholder;
    }
    let Some(loan) = detail.entity() else {
        return html! {};
    };

    let caps = app.capabilities(Resource::Loan(loan.status));
    let id = loan.id.clone();
    let busy = detail.state.is_submitting();

    let open = |which: LoanDialog| {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(Some(which)))
    };
    let close = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(None))
    };

    let approve = {
        let perform = detail.perform_callback("Loan approved", {
            let loans = app.services.loans.clone();
            let id = id.clone();
            move || {
                let loans = loans.clone();
                let id = id.clone();
                async move { loans.approve(&id).await }
            }
        });
        let dialog = dialog.clone();
        Callback::from(move |_: ()| {
            dialog.set(None);
            perform.emit(());
        })
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
        Some(LoanDialog::Approve) => html! {
            <ConfirmDialog
                title="Approve loan"
                message={format!("Approve loan {} for {}?", loan.display_reference(), format_money(loan.principal_amount))}
                confirm_label="Approve"
                on_confirm={approve}
                on_cancel={close.clone()}
            />
        },
        Some(LoanDialog::Restructure) => html! {
            <RestructureDialog loan={loan.clone()} on_close={close.clone()} on_done={on_changed.clone()} />
        },
        Some(LoanDialog::WriteOff) => html! {
            <WriteOffDialog loan={loan.clone()} on_close={close.clone()} on_done={on_changed.clone()} />
        },
        None => html! {},
    };

    html! {
        <div class="page">
            <PageHeader title={format!("Loan {}", loan.display_reference())}>
                if caps.can(Action::Edit) {
                    <a class="btn btn-secondary" href={Route::LoanEdit(id.clone()).to_path()} onclick={app.go(Route::LoanEdit(id.clone()))}>{"Edit"}</a>
                }
                if caps.can(Action::Approve) {
                    <button class="btn btn-primary" disabled={busy} onclick={open(LoanDialog::Approve)}>{"Approve"}</button>
                }
                if caps.can(Action::Restructure) {
                    <button class="btn btn-secondary" disabled={busy} onclick={open(LoanDialog::Restructure)}>{"Restructure"}</button>
                }
                if caps.can(Action::WriteOff) {
                    <button class="btn btn-danger" disabled={busy} onclick={open(LoanDialog::WriteOff)}>{"Write off"}</button>
                }
                if caps.can(Action::RecordPayment) {
                    <a class="btn btn-primary" href={Route::PaymentNew { loan: Some(id.clone()) }.to_path()} onclick={app.go(Route::PaymentNew { loan: Some(id.clone()) })}>{"Record payment"}</a>
                }
            </PageHeader>
            if let Some(error) = detail.state.error() {
                <ErrorBanner message={error.to_string()} />
            }
            <div class="detail-grid">
                <dl class="detail-card">
                    { detail_row("Status", status_badge(loan.status)) }
                    { detail_row("Customer", html! {
                        <a href={Route::CustomerDetail(loan.customer.clone()).to_path()} onclick={app.go(Route::CustomerDetail(loan.customer.clone()))}>
                            { loan.customer_name.clone().unwrap_or_else(|| format!("Customer #{}", loan.customer)) }
                        </a>
                    }) }
                    { detail_text("Principal", format_money(loan.principal_amount)) }
                    { detail_text("Interest rate", format!("{}%", loan.interest_rate)) }
                    { detail_text("Term", format!("{} months", loan.term_months)) }
                    { detail_text("Payment frequency", loan.payment_frequency.label()) }
                    { detail_text("Purpose", text_or_dash(&loan.purpose)) }
                </dl>
                <dl class="detail-card">
                    { detail_text("Application date", display_date(loan.application_date)) }
                    { detail_text("Approval date", display_optional_date(loan.approval_date)) }
                    { detail_text("Disbursement date", display_optional_date(loan.disbursement_date)) }
                    { detail_text("First payment", display_optional_date(loan.first_payment_date)) }
                    { detail_text("Maturity date", display_optional_date(loan.maturity_date)) }
                    { detail_text("Total due", format_optional_money(loan.total_due)) }
                    { detail_text("Amount paid", format_optional_money(loan.amount_paid)) }
                    { detail_text("Remaining balance", format_optional_money(loan.remaining_balance)) }
                    { detail_text("Days past due", loan.days_past_due.unwrap_or(0)) }
                </dl>
            </div>
            if caps.can(Action::ViewPayments) {
                <section class="detail-section">
                    <div class="section-header">
                        <h3>{"Recent payments"}</h3>
                        <a href={Route::LoanPayments(id.clone()).to_path()} onclick={app.go(Route::LoanPayments(id.clone()))}>{"All payments"}</a>
                    </div>
                    <LoanPaymentsTable loan={id.clone()} />
                </section>
            }
            { dialog_html }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct LoanDialogProps {
    loan: Loan,
    on_close: Callback<()>,
    on_done: Callback<()>,
}

#[function_component(RestructureDialog)]
fn restructure_dialog(props: &LoanDialogProps) -> Html {
    let app = use_app();
    let form = use_form(RestructureForm::from_entity(&props.loan));

    let on_submit = form.submit_callback(
        {
            let loans = app.services.loans.clone();
            let id = props.loan.id.clone();
            move |payload| {
                let loans = loans.clone();
                let id = id.clone();
                async move { loans.restructure(&id, &payload).await }
            }
        },
        {
            let app = app.clone();
            let on_done = props.on_done.clone();
            Callback::from(move |_: ()| {
                app.notify(Toast::success("Loan restructured"));
                on_done.emit(());
            })
        },
    );

    let state = &form.state;
    html! {
        <Modal title="Restructure loan" on_close={props.on_close.clone()}>
            <form class="modal-form" onsubmit={on_submit}>
                <div class="form-row">
                    <TextField label="New interest rate (%)" kind="number" bind={form.bind("new_interest_rate")} required=true />
                    <TextField label="New term (months)" kind="number" bind={form.bind("new_term_months")} required=true />
                </div>
                <SelectField
                    label="New payment frequency"
                    bind={form.bind("new_payment_frequency")}
                    options={choice_options::<PaymentFrequency>()}
                    required=true
                />
                <TextField label="First payment date" kind="date" bind={form.bind("first_payment_date")} />
                <TextAreaField label="Reason" bind={form.bind("reason")} required=true />
                <FormActions
                    submitting={state.submitting}
                    submit_label="Restructure"
                    on_cancel={props.on_close.clone()}
                    message={state.message.clone()}
                />
            </form>
        </Modal>
    }
}

#[function_component(WriteOffDialog)]
fn write_off_dialog(props: &LoanDialogProps) -> Html {
    let app = use_app();
    let form = use_form(WriteOffForm::default());

    let on_submit = form.submit_callback(
        {
            let loans = app.services.loans.clone();
            let id = props.loan.id.clone();
            move |payload| {
                let loans = loans.clone();
                let id = id.clone();
                async move { loans.write_off(&id, &payload).await }
            }
        },
        {
            let app = app.clone();
            let on_done = props.on_done.clone();
            Callback::from(move |_: ()| {
                app.notify(Toast::success("Loan written off"));
                on_done.emit(());
            })
        },
    );

    let state = &form.state;
    html! {
        <Modal title="Write off loan" on_close={props.on_close.clone()}>
            <form class="modal-form" onsubmit={on_submit}>
                <p class="modal-warning">
                    {format!(
                        "Writing off {} closes it with {} outstanding. This cannot be undone.",
                        props.loan.display_reference(),
                        format_optional_money(props.loan.remaining_balance),
                    )}
                </p>
                <TextAreaField label="Reason" bind={form.bind("reason")} required=true />
                <FormActions
                    submitting={state.submitting}
                    submit_label="Write off"
                    on_cancel={props.on_close.clone()}
                    message={state.message.clone()}
                />
            </form>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
struct LoanPaymentsTableProps {
    loan: Id,
}

#[function_component(LoanPaymentsTable)]
fn loan_payments_table(props: &LoanPaymentsTableProps) -> Html {
    let app = use_app();
    let source = LoanPayments {
        loans: app.services.loans.clone(),
        payments: (*app.services.payments).clone(),
        loan: props.loan.clone(),
    };
    let list = use_list(source, ListQuery::new());
    payment_table(&app, &list, false)
}

#[derive(Properties, PartialEq)]
pub struct LoanPaymentsProps {
    pub id: Id,
}

/// Every payment on one loan.
#[function_component(LoanPaymentsPage)]
pub fn loan_payments_page(props: &LoanPaymentsProps) -> Html {
    let app = use_app();
    let detail = use_detail((*app.services.loans).clone(), props.id.clone());

    if let Some(placeholder) = detail_placeholder(&detail.state, "Loan") {
        return placeholder;
    }
    let Some(loan) = detail.entity() else {
        return html! {};
    };
    let caps = app.capabilities(Resource::Loan(loan.status));

    html! {
        <div class="page">
            <PageHeader
                title={format!("Payments for {}", loan.display_reference())}
                action={caps.can(Action::RecordPayment).then(|| (Route::PaymentNew { loan: Some(loan.id.clone()) }, "Record payment"))}
            >
                <a class="btn btn-secondary" href={Route::LoanDetail(loan.id.clone()).to_path()} onclick={app.go(Route::LoanDetail(loan.id.clone()))}>{"Back to loan"}</a>
            </PageHeader>
            <LoanPaymentsTable loan={loan.id.clone()} />
        </div>
    }
}
