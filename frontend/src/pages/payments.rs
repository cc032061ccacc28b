use collections_client::views::LoadStatus;
use collections_client::{Route, RowLinks};
use shared::format::{display_date, format_money};
use shared::forms::{FormContext, PaymentForm};
use shared::{Action, Id, ListQuery, Loan, LoanStatus, Payment, PaymentMethod, Resource};
use yew::prelude::*;

use super::{navigate_to, on_saved, text_or_dash};
use crate::app::AppContext;
use crate::components::fields::{choice_options, FormActions, SelectField, TextAreaField, TextField};
use crate::components::filter_bar::{FilterBar, FilterSpec};
use crate::components::layout::PageHeader;
use crate::components::modal::ConfirmDialog;
use crate::components::pagination::Pagination;
use crate::components::states::{ErrorBanner, Loading};
use crate::components::table::{DataTable, RowActions};
use crate::hooks::{use_app, use_edit_form, use_list, use_options, UseListResult};

/// Payment rows with pagination and delete confirmation. `show_loan` is
/// off when every row belongs to the same loan.
pub(crate) fn payment_table(app: &AppContext, list: &UseListResult<Payment>, show_loan: bool) -> Html {
    let caps = app.capabilities(Resource::Payments);
    let state = &list.state;
    let actions = &list.actions;
    let headers = if show_loan {
        vec!["Date", "Loan", "Customer", "Amount", "Method", "Receipt", "Received by", ""]
    } else {
        vec!["Date", "Amount", "Method", "Receipt", "Received by", ""]
    };

    html! {
        <>
            if let Some(error) = &state.error {
                <ErrorBanner message={error.clone()} on_dismiss={actions.on_dismiss_error.clone()} />
            }
            <DataTable
                {headers}
                status={state.status.clone()}
                is_empty={state.rows().is_empty()}
                empty_message="No payments recorded."
            >
                { for state.rows().iter().map(|payment| {
                    let id = payment.id.clone();
                    let on_delete = actions.on_delete.clone();
                    let links = RowLinks::payment(&caps, &id);
                    html! {
                        <tr key={id.to_string()}>
                            <td>{display_date(payment.payment_date)}</td>
                            if show_loan {
                                <>
                                <td>
                                    <a href={Route::LoanDetail(payment.loan.clone()).to_path()} onclick={app.go(Route::LoanDetail(payment.loan.clone()))}>
                                        { payment.loan_reference.clone().unwrap_or_else(|| format!("#{}", payment.loan)) }
                                    </a>
                                </td>
                                <td>{text_or_dash(&payment.customer_name)}</td>
                                </>
                            }
                            <td class="amount">{format_money(payment.amount)}</td>
                            <td>{payment.payment_method.label()}</td>
                            <td>{text_or_dash(&payment.receipt_number)}</td>
                            <td>{text_or_dash(&payment.received_by_name)}</td>
                            <RowActions
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
                    title="Delete payment"
                    message="The payment will be removed and the loan balance recalculated."
                    on_confirm={actions.on_confirm_delete.clone()}
                    on_cancel={actions.on_cancel_delete.clone()}
                />
            }
        </>
    }
}

#[function_component(PaymentListPage)]
pub fn payment_list_page() -> Html {
    let app = use_app();
    let list = use_list((*app.services.payments).clone(), ListQuery::new());
    let caps = app.capabilities(Resource::Payments);
    let state = &list.state;
    let actions = &list.actions;

    let filters = vec![(
        FilterSpec::new("payment_method", "methods", choice_options::<PaymentMethod>()),
        state.filter("payment_method").map(str::to_string),
    )];

    html! {
        <div class="page">
            <PageHeader
                title="Payments"
                action={caps.can(Action::Create).then_some((Route::PaymentNew { loan: None }, "Record payment"))}
            />
            <FilterBar
                search={Some(state.filter("search").unwrap_or_default().to_string())}
                {filters}
                on_search={actions.on_search.clone()}
                on_filter={actions.on_filter.clone()}
                on_clear={actions.on_clear_filters.clone()}
            />
            { payment_table(&app, &list, true) }
        </div>
    }
}

fn loan_option(loan: &Loan) -> (Id, String) {
    let label = match &loan.customer_name {
        Some(name) => format!("{} ({})", loan.display_reference(), name),
        None => loan.display_reference(),
    };
    (loan.id.clone(), label)
}

#[derive(Properties, PartialEq)]
pub struct PaymentFormProps {
    #[prop_or_default]
    pub id: Option<Id>,
    /// Loan a new payment is recorded against, when known.
    #[prop_or_default]
    pub loan: Option<Id>,
}

#[function_component(PaymentFormPage)]
pub fn payment_form_page(props: &PaymentFormProps) -> Html {
    let app = use_app();
    let payments = (*app.services.payments).clone();
    let received_by = app.user.as_ref().map(|u| u.id.to_string());
    let (form, status) = use_edit_form(
        payments.clone(),
        props.id.clone(),
        PaymentForm::blank(
            props.loan.as_ref().map(Id::as_str),
            received_by.as_deref(),
            &FormContext::current(),
        ),
        |payment: &Payment, _| PaymentForm::from_entity(payment),
    );
    let loans = use_options(
        (*app.services.loans).clone(),
        ListQuery::new().filter("status", LoanStatus::Active.as_str()),
        loan_option,
    );

    let editing = props.id.clone();
    let on_submit = form.submit_callback(
        move |payload| {
            let payments = payments.clone();
            let editing = editing.clone();
            async move {
                match editing {
                    Some(id) => payments.update(&id, &payload).await,
                    None => payments.create(&payload).await,
                }
            }
        },
        on_saved::<Payment>(&app, if props.id.is_some() { "Payment updated" } else { "Payment recorded" }),
    );
    let back = props.loan.clone().map(Route::LoanDetail).unwrap_or(Route::Payments);
    let on_cancel = navigate_to(&app, back);

    match &status {
        LoadStatus::Loading => return html! { <Loading /> },
        LoadStatus::Failed(message) => return html! { <ErrorBanner message={message.clone()} /> },
        LoadStatus::Loaded => {}
    }

    // The loan of an existing payment is fixed.
    let loan_fixed = props.loan.is_some() || props.id.is_some();
    let state = &form.state;
    html! {
        <div class="page">
            <PageHeader title={if props.id.is_some() { "Edit payment" } else { "Record payment" }} />
            <form class="entity-form" onsubmit={on_submit}>
                if loan_fixed {
                    <TextField label="Loan" bind={form.bind("loan")} disabled=true />
                } else {
                    <SelectField label="Loan" bind={form.bind("loan")} options={loans} required=true />
                }
                <div class="form-row">
                    <TextField label="Amount" kind="number" bind={form.bind("amount")} required=true />
                    <TextField label="Payment date" kind="date" bind={form.bind("payment_date")} required=true />
                    <SelectField
                        label="Method"
                        bind={form.bind("payment_method")}
                        options={choice_options::<PaymentMethod>()}
                        required=true
                    />
                </div>
                <TextField label="Receipt number" bind={form.bind("receipt_number")} />
                <TextAreaField label="Notes" bind={form.bind("notes")} />
                <FormActions
                    submitting={state.submitting}
                    submit_label={if props.id.is_some() { "Save payment" } else { "Record payment" }}
                    {on_cancel}
                    message={state.message.clone()}
                />
            </form>
        </div>
    }
}
