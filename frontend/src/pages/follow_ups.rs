use collections_client::views::LoadStatus;
use collections_client::{Route, RowLinks};
use shared::format::display_datetime;
use shared::forms::{CompleteFollowUpForm, FollowUpForm, FormContext, RescheduleForm};
use shared::{Action, ContactType, FollowUp, FollowUpStatus, Id, ListQuery, Priority, Resource};
use yew::prelude::*;

use super::interactions::{customer_option, staff_option};
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

fn status_badge(follow_up: &FollowUp, ctx: &FormContext) -> Html {
    if follow_up.is_overdue(ctx.now) {
        return html! { <Badge class="badge badge-danger" label="Overdue" /> };
    }
    html! { <Badge class={follow_up.status.badge_class()} label={follow_up.status.label()} /> }
}

fn priority_badge(priority: Priority) -> Html {
    html! { <Badge class={priority.badge_class()} label={priority.label()} /> }
}

#[function_component(FollowUpListPage)]
pub fn follow_up_list_page() -> Html {
    let app = use_app();
    let list = use_list((*app.services.follow_ups).clone(), ListQuery::new());
    let caps = app.capabilities(Resource::FollowUps);
    let ctx = FormContext::current();
    let state = &list.state;
    let actions = &list.actions;

    let filters = vec![
        (
            FilterSpec::new("status", "statuses", choice_options::<FollowUpStatus>()),
            state.filter("status").map(str::to_string),
        ),
        (
            FilterSpec::new("priority", "priorities", choice_options::<Priority>()),
            state.filter("priority").map(str::to_string),
        ),
    ];

    html! {
        <div class="page">
            <PageHeader
                title="Follow-ups"
                action={caps.can(Action::Create).then_some((Route::FollowUpNew { customer: None }, "Schedule follow-up"))}
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
                headers={vec!["Scheduled", "Customer", "Type", "Assigned to", "Priority", "Status", ""]}
                status={state.status.clone()}
                is_empty={state.rows().is_empty()}
                empty_message="No follow-ups match these filters."
            >
                { for state.rows().iter().map(|follow_up| {
                    let id = follow_up.id.clone();
                    let on_delete = actions.on_delete.clone();
                    let links = RowLinks::follow_up(&app.capabilities(Resource::FollowUp(follow_up.status)), &id);
                    html! {
                        <tr key={id.to_string()} class={classes!(follow_up.is_overdue(ctx.now).then_some("row-overdue"))}>
                            <td>{display_datetime(follow_up.scheduled_date, ctx.offset)}</td>
                            <td>{text_or_dash(&follow_up.customer_name)}</td>
                            <td>{follow_up.follow_up_type.label()}</td>
                            <td>{text_or_dash(&follow_up.assigned_to_name)}</td>
                            <td>{priority_badge(follow_up.priority)}</td>
                            <td>{status_badge(follow_up, &ctx)}</td>
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
                    title="Delete follow-up"
                    message="The follow-up will be removed from everyone's schedule."
                    on_confirm={actions.on_confirm_delete.clone()}
                    on_cancel={actions.on_cancel_delete.clone()}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FollowUpFormProps {
    #[prop_or_default]
    pub id: Option<Id>,
    #[prop_or_default]
    pub customer: Option<Id>,
}

#[function_component(FollowUpFormPage)]
pub fn follow_up_form_page(props: &FollowUpFormProps) -> Html {
    let app = use_app();
    let follow_ups = (*app.services.follow_ups).clone();
    let me = app.user.as_ref().map(|u| u.id.to_string());
    let (form, status) = use_edit_form(
        follow_ups.clone(),
        props.id.clone(),
        FollowUpForm::blank(props.customer.as_ref().map(Id::as_str), me.as_deref()),
        FollowUpForm::from_entity,
    );
    let customers = use_options(
        (*app.services.customers).clone(),
        ListQuery::new().filter("is_active", "true"),
        customer_option,
    );
    let staff = use_options(
        (*app.services.users).clone(),
        ListQuery::new().filter("is_active", "true"),
        staff_option,
    );

    let editing = props.id.clone();
    let on_submit = form.submit_callback(
        move |payload| {
            let follow_ups = follow_ups.clone();
            let editing = editing.clone();
            async move {
                match editing {
                    Some(id) => follow_ups.update(&id, &payload).await,
                    None => follow_ups.create(&payload).await,
                }
            }
        },
        on_saved::<FollowUp>(&app, if props.id.is_some() { "Follow-up updated" } else { "Follow-up scheduled" }),
    );
    let back = match (&props.id, &props.customer) {
        (Some(id), _) => Route::FollowUpDetail(id.clone()),
        (None, Some(customer)) => Route::CustomerDetail(customer.clone()),
        (None, None) => Route::FollowUps,
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
            <PageHeader title={if props.id.is_some() { "Edit follow-up" } else { "Schedule follow-up" }} />
            <form class="entity-form" onsubmit={on_submit}>
                <SelectField
                    label="Customer"
                    bind={form.bind("customer")}
                    options={customers}
                    required=true
                    disabled={props.customer.is_some() || props.id.is_some()}
                />
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
                    submit_label={if props.id.is_some() { "Save follow-up" } else { "Schedule" }}
                    {on_cancel}
                    message={state.message.clone()}
                />
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FollowUpDetailProps {
    pub id: Id,
}

#[derive(Clone, Copy, PartialEq)]
enum FollowUpDialog {
    Complete,
    Reschedule,
}

#[function_component(FollowUpDetailPage)]
pub fn follow_up_detail_page(props: &FollowUpDetailProps) -> Html {
    let app = use_app();
    let detail = use_detail((*app.services.follow_ups).clone(), props.id.clone());
    let dialog = use_state(|| None::<FollowUpDialog>);

    if let Some(placeholder) = detail_placeholder(&detail.state, "Follow-up") {
        return placeholder;
    }
    let Some(follow_up) = detail.entity() else {
        return html! {};
    };

    let ctx = FormContext::current();
    let caps = app.capabilities(Resource::FollowUp(follow_up.status));
    let open = |which: FollowUpDialog| {
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
        Some(FollowUpDialog::Complete) => html! {
            <CompleteFollowUpDialog follow_up={follow_up.clone()} on_close={close.clone()} on_done={on_changed.clone()} />
        },
        Some(FollowUpDialog::Reschedule) => html! {
            <RescheduleDialog follow_up={follow_up.clone()} on_close={close.clone()} on_done={on_changed.clone()} />
        },
        None => html! {},
    };

    let interaction_link = match &follow_up.interaction {
        Some(interaction) => html! {
            <a href={Route::InteractionDetail(interaction.clone()).to_path()} onclick={app.go(Route::InteractionDetail(interaction.clone()))}>
                {"View interaction"}
            </a>
        },
        None => html! { {"—"} },
    };

    html! {
        <div class="page">
            <PageHeader title={format!("Follow-up with {}", follow_up.customer_name.clone().unwrap_or_else(|| "customer".into()))}>
                if caps.can(Action::Edit) {
                    <a class="btn btn-secondary" href={Route::FollowUpEdit(props.id.clone()).to_path()} onclick={app.go(Route::FollowUpEdit(props.id.clone()))}>{"Edit"}</a>
                }
                if caps.can(Action::Complete) {
                    <button class="btn btn-primary" onclick={open(FollowUpDialog::Complete)}>{"Complete"}</button>
                }
                if caps.can(Action::Reschedule) {
                    <button class="btn btn-secondary" onclick={open(FollowUpDialog::Reschedule)}>{"Reschedule"}</button>
                }
            </PageHeader>
            <div class="detail-grid">
                <dl class="detail-card">
                    { detail_row("Status", status_badge(follow_up, &ctx)) }
                    { detail_row("Priority", priority_badge(follow_up.priority)) }
                    { detail_row("Customer", html! {
                        <a href={Route::CustomerDetail(follow_up.customer.clone()).to_path()} onclick={app.go(Route::CustomerDetail(follow_up.customer.clone()))}>
                            { follow_up.customer_name.clone().unwrap_or_else(|| format!("Customer #{}", follow_up.customer)) }
                        </a>
                    }) }
                    { detail_row("From interaction", interaction_link) }
                </dl>
                <dl class="detail-card">
                    { detail_text("Scheduled", display_datetime(follow_up.scheduled_date, ctx.offset)) }
                    { detail_text("Type", follow_up.follow_up_type.label()) }
                    { detail_text("Assigned to", text_or_dash(&follow_up.assigned_to_name)) }
                    { detail_text("Completed", follow_up.completed_at.map(|t| display_datetime(t, ctx.offset)).unwrap_or_else(|| "—".into())) }
                </dl>
            </div>
            if let Some(notes) = follow_up.notes.as_ref().filter(|n| !n.trim().is_empty()) {
                <div class="detail-notes"><h4>{"Notes"}</h4><p>{notes}</p></div>
            }
            if let Some(notes) = follow_up.completion_notes.as_ref().filter(|n| !n.trim().is_empty()) {
                <div class="detail-notes"><h4>{"Completion notes"}</h4><p>{notes}</p></div>
            }
            { dialog_html }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FollowUpDialogProps {
    follow_up: FollowUp,
    on_close: Callback<()>,
    on_done: Callback<()>,
}

#[function_component(CompleteFollowUpDialog)]
fn complete_follow_up_dialog(props: &FollowUpDialogProps) -> Html {
    let app = use_app();
    let form = use_form(CompleteFollowUpForm::default());

    let on_submit = form.submit_callback(
        {
            let follow_ups = app.services.follow_ups.clone();
            let id = props.follow_up.id.clone();
            move |payload| {
                let follow_ups = follow_ups.clone();
                let id = id.clone();
                async move { follow_ups.complete(&id, &payload).await }
            }
        },
        {
            let app = app.clone();
            let on_done = props.on_done.clone();
            Callback::from(move |_: ()| {
                app.notify(Toast::success("Follow-up completed"));
                on_done.emit(());
            })
        },
    );

    let state = &form.state;
    html! {
        <Modal title="Complete follow-up" on_close={props.on_close.clone()}>
            <form class="modal-form" onsubmit={on_submit}>
                <TextAreaField label="Completion notes" bind={form.bind("completion_notes")} />
                <FormActions
                    submitting={state.submitting}
                    submit_label="Mark complete"
                    on_cancel={props.on_close.clone()}
                    message={state.message.clone()}
                />
            </form>
        </Modal>
    }
}

#[function_component(RescheduleDialog)]
fn reschedule_dialog(props: &FollowUpDialogProps) -> Html {
    let app = use_app();
    let form = use_form(RescheduleForm::default());

    let on_submit = form.submit_callback(
        {
            let follow_ups = app.services.follow_ups.clone();
            let id = props.follow_up.id.clone();
            move |payload| {
                let follow_ups = follow_ups.clone();
                let id = id.clone();
                async move { follow_ups.reschedule(&id, &payload).await }
            }
        },
        {
            let app = app.clone();
            let on_done = props.on_done.clone();
            Callback::from(move |_: ()| {
                app.notify(Toast::success("Follow-up rescheduled"));
                on_done.emit(());
            })
        },
    );

    let state = &form.state;
    html! {
        <Modal title="Reschedule follow-up" on_close={props.on_close.clone()}>
            <form class="modal-form" onsubmit={on_submit}>
                <TextField label="New date" kind="datetime-local" bind={form.bind("scheduled_date")} required=true />
                <TextAreaField label="Reason" bind={form.bind("reason")} />
                <FormActions
                    submitting={state.submitting}
                    submit_label="Reschedule"
                    on_cancel={props.on_close.clone()}
                    message={state.message.clone()}
                />
            </form>
        </Modal>
    }
}
