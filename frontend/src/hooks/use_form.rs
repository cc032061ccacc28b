use collections_client::views::{FormState, LoadStatus};
use collections_client::{ApiError, ApiResult};
use shared::forms::{
    CompleteFollowUpForm, CompleteInteractionForm, CustomerForm, FollowUpForm, FormContext,
    HierarchyForm, InteractionForm, LoanForm, LoginForm, PaymentForm, RescheduleForm,
    RestructureForm, UserForm, WriteOffForm,
};
use shared::{FormSchema, Id};
use std::future::Future;
use std::ops::Deref;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::sources::DetailSource;
use super::use_app::use_app;
use crate::app::AppContext;
use crate::services::logging::Logger;

/// Name-addressed access to a form's inputs.
pub trait FieldSet {
    fn get(&self, field: &str) -> String;
    fn set(&mut self, field: &str, value: String);
}

/// Text fields hold the input string; flags are checkboxes carried as
/// `"true"`/`"false"`.
macro_rules! field_set {
    ($form:ty { $($field:ident),* $(,)? } $(flags { $($flag:ident),* $(,)? })?) => {
        impl FieldSet for $form {
            fn get(&self, field: &str) -> String {
                match field {
                    $(stringify!($field) => self.$field.clone(),)*
                    $($(stringify!($flag) => self.$flag.to_string(),)*)?
                    _ => String::new(),
                }
            }

            fn set(&mut self, field: &str, value: String) {
                match field {
                    $(stringify!($field) => self.$field = value,)*
                    $($(stringify!($flag) => self.$flag = value == "true",)*)?
                    other => Logger::debug_with_component(
                        stringify!($form),
                        &format!("Ignoring unknown field {other}"),
                    ),
                }
            }
        }
    };
}

field_set!(LoginForm { username, password });
field_set!(CustomerForm {
    first_name, middle_name, last_name, date_of_birth, gender, national_id,
    primary_phone, secondary_phone, email, address, city, state, postal_code,
    country, employer, occupation, monthly_income, assigned_officer, notes,
} flags { is_active });
field_set!(LoanForm {
    customer, principal_amount, interest_rate, term_months, payment_frequency,
    application_date, disbursement_date, first_payment_date, purpose, notes,
    assigned_officer,
});
field_set!(RestructureForm {
    new_interest_rate, new_term_months, new_payment_frequency, first_payment_date, reason,
});
field_set!(WriteOffForm { reason });
field_set!(PaymentForm {
    loan, amount, payment_date, payment_method, receipt_number, received_by, notes,
});
field_set!(InteractionForm { customer, loan, interaction_type, start_time, notes });
field_set!(CompleteInteractionForm {
    outcome, end_time, notes, payment_promise_amount, payment_promise_date,
});
field_set!(FollowUpForm {
    customer, interaction, scheduled_date, follow_up_type, assigned_to, priority, notes,
});
field_set!(RescheduleForm { scheduled_date, reason });
field_set!(CompleteFollowUpForm { completion_notes });
field_set!(UserForm {
    username, email, first_name, last_name, role, phone_number, password, confirm_password,
} flags { is_active });
field_set!(HierarchyForm { manager, collection_officer });

#[derive(PartialEq)]
pub struct FormModel<F>(FormState<F>);

impl<F> Deref for FormModel<F> {
    type Target = FormState<F>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub enum FormAction<F: FormSchema> {
    Input { field: String, value: String, ctx: FormContext },
    Blur { field: String, ctx: FormContext },
    /// Replace every value, e.g. once the entity being edited has loaded.
    Load(F),
    Commit(FormState<F>),
    Succeeded,
    Failed(ApiError),
}

impl<F: FormSchema + FieldSet + 'static> Reducible for FormModel<F> {
    type Action = FormAction<F>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        match action {
            FormAction::Input { field, value, ctx } => {
                state.update(&field, &ctx, |values| values.set(&field, value));
            }
            FormAction::Blur { field, ctx } => state.blur(&field, &ctx),
            FormAction::Load(values) => state = FormState::new(values),
            FormAction::Commit(next) => state = next,
            FormAction::Succeeded => state.succeeded(),
            FormAction::Failed(error) => state.failed(&error),
        }
        Rc::new(FormModel(state))
    }
}

/// Everything one input needs.
#[derive(Clone, PartialEq)]
pub struct Binding {
    pub name: &'static str,
    pub value: String,
    pub error: Option<String>,
    pub disabled: bool,
    pub on_input: Callback<String>,
    pub on_blur: Callback<()>,
}

pub struct UseFormResult<F: FormSchema + FieldSet + 'static> {
    pub state: UseReducerHandle<FormModel<F>>,
    pub ctx: FormContext,
    app: AppContext,
}

impl<F: FormSchema + FieldSet + 'static> UseFormResult<F> {
    pub fn bind(&self, name: &'static str) -> Binding {
        let on_input = {
            let dispatcher = self.state.dispatcher();
            let ctx = self.ctx;
            Callback::from(move |value: String| {
                dispatcher.dispatch(FormAction::Input {
                    field: name.to_string(),
                    value,
                    ctx,
                })
            })
        };
        let on_blur = {
            let dispatcher = self.state.dispatcher();
            let ctx = self.ctx;
            Callback::from(move |_| {
                dispatcher.dispatch(FormAction::Blur {
                    field: name.to_string(),
                    ctx,
                })
            })
        };
        Binding {
            name,
            value: self.state.values.get(name),
            error: self.state.error(name).map(str::to_string),
            disabled: self.state.submitting,
            on_input,
            on_blur,
        }
    }

    pub fn load(&self, values: F) {
        self.state.dispatch(FormAction::Load(values));
    }

    /// Validate, then hand the payload to `send`. Nothing is sent while a
    /// rule fails or a previous submission is still running. `done` gets
    /// whatever `send` resolved to.
    pub fn submit<T, Fut>(&self, send: impl FnOnce(F::Payload) -> Fut + 'static, done: Callback<T>)
    where
        T: 'static,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let mut next = (*self.state).0.clone();
        let payload = next.submit(&self.ctx);
        self.state.dispatch(FormAction::Commit(next));
        let Some(payload) = payload else {
            return;
        };

        let dispatcher = self.state.dispatcher();
        let app = self.app.clone();
        spawn_local(async move {
            match send(payload).await {
                Ok(saved) => {
                    dispatcher.dispatch(FormAction::Succeeded);
                    done.emit(saved);
                }
                Err(e) => {
                    app.report("use_form", &e);
                    dispatcher.dispatch(FormAction::Failed(e));
                }
            }
        });
    }

    pub fn submit_callback<T, Fut, S>(&self, send: S, done: Callback<T>) -> Callback<SubmitEvent>
    where
        T: 'static,
        Fut: Future<Output = ApiResult<T>> + 'static,
        S: Fn(F::Payload) -> Fut + Clone + 'static,
    {
        let state = self.state.clone();
        let ctx = self.ctx;
        let app = self.app.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = UseFormResult {
                state: state.clone(),
                ctx,
                app: app.clone(),
            };
            form.submit(send.clone(), done.clone());
        })
    }
}

/// Form state starting from `initial` (only the first render's value
/// counts), validated against the viewer's clock.
#[hook]
pub fn use_form<F>(initial: F) -> UseFormResult<F>
where
    F: FormSchema + FieldSet + 'static,
{
    let app = use_app();
    let state = use_reducer(move || FormModel(FormState::new(initial)));
    let ctx = *use_memo((), |_| FormContext::current());
    UseFormResult { state, ctx, app }
}

/// A create-or-edit form. With an `id` the entity is fetched and its values
/// replace `blank` once loaded.
#[hook]
pub fn use_edit_form<T, S, F>(
    source: S,
    id: Option<Id>,
    blank: F,
    convert: fn(&T, &FormContext) -> F,
) -> (UseFormResult<F>, LoadStatus)
where
    T: 'static,
    S: DetailSource<T>,
    F: FormSchema + FieldSet + 'static,
{
    let editing = id.is_some();
    let form = use_form(blank);
    let status = use_state(move || if editing { LoadStatus::Loading } else { LoadStatus::Loaded });

    use_effect_with(id, {
        let dispatcher = form.state.dispatcher();
        let status = status.clone();
        let ctx = form.ctx;
        move |id: &Option<Id>| {
            if let Some(id) = id.clone() {
                spawn_local(async move {
                    match source.fetch_one(id).await {
                        Ok(entity) => {
                            dispatcher.dispatch(FormAction::Load(convert(&entity, &ctx)));
                            status.set(LoadStatus::Loaded);
                        }
                        Err(e) if e.is_not_found() || e.is_forbidden() => {
                            status.set(LoadStatus::Failed("Record not found.".to_string()))
                        }
                        Err(e) => status.set(LoadStatus::Failed(e.user_message())),
                    }
                });
            }
            || ()
        }
    });

    (form, (*status).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set_reads_and_writes_by_name() {
        let mut form = CustomerForm::blank();
        form.set("first_name", "Ada".into());
        form.set("is_active", "false".into());
        form.set("no_such_field", "x".into());
        assert_eq!(form.get("first_name"), "Ada");
        assert!(!form.is_active);
        assert_eq!(form.get("is_active"), "false");
        assert_eq!(form.get("no_such_field"), "");
    }

    #[test]
    fn test_every_login_field_is_addressable() {
        let mut form = LoginForm::default();
        form.set("username", "agent".into());
        form.set("password", "secret".into());
        assert_eq!(form, LoginForm {
            username: "agent".into(),
            password: "secret".into(),
        });
    }
}
