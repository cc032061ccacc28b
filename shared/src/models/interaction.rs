use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::Id;

closed_enum! {
    /// Channel used to reach the customer. Shared by interactions and
    /// follow-ups.
    pub enum ContactType {
        #[serde(alias = "CALL", alias = "phone_call")]
        Call => ("call", "Call"),
        #[serde(alias = "EMAIL")]
        Email => ("email", "Email"),
        #[serde(alias = "SMS", alias = "text")]
        Sms => ("sms", "SMS"),
        #[serde(alias = "MEETING")]
        Meeting => ("meeting", "Meeting"),
        #[serde(alias = "VISIT", alias = "field_visit")]
        Visit => ("visit", "Visit"),
        #[serde(alias = "OTHER")]
        Other => ("other", "Other"),
    }
}

closed_enum! {
    pub enum Outcome {
        #[serde(alias = "Payment Promised", alias = "promise_to_pay", alias = "PAYMENT_PROMISED")]
        PaymentPromised => ("payment_promised", "Payment Promised"),
        #[serde(alias = "Payment Made", alias = "PAYMENT_MADE")]
        PaymentMade => ("payment_made", "Payment Made"),
        #[serde(alias = "Partial Payment", alias = "PARTIAL_PAYMENT")]
        PartialPayment => ("partial_payment", "Partial Payment"),
        #[serde(alias = "No Answer", alias = "NO_ANSWER")]
        NoAnswer => ("no_answer", "No Answer"),
        #[serde(alias = "Callback Requested", alias = "CALLBACK_REQUESTED")]
        CallbackRequested => ("callback_requested", "Callback Requested"),
        #[serde(alias = "Wrong Number", alias = "WRONG_NUMBER")]
        WrongNumber => ("wrong_number", "Wrong Number"),
        #[serde(alias = "Disputed", alias = "DISPUTED")]
        Disputed => ("disputed", "Disputed"),
        #[serde(alias = "Refused to Pay", alias = "refused", alias = "REFUSED_TO_PAY")]
        RefusedToPay => ("refused_to_pay", "Refused to Pay"),
        #[serde(alias = "Other", alias = "OTHER")]
        Other => ("other", "Other"),
    }
}

impl Outcome {
    /// Outcomes that require a promise amount and date.
    pub fn requires_promise(&self) -> bool {
        matches!(self, Outcome::PaymentPromised)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: Id,
    pub customer: Id,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub loan: Option<Id>,
    pub interaction_type: ContactType,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default, deserialize_with = "crate::de::optional_choice")]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "crate::de::optional_amount")]
    pub payment_promise_amount: Option<f64>,
    #[serde(default)]
    pub payment_promise_date: Option<NaiveDate>,
    #[serde(default)]
    pub agent: Option<Id>,
    #[serde(default)]
    pub agent_name: Option<String>,
}

impl Interaction {
    /// Still waiting for its single completion event.
    pub fn is_open(&self) -> bool {
        self.outcome.is_none()
    }
}

/// Body for `POST interactions/` and `PUT interactions/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionPayload {
    pub customer: Id,
    pub loan: Option<Id>,
    pub interaction_type: ContactType,
    pub start_time: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Body for the completion `PATCH interactions/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteInteractionPayload {
    pub outcome: Outcome,
    pub end_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub payment_promise_amount: Option<f64>,
    pub payment_promise_date: Option<NaiveDate>,
}
