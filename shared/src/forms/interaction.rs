use chrono::{DateTime, Utc};
use validator::Validate;

use super::rules::{
    known_contact_type, known_outcome, positive_number, required, valid_date, valid_datetime,
};
use super::{
    choice, datetime, optional_date, optional_id, optional_number, optional_text, required_id,
    FieldErrors, FormContext, FormSchema,
};
use crate::{format, CompleteInteractionPayload, Interaction, InteractionPayload, Outcome};

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct InteractionForm {
    #[validate(custom(function = "required", message = "Select a customer"))]
    pub customer: String,
    pub loan: String,
    #[validate(
        custom(function = "required", message = "Interaction type is required"),
        custom = "known_contact_type"
    )]
    pub interaction_type: String,
    #[validate(
        custom(function = "required", message = "Start time is required"),
        custom = "valid_datetime"
    )]
    pub start_time: String,
    pub notes: String,
}

impl InteractionForm {
    /// New call starting now.
    pub fn blank(customer: Option<&str>, ctx: &FormContext) -> Self {
        Self {
            customer: customer.unwrap_or_default().to_string(),
            interaction_type: "call".to_string(),
            start_time: format::format_datetime_input(ctx.now, ctx.offset),
            ..Default::default()
        }
    }

    pub fn from_entity(interaction: &Interaction, ctx: &FormContext) -> Self {
        Self {
            customer: interaction.customer.to_string(),
            loan: interaction
                .loan
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            interaction_type: interaction.interaction_type.as_str().to_string(),
            start_time: format::format_datetime_input(interaction.start_time, ctx.offset),
            notes: interaction.notes.clone().unwrap_or_default(),
        }
    }
}

impl FormSchema for InteractionForm {
    type Payload = InteractionPayload;

    fn refine(&self, ctx: &FormContext, errors: &mut FieldErrors) {
        if let Some(start) = format::parse_datetime_input(&self.start_time, ctx.offset) {
            if start > ctx.now {
                errors.insert("start_time", "Start time cannot be in the future");
            }
        }
    }

    fn to_payload(&self, ctx: &FormContext) -> Result<InteractionPayload, FieldErrors> {
        Ok(InteractionPayload {
            customer: required_id("customer", &self.customer)?,
            loan: optional_id(&self.loan),
            interaction_type: choice("interaction_type", &self.interaction_type)?,
            start_time: datetime("start_time", &self.start_time, ctx)?,
            notes: optional_text(&self.notes),
        })
    }
}

/// Second phase of an interaction: record how it ended.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CompleteInteractionForm {
    /// Start of the interaction being completed; not an input.
    pub started_at: Option<DateTime<Utc>>,
    #[validate(
        custom(function = "required", message = "Select an outcome"),
        custom = "known_outcome"
    )]
    pub outcome: String,
    #[validate(
        custom(function = "required", message = "End time is required"),
        custom = "valid_datetime"
    )]
    pub end_time: String,
    pub notes: String,
    #[validate(custom = "positive_number")]
    pub payment_promise_amount: String,
    #[validate(custom = "valid_date")]
    pub payment_promise_date: String,
}

impl CompleteInteractionForm {
    pub fn for_interaction(interaction: &Interaction, ctx: &FormContext) -> Self {
        Self {
            started_at: Some(interaction.start_time),
            end_time: format::format_datetime_input(ctx.now, ctx.offset),
            notes: interaction.notes.clone().unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Whether the promise inputs should be shown.
    pub fn promise_required(&self) -> bool {
        self.outcome
            .parse::<Outcome>()
            .map(|o| o.requires_promise())
            .unwrap_or(false)
    }
}

impl FormSchema for CompleteInteractionForm {
    type Payload = CompleteInteractionPayload;

    fn refine(&self, ctx: &FormContext, errors: &mut FieldErrors) {
        if self.promise_required() {
            if self.payment_promise_amount.trim().is_empty() {
                errors.insert("payment_promise_amount", "Promised amount is required");
            }
            match format::parse_date(&self.payment_promise_date) {
                None if self.payment_promise_date.trim().is_empty() => {
                    errors.insert("payment_promise_date", "Promised date is required");
                }
                Some(promised) if promised < ctx.today() => {
                    errors.insert("payment_promise_date", "Promised date cannot be in the past");
                }
                _ => {}
            }
        }

        if let Some(end) = format::parse_datetime_input(&self.end_time, ctx.offset) {
            if end > ctx.now {
                errors.insert("end_time", "End time cannot be in the future");
            } else if self.started_at.is_some_and(|start| end < start) {
                errors.insert("end_time", "End time cannot precede the start time");
            }
        }
    }

    fn to_payload(&self, ctx: &FormContext) -> Result<CompleteInteractionPayload, FieldErrors> {
        let outcome: Outcome = choice("outcome", &self.outcome)?;
        // Promise fields only travel with a promise.
        let (amount, date) = if outcome.requires_promise() {
            (
                optional_number("payment_promise_amount", &self.payment_promise_amount)?,
                optional_date("payment_promise_date", &self.payment_promise_date)?,
            )
        } else {
            (None, None)
        };

        Ok(CompleteInteractionPayload {
            outcome,
            end_time: datetime("end_time", &self.end_time, ctx)?,
            notes: optional_text(&self.notes),
            payment_promise_amount: amount,
            payment_promise_date: date,
        })
    }
}
