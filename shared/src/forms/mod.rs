//! Form schemas.
//!
//! Every editable entity has a form struct holding exactly what the inputs
//! hold (strings for numbers and dates, `bool` for checkboxes). Field rules
//! are declared with `validator`; rules that span several fields live in
//! [`FormSchema::refine`]. A form that passes both is turned into the typed
//! payload the API expects.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::str::FromStr;
use validator::{Validate, ValidationErrors};

use crate::{format, Id};

mod auth;
mod customer;
mod follow_up;
mod hierarchy;
mod interaction;
mod loan;
mod payment;
pub mod rules;
mod user;

pub use auth::LoginForm;
pub use customer::CustomerForm;
pub use follow_up::{CompleteFollowUpForm, FollowUpForm, RescheduleForm};
pub use hierarchy::HierarchyForm;
pub use interaction::{CompleteInteractionForm, InteractionForm};
pub use loan::{LoanForm, RestructureForm, WriteOffForm};
pub use payment::PaymentForm;
pub use user::UserForm;

/// Per-field messages, first message wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn first(&self) -> Option<(&str, &str)> {
        self.iter().next()
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            if let Some(error) = list.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string());
                fields.insert(field, message);
            }
        }
        fields
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors.insert(&field, message);
        }
        errors
    }
}

/// Clock and time zone a form is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormContext {
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl FormContext {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// The viewer's clock.
    pub fn current() -> Self {
        let now = Local::now();
        Self {
            now: now.with_timezone(&Utc),
            offset: *now.offset(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.offset).date_naive()
    }
}

pub trait FormSchema: Validate + Clone + PartialEq {
    type Payload;

    /// Rules spanning several fields, run after the field rules.
    fn refine(&self, _ctx: &FormContext, _errors: &mut FieldErrors) {}

    /// Build the payload from a form that passed every rule.
    fn to_payload(&self, ctx: &FormContext) -> Result<Self::Payload, FieldErrors>;

    /// Run every rule; on success return the payload to submit.
    fn check(&self, ctx: &FormContext) -> Result<Self::Payload, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(&e),
        };
        self.refine(ctx, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        self.to_payload(ctx)
    }

    /// Message for one field, used on blur.
    fn check_field(&self, field: &str, ctx: &FormContext) -> Option<String> {
        self.check(ctx)
            .err()
            .and_then(|errors| errors.get(field).map(str::to_string))
    }
}

// Conversions from input strings. Field rules have already accepted the
// values, so failures here only guard against rules and conversions drifting.

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub(crate) fn text(value: &str) -> String {
    value.trim().to_string()
}

pub(crate) fn optional_id(value: &str) -> Option<Id> {
    optional_text(value).map(Id::from)
}

pub(crate) fn required_id(field: &str, value: &str) -> Result<Id, FieldErrors> {
    optional_id(value).ok_or_else(|| FieldErrors::single(field, "This field is required"))
}

pub(crate) fn number(field: &str, value: &str) -> Result<f64, FieldErrors> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| FieldErrors::single(field, "Enter a valid number"))
}

pub(crate) fn optional_number(field: &str, value: &str) -> Result<Option<f64>, FieldErrors> {
    match optional_text(value) {
        Some(v) => number(field, &v).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn whole_number(field: &str, value: &str) -> Result<u32, FieldErrors> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| FieldErrors::single(field, "Enter a whole number"))
}

pub(crate) fn date(field: &str, value: &str) -> Result<NaiveDate, FieldErrors> {
    format::parse_date(value).ok_or_else(|| FieldErrors::single(field, "Enter a valid date"))
}

pub(crate) fn optional_date(field: &str, value: &str) -> Result<Option<NaiveDate>, FieldErrors> {
    match optional_text(value) {
        Some(v) => date(field, &v).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn datetime(field: &str, value: &str, ctx: &FormContext) -> Result<DateTime<Utc>, FieldErrors> {
    format::parse_datetime_input(value, ctx.offset)
        .ok_or_else(|| FieldErrors::single(field, "Enter a valid date and time"))
}

pub(crate) fn choice<T: FromStr>(field: &str, value: &str) -> Result<T, FieldErrors> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| FieldErrors::single(field, "Select a valid option"))
}

pub(crate) fn optional_choice<T: FromStr>(field: &str, value: &str) -> Result<Option<T>, FieldErrors> {
    match optional_text(value) {
        Some(v) => choice(field, &v).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::FormContext;
    use chrono::{FixedOffset, TimeZone, Utc};

    /// 2024-06-15 12:00 UTC, viewed from UTC.
    pub fn ctx() -> FormContext {
        FormContext::new(
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            FixedOffset::east_opt(0).unwrap(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("amount", "Amount is required");
        errors.insert("amount", "Amount must be positive");
        assert_eq!(errors.get("amount"), Some("Amount is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_merge_keeps_existing() {
        let mut errors = FieldErrors::single("email", "local");
        errors.merge(FieldErrors::from_iter(vec![
            ("email".to_string(), "server".to_string()),
            ("username".to_string(), "taken".to_string()),
        ]));
        assert_eq!(errors.get("email"), Some("local"));
        assert_eq!(errors.get("username"), Some("taken"));
    }

    #[test]
    fn test_today_follows_offset() {
        use chrono::TimeZone;
        let ctx = FormContext::new(
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 30, 0).unwrap(),
            FixedOffset::east_opt(2 * 3600).unwrap(),
        );
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
