use shared::forms::FormContext;
use shared::{FieldErrors, FormSchema};
use std::collections::BTreeSet;

use crate::error::ApiError;

/// Values and messages of one form on a page.
///
/// Values are never reset by a failed submission; the user fixes what the
/// server rejected and submits again.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F> {
    pub values: F,
    pub errors: FieldErrors,
    pub submitting: bool,
    /// Server message for the whole form.
    pub message: Option<String>,
    touched: BTreeSet<String>,
}

impl<F: FormSchema> FormState<F> {
    pub fn new(values: F) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            submitting: false,
            message: None,
            touched: BTreeSet::new(),
        }
    }

    /// Edit values. A field that already shows an error is re-checked so the
    /// message clears as soon as the input becomes valid.
    pub fn update(&mut self, field: &str, ctx: &FormContext, edit: impl FnOnce(&mut F)) {
        edit(&mut self.values);
        if self.touched.contains(field) || self.errors.contains(field) {
            self.recheck(field, ctx);
        }
    }

    /// Validate one field when it loses focus.
    pub fn blur(&mut self, field: &str, ctx: &FormContext) {
        self.touched.insert(field.to_string());
        self.recheck(field, ctx);
    }

    fn recheck(&mut self, field: &str, ctx: &FormContext) {
        self.errors.remove(field);
        if let Some(message) = self.values.check_field(field, ctx) {
            self.errors.insert(field, message);
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Run every rule. Returns the payload to send, or `None` when a rule
    /// fails or a submission is already in flight; nothing should reach the
    /// network in that case.
    pub fn submit(&mut self, ctx: &FormContext) -> Option<F::Payload> {
        if self.submitting {
            return None;
        }
        self.message = None;
        match self.values.check(ctx) {
            Ok(payload) => {
                self.errors = FieldErrors::new();
                self.submitting = true;
                Some(payload)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn succeeded(&mut self) {
        self.submitting = false;
        self.message = None;
    }

    /// Show what the server said, next to the fields it named.
    pub fn failed(&mut self, error: &ApiError) {
        self.submitting = false;
        if let Some(fields) = error.field_errors() {
            let mut merged = fields.clone();
            merged.merge(std::mem::take(&mut self.errors));
            self.errors = merged;
        }
        self.message = Some(error.user_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};
    use shared::forms::WriteOffForm;

    fn ctx() -> FormContext {
        FormContext::new(
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    #[test]
    fn test_blur_then_fix_clears_message() {
        let mut form = FormState::new(WriteOffForm::default());
        form.blur("reason", &ctx());
        assert!(form.error("reason").is_some());

        form.update("reason", &ctx(), |v| v.reason = "Borrower deceased, estate closed".into());
        assert_eq!(form.error("reason"), None);
    }

    #[test]
    fn test_invalid_submit_yields_nothing() {
        let mut form = FormState::new(WriteOffForm::default());
        assert!(form.submit(&ctx()).is_none());
        assert!(!form.submitting);
        assert!(form.error("reason").is_some());
    }

    #[test]
    fn test_double_submit_blocked() {
        let mut form = FormState::new(WriteOffForm {
            reason: "Uncollectable after two years".into(),
        });
        assert!(form.submit(&ctx()).is_some());
        assert!(form.submit(&ctx()).is_none());
        form.succeeded();
        assert!(form.submit(&ctx()).is_some());
    }

    #[test]
    fn test_server_errors_keep_values() {
        let mut form = FormState::new(WriteOffForm {
            reason: "Uncollectable after two years".into(),
        });
        form.submit(&ctx());
        form.failed(&ApiError::from_response(400, r#"{"reason": ["Loan already written off."]}"#));
        assert!(!form.submitting);
        assert_eq!(form.values.reason, "Uncollectable after two years");
        assert_eq!(form.error("reason"), Some("Loan already written off."));
        assert_eq!(form.message.as_deref(), Some("Reason: Loan already written off."));
    }
}
