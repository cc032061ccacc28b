use validator::Validate;

use super::rules::{known_payment_method, positive_number, required, valid_date};
use super::{
    choice, date, number, optional_id, optional_text, required_id, FieldErrors, FormContext,
    FormSchema,
};
use crate::{format, Payment, PaymentPayload};

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct PaymentForm {
    #[validate(custom(function = "required", message = "Select a loan"))]
    pub loan: String,
    #[validate(
        custom(function = "required", message = "Amount is required"),
        custom = "positive_number"
    )]
    pub amount: String,
    #[validate(
        custom(function = "required", message = "Payment date is required"),
        custom = "valid_date"
    )]
    pub payment_date: String,
    #[validate(
        custom(function = "required", message = "Payment method is required"),
        custom = "known_payment_method"
    )]
    pub payment_method: String,
    pub receipt_number: String,
    pub received_by: String,
    pub notes: String,
}

impl PaymentForm {
    /// New payment dated today, optionally against a known loan and
    /// received by the signed-in user.
    pub fn blank(loan: Option<&str>, received_by: Option<&str>, ctx: &FormContext) -> Self {
        Self {
            loan: loan.unwrap_or_default().to_string(),
            payment_date: format::format_date(ctx.today()),
            payment_method: "cash".to_string(),
            received_by: received_by.unwrap_or_default().to_string(),
            ..Default::default()
        }
    }

    pub fn from_entity(payment: &Payment) -> Self {
        Self {
            loan: payment.loan.to_string(),
            amount: format::format_number_input(payment.amount),
            payment_date: format::format_date(payment.payment_date),
            payment_method: payment.payment_method.as_str().to_string(),
            receipt_number: payment.receipt_number.clone().unwrap_or_default(),
            received_by: payment
                .received_by
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            notes: payment.notes.clone().unwrap_or_default(),
        }
    }
}

impl FormSchema for PaymentForm {
    type Payload = PaymentPayload;

    fn refine(&self, ctx: &FormContext, errors: &mut FieldErrors) {
        if let Some(paid_on) = format::parse_date(&self.payment_date) {
            if paid_on > ctx.today() {
                errors.insert("payment_date", "Payment date cannot be in the future");
            }
        }
    }

    fn to_payload(&self, _ctx: &FormContext) -> Result<PaymentPayload, FieldErrors> {
        Ok(PaymentPayload {
            loan: required_id("loan", &self.loan)?,
            amount: number("amount", &self.amount)?,
            payment_date: date("payment_date", &self.payment_date)?,
            payment_method: choice("payment_method", &self.payment_method)?,
            receipt_number: optional_text(&self.receipt_number),
            received_by: optional_id(&self.received_by),
            notes: optional_text(&self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::test_support::ctx;
    use crate::PaymentMethod;
    use chrono::NaiveDate;

    fn valid_form() -> PaymentForm {
        PaymentForm {
            amount: "250".into(),
            ..PaymentForm::blank(Some("9"), Some("2"), &ctx())
        }
    }

    #[test]
    fn test_valid_payment() {
        let payload = valid_form().check(&ctx()).unwrap();
        assert_eq!(payload.loan.as_str(), "9");
        assert_eq!(payload.amount, 250.0);
        assert_eq!(payload.payment_date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(payload.payment_method, PaymentMethod::Cash);
        assert_eq!(payload.received_by.map(|id| id.to_string()), Some("2".to_string()));
    }

    #[test]
    fn test_amount_must_be_positive() {
        for amount in ["0", "-10", "ten"] {
            let form = PaymentForm {
                amount: amount.into(),
                ..valid_form()
            };
            assert!(form.check(&ctx()).unwrap_err().contains("amount"), "{amount}");
        }
    }

    #[test]
    fn test_future_date_rejected() {
        let form = PaymentForm {
            payment_date: "2024-06-16".into(),
            ..valid_form()
        };
        assert_eq!(
            form.check(&ctx()).unwrap_err().get("payment_date"),
            Some("Payment date cannot be in the future")
        );

        let today = PaymentForm {
            payment_date: "2024-06-15".into(),
            ..valid_form()
        };
        assert!(today.check(&ctx()).is_ok());
    }

    #[test]
    fn test_missing_loan() {
        let form = PaymentForm {
            loan: String::new(),
            ..valid_form()
        };
        assert!(form.check(&ctx()).unwrap_err().contains("loan"));
    }
}
