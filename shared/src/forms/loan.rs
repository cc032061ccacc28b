use validator::Validate;

use super::rules::{
    explanation, known_frequency, percentage, positive_number, required, term_months, valid_date,
};
use super::{
    choice, date, number, optional_date, optional_id, optional_text, required_id, text,
    whole_number, FieldErrors, FormContext, FormSchema,
};
use crate::{format, Loan, LoanPayload, RestructurePayload, WriteOffPayload};

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct LoanForm {
    #[validate(custom(function = "required", message = "Select a customer"))]
    pub customer: String,
    #[validate(
        custom(function = "required", message = "Principal amount is required"),
        custom = "positive_number"
    )]
    pub principal_amount: String,
    #[validate(
        custom(function = "required", message = "Interest rate is required"),
        custom = "percentage"
    )]
    pub interest_rate: String,
    #[validate(
        custom(function = "required", message = "Term is required"),
        custom = "term_months"
    )]
    pub term_months: String,
    #[validate(
        custom(function = "required", message = "Payment frequency is required"),
        custom = "known_frequency"
    )]
    pub payment_frequency: String,
    #[validate(
        custom(function = "required", message = "Application date is required"),
        custom = "valid_date"
    )]
    pub application_date: String,
    #[validate(custom = "valid_date")]
    pub disbursement_date: String,
    #[validate(custom = "valid_date")]
    pub first_payment_date: String,
    pub purpose: String,
    pub notes: String,
    pub assigned_officer: String,
}

impl LoanForm {
    pub fn blank(ctx: &FormContext) -> Self {
        Self {
            payment_frequency: "monthly".to_string(),
            application_date: format::format_date(ctx.today()),
            ..Default::default()
        }
    }

    /// New loan for a known customer.
    pub fn for_customer(customer: &str, ctx: &FormContext) -> Self {
        Self {
            customer: customer.to_string(),
            ..Self::blank(ctx)
        }
    }

    pub fn from_entity(loan: &Loan) -> Self {
        Self {
            customer: loan.customer.to_string(),
            principal_amount: format::format_number_input(loan.principal_amount),
            interest_rate: format::format_number_input(loan.interest_rate),
            term_months: loan.term_months.to_string(),
            payment_frequency: loan.payment_frequency.as_str().to_string(),
            application_date: format::format_date(loan.application_date),
            disbursement_date: format::format_optional_date(loan.disbursement_date),
            first_payment_date: format::format_optional_date(loan.first_payment_date),
            purpose: loan.purpose.clone().unwrap_or_default(),
            notes: loan.notes.clone().unwrap_or_default(),
            assigned_officer: loan
                .assigned_officer
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

impl FormSchema for LoanForm {
    type Payload = LoanPayload;

    fn refine(&self, _ctx: &FormContext, errors: &mut FieldErrors) {
        let application = format::parse_date(&self.application_date);
        let disbursement = format::parse_date(&self.disbursement_date);
        let first_payment = format::parse_date(&self.first_payment_date);

        if let (Some(application), Some(disbursement)) = (application, disbursement) {
            if disbursement < application {
                errors.insert("disbursement_date", "Disbursement cannot precede the application");
            }
        }
        if let (Some(start), Some(first_payment)) = (disbursement.or(application), first_payment) {
            if first_payment <= start {
                errors.insert(
                    "first_payment_date",
                    "First payment must fall after disbursement",
                );
            }
        }
    }

    fn to_payload(&self, _ctx: &FormContext) -> Result<LoanPayload, FieldErrors> {
        Ok(LoanPayload {
            customer: required_id("customer", &self.customer)?,
            principal_amount: number("principal_amount", &self.principal_amount)?,
            interest_rate: number("interest_rate", &self.interest_rate)?,
            term_months: whole_number("term_months", &self.term_months)?,
            payment_frequency: choice("payment_frequency", &self.payment_frequency)?,
            application_date: date("application_date", &self.application_date)?,
            disbursement_date: optional_date("disbursement_date", &self.disbursement_date)?,
            first_payment_date: optional_date("first_payment_date", &self.first_payment_date)?,
            purpose: optional_text(&self.purpose),
            notes: optional_text(&self.notes),
            assigned_officer: optional_id(&self.assigned_officer),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RestructureForm {
    #[validate(
        custom(function = "required", message = "New interest rate is required"),
        custom = "percentage"
    )]
    pub new_interest_rate: String,
    #[validate(
        custom(function = "required", message = "New term is required"),
        custom = "term_months"
    )]
    pub new_term_months: String,
    #[validate(
        custom(function = "required", message = "Payment frequency is required"),
        custom = "known_frequency"
    )]
    pub new_payment_frequency: String,
    #[validate(custom = "valid_date")]
    pub first_payment_date: String,
    #[validate(custom(function = "explanation", message = "Explain the restructure (10 characters min)"))]
    pub reason: String,
}

impl RestructureForm {
    /// Start from the loan's current terms.
    pub fn from_entity(loan: &Loan) -> Self {
        Self {
            new_interest_rate: format::format_number_input(loan.interest_rate),
            new_term_months: loan.term_months.to_string(),
            new_payment_frequency: loan.payment_frequency.as_str().to_string(),
            first_payment_date: String::new(),
            reason: String::new(),
        }
    }
}

impl FormSchema for RestructureForm {
    type Payload = RestructurePayload;

    fn refine(&self, ctx: &FormContext, errors: &mut FieldErrors) {
        if let Some(first_payment) = format::parse_date(&self.first_payment_date) {
            if first_payment < ctx.today() {
                errors.insert("first_payment_date", "First payment cannot be in the past");
            }
        }
    }

    fn to_payload(&self, _ctx: &FormContext) -> Result<RestructurePayload, FieldErrors> {
        Ok(RestructurePayload {
            new_interest_rate: number("new_interest_rate", &self.new_interest_rate)?,
            new_term_months: whole_number("new_term_months", &self.new_term_months)?,
            new_payment_frequency: choice("new_payment_frequency", &self.new_payment_frequency)?,
            first_payment_date: optional_date("first_payment_date", &self.first_payment_date)?,
            reason: text(&self.reason),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct WriteOffForm {
    #[validate(custom(function = "explanation", message = "Explain the write-off (10 characters min)"))]
    pub reason: String,
}

impl FormSchema for WriteOffForm {
    type Payload = WriteOffPayload;

    fn to_payload(&self, _ctx: &FormContext) -> Result<WriteOffPayload, FieldErrors> {
        Ok(WriteOffPayload {
            reason: text(&self.reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::test_support::ctx;
    use crate::PaymentFrequency;

    fn valid_form() -> LoanForm {
        LoanForm {
            customer: "4".into(),
            principal_amount: "1500".into(),
            interest_rate: "12.5".into(),
            term_months: "12".into(),
            ..LoanForm::blank(&ctx())
        }
    }

    #[test]
    fn test_blank_defaults() {
        let form = LoanForm::blank(&ctx());
        assert_eq!(form.application_date, "2024-06-15");
        assert_eq!(form.payment_frequency, "monthly");
    }

    #[test]
    fn test_valid_loan() {
        let payload = valid_form().check(&ctx()).unwrap();
        assert_eq!(payload.principal_amount, 1500.0);
        assert_eq!(payload.term_months, 12);
        assert_eq!(payload.payment_frequency, PaymentFrequency::Monthly);
    }

    #[test]
    fn test_numeric_rules() {
        let form = LoanForm {
            principal_amount: "0".into(),
            interest_rate: "140".into(),
            term_months: "twelve".into(),
            ..valid_form()
        };
        let errors = form.check(&ctx()).unwrap_err();
        assert!(errors.contains("principal_amount"));
        assert!(errors.contains("interest_rate"));
        assert!(errors.contains("term_months"));
    }

    #[test]
    fn test_date_ordering() {
        let form = LoanForm {
            application_date: "2024-06-10".into(),
            disbursement_date: "2024-06-01".into(),
            first_payment_date: "2024-05-01".into(),
            ..valid_form()
        };
        let errors = form.check(&ctx()).unwrap_err();
        assert!(errors.contains("disbursement_date"));
        assert!(errors.contains("first_payment_date"));
    }

    #[test]
    fn test_restructure_and_write_off() {
        let errors = RestructureForm {
            new_interest_rate: "10".into(),
            new_term_months: "24".into(),
            new_payment_frequency: "weekly".into(),
            first_payment_date: "2024-01-01".into(),
            reason: "short".into(),
        }
        .check(&ctx())
        .unwrap_err();
        assert!(errors.contains("reason"));
        assert!(errors.contains("first_payment_date"));

        assert!(WriteOffForm { reason: "Customer deceased, estate closed".into() }
            .check(&ctx())
            .is_ok());
        assert!(WriteOffForm::default().check(&ctx()).is_err());
        let padded = WriteOffForm { reason: format!("{}gone{}", " ".repeat(8), " ".repeat(8)) };
        assert_eq!(
            padded.check(&ctx()).unwrap_err().get("reason"),
            Some("Explain the write-off (10 characters min)")
        );
    }
}
