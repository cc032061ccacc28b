use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Id;

closed_enum! {
    /// Loan lifecycle status. Only `approve`, `restructure` and `write_off`
    /// move a loan between states; the client never edits it directly.
    pub enum LoanStatus {
        #[serde(alias = "PENDING")]
        Pending => ("pending", "Pending"),
        #[serde(alias = "ACTIVE")]
        Active => ("active", "Active"),
        #[serde(alias = "PAID", alias = "paid_off")]
        Paid => ("paid", "Paid"),
        #[serde(alias = "DEFAULTED")]
        Defaulted => ("defaulted", "Defaulted"),
        #[serde(alias = "RESTRUCTURED")]
        Restructured => ("restructured", "Restructured"),
        #[serde(alias = "written-off", alias = "WRITTEN_OFF")]
        WrittenOff => ("written_off", "Written Off"),
    }
}

impl LoanStatus {
    /// No further business action is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Paid | LoanStatus::WrittenOff)
    }

    /// CSS modifier for the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "badge badge-warning",
            LoanStatus::Active => "badge badge-success",
            LoanStatus::Paid => "badge badge-info",
            LoanStatus::Defaulted => "badge badge-danger",
            LoanStatus::Restructured => "badge badge-secondary",
            LoanStatus::WrittenOff => "badge badge-dark",
        }
    }
}

closed_enum! {
    pub enum PaymentFrequency {
        #[serde(alias = "WEEKLY")]
        Weekly => ("weekly", "Weekly"),
        #[serde(alias = "bi-weekly", alias = "fortnightly", alias = "BIWEEKLY")]
        Biweekly => ("biweekly", "Bi-weekly"),
        #[serde(alias = "MONTHLY")]
        Monthly => ("monthly", "Monthly"),
        #[serde(alias = "QUARTERLY")]
        Quarterly => ("quarterly", "Quarterly"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: Id,
    #[serde(default, alias = "loan_reference", alias = "reference_number")]
    pub reference: Option<String>,
    pub customer: Id,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "crate::de::amount")]
    pub principal_amount: f64,
    #[serde(deserialize_with = "crate::de::amount")]
    pub interest_rate: f64,
    pub term_months: u32,
    pub payment_frequency: PaymentFrequency,
    pub status: LoanStatus,
    pub application_date: NaiveDate,
    #[serde(default)]
    pub approval_date: Option<NaiveDate>,
    #[serde(default)]
    pub disbursement_date: Option<NaiveDate>,
    #[serde(default)]
    pub first_payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assigned_officer: Option<Id>,
    #[serde(default, deserialize_with = "crate::de::optional_amount")]
    pub total_due: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::optional_amount")]
    pub amount_paid: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::optional_amount")]
    pub remaining_balance: Option<f64>,
    #[serde(default)]
    pub days_past_due: Option<i64>,
}

impl Loan {
    /// Reference number when present, otherwise the id.
    pub fn display_reference(&self) -> String {
        self.reference
            .clone()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    pub fn is_overdue(&self) -> bool {
        self.days_past_due.unwrap_or(0) > 0
    }
}

/// Body for `POST loans/` and `PUT loans/{id}/`. Status and derived amounts
/// are owned by the server and never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPayload {
    pub customer: Id,
    pub principal_amount: f64,
    pub interest_rate: f64,
    pub term_months: u32,
    pub payment_frequency: PaymentFrequency,
    pub application_date: NaiveDate,
    pub disbursement_date: Option<NaiveDate>,
    pub first_payment_date: Option<NaiveDate>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub assigned_officer: Option<Id>,
}

/// Body for `POST loans/{id}/restructure/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestructurePayload {
    pub new_interest_rate: f64,
    pub new_term_months: u32,
    pub new_payment_frequency: PaymentFrequency,
    pub first_payment_date: Option<NaiveDate>,
    pub reason: String,
}

/// Body for `POST loans/{id}/write_off/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteOffPayload {
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan_json(status: &str) -> String {
        format!(
            r#"{{
                "id": 11,
                "customer": "4",
                "principal_amount": "1000.00",
                "interest_rate": 12.5,
                "term_months": 12,
                "payment_frequency": "monthly",
                "status": "{status}",
                "application_date": "2024-01-31",
                "remaining_balance": "400.10",
                "days_past_due": 3
            }}"#
        )
    }

    #[test]
    fn test_loan_from_api() {
        let loan: Loan = serde_json::from_str(&loan_json("active")).unwrap();
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(loan.principal_amount, 1000.0);
        assert_eq!(loan.remaining_balance, Some(400.1));
        assert!(loan.is_overdue());
        assert_eq!(loan.display_reference(), "#11");
    }

    #[test]
    fn test_status_aliases_and_unknowns() {
        let loan: Loan = serde_json::from_str(&loan_json("written-off")).unwrap();
        assert_eq!(loan.status, LoanStatus::WrittenOff);
        assert!(loan.status.is_terminal());
        assert!(serde_json::from_str::<Loan>(&loan_json("frozen")).is_err());
    }
}
