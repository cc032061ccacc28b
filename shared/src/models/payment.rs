use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Id;

closed_enum! {
    pub enum PaymentMethod {
        #[serde(alias = "CASH")]
        Cash => ("cash", "Cash"),
        #[serde(alias = "bank-transfer", alias = "BANK_TRANSFER")]
        BankTransfer => ("bank_transfer", "Bank Transfer"),
        #[serde(alias = "mobile-money", alias = "MOBILE_MONEY")]
        MobileMoney => ("mobile_money", "Mobile Money"),
        #[serde(alias = "check", alias = "CHEQUE")]
        Cheque => ("cheque", "Cheque"),
        #[serde(alias = "CARD")]
        Card => ("card", "Card"),
        #[serde(alias = "OTHER")]
        Other => ("other", "Other"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Id,
    pub loan: Id,
    #[serde(default)]
    pub loan_reference: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "crate::de::amount")]
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub received_by: Option<Id>,
    #[serde(default)]
    pub received_by_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for `POST payments/` and `PUT payments/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPayload {
    pub loan: Id,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub receipt_number: Option<String>,
    pub received_by: Option<Id>,
    pub notes: Option<String>,
}
