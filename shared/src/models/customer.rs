use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::default_true;
use crate::Id;

closed_enum! {
    pub enum Gender {
        #[serde(alias = "M", alias = "MALE")]
        Male => ("male", "Male"),
        #[serde(alias = "F", alias = "FEMALE")]
        Female => ("female", "Female"),
        #[serde(alias = "O", alias = "OTHER")]
        Other => ("other", "Other"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Id,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::de::optional_choice")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub national_id: Option<String>,
    pub primary_phone: String,
    #[serde(default)]
    pub secondary_phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub employer: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default, deserialize_with = "crate::de::optional_amount")]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub assigned_officer: Option<Id>,
    #[serde(default)]
    pub assigned_officer_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Body for `POST customers/` and `PUT customers/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub national_id: Option<String>,
    pub primary_phone: String,
    pub secondary_phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub employer: Option<String>,
    pub occupation: Option<String>,
    pub monthly_income: Option<f64>,
    pub assigned_officer: Option<Id>,
    pub is_active: bool,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_from_api() {
        let json = r#"{
            "id": "c-1",
            "first_name": "Ada",
            "middle_name": "",
            "last_name": "Obi",
            "date_of_birth": "1990-05-17",
            "gender": "",
            "primary_phone": "+12125551234",
            "address": "1 Main St",
            "city": "Lagos",
            "monthly_income": "2500.00",
            "assigned_officer": 7,
            "is_active": false
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.full_name(), "Ada Obi");
        assert_eq!(customer.monthly_income, Some(2500.0));
        assert_eq!(customer.assigned_officer, Some(Id::from("7")));
        assert_eq!(customer.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 17));
        assert!(!customer.is_active);
        assert_eq!(customer.gender, None);
    }
}
