use validator::Validate;

use super::rules::{
    known_gender, non_negative_number, optional_email, optional_phone, required, valid_date,
    PHONE_RE,
};
use super::{
    optional_choice, optional_date, optional_id, optional_number, optional_text, text,
    FieldErrors, FormContext, FormSchema,
};
use crate::{format, Customer, CustomerPayload};

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CustomerForm {
    #[validate(custom(function = "required", message = "First name is required"))]
    pub first_name: String,
    pub middle_name: String,
    #[validate(custom(function = "required", message = "Last name is required"))]
    pub last_name: String,
    #[validate(custom = "valid_date")]
    pub date_of_birth: String,
    #[validate(custom = "known_gender")]
    pub gender: String,
    pub national_id: String,
    #[validate(
        custom(function = "required", message = "Primary phone is required"),
        regex(path = "PHONE_RE", message = "Enter a valid phone number (9-15 digits, optional leading +)")
    )]
    pub primary_phone: String,
    #[validate(custom = "optional_phone")]
    pub secondary_phone: String,
    #[validate(custom = "optional_email")]
    pub email: String,
    #[validate(custom(function = "required", message = "Address is required"))]
    pub address: String,
    #[validate(custom(function = "required", message = "City is required"))]
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub employer: String,
    pub occupation: String,
    #[validate(custom = "non_negative_number")]
    pub monthly_income: String,
    pub assigned_officer: String,
    pub is_active: bool,
    pub notes: String,
}

impl CustomerForm {
    /// Empty form for a new customer; customers start active.
    pub fn blank() -> Self {
        Self {
            is_active: true,
            ..Default::default()
        }
    }

    pub fn from_entity(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            middle_name: customer.middle_name.clone().unwrap_or_default(),
            last_name: customer.last_name.clone(),
            date_of_birth: format::format_optional_date(customer.date_of_birth),
            gender: customer.gender.map(|g| g.as_str().to_string()).unwrap_or_default(),
            national_id: customer.national_id.clone().unwrap_or_default(),
            primary_phone: customer.primary_phone.clone(),
            secondary_phone: customer.secondary_phone.clone().unwrap_or_default(),
            email: customer.email.clone().unwrap_or_default(),
            address: customer.address.clone(),
            city: customer.city.clone(),
            state: customer.state.clone().unwrap_or_default(),
            postal_code: customer.postal_code.clone().unwrap_or_default(),
            country: customer.country.clone().unwrap_or_default(),
            employer: customer.employer.clone().unwrap_or_default(),
            occupation: customer.occupation.clone().unwrap_or_default(),
            monthly_income: customer
                .monthly_income
                .map(format::format_number_input)
                .unwrap_or_default(),
            assigned_officer: customer
                .assigned_officer
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            is_active: customer.is_active,
            notes: customer.notes.clone().unwrap_or_default(),
        }
    }
}

impl FormSchema for CustomerForm {
    type Payload = CustomerPayload;

    fn refine(&self, ctx: &FormContext, errors: &mut FieldErrors) {
        if let Some(dob) = format::parse_date(&self.date_of_birth) {
            if dob > ctx.today() {
                errors.insert("date_of_birth", "Date of birth cannot be in the future");
            }
        }
    }

    fn to_payload(&self, _ctx: &FormContext) -> Result<CustomerPayload, FieldErrors> {
        Ok(CustomerPayload {
            first_name: text(&self.first_name),
            middle_name: optional_text(&self.middle_name),
            last_name: text(&self.last_name),
            date_of_birth: optional_date("date_of_birth", &self.date_of_birth)?,
            gender: optional_choice("gender", &self.gender)?,
            national_id: optional_text(&self.national_id),
            primary_phone: text(&self.primary_phone),
            secondary_phone: optional_text(&self.secondary_phone),
            email: optional_text(&self.email),
            address: text(&self.address),
            city: text(&self.city),
            state: optional_text(&self.state),
            postal_code: optional_text(&self.postal_code),
            country: optional_text(&self.country),
            employer: optional_text(&self.employer),
            occupation: optional_text(&self.occupation),
            monthly_income: optional_number("monthly_income", &self.monthly_income)?,
            assigned_officer: optional_id(&self.assigned_officer),
            is_active: self.is_active,
            notes: optional_text(&self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::test_support::ctx;

    fn valid_form() -> CustomerForm {
        CustomerForm {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            primary_phone: "+12125551234".into(),
            address: "1 Navy Way".into(),
            city: "Arlington".into(),
            ..CustomerForm::blank()
        }
    }

    #[test]
    fn test_valid_customer_passes() {
        let payload = valid_form().check(&ctx()).unwrap();
        assert_eq!(payload.primary_phone, "+12125551234");
        assert!(payload.is_active);
        assert_eq!(payload.email, None);
        assert_eq!(payload.assigned_officer, None);
    }

    #[test]
    fn test_short_phone_rejected() {
        let form = CustomerForm {
            primary_phone: "12345".into(),
            ..valid_form()
        };
        let errors = form.check(&ctx()).unwrap_err();
        assert!(errors.get("primary_phone").unwrap().contains("valid phone"));
    }

    #[test]
    fn test_each_required_field() {
        for blank in ["", "   "] {
            for field in ["first_name", "last_name", "primary_phone", "address", "city"] {
                let mut form = valid_form();
                let value = match field {
                    "first_name" => &mut form.first_name,
                    "last_name" => &mut form.last_name,
                    "primary_phone" => &mut form.primary_phone,
                    "address" => &mut form.address,
                    _ => &mut form.city,
                };
                *value = blank.to_string();
                let errors = form.check(&ctx()).unwrap_err();
                assert!(errors.contains(field), "{field} should be required, got {blank:?} through");
            }
        }
    }

    #[test]
    fn test_whitespace_only_names_never_reach_the_payload() {
        let form = CustomerForm {
            first_name: "   ".into(),
            last_name: "  ".into(),
            address: " ".into(),
            city: " ".into(),
            ..valid_form()
        };
        let errors = form.check(&ctx()).unwrap_err();
        assert_eq!(errors.get("first_name"), Some("First name is required"));
        assert_eq!(errors.get("city"), Some("City is required"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_optional_formats() {
        let form = CustomerForm {
            email: "nope".into(),
            secondary_phone: "123".into(),
            monthly_income: "-5".into(),
            date_of_birth: "2030-01-01".into(),
            ..valid_form()
        };
        let errors = form.check(&ctx()).unwrap_err();
        assert!(errors.contains("email"));
        assert!(errors.contains("secondary_phone"));
        assert!(errors.contains("monthly_income"));
        assert!(errors.contains("date_of_birth"));
    }

    #[test]
    fn test_blur_reports_single_field() {
        let form = CustomerForm {
            email: "nope".into(),
            ..valid_form()
        };
        assert_eq!(
            form.check_field("email", &ctx()).as_deref(),
            Some("Enter a valid email address")
        );
        assert_eq!(form.check_field("first_name", &ctx()), None);
    }

    #[test]
    fn test_entity_round_trip() {
        let payload = CustomerForm {
            date_of_birth: "1984-01-31".into(),
            monthly_income: "2500.5".into(),
            assigned_officer: "7".into(),
            ..valid_form()
        }
        .check(&ctx())
        .unwrap();

        let json = serde_json::json!({
            "id": 1,
            "first_name": payload.first_name,
            "last_name": payload.last_name,
            "date_of_birth": "1984-01-31",
            "primary_phone": payload.primary_phone,
            "address": payload.address,
            "city": payload.city,
            "monthly_income": "2500.50",
            "assigned_officer": 7,
            "is_active": true
        });
        let customer: Customer = serde_json::from_value(json).unwrap();
        let form = CustomerForm::from_entity(&customer);
        assert_eq!(form.date_of_birth, "1984-01-31");
        assert_eq!(form.monthly_income, "2500.5");
        assert_eq!(form.assigned_officer, "7");
    }
}
