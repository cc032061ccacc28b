//! Field rules used by the form schemas.
//!
//! Format rules accept an empty value; whether a field is required is
//! declared separately with [`required`] so that an empty required field
//! reports "required" rather than a format message. Both look at the
//! trimmed value, the same text the payload carries.

use chrono::{Offset, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::str::FromStr;
use validator::ValidationError;

use crate::{format, ContactType, Gender, Outcome, PaymentFrequency, PaymentMethod, Priority, Role};

/// Optional leading `+`, then 9 to 15 digits.
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9]{9,15}$").expect("phone pattern is valid")
});

pub static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.@+-]+$").expect("username pattern is valid")
});

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Rejects empty and whitespace-only input. Forms attach their own message.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("required", "This field is required"))
    } else {
        Ok(())
    }
}

/// Free-text justifications: at least 10 characters once trimmed.
pub fn explanation(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() >= 10 {
        Ok(())
    } else {
        Err(invalid("explanation", "Give at least 10 characters"))
    }
}

pub fn optional_phone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || PHONE_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(invalid("phone", "Enter a valid phone number (9-15 digits, optional leading +)"))
    }
}

pub fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || validator::validate_email(value.trim()) {
        Ok(())
    } else {
        Err(invalid("email", "Enter a valid email address"))
    }
}

pub fn positive_number(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(()),
        Ok(_) => Err(invalid("positive", "Must be greater than zero")),
        Err(_) => Err(invalid("number", "Enter a valid number")),
    }
}

pub fn non_negative_number(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(()),
        Ok(_) => Err(invalid("non_negative", "Cannot be negative")),
        Err(_) => Err(invalid("number", "Enter a valid number")),
    }
}

pub fn percentage(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match value.trim().parse::<f64>() {
        Ok(n) if (0.0..=100.0).contains(&n) => Ok(()),
        Ok(_) => Err(invalid("percentage", "Must be between 0 and 100")),
        Err(_) => Err(invalid("number", "Enter a valid number")),
    }
}

/// Loan terms: 1 to 360 months.
pub fn term_months(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match value.trim().parse::<u32>() {
        Ok(n) if (1..=360).contains(&n) => Ok(()),
        Ok(_) => Err(invalid("term", "Term must be between 1 and 360 months")),
        Err(_) => Err(invalid("whole_number", "Enter a whole number of months")),
    }
}

pub fn valid_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || format::parse_date(value).is_some() {
        Ok(())
    } else {
        Err(invalid("date", "Enter a valid date (YYYY-MM-DD)"))
    }
}

/// Offset-independent shape check; the offset is applied in the payload step.
pub fn valid_datetime(value: &str) -> Result<(), ValidationError> {
    let utc = Utc.fix();
    if value.trim().is_empty() || format::parse_datetime_input(value, utc).is_some() {
        Ok(())
    } else {
        Err(invalid("datetime", "Enter a valid date and time"))
    }
}

fn known<T: FromStr>(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().parse::<T>().is_ok() {
        Ok(())
    } else {
        Err(invalid("choice", "Select a valid option"))
    }
}

pub fn known_role(value: &str) -> Result<(), ValidationError> {
    known::<Role>(value)
}

pub fn known_gender(value: &str) -> Result<(), ValidationError> {
    known::<Gender>(value)
}

pub fn known_frequency(value: &str) -> Result<(), ValidationError> {
    known::<PaymentFrequency>(value)
}

pub fn known_payment_method(value: &str) -> Result<(), ValidationError> {
    known::<PaymentMethod>(value)
}

pub fn known_contact_type(value: &str) -> Result<(), ValidationError> {
    known::<ContactType>(value)
}

pub fn known_outcome(value: &str) -> Result<(), ValidationError> {
    known::<Outcome>(value)
}

pub fn known_priority(value: &str) -> Result<(), ValidationError> {
    known::<Priority>(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        assert!(PHONE_RE.is_match("+12125551234"));
        assert!(PHONE_RE.is_match("0712345678"));
        assert!(!PHONE_RE.is_match("12345"));
        assert!(!PHONE_RE.is_match("+1 212 555 1234"));
        assert!(!PHONE_RE.is_match("+1234567890123456"));
    }

    #[test]
    fn test_numbers() {
        assert!(positive_number("10.5").is_ok());
        assert!(positive_number("").is_ok());
        assert!(positive_number("0").is_err());
        assert!(positive_number("-3").is_err());
        assert!(positive_number("abc").is_err());
        assert!(non_negative_number("0").is_ok());
        assert!(percentage("100").is_ok());
        assert!(percentage("100.5").is_err());
        assert!(term_months("12").is_ok());
        assert!(term_months("0").is_err());
        assert!(term_months("1.5").is_err());
    }

    #[test]
    fn test_choices() {
        assert!(known_role("calling_agent").is_ok());
        assert!(known_role("admin").is_err());
        assert!(known_outcome("payment_promised").is_ok());
        assert!(known_priority("").is_ok());
    }

    #[test]
    fn test_required_ignores_surrounding_whitespace() {
        assert!(required("Ada").is_ok());
        assert!(required("  Ada ").is_ok());
        assert!(required("").is_err());
        assert!(required("   ").is_err());
        assert!(required("\t\n").is_err());
        assert!(explanation("  too short   ").is_err());
        assert!(explanation("Customer relocated abroad").is_ok());
    }

    #[test]
    fn test_email() {
        assert!(optional_email("").is_ok());
        assert!(optional_email("a@b.co").is_ok());
        assert!(optional_email("not-an-email").is_err());
    }
}
