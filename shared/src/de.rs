//! Lenient deserializers for numeric and choice fields.
//!
//! Decimal columns arrive as JSON strings (`"1500.00"`) from some endpoints and
//! as plain numbers from others. Blank choice columns arrive as `""`.

use serde::de::IntoDeserializer;
use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn parse_raw<E: de::Error>(raw: RawNumber) -> Result<f64, E> {
    match raw {
        RawNumber::Number(value) => Ok(value),
        RawNumber::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("invalid decimal: {text:?}"))),
    }
}

pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    parse_raw(RawNumber::deserialize(deserializer)?)
}

pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawNumber::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(raw) => parse_raw(raw).map(Some),
    }
}

/// An optional closed enum where `""` and `null` both mean unset. Any other
/// unknown value is still an error.
pub fn optional_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => T::deserialize(text.into_deserializer()).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use crate::Outcome;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::amount")]
        principal: f64,
        #[serde(default, deserialize_with = "super::optional_amount")]
        balance: Option<f64>,
    }

    #[test]
    fn test_decimal_strings_and_numbers() {
        let row: Row = serde_json::from_str(r#"{"principal": "1500.50", "balance": 20}"#).unwrap();
        assert_eq!(row.principal, 1500.5);
        assert_eq!(row.balance, Some(20.0));

        let row: Row = serde_json::from_str(r#"{"principal": 10, "balance": null}"#).unwrap();
        assert_eq!(row.balance, None);

        let row: Row = serde_json::from_str(r#"{"principal": 10}"#).unwrap();
        assert_eq!(row.balance, None);
    }

    #[test]
    fn test_garbage_decimal_rejected() {
        assert!(serde_json::from_str::<Row>(r#"{"principal": "ten"}"#).is_err());
    }

    #[derive(Deserialize)]
    struct Call {
        #[serde(default, deserialize_with = "super::optional_choice")]
        outcome: Option<Outcome>,
    }

    #[test]
    fn test_blank_choice_is_unset() {
        for json in [r#"{"outcome": ""}"#, r#"{"outcome": null}"#, "{}"] {
            let call: Call = serde_json::from_str(json).unwrap();
            assert_eq!(call.outcome, None, "{json}");
        }
        let call: Call = serde_json::from_str(r#"{"outcome": "payment_promised"}"#).unwrap();
        assert_eq!(call.outcome, Some(Outcome::PaymentPromised));
        let call: Call = serde_json::from_str(r#"{"outcome": "PAYMENT_PROMISED"}"#).unwrap();
        assert_eq!(call.outcome, Some(Outcome::PaymentPromised));
    }

    #[test]
    fn test_unknown_choice_still_rejected() {
        assert!(serde_json::from_str::<Call>(r#"{"outcome": "teleported"}"#).is_err());
    }
}
