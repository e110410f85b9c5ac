//! Deserializers for form-style input, where numbers and ids may arrive as
//! strings and an empty field means "not given".

use chrono::{DateTime, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

/// Largest magnitude accepted for any amount or reading. Cent arithmetic and
/// ledger sums must stay finite well past this.
pub const MAX_MAGNITUDE: f64 = 1e12;

fn number_from<E: serde::de::Error>(value: Value) -> Result<Option<f64>, E> {
    let n = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64().ok_or_else(|| E::custom("number out of range"))?,
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| E::custom(format!("expected a number, got {s:?}")))?,
        other => return Err(E::custom(format!("expected a number, got {other}"))),
    };
    if n.abs() > MAX_MAGNITUDE {
        return Err(E::custom(format!("number {n} is too large")));
    }
    Ok(Some(n))
}

/// Number, numeric string, empty string or null; the last two read as zero.
pub fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    number_from(Value::deserialize(d)?).map(|n| n.unwrap_or(0.0))
}

/// Like [`f64_or_zero`] but keeps "not given" distinct from zero.
pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    number_from(Value::deserialize(d)?)
}

fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string())),
        other => Err(D::Error::custom(format!("expected a string, got {other}"))),
    }
}

/// A UUID string; empty or null reads as absent.
pub fn opt_uuid<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Uuid>, D::Error> {
    opt_string(d)?
        .map(|s| Uuid::parse_str(&s).map_err(|_| D::Error::custom(format!("invalid id {s:?}"))))
        .transpose()
}

/// `YYYY-MM-DD` or an RFC 3339 timestamp (its date part is kept).
pub fn opt_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    opt_string(d)?
        .map(|s| parse_date(&s).ok_or_else(|| D::Error::custom(format!("invalid date {s:?}"))))
        .transpose()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.parse::<NaiveDate>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "f64_or_zero")]
        amount: f64,
        #[serde(default, deserialize_with = "opt_f64")]
        pending: Option<f64>,
        #[serde(default, deserialize_with = "opt_uuid")]
        dealer_id: Option<Uuid>,
        #[serde(default, deserialize_with = "opt_date")]
        date: Option<NaiveDate>,
    }

    #[test]
    fn accepts_form_strings() {
        let id = Uuid::new_v4();
        let form: Form = serde_json::from_value(json!({
            "amount": " 1250.50 ",
            "pending": "",
            "dealer_id": id.to_string(),
            "date": "2025-03-04T10:15:00Z",
        }))
        .unwrap();
        assert_eq!(form.amount, 1250.5);
        assert_eq!(form.pending, None);
        assert_eq!(form.dealer_id, Some(id));
        assert_eq!(form.date, "2025-03-04".parse().ok());
    }

    #[test]
    fn missing_and_empty_read_as_absent() {
        let form: Form = serde_json::from_value(json!({"amount": null, "dealer_id": ""})).unwrap();
        assert_eq!(form.amount, 0.0);
        assert_eq!(form.dealer_id, None);
        assert_eq!(form.date, None);

        let form: Form = serde_json::from_value(json!({"pending": 0})).unwrap();
        assert_eq!(form.pending, Some(0.0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_value::<Form>(json!({"amount": "lots"})).is_err());
        assert!(serde_json::from_value::<Form>(json!({"dealer_id": "abc"})).is_err());
        assert!(serde_json::from_value::<Form>(json!({"date": "03/04/2025"})).is_err());
        assert!(serde_json::from_value::<Form>(json!({"amount": [1]})).is_err());
    }

    #[test]
    fn rejects_oversized_numbers() {
        assert!(serde_json::from_value::<Form>(json!({"amount": 1e307})).is_err());
        assert!(serde_json::from_value::<Form>(json!({"pending": "-1e300"})).is_err());
        assert!(serde_json::from_value::<Form>(json!({"amount": "1e400"})).is_err());

        let form: Form = serde_json::from_value(json!({"amount": MAX_MAGNITUDE})).unwrap();
        assert_eq!(form.amount, MAX_MAGNITUDE);
    }
}
