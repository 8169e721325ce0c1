//! # Quantity Scaler
//!
//! Target quantity = source quantity × multiplier. A bad source quantity never fails the line: a
//! missing one counts as 1 and an unparseable one degrades to the multiplier itself. Only an
//! overflowing product is rejected.

use super::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// A finite, strictly positive scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMultiplier", into = "f64")]
pub struct Multiplier(f64);

impl Multiplier {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidMultiplier(value.to_string()))
        }
    }

    /// Parses user input; blank input means the default of 1.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ValidationError::InvalidMultiplier(input.to_string()))?;
        Self::new(value)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Multiplier> for f64 {
    fn from(m: Multiplier) -> Self {
        m.0
    }
}

/// A multiplier as written by the user, not yet validated.
///
/// Config files may write `multiplier = 2` or `multiplier = "2"`; blank text means 1.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawMultiplier {
    Number(f64),
    Text(String),
}

impl RawMultiplier {
    pub fn resolve(&self) -> Result<Multiplier, ValidationError> {
        match self {
            RawMultiplier::Number(n) => Multiplier::new(*n),
            RawMultiplier::Text(s) => Multiplier::parse(s),
        }
    }
}

impl Default for RawMultiplier {
    fn default() -> Self {
        RawMultiplier::Text(String::new())
    }
}

impl TryFrom<RawMultiplier> for Multiplier {
    type Error = ValidationError;

    fn try_from(input: RawMultiplier) -> Result<Self, Self::Error> {
        input.resolve()
    }
}

/// Why the scaler did not use the source quantity as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityFallback {
    /// No quantity on the source; 1 was used.
    Missing,
    /// The quantity was not a finite number; the multiplier was used. Holds the raw value.
    Unparseable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaledQuantity {
    pub value: f64,
    pub fallback: Option<QuantityFallback>,
}

/// Scales one source quantity.
pub fn scale(
    source_id: &str,
    quantity: Option<&Value>,
    multiplier: Multiplier,
) -> Result<ScaledQuantity, ValidationError> {
    let m = multiplier.get();
    let (value, fallback) = match quantity {
        None | Some(Value::Null) => {
            warn!(source_id, multiplier = m, "Quantity missing, using 1");
            (m, Some(QuantityFallback::Missing))
        }
        Some(raw) => match parse_quantity(raw) {
            Some(q) => (q * m, None),
            None => {
                let raw = raw.to_string();
                warn!(source_id, quantity = %raw, multiplier = m, "Quantity unparseable, using multiplier");
                (m, Some(QuantityFallback::Unparseable(raw)))
            }
        },
    };

    if !value.is_finite() {
        let quantity = quantity.and_then(parse_quantity).unwrap_or(f64::NAN);
        return Err(ValidationError::NonFiniteQuantity {
            source_id: source_id.to_string(),
            quantity,
            multiplier: m,
        });
    }
    Ok(ScaledQuantity { value, fallback })
}

fn parse_quantity(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|q| q.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn m(value: f64) -> Multiplier {
        Multiplier::new(value).unwrap()
    }

    #[test]
    fn numeric_quantity_is_multiplied() {
        let scaled = scale("L1", Some(&json!(2)), m(3.0)).unwrap();
        assert_eq!(scaled.value, 6.0);
        assert_eq!(scaled.fallback, None);
    }

    #[test]
    fn numeric_string_is_parsed() {
        let scaled = scale("L1", Some(&json!(" 2.5 ")), m(2.0)).unwrap();
        assert_eq!(scaled.value, 5.0);
        assert_eq!(scaled.fallback, None);
    }

    #[test]
    fn missing_quantity_counts_as_one() {
        for q in [None, Some(json!(null))] {
            let scaled = scale("L1", q.as_ref(), m(4.0)).unwrap();
            assert_eq!(scaled.value, 4.0);
            assert_eq!(scaled.fallback, Some(QuantityFallback::Missing));
        }
    }

    #[test]
    fn unparseable_quantity_degrades_to_multiplier() {
        for q in [json!("lots"), json!(true), json!([1]), json!({"q": 1}), json!("NaN"), json!("inf")] {
            let scaled = scale("L1", Some(&q), m(1.5)).unwrap();
            assert_eq!(scaled.value, 1.5);
            assert!(matches!(scaled.fallback, Some(QuantityFallback::Unparseable(_))));
        }
    }

    #[test]
    fn overflow_is_a_validation_error() {
        let err = scale("L9", Some(&json!(1e308)), m(10.0)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonFiniteQuantity { ref source_id, .. } if source_id == "L9"
        ));
    }

    #[test]
    fn multiplier_validation() {
        assert!(Multiplier::new(0.0).is_err());
        assert!(Multiplier::new(-1.0).is_err());
        assert!(Multiplier::new(f64::NAN).is_err());
        assert!(Multiplier::new(f64::INFINITY).is_err());
        assert_eq!(Multiplier::parse("").unwrap(), Multiplier::default());
        assert_eq!(Multiplier::parse("  ").unwrap().get(), 1.0);
        assert_eq!(Multiplier::parse("2.5").unwrap().get(), 2.5);
        assert!(Multiplier::parse("two").is_err());
    }

    #[test]
    fn multiplier_deserializes_from_number_or_text() {
        let from_number: Multiplier = serde_json::from_value(json!(3)).unwrap();
        let from_text: Multiplier = serde_json::from_value(json!("3")).unwrap();
        let blank: Multiplier = serde_json::from_value(json!("")).unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(blank.get(), 1.0);
        assert!(serde_json::from_value::<Multiplier>(json!(-2)).is_err());
    }

    #[test]
    fn raw_multiplier_defers_validation() {
        let raw: RawMultiplier = serde_json::from_value(json!("abc")).unwrap();
        assert_eq!(raw, RawMultiplier::Text("abc".into()));
        assert_eq!(
            raw.resolve(),
            Err(ValidationError::InvalidMultiplier("abc".into()))
        );
        assert_eq!(RawMultiplier::Number(0.5).resolve().unwrap().get(), 0.5);
        assert_eq!(RawMultiplier::default().resolve().unwrap(), Multiplier::default());
    }
}
