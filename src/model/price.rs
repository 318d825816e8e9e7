//! JSON representation of decimal prices.
//!
//! Prices are read from a JSON number or a numeric string and written back
//! as a JSON number. serde_json keeps number digits verbatim
//! (`arbitrary_precision`), so no value passes through `f64` on either side.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let number = serde_json::Number::from_str(&value.to_string())
        .map_err(|e| S::Error::custom(format!("price is not representable: {}", e)))?;
    number.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let rendered = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text,
        other => {
            return Err(D::Error::custom(format!(
                "price must be a number or numeric string, got {}",
                other
            )))
        }
    };

    BigDecimal::from_str(rendered.trim())
        .map_err(|e| D::Error::custom(format!("invalid price '{}': {}", rendered, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "crate::model::price")]
        preco: BigDecimal,
    }

    #[test]
    fn test_digits_survive_number_roundtrip() {
        let parsed: Priced = serde_json::from_str(r#"{"preco": 12345678901234567890.12}"#).unwrap();
        assert_eq!(
            parsed.preco,
            BigDecimal::from_str("12345678901234567890.12").unwrap()
        );
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"preco":12345678901234567890.12}"#
        );
    }

    #[test]
    fn test_value_beyond_f64_range_serializes() {
        let parsed: Priced = serde_json::from_str(r#"{"preco": "1e400"}"#).unwrap();
        let rendered = serde_json::to_string(&parsed).unwrap();

        let reparsed: Priced = serde_json::from_str(&rendered).unwrap();
        assert_eq!(reparsed.preco, parsed.preco);
    }

    #[test]
    fn test_rejects_non_numeric_json() {
        assert!(serde_json::from_str::<Priced>(r#"{"preco": true}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"preco": null}"#).is_err());
    }
}
