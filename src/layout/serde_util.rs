//! Serde helpers for the fixed-precision decimal strings used by the
//! layout document format.
//!
//! The persisted format writes measurements as strings ("10.00" mm,
//! "13.0" pt) so that a dump is byte-stable regardless of float noise.
//! Deserialization is lenient and accepts either a string or a bare JSON
//! number, since hand-edited documents tend to contain both.

use serde::{Deserialize, Deserializer, Serializer};

/// Accepts `"10.00"` or `10.0`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalValue {
    Number(f64),
    Text(String),
}

fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match DecimalValue::deserialize(deserializer)? {
        DecimalValue::Number(v) => Ok(v),
        DecimalValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal string {:?}", s))),
    }
}

/// Millimeter fields: two decimal places.
pub(crate) mod mm {
    use super::*;

    pub fn serialize<S>(v: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", v))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        decimal(deserializer)
    }
}

/// Point and degree fields: one decimal place.
pub(crate) mod pt {
    use super::*;

    pub fn serialize<S>(v: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.1}", v))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        decimal(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Probe {
        #[serde(with = "super::mm")]
        mm: f64,
        #[serde(with = "super::pt")]
        pt: f64,
    }

    #[test]
    fn serializes_fixed_precision_strings() {
        let json = serde_json::to_string(&Probe { mm: 10.0, pt: 13.0 }).unwrap();
        assert_eq!(json, r#"{"mm":"10.00","pt":"13.0"}"#);
    }

    #[test]
    fn rounds_rather_than_truncates() {
        let json = serde_json::to_string(&Probe {
            mm: 1.006,
            pt: 12.96,
        })
        .unwrap();
        assert_eq!(json, r#"{"mm":"1.01","pt":"13.0"}"#);
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let p: Probe = serde_json::from_str(r#"{"mm":"10.00","pt":13}"#).unwrap();
        assert_eq!(p.mm, 10.0);
        assert_eq!(p.pt, 13.0);

        let p: Probe = serde_json::from_str(r#"{"mm":4.25,"pt":"8.5"}"#).unwrap();
        assert_eq!(p.mm, 4.25);
        assert_eq!(p.pt, 8.5);
    }

    #[test]
    fn rejects_garbage_strings() {
        assert!(serde_json::from_str::<Probe>(r#"{"mm":"ten","pt":"1.0"}"#).is_err());
    }
}
