use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Semantic type of a flattened attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttrType {
    Int,
    Float,
    Date,
    String,
}

impl AttrType {
    /// Infer the type of a raw scalar value.
    ///
    /// Floats map to [`AttrType::Float`], integers to [`AttrType::Int`] and everything else to
    /// [`AttrType::String`]. [`AttrType::Date`] is never inferred and must be assigned explicitly.
    #[must_use]
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Int,
            _ => Self::String,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_infer_float() {
        assert_eq!(AttrType::infer(&json!(1.23)), AttrType::Float);
        assert_eq!(AttrType::infer(&json!(0.0)), AttrType::Float);
    }

    #[test]
    fn test_infer_int() {
        assert_eq!(AttrType::infer(&json!(7)), AttrType::Int);
        assert_eq!(AttrType::infer(&json!(-3)), AttrType::Int);
        assert_eq!(AttrType::infer(&json!(u64::MAX)), AttrType::Int);
    }

    #[test]
    fn test_infer_defaults_to_string() {
        assert_eq!(AttrType::infer(&json!("quartz")), AttrType::String);
        assert_eq!(AttrType::infer(&json!(true)), AttrType::String);
        assert_eq!(AttrType::infer(&Value::Null), AttrType::String);
        assert_eq!(AttrType::infer(&json!([1, 2])), AttrType::String);
        assert_eq!(AttrType::infer(&json!({"a": 1})), AttrType::String);
    }

    #[test]
    fn test_date_is_never_inferred() {
        assert_ne!(AttrType::infer(&json!("2021/03/04, 10:00:00")), AttrType::Date);
        assert_ne!(AttrType::infer(&json!(1_614_852_000)), AttrType::Date);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(AttrType::Int.to_string(), "int");
        assert_eq!(AttrType::Float.to_string(), "float");
        assert_eq!(AttrType::Date.to_string(), "date");
        assert_eq!(AttrType::String.to_string(), "string");
        assert_eq!(serde_json::to_value(AttrType::Date).unwrap(), json!("date"));
        assert_eq!(AttrType::from_str("float").unwrap(), AttrType::Float);
    }
}
