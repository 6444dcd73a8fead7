use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar values stored in element attributes and exchanged with the properties panel.
///
/// `Null` doubles as "undefined": an attribute holding `Null` is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness as the properties panel sees it: `null`, `false`, `0`, `NaN` and the
    /// empty string are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Real(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Falsy or whitespace-only.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::String(s) => s.trim().is_empty(),
            other => !other.is_truthy(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            // Float `Display` never switches to exponent form and drops a zero fraction.
            Value::Real(n) if *n == 0.0 => write!(f, "0"),
            Value::Real(n) if n.is_infinite() => {
                write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
            }
            Value::Real(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Real(n)
    }
}

impl From<&serde_json::Value> for Value {
    /// Scalars map one to one; arrays and objects have no scalar form and become `Null`.
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Integer)
                .or_else(|| n.as_f64().map(Value::Real))
                .unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Value::Null
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_follows_panel_semantics() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::Real(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::Integer(-1).is_truthy());
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        assert_ne!(Value::Real(f64::NAN), Value::Real(f64::NAN));
        assert_eq!(Value::Real(1.5), Value::Real(1.5));
    }

    #[test]
    fn reals_display_without_saturating() {
        assert_eq!(Value::Real(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::Real(-3.0).to_string(), "-3");
        assert_eq!(Value::Real(2.5).to_string(), "2.5");
        assert_eq!(Value::Real(-0.0).to_string(), "0");
        assert_eq!(Value::Real(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn blank_includes_whitespace_strings() {
        assert!(Value::from("  \t").is_blank());
        assert!(Value::Null.is_blank());
        assert!(!Value::from(" a ").is_blank());
        assert!(!Value::Bool(true).is_blank());
    }

    #[test]
    fn display() {
        assert_eq!(Value::Real(42.0).to_string(), "42");
        assert_eq!(Value::Real(1.5).to_string(), "1.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }
}
