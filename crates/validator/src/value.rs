//! Coercion of bound values to the trimmed text rules operate on.

use serde_json::Value;

/// Trimmed string form of a field value.
///
/// `null` and `false` are empty, which is how an untouched input or an
/// unticked single checkbox reads. Arrays (checkbox groups, multi-selects)
/// join their items with commas, so an empty selection is empty too.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(",")
            .trim()
            .to_string(),
        Value::Object(_) => value.to_string(),
    }
}

/// Returns `true` when the value's trimmed text is empty.
pub fn is_blank(value: &Value) -> bool {
    value_text(value).is_empty()
}
