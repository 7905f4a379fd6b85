//! `:string` formatting and selection.

use mf2_foundation::{Result, Value};
use mf2_resolve::Options;
use unic_langid::LanguageIdentifier;

/// `:string` formatting: the operand's plain text, empty without an operand.
pub(crate) fn string_format(
    operand: Option<&Value>,
    _options: &Options,
    _locale: &LanguageIdentifier,
) -> Result<Value> {
    Ok(match operand {
        Some(Value::String(s)) => Value::String(s.clone()),
        Some(other) => Value::string(other.to_string()),
        None => Value::string(""),
    })
}

/// `:string` selection: keys equal to the operand's text.
pub(crate) fn string_select(
    value: &Value,
    _options: &Options,
    keys: &[&str],
    _locale: &LanguageIdentifier,
) -> Result<Vec<String>> {
    let text = value.to_string();
    Ok(keys
        .iter()
        .filter(|key| **key == text)
        .map(|key| (*key).to_string())
        .collect())
}
