//! Integration tests for Layer 2: Resolve
//!
//! Tests for the function registry, declarations, selection and fallbacks.

mod declarations;
mod fallbacks;
mod selection;

use mf2_foundation::{Error, Result, Value};
use mf2_resolve::{FunctionRegistry, Input, Options, Resolution, resolve};
use mf2_syntax::parse_and_validate;
use unic_langid::LanguageIdentifier;

/// Formats its operand wrapped in the `open` and `close` options.
#[allow(clippy::unnecessary_wraps)]
fn wrap(operand: Option<&Value>, options: &Options, _: &LanguageIdentifier) -> Result<Value> {
    let open = options.get("open").map(ToString::to_string).unwrap_or_default();
    let close = options.get("close").map(ToString::to_string).unwrap_or_default();
    let inner = operand.map(ToString::to_string).unwrap_or_default();
    Ok(Value::from(format!("{open}{inner}{close}")))
}

/// Rejects every operand.
fn reject(_: Option<&Value>, _: &Options, _: &LanguageIdentifier) -> Result<Value> {
    Err(Error::bad_operand("reject", "rejected"))
}

/// Selects on the operand's length.
fn length(value: &Value, _: &Options, keys: &[&str], _: &LanguageIdentifier) -> Result<Vec<String>> {
    let len = value.to_string().chars().count().to_string();
    let mut matched = Vec::new();
    for key in keys {
        if key.parse::<usize>().is_err() {
            return Err(Error::bad_variant_key("length", *key));
        }
        if *key == len {
            matched.push((*key).to_string());
        }
    }
    Ok(matched)
}

pub fn registry() -> FunctionRegistry {
    let mut registry = mf2_stdlib::standard_registry();
    registry.register_formatter("wrap", wrap);
    registry.register_formatter("reject", reject);
    registry.register_selector("length", wrap, length);
    registry
}

pub fn input(pairs: &[(&str, Value)]) -> Input {
    pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
}

pub fn format(source: &str, input: &Input) -> Resolution<String> {
    let message = parse_and_validate(source).unwrap();
    resolve(&message, input, &registry())
}
