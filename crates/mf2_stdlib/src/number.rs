//! Numeric formatting and selection: `:number` and `:integer`.
//!
//! Operands may be numbers or numeric strings. Selection prefers keys that are
//! numerically equal to the operand over the operand's plural category. A key
//! must be an MF2 number literal or a plural category name.

use mf2_foundation::{Error, Result, Value};
use mf2_resolve::Options;
use mf2_syntax::chars::is_number_literal;
use unic_langid::LanguageIdentifier;

use crate::plural::{self, CATEGORIES, PluralKind};

const NUMBER: &str = "number";
const INTEGER: &str = "integer";

/// Largest accepted fraction digit count.
const MAX_DIGITS: u8 = 20;

// =============================================================================
// Options
// =============================================================================

/// How a numeric selector matches keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SelectMode {
    Plural,
    Ordinal,
    Exact,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NumberOptions {
    minimum_fraction_digits: u8,
    maximum_fraction_digits: u8,
    select: SelectMode,
}

impl NumberOptions {
    fn parse(function: &str, options: &Options) -> Result<Self> {
        let select = match options.get("select").map(ToString::to_string).as_deref() {
            None | Some("plural") => SelectMode::Plural,
            Some("ordinal") => SelectMode::Ordinal,
            Some("exact") => SelectMode::Exact,
            Some(other) => {
                return Err(Error::bad_option(
                    function,
                    format!("select must be plural, ordinal or exact, got {other}"),
                ));
            }
        };

        if function == INTEGER {
            return Ok(Self {
                minimum_fraction_digits: 0,
                maximum_fraction_digits: 0,
                select,
            });
        }

        let minimum = digits(function, options, "minimumFractionDigits", 0)?;
        let maximum = digits(function, options, "maximumFractionDigits", 3)?;
        Ok(Self {
            minimum_fraction_digits: minimum,
            maximum_fraction_digits: maximum.max(minimum),
            select,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn digits(function: &str, options: &Options, name: &str, default: u8) -> Result<u8> {
    let Some(value) = options.get(name) else {
        return Ok(default);
    };
    value
        .as_number()
        .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(MAX_DIGITS)).contains(n))
        .map(|n| n as u8)
        .ok_or_else(|| {
            Error::bad_option(
                function,
                format!("{name} must be an integer from 0 to {MAX_DIGITS}, got {value}"),
            )
        })
}

// =============================================================================
// Formatting
// =============================================================================

/// Rounds half away from zero and keeps between `minimum` and `maximum`
/// fraction digits.
fn format_decimal(n: f64, minimum: u8, maximum: u8) -> String {
    let factor = 10f64.powi(i32::from(maximum));
    let scaled = n * factor;
    let mut rounded = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        n
    };
    if rounded == 0.0 {
        rounded = 0.0;
    }

    let mut text = format!("{rounded:.precision$}", precision = usize::from(maximum));
    if let Some(dot) = text.find('.') {
        let keep = dot + 1 + usize::from(minimum);
        while text.len() > keep && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

fn operand_number(operand: Option<&Value>) -> Option<f64> {
    operand.and_then(Value::as_number).filter(|n| n.is_finite())
}

fn format_with(function: &str, operand: Option<&Value>, options: &Options) -> Result<Value> {
    let number = operand_number(operand).ok_or_else(|| {
        let found = operand.map_or_else(|| "no operand".to_string(), |v| format!("{} {v:?}", v.type_name()));
        Error::bad_operand(function, format!("expected a number, found {found}"))
    })?;
    let options = NumberOptions::parse(function, options)?;
    Ok(Value::string(format_decimal(
        number,
        options.minimum_fraction_digits,
        options.maximum_fraction_digits,
    )))
}

/// `:number` formatting.
pub(crate) fn number_format(
    operand: Option<&Value>,
    options: &Options,
    _locale: &LanguageIdentifier,
) -> Result<Value> {
    format_with(NUMBER, operand, options)
}

/// `:integer` formatting.
pub(crate) fn integer_format(
    operand: Option<&Value>,
    options: &Options,
    _locale: &LanguageIdentifier,
) -> Result<Value> {
    format_with(INTEGER, operand, options)
}

// =============================================================================
// Selection
// =============================================================================

fn select_with(
    function: &str,
    value: &Value,
    options: &Options,
    keys: &[&str],
    locale: &LanguageIdentifier,
) -> Result<Vec<String>> {
    let number = operand_number(Some(value))
        .ok_or_else(|| Error::bad_selector(function, format!("expected a number, found {value:?}")))?;
    let options = NumberOptions::parse(function, options)?;
    let formatted = format_decimal(
        number.abs(),
        options.minimum_fraction_digits,
        options.maximum_fraction_digits,
    );
    let rounded = formatted.parse::<f64>().unwrap_or(number.abs()).copysign(number);

    let mut exact = Vec::new();
    let mut named = Vec::new();
    for key in keys {
        if is_number_literal(key) {
            if key.parse::<f64>().is_ok_and(|n| n == rounded) {
                exact.push((*key).to_string());
            }
        } else if CATEGORIES.contains(key) {
            named.push(*key);
        } else {
            return Err(Error::bad_variant_key(function, *key));
        }
    }

    let kind = match options.select {
        SelectMode::Exact => return Ok(exact),
        SelectMode::Plural => PluralKind::Cardinal,
        SelectMode::Ordinal => PluralKind::Ordinal,
    };
    if !named.is_empty() {
        let category = plural::category(function, locale, kind, &formatted)?;
        if named.contains(&category) {
            exact.push(category.to_string());
        }
    }
    Ok(exact)
}

/// `:number` selection.
pub(crate) fn number_select(
    value: &Value,
    options: &Options,
    keys: &[&str],
    locale: &LanguageIdentifier,
) -> Result<Vec<String>> {
    select_with(NUMBER, value, options, keys, locale)
}

/// `:integer` selection.
pub(crate) fn integer_select(
    value: &Value,
    options: &Options,
    keys: &[&str],
    locale: &LanguageIdentifier,
) -> Result<Vec<String>> {
    select_with(INTEGER, value, options, keys, locale)
}
