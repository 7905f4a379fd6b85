//! Integration tests for Value
//!
//! Tests construction, accessors, numeric interpretation and display.

use mf2_foundation::Value;

// =============================================================================
// Construction
// =============================================================================

#[test]
fn value_from_primitives() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(3), Value::Int(3));
    assert_eq!(Value::from(3_i64), Value::Int(3));
    assert_eq!(Value::from(0.5), Value::Float(0.5));
    assert_eq!(Value::from("x"), Value::string("x"));
    assert_eq!(Value::from(String::from("x")), Value::string("x"));
}

#[test]
fn value_from_option() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("a")), Value::from("a"));
}

#[test]
fn default_is_null() {
    assert!(Value::default().is_null());
}

// =============================================================================
// Accessors
// =============================================================================

#[test]
fn typed_accessors() {
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from(7).as_int(), Some(7));
    assert_eq!(Value::from(1.5).as_float(), Some(1.5));
    assert_eq!(Value::from("s").as_str(), Some("s"));
    assert_eq!(Value::from(7).as_str(), None);
    assert_eq!(Value::Null.as_int(), None);
}

#[test]
fn as_number_accepts_numbers_and_numeric_strings() {
    assert_eq!(Value::from(4).as_number(), Some(4.0));
    assert_eq!(Value::from(4.25).as_number(), Some(4.25));
    assert_eq!(Value::from("-1.5").as_number(), Some(-1.5));
    assert_eq!(Value::from("1e3").as_number(), Some(1000.0));
}

#[test]
fn as_number_rejects_everything_else() {
    assert_eq!(Value::from("apples").as_number(), None);
    assert_eq!(Value::from("inf").as_number(), None);
    assert_eq!(Value::from(true).as_number(), None);
    assert_eq!(Value::Null.as_number(), None);
}

#[test]
fn type_names() {
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::from(1).type_name(), "int");
    assert_eq!(Value::from("a").type_name(), "string");
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_is_plain_text() {
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(Value::from(false).to_string(), "false");
    assert_eq!(Value::from(-12).to_string(), "-12");
    assert_eq!(Value::from(5.0).to_string(), "5");
    assert_eq!(Value::from("Ada").to_string(), "Ada");
}
