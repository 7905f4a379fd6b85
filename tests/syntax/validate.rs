//! Integration tests for the validator
//!
//! Tests the data model invariants enforced after parsing.

use mf2_foundation::{ErrorCategory, ErrorKind};
use mf2_syntax::{parse, parse_and_validate};

fn validation_error(source: &str) -> mf2_foundation::Error {
    let message = parse(source).unwrap();
    message.validate().unwrap_err()
}

#[test]
fn well_formed_messages_validate() {
    for source in [
        "",
        "Hello, {$name}!",
        ".input {$n :number} {{{$n}}}",
        ".match {$a} {$b} yes yes {{X}} * * {{Y}}",
        ".local $x = {1} .local $y = {$x} {{{$y}}}",
        "{#b}{/b}",
    ] {
        assert!(parse_and_validate(source).is_ok(), "{source}");
    }
}

#[test]
fn all_data_model_errors_are_data_model_category() {
    for source in [
        ".match {$x :string} a {{a}}",
        ".match {$x :string} {$y :string} a {{a}} * * {{b}}",
        ".match {$x :string} a {{a}} |a| {{b}} * {{c}}",
        ".input {$x} .input {$x} {{}}",
        ".local $x = {$x} {{}}",
        "{:f a=1 a=2}",
        "{/b a=1}",
    ] {
        let err = validation_error(source);
        assert_eq!(err.category(), ErrorCategory::DataModel, "{source}: {err}");
    }
}

#[test]
fn missing_fallback_variant() {
    let err = validation_error(".match {$x :string} a {{a}} b {{b}}");
    assert_eq!(err.kind, ErrorKind::MissingFallbackVariant);
    assert_eq!(err.path(), Some("complexMessage.matcher"));
}

#[test]
fn variant_key_count_must_match_selectors() {
    let err = validation_error(".match {$x :string} {$y :string} a {{a}} * * {{b}}");
    assert_eq!(
        err.kind,
        ErrorKind::VariantKeyMismatch {
            expected: 2,
            actual: 1
        }
    );
    assert_eq!(err.path(), Some("complexMessage.matcher.variant[0]"));
}

#[test]
fn declaration_after_use_is_duplicate() {
    let err = validation_error(".local $y = {$x} .input {$x} {{}}");
    assert_eq!(err.kind, ErrorKind::DuplicateDeclaration("x".into()));
}

#[test]
fn parse_and_validate_reports_first_failure() {
    let err = parse_and_validate("{/b a=1}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MarkupCloseWithOptions("b".into()));
    let context = err.context.unwrap();
    assert_eq!(context.node.as_deref(), Some("{/b a=1}"));
}
