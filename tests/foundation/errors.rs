//! Integration tests for Error types
//!
//! Tests error construction, display, context, and categories.

use mf2_foundation::{Error, ErrorCategory, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_unresolved_variable() {
    let err = Error::unresolved_variable("name");
    assert!(matches!(err.kind, ErrorKind::UnresolvedVariable(_)));
    assert_eq!(format!("{err}"), "unresolved variable: $name");
}

#[test]
fn error_bad_option() {
    let err = Error::bad_option("number", "minimumFractionDigits must be an integer");
    assert!(matches!(err.kind, ErrorKind::BadOption { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("number"));
    assert!(msg.contains("minimumFractionDigits"));
}

#[test]
fn error_bad_variant_key() {
    let err = Error::bad_variant_key("number", "horse");
    assert_eq!(format!("{err}"), "bad variant key for :number: horse");
}

#[test]
fn error_variant_key_mismatch() {
    let err = Error::new(ErrorKind::VariantKeyMismatch {
        expected: 2,
        actual: 1,
    });
    let msg = format!("{err}");
    assert!(msg.contains('2'));
    assert!(msg.contains('1'));
}

// =============================================================================
// Error Categories
// =============================================================================

#[test]
fn every_tier_is_reachable() {
    let cases = [
        (
            Error::new(ErrorKind::InvalidSyntax {
                message: "bad escape".into(),
                line: 1,
                column: 2,
                source_line: "a\\n".into(),
            }),
            ErrorCategory::Syntax,
        ),
        (Error::new(ErrorKind::EmptyName), ErrorCategory::DataModel),
        (Error::new(ErrorKind::MissingFallbackVariant), ErrorCategory::DataModel),
        (
            Error::new(ErrorKind::DuplicateDeclaration("x".into())),
            ErrorCategory::DataModel,
        ),
        (Error::unknown_function("nope"), ErrorCategory::Resolution),
        (
            Error::new(ErrorKind::MissingSelectorAnnotation("{$x}".into())),
            ErrorCategory::Resolution,
        ),
        (
            Error::new(ErrorKind::UnsupportedStatement(".when".into())),
            ErrorCategory::Resolution,
        ),
        (Error::bad_selector("number", "not a number"), ErrorCategory::MessageFunction),
        (Error::bad_variant_key("number", "x"), ErrorCategory::MessageFunction),
    ];

    for (err, category) in cases {
        assert_eq!(err.category(), category, "{err}");
    }
}

#[test]
fn category_display() {
    assert_eq!(ErrorCategory::Syntax.to_string(), "syntax error");
    assert_eq!(ErrorCategory::MessageFunction.to_string(), "message function error");
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_display_with_path_and_node() {
    let context = ErrorContext::new()
        .with_path("simpleMessage.part[0]")
        .with_node("{$x :fn}");
    assert_eq!(context.to_string(), "at simpleMessage.part[0]: {$x :fn}");
}

#[test]
fn error_without_context_displays_kind_only() {
    let err = Error::new(ErrorKind::MissingSelector);
    assert!(err.context.is_none());
    assert_eq!(err.to_string(), "matcher has no selectors");
}

#[test]
fn within_builds_dotted_path() {
    let err = Error::new(ErrorKind::EmptyExpression)
        .within("part[2]")
        .within("simpleMessage");
    assert_eq!(err.path(), Some("simpleMessage.part[2]"));
    assert_eq!(err.to_string(), "expression has neither operand nor annotation (at simpleMessage.part[2])");
}

#[test]
fn errors_compare_by_kind_and_context() {
    let a = Error::unknown_function("f").at_node("{:f}");
    let b = Error::unknown_function("f").at_node("{:f}");
    let c = Error::unknown_function("f");
    assert_eq!(a, b);
    assert_ne!(a, c);
}
