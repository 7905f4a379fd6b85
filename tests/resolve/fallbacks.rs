//! Integration tests for placeholder fallbacks

use mf2_foundation::{ErrorCategory, ErrorKind, Value};
use mf2_resolve::{FormattedPart, Input, Resolver};
use mf2_syntax::parse_and_validate;

use crate::{format, input, registry};

#[test]
fn unknown_function_only_affects_its_placeholder() {
    let result = format("Hello {$name :shout}, you are {$age}.", &input(&[
        ("name", Value::from("Ada")),
        ("age", Value::from(36)),
    ]));
    assert_eq!(result.output, "Hello {$name}, you are 36.");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].category(), ErrorCategory::Resolution);
}

#[test]
fn fallback_shapes() {
    let result = format("{|a\\|b| :nope} {:nope} {$v :nope} {!x}", &input(&[("v", Value::from(1))]));
    assert_eq!(result.output, "{|a\\|b|} {:nope} {$v} {!}");
    assert_eq!(result.errors.len(), 4);
}

#[test]
fn message_function_errors_are_categorized() {
    let result = format("{|abc| :number}", &Input::new());
    assert_eq!(result.output, "{|abc|}");
    assert_eq!(result.errors[0].category(), ErrorCategory::MessageFunction);
    assert!(matches!(result.errors[0].kind, ErrorKind::BadOperand { .. }));
}

#[test]
fn bad_option_falls_back() {
    let result = format("{1 :number minimumFractionDigits=many}", &Input::new());
    assert_eq!(result.output, "{|1|}");
    assert!(matches!(result.errors[0].kind, ErrorKind::BadOption { .. }));
}

#[test]
fn fallback_parts_are_marked() {
    let registry = registry();
    let message = parse_and_validate("a {$missing} b").unwrap();
    let result = Resolver::new(&registry).format_to_parts(&message, &Input::new());
    assert_eq!(
        result.output,
        vec![
            FormattedPart::Text("a ".into()),
            FormattedPart::Fallback("{$missing}".into()),
            FormattedPart::Text(" b".into()),
        ]
    );
}

#[test]
fn errors_carry_the_failing_node() {
    let result = format("x {$v :reject} y", &input(&[("v", Value::from("q"))]));
    let context = result.errors[0].context.as_ref().unwrap();
    assert_eq!(context.node.as_deref(), Some("{$v :reject}"));
}
