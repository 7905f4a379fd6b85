//! End-to-end tests: source text in, formatted text out.

use mf2::{BidiIsolation, ErrorCategory, ErrorKind, FormattedPart, Input, ResolveConfig, Resolver, Value};
use unic_langid::langid;

fn input(pairs: &[(&str, Value)]) -> Input {
    pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn hello_ada() {
    let result = mf2::format("Hello, {$name}!", &input(&[("name", Value::from("Ada"))])).unwrap();
    assert_eq!(result.output, "Hello, Ada!");
    assert!(result.is_clean());
}

#[test]
fn apples() {
    let source = ".match {$n :integer} 0 {{no apples}} 1 {{one apple}} * {{{$n} apples}}";
    let cases = [(0, "no apples"), (1, "one apple"), (5, "5 apples")];
    for (n, expected) in cases {
        let result = mf2::format(source, &input(&[("n", Value::from(n))])).unwrap();
        assert_eq!(result.output, expected);
    }
}

#[test]
fn escapes_render_literally() {
    let result = mf2::format(r"\{braces\} and \\ backslash", &Input::new()).unwrap();
    assert_eq!(result.output, r"{braces} and \ backslash");
}

#[test]
fn unknown_function_degrades_one_placeholder() {
    let result = mf2::format(
        "Today is {$day :weekday}, {$name}.",
        &input(&[("day", Value::from(3)), ("name", Value::from("Ada"))]),
    )
    .unwrap();
    assert!(result.output.starts_with("Today is {"));
    assert!(result.output.ends_with(", Ada."));
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(result.errors[0].kind, ErrorKind::UnknownFunction(ref f) if f == "weekday"));
}

#[test]
fn no_literal_variant_matches_both() {
    let result = mf2::format(
        ".match {$a} {$b} yes yes {{X}} * * {{Y}}",
        &input(&[("a", Value::from("no")), ("b", Value::from("no"))]),
    )
    .unwrap();
    assert_eq!(result.output, "Y");
}

// =============================================================================
// Error Tiers
// =============================================================================

#[test]
fn syntax_errors_fail_the_call() {
    let err = mf2::format("Hello, {$name", &Input::new()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Syntax);
}

#[test]
fn data_model_errors_fail_the_call() {
    let err = mf2::format(".match {$n :integer} 1 {{one}}", &Input::new()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::DataModel);
    assert_eq!(err.kind, ErrorKind::MissingFallbackVariant);
}

#[test]
fn resolution_errors_travel_with_output() {
    let result = mf2::format("{$missing} and {|x| :number}", &Input::new()).unwrap();
    assert_eq!(result.output, "{$missing} and {|x|}");
    let categories: Vec<_> = result.errors.iter().map(mf2::Error::category).collect();
    assert_eq!(
        categories,
        vec![ErrorCategory::Resolution, ErrorCategory::MessageFunction]
    );
}

// =============================================================================
// Configuration and Parts
// =============================================================================

#[test]
fn locale_drives_plural_rules() {
    let source = ".input {$n :integer} .match {$n} one {{one}} few {{few}} many {{many}} * {{other}}";
    let message = mf2::parse_and_validate(source).unwrap();
    let registry = mf2::stdlib::standard_registry();

    let english = Resolver::new(&registry);
    let polish = Resolver::with_config(&registry, ResolveConfig::new().with_locale(langid!("pl")));

    let n3 = input(&[("n", Value::from(3))]);
    let n5 = input(&[("n", Value::from(5))]);
    assert_eq!(english.format(&message, &n3).output, "other");
    assert_eq!(polish.format(&message, &n3).output, "few");
    assert_eq!(polish.format(&message, &n5).output, "many");
}

#[test]
fn bidi_isolation_wraps_placeholders() {
    let message = mf2::parse_and_validate("{$name} wrote {$n :integer} posts").unwrap();
    let registry = mf2::stdlib::standard_registry();
    let config = ResolveConfig::new().with_bidi_isolation(BidiIsolation::Isolate);
    let result = Resolver::with_config(&registry, config)
        .format(&message, &input(&[("name", Value::from("שלום")), ("n", Value::from(2))]));
    assert_eq!(result.output, "\u{2068}שלום\u{2069} wrote \u{2068}2\u{2069} posts");
}

#[test]
fn format_to_parts_keeps_markup() {
    let result = mf2::format_to_parts("Click {#link href=$url}here{/link}.", &input(&[(
        "url",
        Value::from("https://example.com"),
    )]))
    .unwrap();
    assert_eq!(result.output.len(), 5);
    match &result.output[1] {
        FormattedPart::Markup { name, options, .. } => {
            assert_eq!(name, "link");
            assert_eq!(options.get("href"), Some(&Value::from("https://example.com")));
        }
        other => panic!("expected markup, got {other:?}"),
    }

    let text = mf2::format("Click {#link href=$url}here{/link}.", &input(&[(
        "url",
        Value::from("https://example.com"),
    )]))
    .unwrap();
    assert_eq!(text.output, "Click here.");
}

#[test]
fn parsed_message_is_reusable() {
    let message = mf2::parse_and_validate(".input {$n :number} {{{$n}}}").unwrap();
    let registry = mf2::stdlib::standard_registry();
    let resolver = Resolver::new(&registry);
    for n in 0..5 {
        let result = resolver.format(&message, &input(&[("n", Value::from(n))]));
        assert_eq!(result.output, n.to_string());
    }
}
