//! Integration tests for `.match` variant selection

use mf2_foundation::{ErrorKind, Value};
use mf2_resolve::Input;

use crate::{format, input};

#[test]
fn apples() {
    let source = ".match {$n :integer} 0 {{no apples}} 1 {{one apple}} * {{{$n} apples}}";
    for (n, expected) in [(0, "no apples"), (1, "one apple"), (5, "5 apples"), (42, "42 apples")] {
        let result = format(source, &input(&[("n", Value::from(n))]));
        assert_eq!(result.output, expected);
        assert!(result.is_clean(), "{:?}", result.errors);
    }
}

#[test]
fn exact_number_beats_plural_category() {
    let source = ".input {$n :number} .match {$n} one {{category}} 1 {{exact}} * {{other}}";
    assert_eq!(format(source, &input(&[("n", Value::from(1))])).output, "exact");
}

#[test]
fn plural_category_matches() {
    let source = ".input {$n :number} .match {$n} one {{{$n} file}} * {{{$n} files}}";
    assert_eq!(format(source, &input(&[("n", Value::from(1))])).output, "1 file");
    assert_eq!(format(source, &input(&[("n", Value::from(2))])).output, "2 files");
}

#[test]
fn ordinal_selection() {
    let source = ".input {$n :number select=ordinal} .match {$n} one {{{$n}st}} two {{{$n}nd}} few {{{$n}rd}} * {{{$n}th}}";
    let expect = [(1, "1st"), (2, "2nd"), (3, "3rd"), (4, "4th"), (11, "11th"), (22, "22nd")];
    for (n, expected) in expect {
        assert_eq!(format(source, &input(&[("n", Value::from(n))])).output, expected);
    }
}

#[test]
fn string_selection() {
    let source = ".input {$g :string} .match {$g} masculine {{he}} feminine {{she}} * {{they}}";
    assert_eq!(format(source, &input(&[("g", Value::from("feminine"))])).output, "she");
    assert_eq!(format(source, &input(&[("g", Value::from("other"))])).output, "they");
}

#[test]
fn unannotated_selectors_select_fallback() {
    let result = format(
        ".match {$a} {$b} yes yes {{X}} * * {{Y}}",
        &input(&[("a", Value::from("no")), ("b", Value::from("no"))]),
    );
    assert_eq!(result.output, "Y");
    assert!(
        result
            .errors
            .iter()
            .all(|e| matches!(e.kind, ErrorKind::MissingSelectorAnnotation(_)))
    );
}

#[test]
fn specific_variant_beats_partial_catch_all() {
    let source = ".input {$a :string} .input {$b :string} .match {$a} {$b} x * {{x*}} x y {{xy}} * y {{*y}} * * {{**}}";
    let result = format(source, &input(&[("a", Value::from("x")), ("b", Value::from("y"))]));
    assert_eq!(result.output, "xy");

    let result = format(source, &input(&[("a", Value::from("x")), ("b", Value::from("z"))]));
    assert_eq!(result.output, "x*");

    let result = format(source, &input(&[("a", Value::from("w")), ("b", Value::from("y"))]));
    assert_eq!(result.output, "*y");
}

#[test]
fn equally_specific_variants_prefer_earlier_selector() {
    let source = ".input {$a :string} .input {$b :string} .match {$a} {$b} * y {{*y}} x * {{x*}} * * {{**}}";
    let result = format(source, &input(&[("a", Value::from("x")), ("b", Value::from("y"))]));
    assert_eq!(result.output, "x*");
}

#[test]
fn bad_variant_key_selects_fallback() {
    let result = format(
        ".input {$s :length} .match {$s} 3 {{three}} abc {{letters}} * {{other}}",
        &input(&[("s", Value::from("abc"))]),
    );
    assert_eq!(result.output, "other");
    assert!(matches!(result.errors[0].kind, ErrorKind::BadVariantKey { .. }));
}

#[test]
fn number_keys_must_be_number_literals() {
    for key in ["|+1|", "|1.|", "|.5|", "inf"] {
        let source = format!(".input {{$n :number}} .match {{$n}} {key} {{{{hit}}}} * {{{{other}}}}");
        let result = format(&source, &input(&[("n", Value::from(1))]));
        assert_eq!(result.output, "other", "key {key}");
        assert!(
            matches!(result.errors[0].kind, ErrorKind::BadVariantKey { .. }),
            "key {key}: {:?}",
            result.errors
        );
    }
}

#[test]
fn custom_selector() {
    let result = format(
        ".input {$s :length} .match {$s} 1 {{one char}} 3 {{three chars}} * {{other}}",
        &input(&[("s", Value::from("abc"))]),
    );
    assert_eq!(result.output, "three chars");
    assert!(result.is_clean());
}

#[test]
fn selector_function_error_selects_fallback() {
    let result = format(
        ".match {$n :number} one {{one}} * {{other}}",
        &input(&[("n", Value::from("lots"))]),
    );
    assert_eq!(result.output, "other");
    assert!(matches!(result.errors[0].kind, ErrorKind::BadSelector { .. }));
}

#[test]
fn no_input_needed_for_literal_selector() {
    let result = format(".match {1 :integer} 1 {{one}} * {{other}}", &Input::new());
    assert_eq!(result.output, "one");
}
