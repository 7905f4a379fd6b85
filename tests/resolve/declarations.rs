//! Integration tests for declaration binding

use mf2_foundation::{ErrorKind, Value};
use mf2_resolve::Input;

use crate::{format, input};

#[test]
fn input_declaration_annotates_variable() {
    let result = format(
        ".input {$n :number minimumFractionDigits=2} {{Total: {$n}}}",
        &input(&[("n", Value::from(3))]),
    );
    assert_eq!(result.output, "Total: 3.00");
    assert!(result.is_clean());
}

#[test]
fn local_declarations_see_earlier_ones() {
    let result = format(
        ".local $a = {x :wrap open=|<| close=|>|} .local $b = {$a :wrap open=|(| close=|)|} {{{$a} {$b}}}",
        &Input::new(),
    );
    assert_eq!(result.output, "<x> (x)");
}

#[test]
fn same_function_reannotation_keeps_options() {
    let result = format(
        ".local $x = {5 :number minimumFractionDigits=2} {{{$x} {$x :number maximumFractionDigits=2} {$x :integer}}}",
        &Input::new(),
    );
    assert_eq!(result.output, "5.00 5.00 5");
}

#[test]
fn local_declaration_reads_input() {
    let result = format(
        ".local $greeting = {$name :wrap open=|Dear |} {{{$greeting}, welcome.}}",
        &input(&[("name", Value::from("Ada"))]),
    );
    assert_eq!(result.output, "Dear Ada, welcome.");
}

#[test]
fn failing_declaration_falls_back_everywhere() {
    let result = format(".local $x = {1 :reject} {{a {$x} b {$x :wrap}}}", &Input::new());
    assert_eq!(result.output, "a {$x} b {$x}");
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(result.errors[0].kind, ErrorKind::BadOperand { .. }));
}

#[test]
fn missing_input_declaration() {
    let result = format(".input {$n :number} {{n = {$n}}}", &Input::new());
    assert_eq!(result.output, "n = {$n}");
    assert!(matches!(result.errors[0].kind, ErrorKind::UnresolvedVariable(ref n) if n == "n"));
}
