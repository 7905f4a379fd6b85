//! Integration tests for the canonical renderer
//!
//! Tests that rendered messages are canonical and parse back to the same model.

use mf2_syntax::{Message, Pattern, parse, parse_and_validate, render};

fn roundtrip(source: &str) -> String {
    let message = parse(source).unwrap();
    let rendered = render(&message);
    assert_eq!(parse(&rendered).unwrap(), message, "{rendered}");
    rendered
}

#[test]
fn canonical_sources_render_unchanged() {
    for source in [
        "Hello, {$name}!",
        "{$n :number minimumFractionDigits=2}",
        "{#b}bold{/b} {#br/}",
        r"\{escaped\} \\",
        ".input {$n :integer} .match {$n} 0 {{no apples}} 1 {{one apple}} * {{{$n} apples}}",
        ".local $x = {|a b| :string} {{{$x}}}",
    ] {
        assert_eq!(roundtrip(source), source);
    }
}

#[test]
fn extra_whitespace_is_normalized() {
    assert_eq!(roundtrip("{  $x   :fn   a = 1  }"), "{$x :fn a=1}");
    assert_eq!(
        roundtrip(".local   $x   =   {1}\n\n{{x}}"),
        ".local $x = {1} {{x}}"
    );
}

#[test]
fn simple_message_starting_with_dot_is_quoted() {
    let message = Message::Simple(Pattern::text(".hidden"));
    assert_eq!(message.render(), "{{.hidden}}");
    assert!(parse_and_validate(&message.render()).is_ok());

    assert_eq!(roundtrip("{{.hidden}}"), "{{.hidden}}");
}

#[test]
fn display_matches_render() {
    let message = parse("Hi {$x :string}").unwrap();
    assert_eq!(message.to_string(), render(&message));
}
