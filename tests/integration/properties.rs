//! Property tests across layers.

use mf2::{Input, Value};
use proptest::prelude::*;

proptest! {
    /// Text without syntax characters formats to itself.
    #[test]
    fn plain_text_formats_to_itself(text in "[a-zA-Z0-9 ,!?'-]{0,40}") {
        prop_assume!(!text.trim_start().starts_with('.'));
        let result = mf2::format(&text, &Input::new()).unwrap();
        prop_assert_eq!(&result.output, &text);
        prop_assert!(result.is_clean());
    }

    /// A string placeholder formats to the bound value.
    #[test]
    fn variable_formats_to_value(value in "[^{}\\\\]{0,20}") {
        let input = Input::from([("v".to_string(), Value::from(value.as_str()))]);
        let result = mf2::format("<{$v :string}>", &input).unwrap();
        prop_assert_eq!(result.output, format!("<{value}>"));
    }

    /// Integer selection always lands on a variant, and on the exact key when present.
    #[test]
    fn integer_selection_is_total(n in -1000i64..1000) {
        let input = Input::from([("n".to_string(), Value::from(n))]);
        let result = mf2::format(".input {$n :integer} .match {$n} 0 {{zero}} one {{one}} * {{other}}", &input).unwrap();
        prop_assert!(result.is_clean());
        if n == 0 {
            prop_assert_eq!(result.output, "zero");
        } else if n == 1 || n == -1 {
            prop_assert_eq!(result.output, "one");
        } else {
            prop_assert_eq!(result.output, "other");
        }
    }

    /// Arbitrary input never panics the whole pipeline.
    #[test]
    fn pipeline_never_panics(source in "[a-z{}$:|.* =#/0-9]{0,40}") {
        let _ = mf2::format(&source, &Input::new());
    }
}
