//! MF2 - MessageFormat 2 parsing, validation and resolution
//!
//! This crate re-exports all layers of the system for convenient access and
//! adds one-call entry points for the common path from source text to output.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: mf2_stdlib     — :string, :number, :integer
//! Layer 2: mf2_resolve    — Function registry, declarations, selection, formatting
//! Layer 1: mf2_syntax     — Lexer, parser, AST, validator, renderer
//! Layer 0: mf2_foundation — Core types (Value, Error)
//! ```
//!
//! # Example
//!
//! ```
//! use mf2::{Input, Value};
//!
//! let input = Input::from([("name".to_string(), Value::from("Ada"))]);
//! let result = mf2::format("Hello, {$name}!", &input).unwrap();
//! assert_eq!(result.output, "Hello, Ada!");
//! ```

pub use mf2_foundation as foundation;
pub use mf2_resolve as resolve;
pub use mf2_stdlib as stdlib;
pub use mf2_syntax as syntax;

pub use mf2_foundation::{Error, ErrorCategory, ErrorKind, Result, Value};
pub use mf2_resolve::{
    BidiIsolation, FormattedPart, FunctionRegistry, Input, Resolution, ResolveConfig, Resolver,
};
pub use mf2_syntax::{Message, parse, parse_and_validate};

/// Parses, validates and formats `source` with the standard functions.
///
/// # Errors
///
/// Returns a syntax or data model error if `source` is not a valid message.
/// Resolution errors do not fail the call; they are listed in the returned
/// [`Resolution`] next to the output.
pub fn format(source: &str, input: &Input) -> Result<Resolution<String>> {
    let message = parse_and_validate(source)?;
    let registry = mf2_stdlib::standard_registry();
    Ok(Resolver::new(&registry).format(&message, input))
}

/// Parses, validates and formats `source` to parts with the standard functions.
///
/// # Errors
///
/// Returns a syntax or data model error if `source` is not a valid message.
pub fn format_to_parts(source: &str, input: &Input) -> Result<Resolution<Vec<FormattedPart>>> {
    let message = parse_and_validate(source)?;
    let registry = mf2_stdlib::standard_registry();
    Ok(Resolver::new(&registry).format_to_parts(&message, input))
}
