//! Reference formatting and selection functions for MessageFormat 2.
//!
//! This crate provides functions organized by category:
//! - `:string` - Plain text formatting and exact key selection
//! - `:number`, `:integer` - Numeric formatting with fraction digit options
//!   and plural, ordinal or exact selection
//!
//! # Example
//!
//! ```
//! use mf2_resolve::{Input, resolve};
//! use mf2_syntax::parse_and_validate;
//!
//! let registry = mf2_stdlib::standard_registry();
//! let message = parse_and_validate(".input {$n :number} .match {$n} one {{one item}} * {{{$n} items}}").unwrap();
//! let input = Input::from([("n".to_string(), 3.into())]);
//! assert_eq!(resolve(&message, &input, &registry).output, "3 items");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

#[allow(clippy::unnecessary_wraps)]
#[allow(clippy::float_cmp)]
mod number;
mod plural;
#[allow(clippy::unnecessary_wraps)]
mod string;

use mf2_resolve::{FunctionRegistry, RegistryFunction};

/// Names of the functions registered by [`register_all`].
pub const FUNCTION_NAMES: [&str; 3] = ["integer", "number", "string"];

/// Registers `:string`, `:number` and `:integer` into `registry`.
pub fn register_all(registry: &mut FunctionRegistry) {
    registry.register(
        "string",
        RegistryFunction::selector(string::string_format, string::string_select),
    );
    registry.register(
        "number",
        RegistryFunction::selector(number::number_format, number::number_select),
    );
    registry.register(
        "integer",
        RegistryFunction::selector(number::integer_format, number::integer_select),
    );
    tracing::trace!(count = FUNCTION_NAMES.len(), "registered standard functions");
}

/// Creates a registry with the standard functions pre-registered.
#[must_use]
pub fn standard_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    register_all(&mut registry);
    registry
}
