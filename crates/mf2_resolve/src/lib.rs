//! Declaration evaluation, expression resolution and variant selection for
//! MessageFormat 2.
//!
//! This crate provides:
//! - [`FunctionRegistry`] - Formatting and selection functions looked up by name
//! - [`Resolver`] - Formats validated messages to strings or [`FormattedPart`]s
//! - [`ResolveConfig`] - Locale and bidi isolation settings
//! - [`Scope`] - Persistent bindings produced by `.input` and `.local`
//!
//! # Example
//!
//! ```
//! use mf2_resolve::{FunctionRegistry, Input, resolve};
//! use mf2_syntax::parse_and_validate;
//!
//! let message = parse_and_validate("Hello, {$name}!").unwrap();
//! let input = Input::from([("name".to_string(), "Ada".into())]);
//! let result = resolve(&message, &input, &FunctionRegistry::new());
//! assert_eq!(result.output, "Hello, Ada!");
//! assert!(result.is_clean());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod select;

pub use config::{BidiIsolation, ResolveConfig};
pub use registry::{FormatFn, FunctionRegistry, Options, RegistryFunction, SelectFn};
pub use resolver::{FormattedPart, Input, Resolution, Resolver, format_to_parts, resolve};
pub use scope::{Binding, FunctionCall, ResolvedValue, Scope};
