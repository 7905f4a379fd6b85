//! Core values and error taxonomy for MessageFormat 2.
//!
//! This crate provides:
//! - [`Value`] - Runtime values bound to variables and returned by functions
//! - [`Error`] - Errors with a closed [`ErrorKind`] and attached [`ErrorContext`]
//! - [`ErrorCategory`] - The syntax / data model / resolution / message function tiers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod value;

pub use error::{Error, ErrorCategory, ErrorContext, ErrorKind};
pub use value::Value;

/// Result type for MF2 operations.
pub type Result<T> = std::result::Result<T, Error>;
