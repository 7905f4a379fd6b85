//! Lexer, parser, AST and validator for MessageFormat 2.
//!
//! This crate provides:
//! - [`Lexer`] - Context-sensitive tokenization of MF2 source text
//! - [`Parser`] - Recursive-descent parsing of tokens into a [`Message`]
//! - [`ast`] - The message data model
//! - [`render`] - Canonical re-serialization of messages
//! - [`Message::validate`] - Structural invariant checks
//!
//! # Example
//!
//! ```
//! use mf2_syntax::{Message, parse_and_validate};
//!
//! let message = parse_and_validate(".input {$n :number} {{You have {$n} items}}").unwrap();
//! assert!(!message.is_simple());
//! assert_eq!(message.render(), ".input {$n :number} {{You have {$n} items}}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod chars;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod span;
pub mod token;
mod validate;

pub use ast::{
    Annotation, Attribute, ComplexBody, ComplexMessage, Declaration, Expression,
    FunctionAnnotation, FunctionOption, Identifier, Literal, Markup, MarkupKind, Matcher,
    Message, NumberLiteral, Operand, Pattern, PatternPart, ReservedAnnotation, ReservedBodyPart,
    ReservedStatement, Variable, Variant, VariantKey,
};
pub use lexer::Lexer;
pub use parser::{Parser, parse, parse_and_validate};
pub use render::render;
pub use span::Span;
pub use token::{Token, TokenKind};
