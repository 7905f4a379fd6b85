//! Integration tests for Layer 1: Syntax
//!
//! Tests for the lexer, parser, validator and canonical renderer.

mod lexer;
mod render;
mod validate;
