//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value and the error taxonomy.

mod errors;
mod values;
