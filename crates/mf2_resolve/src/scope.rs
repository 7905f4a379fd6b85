//! Variable bindings produced by declarations.
//!
//! A [`Scope`] is a persistent map: binding a name returns a new scope and
//! leaves the old one untouched, so each declaration sees exactly the names
//! bound before it.

use mf2_foundation::Value;

use crate::registry::Options;

/// A function annotation with its options already resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    /// Function identifier, e.g. `number` or `ns:fn`.
    pub name: String,
    /// Resolved option values.
    pub options: Options,
}

impl FunctionCall {
    /// Creates a call with no options.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Options::new(),
        }
    }

    /// Builder method to add an option.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }
}

/// The result of resolving an expression.
///
/// Formatting is deferred: the operand and the function that will format it
/// are kept together so a later annotation or selector can reuse them.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedValue {
    /// The operand, absent for operand-less calls such as `{:now}`.
    pub operand: Option<Value>,
    /// The function that formats and selects on this value.
    pub function: Option<FunctionCall>,
}

impl ResolvedValue {
    /// Creates an unannotated value.
    #[must_use]
    pub fn plain(value: impl Into<Value>) -> Self {
        Self {
            operand: Some(value.into()),
            function: None,
        }
    }

    /// Creates a value formatted by `function`.
    #[must_use]
    pub const fn annotated(operand: Option<Value>, function: FunctionCall) -> Self {
        Self {
            operand,
            function: Some(function),
        }
    }

    /// Returns the operand, or null when there is none.
    #[must_use]
    pub fn operand_or_null(&self) -> Value {
        self.operand.clone().unwrap_or_default()
    }
}

/// What a declared name is bound to.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    /// The declaration resolved successfully.
    Value(ResolvedValue),
    /// The declaration failed; references render this fallback text.
    Fallback(String),
}

/// Persistent map from declared names to bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: im::HashMap<String, Binding>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new scope with `name` bound.
    #[must_use]
    pub fn bind(&self, name: impl Into<String>, binding: Binding) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.insert(name.into(), binding);
        Self { bindings }
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Returns true if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
