//! Registry of formatting and selection functions.
//!
//! Functions are looked up by identifier (`name` or `namespace:name`) when a
//! placeholder or selector carries a function annotation.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use mf2_foundation::{Result, Value};
use unic_langid::LanguageIdentifier;

/// Resolved option values, keyed by option name.
pub type Options = BTreeMap<String, Value>;

/// Formats an operand (absent for operand-less calls) into a value.
pub type FormatFn = fn(Option<&Value>, &Options, &LanguageIdentifier) -> Result<Value>;

/// Matches a selector value against candidate keys.
///
/// Returns the keys that match, most preferred first.
pub type SelectFn = fn(&Value, &Options, &[&str], &LanguageIdentifier) -> Result<Vec<String>>;

// =============================================================================
// RegistryFunction
// =============================================================================

/// A function available to messages.
#[derive(Clone, Copy)]
pub struct RegistryFunction {
    /// Formatting entry point.
    pub format: FormatFn,
    /// Selection entry point, for functions usable as selectors.
    pub select: Option<SelectFn>,
}

impl RegistryFunction {
    /// Creates a function that can only format.
    #[must_use]
    pub const fn formatter(format: FormatFn) -> Self {
        Self {
            format,
            select: None,
        }
    }

    /// Creates a function that can format and select.
    #[must_use]
    pub const fn selector(format: FormatFn, select: SelectFn) -> Self {
        Self {
            format,
            select: Some(select),
        }
    }

    /// Returns true if this function can drive a `.match`.
    #[must_use]
    pub const fn can_select(&self) -> bool {
        self.select.is_some()
    }
}

impl fmt::Debug for RegistryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryFunction")
            .field("can_select", &self.can_select())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// FunctionRegistry
// =============================================================================

/// Registry for storing and looking up message functions.
#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    /// Map from identifier to function.
    functions: HashMap<String, RegistryFunction>,
}

impl FunctionRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function, replacing any previous entry with the same name.
    pub fn register(&mut self, name: impl Into<String>, function: RegistryFunction) {
        self.functions.insert(name.into(), function);
    }

    /// Registers a format-only function.
    pub fn register_formatter(&mut self, name: impl Into<String>, format: FormatFn) {
        self.register(name, RegistryFunction::formatter(format));
    }

    /// Registers a function that can also select.
    pub fn register_selector(&mut self, name: impl Into<String>, format: FormatFn, select: SelectFn) {
        self.register(name, RegistryFunction::selector(format, select));
    }

    /// Looks up a function by identifier.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegistryFunction> {
        self.functions.get(name)
    }

    /// Returns true if a function with this identifier is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Removes a function, returning it if it was registered.
    pub fn remove(&mut self, name: &str) -> Option<RegistryFunction> {
        self.functions.remove(name)
    }

    /// Returns the registered identifiers in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if no functions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
