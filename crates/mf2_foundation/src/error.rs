//! Error types for MessageFormat 2 processing.
//!
//! Uses `thiserror` for the closed error taxonomy. Every [`ErrorKind`] belongs
//! to exactly one [`ErrorCategory`], so callers can branch on the tier without
//! inspecting message text.

use std::fmt;

use thiserror::Error;

/// The main error type for MF2 operations.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind}{}", .context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the rendered text of the node that failed.
    ///
    /// Only the innermost node is kept: once set, outer nodes leave it alone.
    #[must_use]
    pub fn at_node(mut self, node: impl Into<String>) -> Self {
        let context = self.context.get_or_insert_with(ErrorContext::new);
        if context.node.is_none() {
            context.node = Some(node.into());
        }
        self
    }

    /// Prepends a path segment, used while unwinding out of nested nodes.
    #[must_use]
    pub fn within(mut self, segment: impl AsRef<str>) -> Self {
        let context = self.context.get_or_insert_with(ErrorContext::new);
        context.path = Some(match context.path.take() {
            Some(path) => format!("{}.{path}", segment.as_ref()),
            None => segment.as_ref().to_string(),
        });
        self
    }

    /// Returns the tier this error belongs to.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns the dotted node path, if one was recorded.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.context.as_ref().and_then(|c| c.path.as_deref())
    }

    /// Creates an unknown function error.
    #[must_use]
    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownFunction(name.into()))
    }

    /// Creates an unresolved variable error.
    #[must_use]
    pub fn unresolved_variable(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedVariable(name.into()))
    }

    /// Creates a bad operand error raised by a message function.
    #[must_use]
    pub fn bad_operand(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadOperand {
            function: function.into(),
            message: message.into(),
        })
    }

    /// Creates a bad option error raised by a message function.
    #[must_use]
    pub fn bad_option(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadOption {
            function: function.into(),
            message: message.into(),
        })
    }

    /// Creates a bad selector error raised by a message function.
    #[must_use]
    pub fn bad_selector(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadSelector {
            function: function.into(),
            message: message.into(),
        })
    }

    /// Creates a bad variant key error raised by a message function.
    #[must_use]
    pub fn bad_variant_key(function: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadVariantKey {
            function: function.into(),
            key: key.into(),
        })
    }
}

/// The four error tiers, in the order a message passes through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCategory {
    /// Malformed source text, raised while lexing or parsing.
    Syntax,
    /// A structurally invalid message, raised by validation.
    DataModel,
    /// A failure to resolve a placeholder, raised while formatting.
    Resolution,
    /// A failure reported by a registry function.
    MessageFunction,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Syntax => "syntax error",
            Self::DataModel => "data model error",
            Self::Resolution => "resolution error",
            Self::MessageFunction => "message function error",
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character or sequence not legal where it appeared.
    #[error("syntax error at {line}:{column}: {message}")]
    InvalidSyntax {
        /// Description of the problem.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        source_line: String,
    },

    /// A token that the grammar does not allow at this point.
    #[error(
        "syntax error at {line}:{column}: expected {}, found {found}",
        expected.join(" or ")
    )]
    UnexpectedToken {
        /// Every token kind that would have been accepted.
        expected: Vec<String>,
        /// The token kind that was encountered.
        found: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        source_line: String,
    },

    /// An identifier or variable with an empty name.
    #[error("empty name")]
    EmptyName,

    /// A number literal that is NaN or infinite.
    #[error("number literal is not finite: {0}")]
    NonFiniteNumber(String),

    /// An expression with neither operand nor annotation.
    #[error("expression has neither operand nor annotation")]
    EmptyExpression,

    /// An `.input` declaration whose operand is not a variable.
    #[error("input declaration operand must be a variable")]
    InvalidInputDeclaration,

    /// A matcher without selectors.
    #[error("matcher has no selectors")]
    MissingSelector,

    /// A matcher without variants.
    #[error("matcher has no variants")]
    MissingVariant,

    /// A variant whose key count differs from the selector count.
    #[error("variant key mismatch: expected {expected} keys, got {actual}")]
    VariantKeyMismatch {
        /// Number of selectors in the matcher.
        expected: usize,
        /// Number of keys in the variant.
        actual: usize,
    },

    /// A matcher in which no variant is made only of catch-all keys.
    #[error("missing fallback variant")]
    MissingFallbackVariant,

    /// A variable bound twice, or bound after an earlier declaration used it.
    #[error("duplicate declaration: ${0}")]
    DuplicateDeclaration(String),

    /// Two options with the same identifier in one annotation.
    #[error("duplicate option name: {0}")]
    DuplicateOptionName(String),

    /// Two variants with identical key lists.
    #[error("duplicate variant: {0}")]
    DuplicateVariant(String),

    /// A markup-close node carrying options.
    #[error("markup close {0} must not have options")]
    MarkupCloseWithOptions(String),

    /// A function annotation that is not in the registry.
    #[error("unknown function: :{0}")]
    UnknownFunction(String),

    /// A variable that is neither declared nor supplied as input.
    #[error("unresolved variable: ${0}")]
    UnresolvedVariable(String),

    /// A reserved or private-use annotation.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// A reserved statement.
    #[error("unsupported statement: {0}")]
    UnsupportedStatement(String),

    /// A selector that does not resolve through a selection-capable function.
    #[error("missing selector annotation: {0}")]
    MissingSelectorAnnotation(String),

    /// A function rejected its operand.
    #[error("bad operand for :{function}: {message}")]
    BadOperand {
        /// The function identifier.
        function: String,
        /// Description of the problem.
        message: String,
    },

    /// A function rejected one of its options.
    #[error("bad option for :{function}: {message}")]
    BadOption {
        /// The function identifier.
        function: String,
        /// Description of the problem.
        message: String,
    },

    /// A function failed while selecting.
    #[error("bad selector :{function}: {message}")]
    BadSelector {
        /// The function identifier.
        function: String,
        /// Description of the problem.
        message: String,
    },

    /// A variant key the selector function cannot interpret.
    #[error("bad variant key for :{function}: {key}")]
    BadVariantKey {
        /// The function identifier.
        function: String,
        /// The offending key.
        key: String,
    },
}

impl ErrorKind {
    /// Returns the tier this kind belongs to.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSyntax { .. } | Self::UnexpectedToken { .. } => ErrorCategory::Syntax,
            Self::EmptyName
            | Self::NonFiniteNumber(_)
            | Self::EmptyExpression
            | Self::InvalidInputDeclaration
            | Self::MissingSelector
            | Self::MissingVariant
            | Self::VariantKeyMismatch { .. }
            | Self::MissingFallbackVariant
            | Self::DuplicateDeclaration(_)
            | Self::DuplicateOptionName(_)
            | Self::DuplicateVariant(_)
            | Self::MarkupCloseWithOptions(_) => ErrorCategory::DataModel,
            Self::UnknownFunction(_)
            | Self::UnresolvedVariable(_)
            | Self::UnsupportedExpression(_)
            | Self::UnsupportedStatement(_)
            | Self::MissingSelectorAnnotation(_) => ErrorCategory::Resolution,
            Self::BadOperand { .. }
            | Self::BadOption { .. }
            | Self::BadSelector { .. }
            | Self::BadVariantKey { .. } => ErrorCategory::MessageFunction,
        }
    }
}

/// Context about where an error occurred.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Dotted path to the failing node, e.g. `complexMessage.matcher.variant[2]`.
    pub path: Option<String>,
    /// The failing node rendered as MF2 text.
    pub node: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the rendered node text.
    #[must_use]
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        if let Some(path) = &self.path {
            write!(f, "at {path}")?;
            wrote = true;
        }
        if let Some(node) = &self.node {
            if wrote {
                f.write_str(": ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
