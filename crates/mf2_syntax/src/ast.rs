//! Abstract Syntax Tree for MF2 messages.
//!
//! The AST is plain data: every node kind is a struct or an enum with
//! payloads, so validation and rendering are exhaustive matches. Nodes carry
//! decoded values (escapes removed); [`crate::render`] re-applies escapes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed message.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Message {
    /// A message that is only a pattern.
    Simple(Pattern),
    /// A message with declarations and a quoted pattern or matcher body.
    Complex(ComplexMessage),
}

impl Message {
    /// Returns the declarations of a complex message, or an empty slice.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        match self {
            Self::Simple(_) => &[],
            Self::Complex(complex) => &complex.declarations,
        }
    }

    /// Returns true if this is a simple message.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        matches!(self, Self::Simple(_))
    }
}

/// Declarations followed by exactly one body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComplexMessage {
    /// `.input`, `.local` and reserved statements, in source order.
    pub declarations: Vec<Declaration>,
    /// The message body.
    pub body: ComplexBody,
}

/// The body of a complex message.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComplexBody {
    /// `{{…}}`
    QuotedPattern(Pattern),
    /// `.match` with selectors and variants.
    Matcher(Matcher),
}

/// An ordered sequence of pattern parts.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    /// The parts, in source order.
    pub parts: Vec<PatternPart>,
}

impl Pattern {
    /// Creates a pattern from its parts.
    #[must_use]
    pub fn new(parts: Vec<PatternPart>) -> Self {
        Self { parts }
    }

    /// Creates a pattern holding a single text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![PatternPart::Text(text.into())])
    }

    /// Returns true if the pattern has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// One element of a pattern.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PatternPart {
    /// Literal text, escapes decoded.
    Text(String),
    /// A placeholder expression.
    Expression(Expression),
    /// A markup placeholder.
    Markup(Markup),
}

/// `{ operand? annotation? attributes* }`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Expression {
    /// The value being formatted.
    pub operand: Option<Operand>,
    /// The function or unsupported annotation applied to the operand.
    pub annotation: Option<Annotation>,
    /// `@name` or `@name=value` attributes.
    pub attributes: Vec<Attribute>,
}

impl Expression {
    /// Creates `{$name}`.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::operand(Operand::Variable(Variable::new(name)))
    }

    /// Creates an expression with only a literal operand.
    #[must_use]
    pub fn literal(literal: Literal) -> Self {
        Self::operand(Operand::Literal(literal))
    }

    /// Creates an expression with only an operand.
    #[must_use]
    pub fn operand(operand: Operand) -> Self {
        Self {
            operand: Some(operand),
            annotation: None,
            attributes: Vec::new(),
        }
    }

    /// Creates an expression with only a function annotation.
    #[must_use]
    pub fn function(function: FunctionAnnotation) -> Self {
        Self {
            operand: None,
            annotation: Some(Annotation::Function(function)),
            attributes: Vec::new(),
        }
    }

    /// Sets the function annotation.
    #[must_use]
    pub fn with_function(mut self, function: FunctionAnnotation) -> Self {
        self.annotation = Some(Annotation::Function(function));
        self
    }

    /// Appends an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Returns the function annotation, if any.
    #[must_use]
    pub fn function_annotation(&self) -> Option<&FunctionAnnotation> {
        match &self.annotation {
            Some(Annotation::Function(function)) => Some(function),
            _ => None,
        }
    }

    /// Returns the variable name when the operand is a variable.
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        self.operand.as_ref().and_then(Operand::variable_name)
    }
}

/// An operand, option value or attribute value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operand {
    /// A literal value.
    Literal(Literal),
    /// A variable reference.
    Variable(Variable),
}

impl Operand {
    /// Returns the variable name if this is a variable.
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Variable(variable) => Some(&variable.name),
            Self::Literal(_) => None,
        }
    }
}

/// `$name`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    /// The name without the `$` sigil.
    pub name: String,
}

impl Variable {
    /// Creates a variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A literal value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// `|text|`, escapes decoded.
    Quoted(String),
    /// A bare name.
    Name(String),
    /// A number literal.
    Number(NumberLiteral),
}

impl Literal {
    /// Returns the literal's string value.
    ///
    /// Number literals keep their source spelling, so `1.50` stays `1.50`.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Quoted(s) | Self::Name(s) => s,
            Self::Number(number) => &number.source,
        }
    }

    /// Creates a quoted literal.
    #[must_use]
    pub fn quoted(value: impl Into<String>) -> Self {
        Self::Quoted(value.into())
    }

    /// Creates a name literal.
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }

    /// Creates a number literal from a value.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(NumberLiteral::new(value))
    }
}

/// A number literal with both its value and source spelling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberLiteral {
    /// The numeric value.
    pub value: f64,
    /// The literal as written.
    pub source: String,
}

impl NumberLiteral {
    /// Creates a number literal whose spelling is the value's shortest form.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            source: value.to_string(),
        }
    }

    /// Creates a number literal from grammar-valid source text.
    #[must_use]
    pub fn from_source(source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            value: source.parse().unwrap_or(f64::NAN),
            source,
        }
    }
}

/// A function or unsupported annotation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Annotation {
    /// `:identifier options*`
    Function(FunctionAnnotation),
    /// `^…` or `&…`
    PrivateUse(ReservedAnnotation),
    /// `!…`, `%…`, `*…` and the other reserved sigils.
    Reserved(ReservedAnnotation),
}

/// `:identifier options*`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionAnnotation {
    /// The function name.
    pub identifier: Identifier,
    /// `name=value` options, in source order.
    pub options: Vec<FunctionOption>,
}

impl FunctionAnnotation {
    /// Creates a function annotation without options.
    #[must_use]
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            options: Vec::new(),
        }
    }

    /// Appends an option.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: Operand) -> Self {
        self.options.push(FunctionOption {
            identifier: Identifier::new(name),
            value,
        });
        self
    }
}

/// A private-use or reserved annotation, kept so it can be rendered and
/// reported but never evaluated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReservedAnnotation {
    /// The sigil.
    pub start: char,
    /// The body parts.
    pub body: Vec<ReservedBodyPart>,
}

/// One piece of a reserved body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReservedBodyPart {
    /// Reserved characters and interior whitespace, escapes decoded.
    Text(String),
    /// A quoted literal.
    Quoted(String),
}

/// `identifier = value`, in a function annotation or markup.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionOption {
    /// The option name.
    pub identifier: Identifier,
    /// The option value.
    pub value: Operand,
}

/// `@identifier` or `@identifier=value`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// The attribute name.
    pub identifier: Identifier,
    /// The optional value.
    pub value: Option<Operand>,
}

impl Attribute {
    /// Creates an attribute without a value.
    #[must_use]
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            value: None,
        }
    }
}

/// `[namespace ":"] name`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identifier {
    /// Optional namespace.
    pub namespace: Option<String>,
    /// The name.
    pub name: String,
}

impl Identifier {
    /// Creates an identifier without namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Creates a namespaced identifier.
    #[must_use]
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Splits `ns:name` at the first colon.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.split_once(':') {
            Some((namespace, name)) => Self::namespaced(namespace, name),
            None => Self::new(text),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}:{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// `{#id}`, `{/id}` or `{#id/}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Markup {
    /// Open, close or standalone.
    pub kind: MarkupKind,
    /// The markup name.
    pub identifier: Identifier,
    /// Options; must be empty on close markup.
    pub options: Vec<FunctionOption>,
    /// Attributes.
    pub attributes: Vec<Attribute>,
}

impl Markup {
    /// Creates markup without options or attributes.
    #[must_use]
    pub fn new(kind: MarkupKind, identifier: Identifier) -> Self {
        Self {
            kind,
            identifier,
            options: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

/// The three markup shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarkupKind {
    /// `{#id}`
    Open,
    /// `{/id}`
    Close,
    /// `{#id/}`
    Standalone,
}

/// A declaration or reserved statement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Declaration {
    /// `.input {$name …}`
    Input(Expression),
    /// `.local $name = {…}`
    Local {
        /// The bound variable.
        variable: Variable,
        /// The bound expression.
        expression: Expression,
    },
    /// `.keyword body expressions+`
    Reserved(ReservedStatement),
}

impl Declaration {
    /// Returns the variable this declaration binds, if any.
    #[must_use]
    pub fn bound_name(&self) -> Option<&str> {
        match self {
            Self::Input(expression) => expression.variable_name(),
            Self::Local { variable, .. } => Some(&variable.name),
            Self::Reserved(_) => None,
        }
    }

    /// Returns the expressions this declaration evaluates.
    #[must_use]
    pub fn expressions(&self) -> &[Expression] {
        match self {
            Self::Input(expression) | Self::Local { expression, .. } => {
                std::slice::from_ref(expression)
            }
            Self::Reserved(statement) => &statement.expressions,
        }
    }
}

/// A statement with an unrecognized keyword.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReservedStatement {
    /// The keyword without its leading `.`.
    pub keyword: String,
    /// The body parts.
    pub body: Vec<ReservedBodyPart>,
    /// One or more trailing expressions.
    pub expressions: Vec<Expression>,
}

/// `.match selectors+ variants+`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matcher {
    /// Selector expressions.
    pub selectors: Vec<Expression>,
    /// Variants, in declaration order.
    pub variants: Vec<Variant>,
}

/// `keys+ {{pattern}}`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variant {
    /// One key per selector.
    pub keys: Vec<VariantKey>,
    /// The pattern rendered when this variant is selected.
    pub pattern: Pattern,
}

impl Variant {
    /// Creates a variant.
    #[must_use]
    pub fn new(keys: Vec<VariantKey>, pattern: Pattern) -> Self {
        Self { keys, pattern }
    }

    /// Returns true if every key is `*`.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.keys.iter().all(VariantKey::is_catch_all)
    }

    /// Returns the number of `*` keys.
    #[must_use]
    pub fn catch_all_count(&self) -> usize {
        self.keys.iter().filter(|key| key.is_catch_all()).count()
    }
}

/// A variant key.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VariantKey {
    /// A literal key.
    Literal(Literal),
    /// `*`
    CatchAll,
}

impl VariantKey {
    /// Returns true for `*`.
    #[must_use]
    pub const fn is_catch_all(&self) -> bool {
        matches!(self, Self::CatchAll)
    }
}
