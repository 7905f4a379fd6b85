//! Message resolution.
//!
//! The resolver walks a parsed message once per call: declarations are bound
//! in source order, a `.match` picks one variant, and the chosen pattern is
//! formatted part by part. Failures never abort the message. Each failing
//! placeholder is replaced by a fallback such as `{$name}` and the error is
//! collected in the returned [`Resolution`].

use std::collections::HashMap;
use std::fmt;

use mf2_foundation::{Error, ErrorKind, Result, Value};
use mf2_syntax::render::escape_quoted;
use mf2_syntax::{
    Annotation, ComplexBody, Declaration, Expression, FunctionAnnotation, FunctionOption,
    Markup, MarkupKind, Matcher, Message, Operand, Pattern, PatternPart,
};

use crate::config::ResolveConfig;
use crate::registry::{FunctionRegistry, Options};
use crate::scope::{Binding, FunctionCall, ResolvedValue, Scope};
use crate::select;

/// Caller-supplied variable values.
pub type Input = HashMap<String, Value>;

// =============================================================================
// Output
// =============================================================================

/// One piece of a formatted message.
#[derive(Clone, Debug, PartialEq)]
pub enum FormattedPart {
    /// Literal pattern text.
    Text(String),
    /// A placeholder that formatted successfully.
    Expression(String),
    /// A placeholder that failed, rendered as its fallback.
    Fallback(String),
    /// Markup, passed through for the caller to interpret.
    Markup {
        /// Open, close or standalone.
        kind: MarkupKind,
        /// Markup identifier.
        name: String,
        /// Resolved options.
        options: Options,
    },
}

/// The output of a resolution together with every error raised on the way.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution<T> {
    /// The formatted output, with fallbacks in place of failed placeholders.
    pub output: T,
    /// Errors in the order they were raised.
    pub errors: Vec<Error>,
}

impl<T> Resolution<T> {
    /// Returns true if no errors were raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the output, or the first error if any were raised.
    ///
    /// # Errors
    ///
    /// Returns the first error raised during resolution.
    pub fn into_result(self) -> Result<T> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.output),
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves messages against a function registry.
///
/// A resolver holds no per-message state and can format any number of
/// messages.
#[derive(Clone, Debug)]
pub struct Resolver<'r> {
    registry: &'r FunctionRegistry,
    config: ResolveConfig,
}

impl<'r> Resolver<'r> {
    /// Creates a resolver with the default configuration.
    #[must_use]
    pub fn new(registry: &'r FunctionRegistry) -> Self {
        Self::with_config(registry, ResolveConfig::default())
    }

    /// Creates a resolver with the given configuration.
    #[must_use]
    pub const fn with_config(registry: &'r FunctionRegistry, config: ResolveConfig) -> Self {
        Self { registry, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &'r FunctionRegistry {
        self.registry
    }

    /// Formats a message to a string.
    ///
    /// Markup contributes no text. Placeholders are bidi-isolated when the
    /// configuration asks for it.
    #[must_use]
    pub fn format(&self, message: &Message, input: &Input) -> Resolution<String> {
        let Resolution { output: parts, errors } = self.format_to_parts(message, input);

        let mut output = String::new();
        for part in &parts {
            match part {
                FormattedPart::Text(text) => output.push_str(text),
                FormattedPart::Expression(text) | FormattedPart::Fallback(text) => {
                    self.config.bidi_isolation.push_isolated(&mut output, text);
                }
                FormattedPart::Markup { .. } => {}
            }
        }

        Resolution { output, errors }
    }

    /// Formats a message to a sequence of parts.
    #[must_use]
    pub fn format_to_parts(&self, message: &Message, input: &Input) -> Resolution<Vec<FormattedPart>> {
        let mut context = Context {
            registry: self.registry,
            config: &self.config,
            input,
            scope: Scope::new(),
            errors: Vec::new(),
        };

        let output = match context.body(message) {
            Some(pattern) => context.pattern(pattern),
            None => Vec::new(),
        };

        Resolution {
            output,
            errors: context.errors,
        }
    }
}

// =============================================================================
// Per-call state
// =============================================================================

/// State for a single resolution.
///
/// Methods that resolve an expression return `Err(fallback)` after reporting
/// the error that caused it.
struct Context<'a> {
    registry: &'a FunctionRegistry,
    config: &'a ResolveConfig,
    input: &'a Input,
    scope: Scope,
    errors: Vec<Error>,
}

type Resolved = std::result::Result<ResolvedValue, String>;

impl Context<'_> {
    fn report(&mut self, error: Error) {
        tracing::debug!(%error, "resolution error");
        self.errors.push(error);
    }

    /// Binds declarations and returns the pattern to format.
    fn body<'m>(&mut self, message: &'m Message) -> Option<&'m Pattern> {
        match message {
            Message::Simple(pattern) => Some(pattern),
            Message::Complex(complex) => {
                for declaration in &complex.declarations {
                    self.declare(declaration);
                }
                match &complex.body {
                    ComplexBody::QuotedPattern(pattern) => Some(pattern),
                    ComplexBody::Matcher(matcher) => self.select(matcher),
                }
            }
        }
    }

    fn declare(&mut self, declaration: &Declaration) {
        match declaration {
            Declaration::Input(expression) => {
                if let Some(name) = expression.variable_name() {
                    let binding = self.bind(name, expression);
                    self.scope = self.scope.bind(name, binding);
                }
            }
            Declaration::Local {
                variable,
                expression,
            } => {
                let binding = self.bind(&variable.name, expression);
                self.scope = self.scope.bind(variable.name.as_str(), binding);
            }
            Declaration::Reserved(statement) => {
                let error = Error::new(ErrorKind::UnsupportedStatement(format!(
                    ".{}",
                    statement.keyword
                )));
                self.report(error.at_node(declaration.to_string()));
            }
        }
    }

    /// Resolves a declaration's expression.
    ///
    /// The value is formatted once here so that a failing declaration is
    /// reported where it is declared, and every later reference to it renders
    /// as `{$name}`.
    fn bind(&mut self, name: &str, expression: &Expression) -> Binding {
        let value = match self.expression(expression) {
            Ok(value) => value,
            Err(_) => return Binding::Fallback(variable_fallback(name)),
        };

        match self.format_value(&value) {
            Ok(_) => {
                tracing::debug!(name, function = ?value.function.as_ref().map(|f| &f.name), "bound declaration");
                Binding::Value(value)
            }
            Err(error) => {
                self.report(error.at_node(expression.to_string()));
                Binding::Fallback(variable_fallback(name))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Expressions
    // -------------------------------------------------------------------------

    fn expression(&mut self, expression: &Expression) -> Resolved {
        let operand = match &expression.operand {
            Some(Operand::Literal(literal)) => Some(ResolvedValue::plain(Value::string(literal.value()))),
            Some(Operand::Variable(variable)) => Some(self.variable(&variable.name, expression)?),
            None => None,
        };

        match &expression.annotation {
            None => operand.ok_or_else(|| fallback(expression)),
            Some(Annotation::Function(function)) => self.call(function, operand, expression),
            Some(Annotation::PrivateUse(reserved) | Annotation::Reserved(reserved)) => {
                let error = Error::new(ErrorKind::UnsupportedExpression(reserved.start.to_string()));
                self.report(error.at_node(expression.to_string()));
                Err(fallback(expression))
            }
        }
    }

    /// Looks a name up in the declarations first, then in the input.
    fn variable(&mut self, name: &str, node: &dyn fmt::Display) -> Resolved {
        match self.scope.get(name) {
            Some(Binding::Value(value)) => Ok(value.clone()),
            Some(Binding::Fallback(text)) => Err(text.clone()),
            None => match self.input.get(name) {
                Some(value) => Ok(ResolvedValue::plain(value.clone())),
                None => {
                    self.report(Error::unresolved_variable(name).at_node(node.to_string()));
                    Err(variable_fallback(name))
                }
            },
        }
    }

    /// Attaches a function to an operand.
    ///
    /// Re-annotating a value with the function it already carries keeps the
    /// earlier options, overridden by the new ones.
    fn call(
        &mut self,
        function: &FunctionAnnotation,
        operand: Option<ResolvedValue>,
        expression: &Expression,
    ) -> Resolved {
        let name = function.identifier.to_string();
        let options = self.options(&function.options, expression);

        if !self.registry.contains(&name) {
            self.report(Error::unknown_function(&name).at_node(expression.to_string()));
            return Err(fallback(expression));
        }

        let (operand, options) = match operand {
            Some(ResolvedValue {
                operand,
                function: Some(previous),
            }) if previous.name == name => {
                let mut merged = previous.options;
                merged.extend(options);
                (operand, merged)
            }
            Some(value) => (value.operand, options),
            None => (None, options),
        };

        Ok(ResolvedValue::annotated(operand, FunctionCall { name, options }))
    }

    /// Resolves option values. Options whose variable fails to resolve are left out.
    fn options(&mut self, options: &[FunctionOption], node: &dyn fmt::Display) -> Options {
        let mut resolved = Options::new();
        for option in options {
            let value = match &option.value {
                Operand::Literal(literal) => Value::string(literal.value()),
                Operand::Variable(variable) => match self.variable(&variable.name, node) {
                    Ok(value) => value.operand_or_null(),
                    Err(_) => continue,
                },
            };
            resolved.insert(option.identifier.to_string(), value);
        }
        resolved
    }

    fn format_value(&self, value: &ResolvedValue) -> Result<String> {
        let Some(call) = &value.function else {
            return Ok(value.operand_or_null().to_string());
        };
        let function = self
            .registry
            .get(&call.name)
            .ok_or_else(|| Error::unknown_function(&call.name))?;
        let formatted = (function.format)(value.operand.as_ref(), &call.options, &self.config.locale)?;
        Ok(formatted.to_string())
    }

    // -------------------------------------------------------------------------
    // Patterns
    // -------------------------------------------------------------------------

    fn pattern(&mut self, pattern: &Pattern) -> Vec<FormattedPart> {
        pattern
            .parts
            .iter()
            .map(|part| match part {
                PatternPart::Text(text) => FormattedPart::Text(text.clone()),
                PatternPart::Expression(expression) => self.placeholder(expression),
                PatternPart::Markup(markup) => self.markup(markup),
            })
            .collect()
    }

    fn placeholder(&mut self, expression: &Expression) -> FormattedPart {
        let value = match self.expression(expression) {
            Ok(value) => value,
            Err(text) => return FormattedPart::Fallback(text),
        };

        match self.format_value(&value) {
            Ok(text) => FormattedPart::Expression(text),
            Err(error) => {
                self.report(error.at_node(expression.to_string()));
                FormattedPart::Fallback(fallback(expression))
            }
        }
    }

    fn markup(&mut self, markup: &Markup) -> FormattedPart {
        FormattedPart::Markup {
            kind: markup.kind,
            name: markup.identifier.to_string(),
            options: self.options(&markup.options, markup),
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    fn select<'m>(&mut self, matcher: &'m Matcher) -> Option<&'m Pattern> {
        let mut matches = Vec::with_capacity(matcher.selectors.len());
        for (index, selector) in matcher.selectors.iter().enumerate() {
            let keys = select::column_keys(&matcher.variants, index);
            matches.push(self.selector(selector, &keys));
        }

        let Some(index) = select::best_variant(&matcher.variants, &matches) else {
            self.report(Error::new(ErrorKind::MissingFallbackVariant).at_node(matcher.to_string()));
            return None;
        };
        tracing::debug!(variant = index, ?matches, "selected variant");
        matcher.variants.get(index).map(|variant| &variant.pattern)
    }

    /// Returns the keys a selector matched, or `None` if it only matches `*`.
    fn selector(&mut self, selector: &Expression, keys: &[&str]) -> Option<Vec<String>> {
        let value = self.expression(selector).ok()?;

        let select = value
            .function
            .as_ref()
            .and_then(|call| self.registry.get(&call.name))
            .and_then(|function| function.select);
        let (Some(call), Some(select)) = (&value.function, select) else {
            let node = selector.to_string();
            self.report(Error::new(ErrorKind::MissingSelectorAnnotation(node.clone())).at_node(node));
            return None;
        };

        match select(&value.operand_or_null(), &call.options, keys, &self.config.locale) {
            Ok(matched) => Some(matched),
            Err(error) => {
                self.report(error.at_node(selector.to_string()));
                None
            }
        }
    }
}

// =============================================================================
// Fallbacks
// =============================================================================

fn variable_fallback(name: &str) -> String {
    format!("{{${name}}}")
}

/// Text rendered in place of an expression that failed.
fn fallback(expression: &Expression) -> String {
    match (&expression.operand, &expression.annotation) {
        (Some(Operand::Variable(variable)), _) => variable_fallback(&variable.name),
        (Some(Operand::Literal(literal)), _) => format!("{{|{}|}}", escape_quoted(literal.value())),
        (None, Some(Annotation::Function(function))) => format!("{{:{}}}", function.identifier),
        (None, Some(Annotation::PrivateUse(reserved) | Annotation::Reserved(reserved))) => {
            format!("{{{}}}", reserved.start)
        }
        (None, None) => "{\u{FFFD}}".to_string(),
    }
}

/// Resolves a message to a string with the default configuration.
#[must_use]
pub fn resolve(message: &Message, input: &Input, registry: &FunctionRegistry) -> Resolution<String> {
    Resolver::new(registry).format(message, input)
}

/// Resolves a message to parts with the default configuration.
#[must_use]
pub fn format_to_parts(
    message: &Message,
    input: &Input,
    registry: &FunctionRegistry,
) -> Resolution<Vec<FormattedPart>> {
    Resolver::new(registry).format_to_parts(message, input)
}
