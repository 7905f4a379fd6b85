//! Structural validation of parsed messages.
//!
//! Validation walks the tree depth-first and returns the first violation. The
//! failing node's rendered text is attached where the violation is found and
//! each enclosing node prepends its path segment on the way out, giving paths
//! such as `complexMessage.matcher.variant[2].literalKey[0]`.

use std::collections::HashSet;
use std::fmt::Display;

use mf2_foundation::{Error, ErrorKind, Result};

use crate::ast::{
    Annotation, Attribute, ComplexBody, ComplexMessage, Declaration, Expression,
    FunctionOption, Identifier, Literal, Markup, MarkupKind, Matcher, Message, Operand, Pattern,
    PatternPart, Variable, VariantKey,
};

impl Message {
    /// Checks every structural invariant of this message.
    ///
    /// # Errors
    /// Returns the first data model error found, with the node path and the
    /// failing node's rendered text in its context.
    pub fn validate(&self) -> Result<()> {
        let result = match self {
            Self::Simple(pattern) => validate_pattern(pattern).map_err(|e| e.within("simpleMessage")),
            Self::Complex(complex) => {
                validate_complex(complex).map_err(|e| e.within("complexMessage"))
            }
        };
        if let Err(error) = &result {
            tracing::debug!(%error, "message failed validation");
        }
        result
    }
}

fn fail(kind: ErrorKind, node: &impl Display) -> Error {
    Error::new(kind).at_node(node.to_string())
}

fn validate_complex(complex: &ComplexMessage) -> Result<()> {
    let mut declared: HashSet<&str> = HashSet::new();
    let mut referenced: HashSet<&str> = HashSet::new();

    for (i, declaration) in complex.declarations.iter().enumerate() {
        validate_declaration(declaration, &declared, &referenced)
            .map_err(|e| e.within(format!("declaration[{i}]")))?;
        if let Some(name) = declaration.bound_name() {
            declared.insert(name);
        }
        for expression in declaration.expressions() {
            referenced.extend(expression_variables(expression));
        }
    }

    match &complex.body {
        ComplexBody::QuotedPattern(pattern) => {
            validate_pattern(pattern).map_err(|e| e.within("quotedPattern"))
        }
        ComplexBody::Matcher(matcher) => validate_matcher(matcher).map_err(|e| e.within("matcher")),
    }
}

/// Checks one declaration, including that it does not rebind a name already
/// declared or already used by an earlier declaration.
fn validate_declaration(
    declaration: &Declaration,
    declared: &HashSet<&str>,
    referenced: &HashSet<&str>,
) -> Result<()> {
    match declaration {
        Declaration::Input(expression) => {
            validate_expression(expression).map_err(|e| e.within("expression"))?;
            let Some(Operand::Variable(variable)) = &expression.operand else {
                return Err(fail(ErrorKind::InvalidInputDeclaration, declaration));
            };
            if declared.contains(variable.name.as_str())
                || referenced.contains(variable.name.as_str())
            {
                return Err(fail(
                    ErrorKind::DuplicateDeclaration(variable.name.clone()),
                    declaration,
                ));
            }
        }
        Declaration::Local {
            variable,
            expression,
        } => {
            validate_variable(variable).map_err(|e| e.within("variable"))?;
            validate_expression(expression).map_err(|e| e.within("expression"))?;
            let name = variable.name.as_str();
            if declared.contains(name)
                || referenced.contains(name)
                || expression_variables(expression).any(|v| v == name)
            {
                return Err(fail(
                    ErrorKind::DuplicateDeclaration(variable.name.clone()),
                    declaration,
                ));
            }
        }
        Declaration::Reserved(statement) => {
            if statement.keyword.is_empty() {
                return Err(fail(ErrorKind::EmptyName, declaration));
            }
            for (i, expression) in statement.expressions.iter().enumerate() {
                validate_expression(expression).map_err(|e| e.within(format!("expression[{i}]")))?;
            }
        }
    }
    Ok(())
}

/// Variables an expression reads: its operand and its option values.
fn expression_variables(expression: &Expression) -> impl Iterator<Item = &str> {
    let options = expression
        .function_annotation()
        .map(|f| f.options.as_slice())
        .unwrap_or_default();
    expression
        .operand
        .iter()
        .chain(options.iter().map(|o| &o.value))
        .filter_map(Operand::variable_name)
}

fn validate_matcher(matcher: &Matcher) -> Result<()> {
    if matcher.selectors.is_empty() {
        return Err(fail(ErrorKind::MissingSelector, matcher));
    }
    if matcher.variants.is_empty() {
        return Err(fail(ErrorKind::MissingVariant, matcher));
    }
    if !matcher.variants.iter().any(|v| v.is_fallback()) {
        return Err(fail(ErrorKind::MissingFallbackVariant, matcher));
    }

    for (i, selector) in matcher.selectors.iter().enumerate() {
        validate_expression(selector).map_err(|e| e.within(format!("selector[{i}]")))?;
    }

    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::new();
    for (i, variant) in matcher.variants.iter().enumerate() {
        let within = |e: Error| e.within(format!("variant[{i}]"));
        if variant.keys.len() != matcher.selectors.len() {
            return Err(within(fail(
                ErrorKind::VariantKeyMismatch {
                    expected: matcher.selectors.len(),
                    actual: variant.keys.len(),
                },
                variant,
            )));
        }
        for (j, key) in variant.keys.iter().enumerate() {
            if let VariantKey::Literal(literal) = key {
                validate_literal(literal)
                    .map_err(|e| within(e.within(format!("literalKey[{j}]"))))?;
            }
        }
        // Keys compare by string value, so `1` and `|1|` collide.
        let signature = variant
            .keys
            .iter()
            .map(|key| match key {
                VariantKey::CatchAll => None,
                VariantKey::Literal(literal) => Some(literal.value()),
            })
            .collect();
        if !seen.insert(signature) {
            let keys: Vec<String> = variant.keys.iter().map(ToString::to_string).collect();
            return Err(within(fail(
                ErrorKind::DuplicateVariant(keys.join(" ")),
                variant,
            )));
        }
        validate_pattern(&variant.pattern).map_err(|e| within(e.within("pattern")))?;
    }
    Ok(())
}

fn validate_pattern(pattern: &Pattern) -> Result<()> {
    for (i, part) in pattern.parts.iter().enumerate() {
        match part {
            PatternPart::Text(_) => {}
            PatternPart::Expression(expression) => validate_expression(expression)
                .map_err(|e| e.within(format!("part[{i}]")))?,
            PatternPart::Markup(markup) => {
                validate_markup(markup).map_err(|e| e.within(format!("part[{i}]")))?;
            }
        }
    }
    Ok(())
}

fn validate_expression(expression: &Expression) -> Result<()> {
    if expression.operand.is_none() && expression.annotation.is_none() {
        return Err(fail(ErrorKind::EmptyExpression, expression));
    }
    if let Some(operand) = &expression.operand {
        validate_operand(operand).map_err(|e| e.within("operand"))?;
    }
    if let Some(Annotation::Function(function)) = &expression.annotation {
        validate_identifier(&function.identifier).map_err(|e| e.within("function"))?;
        validate_options(&function.options).map_err(|e| e.within("function"))?;
    }
    validate_attributes(&expression.attributes)
}

fn validate_markup(markup: &Markup) -> Result<()> {
    validate_identifier(&markup.identifier).map_err(|e| e.within("markup"))?;
    if markup.kind == MarkupKind::Close && !markup.options.is_empty() {
        return Err(fail(
            ErrorKind::MarkupCloseWithOptions(markup.identifier.to_string()),
            markup,
        )
        .within("markup"));
    }
    validate_options(&markup.options).map_err(|e| e.within("markup"))?;
    validate_attributes(&markup.attributes).map_err(|e| e.within("markup"))
}

fn validate_options(options: &[FunctionOption]) -> Result<()> {
    let mut names = HashSet::new();
    for (i, option) in options.iter().enumerate() {
        let within = |e: Error| e.within(format!("option[{i}]"));
        validate_identifier(&option.identifier).map_err(within)?;
        validate_operand(&option.value).map_err(within)?;
        if !names.insert(&option.identifier) {
            return Err(within(fail(
                ErrorKind::DuplicateOptionName(option.identifier.to_string()),
                &option.identifier,
            )));
        }
    }
    Ok(())
}

fn validate_attributes(attributes: &[Attribute]) -> Result<()> {
    for (i, attribute) in attributes.iter().enumerate() {
        let within = |e: Error| e.within(format!("attribute[{i}]"));
        validate_identifier(&attribute.identifier).map_err(within)?;
        if let Some(value) = &attribute.value {
            validate_operand(value).map_err(within)?;
        }
    }
    Ok(())
}

fn validate_operand(operand: &Operand) -> Result<()> {
    match operand {
        Operand::Variable(variable) => validate_variable(variable),
        Operand::Literal(literal) => validate_literal(literal),
    }
}

fn validate_variable(variable: &Variable) -> Result<()> {
    if variable.name.is_empty() {
        return Err(Error::new(ErrorKind::EmptyName).at_node("$"));
    }
    Ok(())
}

fn validate_literal(literal: &Literal) -> Result<()> {
    match literal {
        Literal::Number(number) if !number.value.is_finite() => Err(fail(
            ErrorKind::NonFiniteNumber(number.source.clone()),
            literal,
        )),
        _ => Ok(()),
    }
}

fn validate_identifier(identifier: &Identifier) -> Result<()> {
    if identifier.name.is_empty() || identifier.namespace.as_ref().is_some_and(String::is_empty) {
        return Err(fail(ErrorKind::EmptyName, identifier));
    }
    Ok(())
}
