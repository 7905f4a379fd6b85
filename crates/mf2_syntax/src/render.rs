//! Canonical MF2 rendering.
//!
//! Converts AST nodes back to MF2 source text. Output is escape-correct and
//! re-parses to an equivalent message; for source written in canonical form,
//! `render(parse(s)) == s`.
//!
//! # Example
//!
//! ```
//! use mf2_syntax::{parse, render::render};
//!
//! let message = parse("Hello, {$name :string}!").unwrap();
//! assert_eq!(render(&message), "Hello, {$name :string}!");
//! ```

use std::fmt;

use crate::ast::{
    Annotation, Attribute, ComplexBody, ComplexMessage, Declaration, Expression,
    FunctionOption, Literal, Markup, MarkupKind, Matcher, Message, Operand, Pattern, PatternPart,
    ReservedAnnotation, ReservedBodyPart, Variant, VariantKey,
};
use crate::chars::{is_name, is_number_literal, is_whitespace};

/// Renders a message to canonical MF2 text.
#[must_use]
pub fn render(message: &Message) -> String {
    let mut renderer = Renderer::default();
    renderer.message(message);
    renderer.output
}

/// Escapes pattern text: `\`, `{` and `}`.
#[must_use]
pub fn escape_text(text: &str) -> String {
    escape(text, &['\\', '{', '}'])
}

/// Escapes quoted literal content: `\` and `|`.
#[must_use]
pub fn escape_quoted(text: &str) -> String {
    escape(text, &['\\', '|'])
}

/// Escapes reserved body text: `\`, `{`, `|` and `}`.
#[must_use]
pub fn escape_reserved(text: &str) -> String {
    escape(text, &['\\', '{', '|', '}'])
}

fn escape(text: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Writes nodes into an output buffer.
#[derive(Default)]
struct Renderer {
    output: String,
}

impl Renderer {
    fn message(&mut self, message: &Message) {
        match message {
            Message::Simple(pattern) => {
                // Leading `.` would re-read as a complex message.
                let starts_with_dot = match pattern.parts.first() {
                    Some(PatternPart::Text(text)) => {
                        text.trim_start_matches(is_whitespace).starts_with('.')
                    }
                    _ => false,
                };
                if starts_with_dot {
                    self.quoted_pattern(pattern);
                } else {
                    self.pattern(pattern);
                }
            }
            Message::Complex(complex) => self.complex(complex),
        }
    }

    fn complex(&mut self, complex: &ComplexMessage) {
        for declaration in &complex.declarations {
            self.declaration(declaration);
            self.output.push(' ');
        }
        match &complex.body {
            ComplexBody::QuotedPattern(pattern) => self.quoted_pattern(pattern),
            ComplexBody::Matcher(matcher) => self.matcher(matcher),
        }
    }

    fn matcher(&mut self, matcher: &Matcher) {
        self.output.push_str(".match");
        for selector in &matcher.selectors {
            self.output.push(' ');
            self.expression(selector);
        }
        for variant in &matcher.variants {
            self.output.push(' ');
            self.variant(variant);
        }
    }

    fn declaration(&mut self, declaration: &Declaration) {
        match declaration {
            Declaration::Input(expression) => {
                self.output.push_str(".input ");
                self.expression(expression);
            }
            Declaration::Local {
                variable,
                expression,
            } => {
                self.output.push_str(".local $");
                self.output.push_str(&variable.name);
                self.output.push_str(" = ");
                self.expression(expression);
            }
            Declaration::Reserved(statement) => {
                self.output.push('.');
                self.output.push_str(&statement.keyword);
                if !statement.body.is_empty() {
                    self.output.push(' ');
                    self.reserved_body(&statement.body);
                }
                for expression in &statement.expressions {
                    self.output.push(' ');
                    self.expression(expression);
                }
            }
        }
    }

    fn variant(&mut self, variant: &Variant) {
        for key in &variant.keys {
            match key {
                VariantKey::CatchAll => self.output.push('*'),
                VariantKey::Literal(literal) => self.literal(literal),
            }
            self.output.push(' ');
        }
        self.quoted_pattern(&variant.pattern);
    }

    fn quoted_pattern(&mut self, pattern: &Pattern) {
        self.output.push_str("{{");
        self.pattern(pattern);
        self.output.push_str("}}");
    }

    fn pattern(&mut self, pattern: &Pattern) {
        for part in &pattern.parts {
            match part {
                PatternPart::Text(text) => self.output.push_str(&escape_text(text)),
                PatternPart::Expression(expression) => self.expression(expression),
                PatternPart::Markup(markup) => self.markup(markup),
            }
        }
    }

    fn expression(&mut self, expression: &Expression) {
        self.output.push('{');
        if let Some(operand) = &expression.operand {
            self.operand(operand);
        }
        if let Some(annotation) = &expression.annotation {
            if expression.operand.is_some() {
                self.output.push(' ');
            }
            self.annotation(annotation);
        }
        self.attributes(&expression.attributes);
        self.output.push('}');
    }

    fn markup(&mut self, markup: &Markup) {
        self.output.push('{');
        self.output.push(if markup.kind == MarkupKind::Close {
            '/'
        } else {
            '#'
        });
        self.output.push_str(&markup.identifier.to_string());
        self.options(&markup.options);
        self.attributes(&markup.attributes);
        if markup.kind == MarkupKind::Standalone {
            self.output.push('/');
        }
        self.output.push('}');
    }

    fn annotation(&mut self, annotation: &Annotation) {
        match annotation {
            Annotation::Function(function) => {
                self.output.push(':');
                self.output.push_str(&function.identifier.to_string());
                self.options(&function.options);
            }
            Annotation::PrivateUse(ReservedAnnotation { start, body })
            | Annotation::Reserved(ReservedAnnotation { start, body }) => {
                self.output.push(*start);
                self.reserved_body(body);
            }
        }
    }

    fn options(&mut self, options: &[FunctionOption]) {
        for option in options {
            self.output.push(' ');
            self.output.push_str(&option.identifier.to_string());
            self.output.push('=');
            self.operand(&option.value);
        }
    }

    fn attributes(&mut self, attributes: &[Attribute]) {
        for attribute in attributes {
            self.output.push_str(" @");
            self.output.push_str(&attribute.identifier.to_string());
            if let Some(value) = &attribute.value {
                self.output.push('=');
                self.operand(value);
            }
        }
    }

    fn reserved_body(&mut self, body: &[ReservedBodyPart]) {
        for part in body {
            match part {
                ReservedBodyPart::Text(text) => self.output.push_str(&escape_reserved(text)),
                ReservedBodyPart::Quoted(text) => self.quoted(text),
            }
        }
    }

    fn operand(&mut self, operand: &Operand) {
        match operand {
            Operand::Variable(variable) => {
                self.output.push('$');
                self.output.push_str(&variable.name);
            }
            Operand::Literal(literal) => self.literal(literal),
        }
    }

    /// Name and number literals that would not re-lex as such are quoted.
    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Name(name) if is_name(name) => self.output.push_str(name),
            Literal::Number(number) if is_number_literal(&number.source) => {
                self.output.push_str(&number.source);
            }
            _ => self.quoted(literal.value()),
        }
    }

    fn quoted(&mut self, text: &str) {
        self.output.push('|');
        self.output.push_str(&escape_quoted(text));
        self.output.push('|');
    }
}

impl Message {
    /// Renders this message to canonical MF2 text.
    #[must_use]
    pub fn render(&self) -> String {
        render(self)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.pattern(self);
        f.write_str(&renderer.output)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.expression(self);
        f.write_str(&renderer.output)
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.markup(self);
        f.write_str(&renderer.output)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.declaration(self);
        f.write_str(&renderer.output)
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.matcher(self);
        f.write_str(&renderer.output)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.variant(self);
        f.write_str(&renderer.output)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.operand(self);
        f.write_str(&renderer.output)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.literal(self);
        f.write_str(&renderer.output)
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CatchAll => f.write_str("*"),
            Self::Literal(literal) => literal.fmt(f),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.annotation(self);
        f.write_str(&renderer.output)
    }
}
