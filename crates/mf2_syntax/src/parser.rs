//! Parser for MF2 messages.
//!
//! The parser walks a materialized token array with an explicit index, so it
//! can step back one token after an optional-whitespace probe and look past
//! `{` to tell markup from an expression. It makes only grammar decisions;
//! structural invariants are checked afterwards by [`Message::validate`].

use mf2_foundation::{Error, ErrorKind, Result};

use crate::ast::{
    Annotation, Attribute, ComplexBody, ComplexMessage, Declaration, Expression,
    FunctionAnnotation, FunctionOption, Identifier, Literal, Markup, MarkupKind, Matcher,
    Message, NumberLiteral, Operand, Pattern, PatternPart, ReservedAnnotation, ReservedBodyPart,
    ReservedStatement, Variable, Variant, VariantKey,
};
use crate::lexer::{Lexer, error_from_token};
use crate::span::Span;
use crate::token::{Token, TokenKind};

const VALUES: [TokenKind; 4] = [
    TokenKind::Variable,
    TokenKind::QuotedLiteral,
    TokenKind::UnquotedLiteral,
    TokenKind::NumberLiteral,
];

const ANNOTATIONS: [TokenKind; 3] = [
    TokenKind::Function,
    TokenKind::ReservedStart,
    TokenKind::PrivateUseStart,
];

const KEYS: [TokenKind; 4] = [
    TokenKind::CatchAllKey,
    TokenKind::QuotedLiteral,
    TokenKind::UnquotedLiteral,
    TokenKind::NumberLiteral,
];

const STATEMENTS: [TokenKind; 5] = [
    TokenKind::InputKeyword,
    TokenKind::LocalKeyword,
    TokenKind::ReservedKeyword,
    TokenKind::MatchKeyword,
    TokenKind::QuotedPatternOpen,
];

/// What an optional-whitespace probe consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gap {
    Absent,
    /// Only bidi marks: fine where whitespace is optional, not where it is
    /// required.
    BidiOnly,
    Space,
}

impl Gap {
    fn consumed(self) -> bool {
        self != Self::Absent
    }

    fn is_space(self) -> bool {
        self == Self::Space
    }
}

/// Parser for MF2 source text.
pub struct Parser<'src> {
    /// Source text (for error messages).
    source: &'src str,
    /// Tokens, always terminated by `Eof`.
    tokens: Vec<Token>,
    /// Index of the current token.
    position: usize,
}

impl<'src> Parser<'src> {
    /// Tokenizes the source and creates a parser over it.
    ///
    /// # Errors
    /// Returns a syntax error if the source cannot be tokenized.
    pub fn new(source: &'src str) -> Result<Self> {
        Ok(Self::from_tokens(source, Lexer::tokenize(source)?))
    }

    /// Creates a parser over already-lexed tokens.
    #[must_use]
    pub fn from_tokens(source: &'src str, mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, "", end_of(source)));
        }
        Self {
            source,
            tokens,
            position: 0,
        }
    }

    /// Parses the whole message.
    ///
    /// # Errors
    /// Returns a syntax error naming the accepted token kinds and the token
    /// actually found.
    pub fn parse(&mut self) -> Result<Message> {
        tracing::trace!(tokens = self.tokens.len(), "parsing message");
        let first = self.peek_non_whitespace().kind;
        if first.is_keyword() || first == TokenKind::QuotedPatternOpen {
            self.parse_complex_message().map(Message::Complex)
        } else {
            self.parse_simple_message().map(Message::Simple)
        }
    }

    // =========================================================================
    // Messages
    // =========================================================================

    fn parse_simple_message(&mut self) -> Result<Pattern> {
        let pattern = self.parse_pattern(TokenKind::Eof)?;
        self.expect(TokenKind::Eof)?;
        Ok(pattern)
    }

    fn parse_complex_message(&mut self) -> Result<ComplexMessage> {
        let mut declarations = Vec::new();
        let body = loop {
            self.skip_whitespace();
            match self.current().kind {
                TokenKind::InputKeyword => declarations.push(self.parse_input()?),
                TokenKind::LocalKeyword => declarations.push(self.parse_local()?),
                TokenKind::ReservedKeyword => {
                    declarations.push(Declaration::Reserved(self.parse_reserved_statement()?));
                }
                TokenKind::MatchKeyword => break ComplexBody::Matcher(self.parse_matcher()?),
                TokenKind::QuotedPatternOpen => {
                    break ComplexBody::QuotedPattern(self.parse_quoted_pattern()?);
                }
                _ => return Err(self.unexpected(&STATEMENTS)),
            }
        };
        self.skip_whitespace();
        self.expect(TokenKind::Eof)?;
        Ok(ComplexMessage { declarations, body })
    }

    fn parse_pattern(&mut self, end: TokenKind) -> Result<Pattern> {
        let mut parts = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::Text => {
                    parts.push(PatternPart::Text(self.current().value.clone()));
                    self.next();
                }
                TokenKind::ExpressionOpen => parts.push(self.parse_placeholder()?),
                kind if kind == end => return Ok(Pattern::new(parts)),
                _ => {
                    return Err(self.unexpected(&[
                        TokenKind::Text,
                        TokenKind::ExpressionOpen,
                        end,
                    ]));
                }
            }
        }
    }

    fn parse_quoted_pattern(&mut self) -> Result<Pattern> {
        self.expect(TokenKind::QuotedPatternOpen)?;
        let pattern = self.parse_pattern(TokenKind::QuotedPatternClose)?;
        self.expect(TokenKind::QuotedPatternClose)?;
        Ok(pattern)
    }

    /// Parses `{…}` in a pattern, looking past the brace to choose between
    /// markup and an expression.
    fn parse_placeholder(&mut self) -> Result<PatternPart> {
        self.next();
        let kind = self.peek_non_whitespace().kind;
        self.backup();
        match kind {
            TokenKind::MarkupOpen | TokenKind::MarkupClose => {
                self.parse_markup().map(PatternPart::Markup)
            }
            _ => self.parse_expression().map(PatternPart::Expression),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_input(&mut self) -> Result<Declaration> {
        self.next(); // .input
        self.skip_whitespace();
        if self.current().kind != TokenKind::ExpressionOpen {
            return Err(self.unexpected(&[TokenKind::ExpressionOpen]));
        }
        self.next();
        let operand = self.peek_non_whitespace().clone();
        self.backup();
        if operand.kind != TokenKind::Variable {
            return Err(self.unexpected_at(&operand, &[TokenKind::Variable]));
        }
        Ok(Declaration::Input(self.parse_expression()?))
    }

    fn parse_local(&mut self) -> Result<Declaration> {
        self.next(); // .local
        if !self.eat_whitespace().is_space() {
            return Err(self.unexpected(&[TokenKind::Whitespace]));
        }
        let variable = Variable::new(self.expect(TokenKind::Variable)?.value);
        self.skip_whitespace();
        self.expect(TokenKind::Operator)?;
        self.skip_whitespace();
        let expression = self.parse_expression()?;
        Ok(Declaration::Local {
            variable,
            expression,
        })
    }

    fn parse_reserved_statement(&mut self) -> Result<ReservedStatement> {
        let keyword = self.expect(TokenKind::ReservedKeyword)?.value;
        let body = self.parse_reserved_body();
        let mut expressions = Vec::new();
        loop {
            let gap = self.eat_whitespace();
            if self.current().kind == TokenKind::ExpressionOpen {
                expressions.push(self.parse_expression()?);
            } else {
                if gap.consumed() {
                    self.backup();
                }
                break;
            }
        }
        if expressions.is_empty() {
            return Err(self.unexpected(&[TokenKind::ExpressionOpen]));
        }
        Ok(ReservedStatement {
            keyword,
            body,
            expressions,
        })
    }

    // =========================================================================
    // Matcher
    // =========================================================================

    fn parse_matcher(&mut self) -> Result<Matcher> {
        self.next(); // .match
        let mut selectors = Vec::new();
        loop {
            let gap = self.eat_whitespace();
            if self.current().kind == TokenKind::ExpressionOpen {
                selectors.push(self.parse_expression()?);
            } else {
                if gap.consumed() {
                    self.backup();
                }
                break;
            }
        }
        if selectors.is_empty() {
            return Err(self.unexpected(&[TokenKind::ExpressionOpen]));
        }

        let mut variants = Vec::new();
        loop {
            self.skip_whitespace();
            if self.current().kind == TokenKind::Eof {
                break;
            }
            variants.push(self.parse_variant()?);
        }
        if variants.is_empty() {
            return Err(self.unexpected(&KEYS));
        }
        Ok(Matcher {
            selectors,
            variants,
        })
    }

    fn parse_variant(&mut self) -> Result<Variant> {
        let mut keys = vec![self.parse_key()?];
        loop {
            let gap = self.eat_whitespace();
            match self.current().kind {
                TokenKind::QuotedPatternOpen => break,
                kind if KEYS.contains(&kind) => {
                    if !gap.is_space() {
                        return Err(self.unexpected(&[TokenKind::Whitespace]));
                    }
                    keys.push(self.parse_key()?);
                }
                _ => {
                    let mut expected = KEYS.to_vec();
                    expected.push(TokenKind::QuotedPatternOpen);
                    return Err(self.unexpected(&expected));
                }
            }
        }
        let pattern = self.parse_quoted_pattern()?;
        Ok(Variant { keys, pattern })
    }

    fn parse_key(&mut self) -> Result<VariantKey> {
        if self.current().kind == TokenKind::CatchAllKey {
            self.next();
            return Ok(VariantKey::CatchAll);
        }
        match literal_from(self.current()) {
            Some(literal) => {
                self.next();
                Ok(VariantKey::Literal(literal))
            }
            None => Err(self.unexpected(&KEYS)),
        }
    }

    // =========================================================================
    // Expressions and markup
    // =========================================================================

    /// Parses `{ [operand] [s annotation] *(s attribute) }`.
    fn parse_expression(&mut self) -> Result<Expression> {
        self.expect(TokenKind::ExpressionOpen)?;
        self.skip_whitespace();

        let operand = self.parse_operand();
        let annotation = if operand.is_some() {
            let gap = self.eat_whitespace();
            if self.current().kind.is_annotation_start() {
                if !gap.is_space() {
                    return Err(self.unexpected(&[TokenKind::Whitespace]));
                }
                Some(self.parse_annotation()?)
            } else {
                if gap.consumed() {
                    self.backup();
                }
                None
            }
        } else if self.current().kind.is_annotation_start() {
            Some(self.parse_annotation()?)
        } else {
            return Err(self.unexpected(&[&VALUES[..], &ANNOTATIONS[..]].concat()));
        };

        let attributes = self.parse_attributes()?;
        self.skip_whitespace();

        if self.current().kind != TokenKind::ExpressionClose {
            let mut expected = Vec::new();
            match &annotation {
                None => expected.extend(ANNOTATIONS),
                Some(Annotation::Function(_)) => expected.push(TokenKind::Option),
                Some(_) => {}
            }
            expected.extend([TokenKind::Attribute, TokenKind::ExpressionClose]);
            return Err(self.unexpected(&expected));
        }
        self.next();

        Ok(Expression {
            operand,
            annotation,
            attributes,
        })
    }

    fn parse_annotation(&mut self) -> Result<Annotation> {
        let token = self.current().clone();
        self.next();
        match token.kind {
            TokenKind::Function => Ok(Annotation::Function(FunctionAnnotation {
                identifier: Identifier::parse(&token.value),
                options: self.parse_options()?,
            })),
            TokenKind::ReservedStart | TokenKind::PrivateUseStart => {
                let reserved = ReservedAnnotation {
                    start: token.value.chars().next().unwrap_or('!'),
                    body: self.parse_reserved_body(),
                };
                Ok(if token.kind == TokenKind::ReservedStart {
                    Annotation::Reserved(reserved)
                } else {
                    Annotation::PrivateUse(reserved)
                })
            }
            _ => Err(self.unexpected_at(&token, &ANNOTATIONS)),
        }
    }

    /// Parses `*(s option)`.
    fn parse_options(&mut self) -> Result<Vec<FunctionOption>> {
        let mut options = Vec::new();
        loop {
            let gap = self.eat_whitespace();
            if self.current().kind != TokenKind::Option {
                if gap.consumed() {
                    self.backup();
                }
                return Ok(options);
            }
            if !gap.is_space() {
                return Err(self.unexpected(&[TokenKind::Whitespace]));
            }
            let identifier = Identifier::parse(&self.current().value);
            self.next();
            self.skip_whitespace();
            self.expect(TokenKind::Operator)?;
            self.skip_whitespace();
            let value = self.parse_value()?;
            options.push(FunctionOption { identifier, value });
        }
    }

    /// Parses `*(s attribute)`.
    fn parse_attributes(&mut self) -> Result<Vec<Attribute>> {
        let mut attributes = Vec::new();
        loop {
            let gap = self.eat_whitespace();
            if self.current().kind != TokenKind::Attribute {
                if gap.consumed() {
                    self.backup();
                }
                return Ok(attributes);
            }
            if !gap.is_space() {
                return Err(self.unexpected(&[TokenKind::Whitespace]));
            }
            let identifier = Identifier::parse(&self.current().value);
            self.next();

            let gap = self.eat_whitespace();
            let value = if self.current().kind == TokenKind::Operator {
                self.next();
                self.skip_whitespace();
                Some(self.parse_value()?)
            } else {
                if gap.consumed() {
                    self.backup();
                }
                None
            };
            attributes.push(Attribute { identifier, value });
        }
    }

    /// Collects reserved body tokens. Leading whitespace is dropped; trailing
    /// whitespace is left for the caller.
    fn parse_reserved_body(&mut self) -> Vec<ReservedBodyPart> {
        let mut parts: Vec<ReservedBodyPart> = Vec::new();
        let mut pending = String::new();
        let mut last_was_whitespace = false;
        loop {
            let token = self.current();
            match token.kind {
                TokenKind::Whitespace => {
                    if !parts.is_empty() {
                        pending.push_str(&token.value);
                    }
                    last_was_whitespace = true;
                }
                TokenKind::ReservedBody => {
                    let text = std::mem::take(&mut pending) + &token.value;
                    match parts.last_mut() {
                        Some(ReservedBodyPart::Text(last)) => last.push_str(&text),
                        _ => parts.push(ReservedBodyPart::Text(text)),
                    }
                    last_was_whitespace = false;
                }
                TokenKind::QuotedLiteral => {
                    let value = token.value.clone();
                    if !pending.is_empty() {
                        let space = std::mem::take(&mut pending);
                        match parts.last_mut() {
                            Some(ReservedBodyPart::Text(last)) => last.push_str(&space),
                            _ => parts.push(ReservedBodyPart::Text(space)),
                        }
                    }
                    parts.push(ReservedBodyPart::Quoted(value));
                    last_was_whitespace = false;
                }
                _ => break,
            }
            self.next();
        }
        if last_was_whitespace {
            self.backup();
        }
        parts
    }

    /// Parses `{ # id options attributes [/] }` or `{ / id options attributes }`.
    fn parse_markup(&mut self) -> Result<Markup> {
        self.expect(TokenKind::ExpressionOpen)?;
        self.skip_whitespace();
        let open = self.current().clone();
        let kind = match open.kind {
            TokenKind::MarkupOpen => MarkupKind::Open,
            TokenKind::MarkupClose => MarkupKind::Close,
            _ => return Err(self.unexpected(&[TokenKind::MarkupOpen, TokenKind::MarkupClose])),
        };
        self.next();
        let options = self.parse_options()?;
        let attributes = self.parse_attributes()?;
        self.skip_whitespace();

        let kind = if kind == MarkupKind::Open && self.current().kind == TokenKind::MarkupSelfClose {
            self.next();
            MarkupKind::Standalone
        } else {
            kind
        };
        if self.current().kind != TokenKind::ExpressionClose {
            let mut expected = vec![TokenKind::Option, TokenKind::Attribute];
            if kind == MarkupKind::Open {
                expected.push(TokenKind::MarkupSelfClose);
            }
            expected.push(TokenKind::ExpressionClose);
            return Err(self.unexpected(&expected));
        }
        self.next();

        Ok(Markup {
            kind,
            identifier: Identifier::parse(&open.value),
            options,
            attributes,
        })
    }

    /// Consumes a literal or variable if one is current.
    fn parse_operand(&mut self) -> Option<Operand> {
        let token = self.current();
        let operand = if token.kind == TokenKind::Variable {
            Operand::Variable(Variable::new(token.value.clone()))
        } else {
            Operand::Literal(literal_from(token)?)
        };
        self.next();
        Some(operand)
    }

    fn parse_value(&mut self) -> Result<Operand> {
        match self.parse_operand() {
            Some(value) => Ok(value),
            None => Err(self.unexpected(&VALUES)),
        }
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    fn current(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn next(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    fn backup(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Returns the first non-whitespace token at or after the cursor.
    fn peek_non_whitespace(&self) -> &Token {
        self.tokens[self.position..]
            .iter()
            .find(|t| t.kind != TokenKind::Whitespace)
            .unwrap_or_else(|| self.current())
    }

    /// Consumes one whitespace token, if present.
    fn eat_whitespace(&mut self) -> Gap {
        let token = self.current();
        if token.kind != TokenKind::Whitespace {
            return Gap::Absent;
        }
        let gap = if token.is_required_whitespace() {
            Gap::Space
        } else {
            Gap::BidiOnly
        };
        self.next();
        gap
    }

    fn skip_whitespace(&mut self) {
        self.eat_whitespace();
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current().kind == kind {
            let token = self.current().clone();
            self.next();
            Ok(token)
        } else {
            Err(self.unexpected(&[kind]))
        }
    }

    /// Creates an error for the current token.
    fn unexpected(&self, expected: &[TokenKind]) -> Error {
        self.unexpected_at(self.current(), expected)
    }

    /// Creates an error naming every acceptable kind and the token found.
    fn unexpected_at(&self, token: &Token, expected: &[TokenKind]) -> Error {
        if token.kind == TokenKind::Error {
            return error_from_token(self.source, token);
        }
        let name = token.kind.name();
        let found = if token.value.is_empty() || name.starts_with('\'') {
            name.to_string()
        } else {
            format!("{name} {:?}", token.value)
        };
        Error::new(ErrorKind::UnexpectedToken {
            expected: expected.iter().map(|k| k.name().to_string()).collect(),
            found,
            line: token.span.line,
            column: token.span.column,
            source_line: token.span.source_line(self.source).to_string(),
        })
    }
}

fn literal_from(token: &Token) -> Option<Literal> {
    match token.kind {
        TokenKind::QuotedLiteral => Some(Literal::Quoted(token.value.clone())),
        TokenKind::UnquotedLiteral => Some(Literal::Name(token.value.clone())),
        TokenKind::NumberLiteral => Some(Literal::Number(NumberLiteral::from_source(
            token.value.clone(),
        ))),
        _ => None,
    }
}

/// A point span at the end of the source.
fn end_of(source: &str) -> Span {
    let line = u32::try_from(source.matches('\n').count() + 1).unwrap_or(u32::MAX);
    let last_line = source.rsplit('\n').next().unwrap_or(source);
    let column = u32::try_from(last_line.chars().count() + 1).unwrap_or(u32::MAX);
    Span::point(source.len(), line, column)
}

/// Parses MF2 source text into a message without validating it.
///
/// # Errors
/// Returns a syntax error if the source is not well formed.
pub fn parse(source: &str) -> Result<Message> {
    Parser::new(source)?.parse()
}

/// Parses MF2 source text and checks its structural invariants.
///
/// # Errors
/// Returns a syntax error if the source is not well formed, or a data model
/// error if the message violates an invariant.
pub fn parse_and_validate(source: &str) -> Result<Message> {
    let message = parse(source)?;
    message.validate()?;
    Ok(message)
}
