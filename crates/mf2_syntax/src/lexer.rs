//! Lexer for MF2 source text.
//!
//! MF2 is context sensitive: `{` opens an expression in a pattern but may open
//! a quoted pattern in a complex message header, a bare name is an option
//! identifier after a function but a literal after `=`, and `.` only starts a
//! complex message at the very beginning. The lexer keeps that context as flag
//! fields and picks the next-token routine from the [`Mode`] they imply.
//!
//! Lexing is fail-fast: the first illegal character produces an
//! [`TokenKind::Error`] token and every later call returns end of input.

use mf2_foundation::{Error, ErrorKind, Result};

use crate::chars::{
    is_escapable, is_name_char, is_name_start, is_private_start, is_quoted_char,
    is_reserved_char, is_reserved_start, is_text_char, is_whitespace,
};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Which next-token routine applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Nothing lexed yet; simple vs. complex is undecided.
    MessageStart,
    /// Pattern text of a simple message or a quoted pattern.
    Pattern,
    /// Declarations, selectors and variant keys of a complex message.
    ComplexHeader,
    /// Between `{` and `}`.
    Expression,
    /// The body of a reserved annotation or reserved statement.
    ReservedBody,
}

/// A lexing failure, positioned at the offending character.
struct Fail {
    message: String,
    span: Span,
}

type LexResult = std::result::Result<(TokenKind, String), Fail>;

/// Lexer for MF2 source text.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,

    at_message_start: bool,
    is_complex: bool,
    in_quoted_pattern: bool,
    in_expression: bool,
    /// No significant token yet since the last `{`; markup sigils are allowed.
    at_expression_start: bool,
    /// After a function or markup identifier, bare names are option identifiers.
    in_function_or_markup: bool,
    in_markup: bool,
    /// After `=`, the next bare name is a literal.
    expect_option_value: bool,
    in_reserved_body: bool,
    /// End of input or an error has been emitted.
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
            at_message_start: true,
            is_complex: false,
            in_quoted_pattern: false,
            in_expression: false,
            at_expression_start: false,
            in_function_or_markup: false,
            in_markup: false,
            expect_option_value: false,
            in_reserved_body: false,
            finished: false,
        }
    }

    /// Returns the next token from the source.
    ///
    /// After the end of input or an error token, every call returns `Eof`.
    pub fn next_token(&mut self) -> Token {
        let (start, line, column) = (self.position, self.line, self.column);

        let Some(c) = self.peek().filter(|_| !self.finished) else {
            self.finished = true;
            return Token::new(TokenKind::Eof, "", Span::point(start, line, column));
        };
        let result = match self.mode() {
            Mode::MessageStart => self.lex_message_start(),
            Mode::Pattern => self.lex_pattern(c),
            Mode::ComplexHeader => self.lex_complex_header(c),
            Mode::Expression => self.lex_expression(c),
            Mode::ReservedBody => self.lex_reserved_body(c),
        };

        match result {
            Ok((kind, value)) => Token::new(
                kind,
                value,
                Span::new(start, self.position, line, column),
            ),
            Err(fail) => {
                self.finished = true;
                Token::new(TokenKind::Error, fail.message, fail.span)
            }
        }
    }

    /// Tokenizes the whole source, stopping at the first error.
    ///
    /// The returned vector always ends with an [`TokenKind::Eof`] token.
    ///
    /// # Errors
    /// Returns a syntax error carrying the message and position of the first
    /// illegal character.
    pub fn tokenize(source: &str) -> Result<Vec<Token>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            match token.kind {
                TokenKind::Error => return Err(error_from_token(source, &token)),
                TokenKind::Eof => {
                    tokens.push(token);
                    tracing::trace!(count = tokens.len(), "tokenized message");
                    return Ok(tokens);
                }
                _ => tokens.push(token),
            }
        }
    }

    /// Tokenizes all source and returns every token, including a terminal
    /// error token if one occurs.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = matches!(token.kind, TokenKind::Eof | TokenKind::Error);
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn mode(&self) -> Mode {
        if self.at_message_start {
            Mode::MessageStart
        } else if self.in_reserved_body {
            Mode::ReservedBody
        } else if self.in_expression {
            Mode::Expression
        } else if self.is_complex && !self.in_quoted_pattern {
            Mode::ComplexHeader
        } else {
            Mode::Pattern
        }
    }

    // =========================================================================
    // Mode routines
    // =========================================================================

    /// Decides between a simple and a complex message.
    ///
    /// A message is complex when its first non-whitespace content is `.` or
    /// `{{`. In a simple message, leading whitespace is pattern text.
    fn lex_message_start(&mut self) -> LexResult {
        self.at_message_start = false;
        let significant = self.rest.trim_start_matches(is_whitespace);
        if significant.starts_with('.') || significant.starts_with("{{") {
            self.is_complex = true;
            if significant.len() < self.rest.len() {
                return Ok((TokenKind::Whitespace, self.take_while(is_whitespace)));
            }
            let c = self.peek().unwrap_or('.');
            return self.lex_complex_header(c);
        }
        let c = self.peek().unwrap_or('\0');
        self.lex_pattern(c)
    }

    fn lex_pattern(&mut self, c: char) -> LexResult {
        match c {
            '{' => {
                self.advance();
                self.enter_expression();
                Ok((TokenKind::ExpressionOpen, "{".into()))
            }
            '}' if self.in_quoted_pattern && self.peek_nth(1) == Some('}') => {
                self.advance();
                self.advance();
                self.in_quoted_pattern = false;
                Ok((TokenKind::QuotedPatternClose, "}}".into()))
            }
            '}' => Err(self.fail("unescaped '}' in pattern; write '\\}'")),
            _ => self.lex_text(),
        }
    }

    fn lex_complex_header(&mut self, c: char) -> LexResult {
        match c {
            c if is_whitespace(c) => Ok((TokenKind::Whitespace, self.take_while(is_whitespace))),
            '.' => self.lex_keyword(),
            '{' if self.peek_nth(1) == Some('{') => {
                self.advance();
                self.advance();
                self.in_quoted_pattern = true;
                Ok((TokenKind::QuotedPatternOpen, "{{".into()))
            }
            '{' => {
                self.advance();
                self.enter_expression();
                Ok((TokenKind::ExpressionOpen, "{".into()))
            }
            '$' => self.lex_variable(),
            '=' => {
                self.advance();
                Ok((TokenKind::Operator, "=".into()))
            }
            '*' => {
                self.advance();
                Ok((TokenKind::CatchAllKey, "*".into()))
            }
            '|' => self.lex_quoted_literal(),
            '-' | '0'..='9' => self.lex_number(),
            c if is_name_start(c) => Ok((TokenKind::UnquotedLiteral, self.lex_name()?)),
            c => Err(self.fail(format!(
                "unexpected character {c:?} outside of a quoted pattern"
            ))),
        }
    }

    fn lex_expression(&mut self, c: char) -> LexResult {
        if is_whitespace(c) {
            return Ok((TokenKind::Whitespace, self.take_while(is_whitespace)));
        }
        let at_start = std::mem::replace(&mut self.at_expression_start, false);

        match c {
            '}' => {
                self.advance();
                self.leave_expression();
                Ok((TokenKind::ExpressionClose, "}".into()))
            }
            '#' if at_start => {
                self.advance();
                self.in_function_or_markup = true;
                self.in_markup = true;
                Ok((TokenKind::MarkupOpen, self.lex_identifier()?))
            }
            '/' if at_start => {
                self.advance();
                self.in_function_or_markup = true;
                self.in_markup = true;
                Ok((TokenKind::MarkupClose, self.lex_identifier()?))
            }
            '/' if self.in_markup && self.peek_nth(1) == Some('}') => {
                self.advance();
                Ok((TokenKind::MarkupSelfClose, "/".into()))
            }
            '$' => {
                self.expect_option_value = false;
                self.lex_variable()
            }
            ':' => {
                self.advance();
                self.in_function_or_markup = true;
                Ok((TokenKind::Function, self.lex_identifier()?))
            }
            '@' => {
                self.advance();
                self.in_function_or_markup = false;
                self.expect_option_value = false;
                Ok((TokenKind::Attribute, self.lex_identifier()?))
            }
            '=' => {
                self.advance();
                self.expect_option_value = true;
                Ok((TokenKind::Operator, "=".into()))
            }
            '|' => {
                self.expect_option_value = false;
                self.lex_quoted_literal()
            }
            '-' | '0'..='9' => {
                self.expect_option_value = false;
                self.lex_number()
            }
            c if is_name_start(c) => {
                if self.in_function_or_markup && !self.expect_option_value {
                    Ok((TokenKind::Option, self.lex_identifier()?))
                } else {
                    self.expect_option_value = false;
                    Ok((TokenKind::UnquotedLiteral, self.lex_name()?))
                }
            }
            c if is_reserved_start(c) => {
                self.advance();
                self.in_reserved_body = true;
                Ok((TokenKind::ReservedStart, c.to_string()))
            }
            c if is_private_start(c) => {
                self.advance();
                self.in_reserved_body = true;
                Ok((TokenKind::PrivateUseStart, c.to_string()))
            }
            '{' => Err(self.fail("unexpected '{' inside an expression")),
            c => Err(self.fail(format!("unexpected character {c:?} in expression"))),
        }
    }

    /// Lexes reserved body parts. Anything that cannot continue the body ends
    /// it and is lexed by the surrounding mode.
    fn lex_reserved_body(&mut self, c: char) -> LexResult {
        match c {
            c if is_whitespace(c) => Ok((TokenKind::Whitespace, self.take_while(is_whitespace))),
            '|' => self.lex_quoted_literal(),
            c if c == '\\' || is_reserved_char(c) => {
                let mut text = String::new();
                while let Some(c) = self.peek() {
                    if c == '\\' {
                        text.push(self.lex_escape()?);
                    } else if is_reserved_char(c) {
                        self.advance();
                        text.push(c);
                    } else {
                        break;
                    }
                }
                Ok((TokenKind::ReservedBody, text))
            }
            c => {
                self.in_reserved_body = false;
                if self.in_expression {
                    self.lex_expression(c)
                } else {
                    self.lex_complex_header(c)
                }
            }
        }
    }

    // =========================================================================
    // Token scanners
    // =========================================================================

    fn lex_text(&mut self) -> LexResult {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            match c {
                '{' | '}' => break,
                '\\' => text.push(self.lex_escape()?),
                c if is_text_char(c) => {
                    self.advance();
                    text.push(c);
                }
                c => return Err(self.fail(format!("invalid character {c:?} in pattern"))),
            }
        }
        Ok((TokenKind::Text, text))
    }

    /// Scans `\x` and returns the escaped character.
    fn lex_escape(&mut self) -> std::result::Result<char, Fail> {
        self.advance(); // consume '\'
        match self.peek() {
            Some(c) if is_escapable(c) => {
                self.advance();
                Ok(c)
            }
            Some(c) => Err(self.fail(format!("invalid escape sequence '\\{c}'"))),
            None => Err(self.fail("unexpected end of input after '\\'")),
        }
    }

    fn lex_keyword(&mut self) -> LexResult {
        self.advance(); // consume '.'
        if !self.peek().is_some_and(is_name_start) {
            return Err(self.fail("expected keyword name after '.'"));
        }
        let name = self.lex_name()?;
        let kind = match name.as_str() {
            "input" => TokenKind::InputKeyword,
            "local" => TokenKind::LocalKeyword,
            "match" => TokenKind::MatchKeyword,
            _ => {
                self.in_reserved_body = true;
                TokenKind::ReservedKeyword
            }
        };
        Ok((kind, name))
    }

    fn lex_variable(&mut self) -> LexResult {
        self.advance(); // consume '$'
        if !self.peek().is_some_and(is_name_start) {
            return Err(self.fail("expected variable name after '$'"));
        }
        Ok((TokenKind::Variable, self.lex_name()?))
    }

    fn lex_quoted_literal(&mut self) -> LexResult {
        self.advance(); // consume opening '|'
        let mut text = String::new();
        loop {
            match self.peek() {
                Some('|') => {
                    self.advance();
                    return Ok((TokenKind::QuotedLiteral, text));
                }
                Some('\\') => text.push(self.lex_escape()?),
                Some(c) if is_quoted_char(c) => {
                    self.advance();
                    text.push(c);
                }
                Some(c) => {
                    return Err(self.fail(format!("invalid character {c:?} in quoted literal")));
                }
                None => return Err(self.fail("unterminated quoted literal")),
            }
        }
    }

    /// Scans a number literal, rejecting anything the grammar does not allow
    /// rather than deferring to a float parser.
    fn lex_number(&mut self) -> LexResult {
        let start = self.position;
        if self.peek() == Some('-') {
            self.advance();
        }
        match self.peek() {
            Some('0') => self.advance(),
            Some('1'..='9') => {
                self.take_while(|c| c.is_ascii_digit());
            }
            _ => return Err(self.fail("invalid number literal: expected a digit")),
        }
        if self.peek() == Some('.') {
            self.advance();
            if self.take_while(|c| c.is_ascii_digit()).is_empty() {
                return Err(self.fail("invalid number literal: expected a digit after '.'"));
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if self.take_while(|c| c.is_ascii_digit()).is_empty() {
                return Err(self.fail("invalid number literal: expected exponent digits"));
            }
        }
        if let Some(c) = self.peek().filter(|c| is_name_char(*c)) {
            return Err(self.fail(format!("invalid number literal: unexpected {c:?}")));
        }
        Ok((TokenKind::NumberLiteral, self.source[start..self.position].to_string()))
    }

    fn lex_name(&mut self) -> std::result::Result<String, Fail> {
        if !self.peek().is_some_and(is_name_start) {
            return Err(self.fail("expected a name"));
        }
        Ok(self.take_while(is_name_char))
    }

    /// Scans `identifier = [namespace ":"] name`.
    fn lex_identifier(&mut self) -> std::result::Result<String, Fail> {
        let mut identifier = self.lex_name()?;
        if self.peek() == Some(':') && self.peek_nth(1).is_some_and(is_name_start) {
            self.advance();
            identifier.push(':');
            identifier.push_str(&self.take_while(is_name_char));
        }
        Ok(identifier)
    }

    // =========================================================================
    // Mode transitions
    // =========================================================================

    fn enter_expression(&mut self) {
        self.in_expression = true;
        self.at_expression_start = true;
    }

    fn leave_expression(&mut self) {
        self.in_expression = false;
        self.at_expression_start = false;
        self.in_function_or_markup = false;
        self.in_markup = false;
        self.expect_option_value = false;
        self.in_reserved_body = false;
    }

    // =========================================================================
    // Character cursor
    // =========================================================================

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.position;
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
        self.source[start..self.position].to_string()
    }

    fn fail(&self, message: impl Into<String>) -> Fail {
        Fail {
            message: message.into(),
            span: Span::point(self.position, self.line, self.column),
        }
    }
}

/// Converts a lexer error token into a syntax error.
pub(crate) fn error_from_token(source: &str, token: &Token) -> Error {
    Error::new(ErrorKind::InvalidSyntax {
        message: token.value.clone(),
        line: token.span.line,
        column: token.span.column,
        source_line: token.span.source_line(source).to_string(),
    })
}
