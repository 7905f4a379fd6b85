//! Token types for MF2 source text.
//!
//! Tokens are the output of the lexer and input to the parser. The kind is a
//! plain tag so the parser can report the set of kinds it would have accepted;
//! the token's decoded text travels alongside in [`Token::value`].

use std::fmt;

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The type of this token.
    pub kind: TokenKind,
    /// Decoded payload: unescaped text, a name without its sigil, a literal's
    /// content, or an error message. Empty for pure punctuation.
    pub value: String,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token can stand as a literal.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    /// Returns true for a whitespace token that contains at least one real
    /// whitespace character, as required by the grammar's `s` rule.
    ///
    /// Bidi marks alone only satisfy optional whitespace.
    #[must_use]
    pub fn is_required_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace && self.value.chars().any(crate::chars::is_ws)
    }
}

/// Token kinds for MF2 source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Pattern text with escapes decoded.
    Text,
    /// `{` opening a placeholder or declaration expression.
    ExpressionOpen,
    /// `}` closing an expression or markup.
    ExpressionClose,
    /// `{{` opening a quoted pattern.
    QuotedPatternOpen,
    /// `}}` closing a quoted pattern.
    QuotedPatternClose,
    /// `$name`
    Variable,
    /// `:identifier`
    Function,
    /// `#identifier`
    MarkupOpen,
    /// `/identifier`
    MarkupClose,
    /// `/` directly before the `}` of standalone markup.
    MarkupSelfClose,
    /// `|text|`
    QuotedLiteral,
    /// A bare name used as a literal.
    UnquotedLiteral,
    /// A number literal.
    NumberLiteral,
    /// An option identifier inside a function or markup.
    Option,
    /// `@identifier`
    Attribute,
    /// `=`
    Operator,
    /// `.input`
    InputKeyword,
    /// `.local`
    LocalKeyword,
    /// `.match`
    MatchKeyword,
    /// Any other `.name` keyword.
    ReservedKeyword,
    /// `*` as a variant key.
    CatchAllKey,
    /// A run of whitespace and bidi marks.
    Whitespace,
    /// A reserved annotation sigil such as `!` or `%`.
    ReservedStart,
    /// Reserved body text with escapes decoded.
    ReservedBody,
    /// A private-use annotation sigil, `^` or `&`.
    PrivateUseStart,
    /// End of input.
    Eof,
    /// Lexer error; the value holds the message.
    Error,
}

impl TokenKind {
    /// Returns true if this kind can stand as a literal.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::QuotedLiteral | Self::UnquotedLiteral | Self::NumberLiteral
        )
    }

    /// Returns true if this kind begins a declaration.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::InputKeyword | Self::LocalKeyword | Self::MatchKeyword | Self::ReservedKeyword
        )
    }

    /// Returns true if this kind begins an annotation.
    #[must_use]
    pub const fn is_annotation_start(self) -> bool {
        matches!(
            self,
            Self::Function | Self::ReservedStart | Self::PrivateUseStart
        )
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::ExpressionOpen => "'{'",
            Self::ExpressionClose => "'}'",
            Self::QuotedPatternOpen => "'{{'",
            Self::QuotedPatternClose => "'}}'",
            Self::Variable => "variable",
            Self::Function => "function",
            Self::MarkupOpen => "markup open",
            Self::MarkupClose => "markup close",
            Self::MarkupSelfClose => "'/'",
            Self::QuotedLiteral => "quoted literal",
            Self::UnquotedLiteral => "unquoted literal",
            Self::NumberLiteral => "number literal",
            Self::Option => "option",
            Self::Attribute => "attribute",
            Self::Operator => "'='",
            Self::InputKeyword => "'.input'",
            Self::LocalKeyword => "'.local'",
            Self::MatchKeyword => "'.match'",
            Self::ReservedKeyword => "reserved keyword",
            Self::CatchAllKey => "'*'",
            Self::Whitespace => "whitespace",
            Self::ReservedStart => "reserved annotation",
            Self::ReservedBody => "reserved body",
            Self::PrivateUseStart => "private-use annotation",
            Self::Eof => "end of input",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
