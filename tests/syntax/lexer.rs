//! Integration tests for the lexer
//!
//! Tests tokenization of MF2 source text.

use mf2_syntax::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source).into_iter().map(|t| t.kind).collect()
}

// =============================================================================
// Simple Messages
// =============================================================================

#[test]
fn tokenize_text_only() {
    let tokens = Lexer::tokenize_all("Hello");
    assert_eq!(tokens.len(), 2); // text + eof
    assert_eq!(tokens[0].kind, TokenKind::Text);
    assert_eq!(tokens[0].value, "Hello");
}

#[test]
fn tokenize_placeholder_with_function() {
    assert_eq!(
        kinds("You have {$n :number}"),
        vec![
            TokenKind::Text,
            TokenKind::ExpressionOpen,
            TokenKind::Variable,
            TokenKind::Whitespace,
            TokenKind::Function,
            TokenKind::ExpressionClose,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn tokenize_escaped_text() {
    let tokens = Lexer::tokenize_all(r"\{not a placeholder\}");
    assert_eq!(tokens[0].kind, TokenKind::Text);
    assert_eq!(tokens[0].value, "{not a placeholder}");
}

#[test]
fn slash_is_content() {
    let tokens = Lexer::tokenize_all("1/2 done, see http://x/y");
    assert_eq!(tokens[0].kind, TokenKind::Text);
    assert_eq!(tokens[0].value, "1/2 done, see http://x/y");

    let tokens = Lexer::tokenize_all("{|a/b|}");
    assert_eq!(tokens[1].kind, TokenKind::QuotedLiteral);
    assert_eq!(tokens[1].value, "a/b");
}

#[test]
fn tokenize_quoted_literal_escapes() {
    let tokens = Lexer::tokenize_all(r"{|a\|b|}");
    assert_eq!(tokens[1].kind, TokenKind::QuotedLiteral);
    assert_eq!(tokens[1].value, "a|b");
}

// =============================================================================
// Complex Messages
// =============================================================================

#[test]
fn tokenize_keywords() {
    let kinds = kinds(".input {$a} .local $b = {$a} .match {$b} * {{x}}");
    assert!(kinds.contains(&TokenKind::InputKeyword));
    assert!(kinds.contains(&TokenKind::LocalKeyword));
    assert!(kinds.contains(&TokenKind::MatchKeyword));
    assert!(kinds.contains(&TokenKind::CatchAllKey));
    assert!(kinds.contains(&TokenKind::QuotedPatternOpen));
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
}

#[test]
fn dot_later_in_simple_message_is_text() {
    assert_eq!(kinds("a.match"), vec![TokenKind::Text, TokenKind::Eof]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn tokenize_fails_fast() {
    assert!(Lexer::tokenize("fine").is_ok());
    assert!(Lexer::tokenize("{|unterminated").is_err());
}

#[test]
fn tokenize_all_ends_with_error_token() {
    let tokens = Lexer::tokenize_all("a}b");
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Error));
}

#[test]
fn next_token_is_incremental() {
    let mut lexer = Lexer::new("{$x}");
    assert_eq!(lexer.next_token().kind, TokenKind::ExpressionOpen);
    assert_eq!(lexer.next_token().kind, TokenKind::Variable);
    assert_eq!(lexer.next_token().kind, TokenKind::ExpressionClose);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}
