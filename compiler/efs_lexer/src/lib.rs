//! Lexer for EFS expressions using logos.
//!
//! Produces a flat [`TokenList`] terminated by `Eof`. Whitespace is
//! skipped; anything the rules do not recognise becomes a
//! [`TokenKind::Error`] token so the parser can report it with a span.

mod raw_token;
mod token;

use logos::Logos;

use efs_ir::Span;
use raw_token::RawToken;

pub use token::{Token, TokenKind, TokenList};

fn span_of(range: std::ops::Range<usize>) -> Span {
    // Texts beyond u32::MAX bytes collapse onto the last offset.
    Span::try_from_range(range).unwrap_or(Span::new(u32::MAX, u32::MAX))
}

/// Tokenize an expression text.
pub fn lex(source: &str) -> TokenList {
    let mut tokens = TokenList::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = span_of(lexer.span());
        let slice = lexer.slice();
        let kind = match result {
            Ok(raw) => convert(raw, slice),
            Err(()) => TokenKind::Error,
        };
        tokens.push(Token::new(kind, span));
    }

    let end = span_of(source.len()..source.len());
    tokens.push(Token::new(TokenKind::Eof, end));
    tokens
}

fn convert(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::This => TokenKind::This,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,
        RawToken::ThereIs => TokenKind::ThereIs,
        RawToken::ForAll => TokenKind::ForAll,
        RawToken::In => TokenKind::In,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Comma => TokenKind::Comma,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::FatArrow => TokenKind::FatArrow,
        RawToken::LeftArrow => TokenKind::LeftArrow,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Int => slice
            .parse()
            .map_or_else(|_| TokenKind::LargeInt(slice.to_string()), TokenKind::Int),
        RawToken::Float => TokenKind::Float(slice.to_string()),
        RawToken::Str => TokenKind::Str(slice[1..slice.len() - 1].to_string()),
        RawToken::UnterminatedStr => TokenKind::UnterminatedString,
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
    }
}
