//! Token cursor for navigating the token stream.

use efs_ir::Span;
use efs_lexer::{Token, TokenKind, TokenList};
use tracing::trace;

use crate::ParseError;

/// Position in a [`TokenList`].
///
/// Invariant: the list ends with `Eof` and the cursor never moves past it.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
    eof: Token,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        let eof_span = tokens
            .iter()
            .last()
            .map_or(Span::DUMMY, |token| token.span);
        Cursor {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof, eof_span),
        }
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Kind of the token after the current one.
    pub fn peek_kind(&self) -> &TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(&self.eof.kind, |token| &token.kind)
    }

    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Advance and return the consumed token.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            trace!(pos = self.pos, token = %token, "advance");
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with "expected `kind`".
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(ParseError::unexpected(
                self.current(),
                &format!("`{}`", kind.display_name()),
            ))
        }
    }
}
