//! Recursive descent parser for EFS expressions.
//!
//! Produces an unbound [`ExprTree`]: every node carries the span it was
//! parsed from, references are filled in later by the binder.
//!
//! Three entry points, one per [`ExpressionKind`]:
//! - [`parse_type`]: a designator chain naming a type (`N1.S1`)
//! - [`parse_expression`]: a full value expression
//! - [`parse_statement`]: a rule action `target <- value`

mod cursor;
mod error;
mod grammar;

use efs_ir::{ExprArena, ExprTree};
use efs_lexer::TokenList;
use tracing::trace;

pub use cursor::Cursor;
pub use error::ParseError;

/// Which grammar an expression text is written in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ExpressionKind {
    /// Type reference of a variable, structure element or parameter.
    Type,
    /// Default values, function bodies, rule conditions.
    #[default]
    Value,
    /// Rule actions.
    Statement,
}

/// Parser state for one expression text.
pub(crate) struct Parser<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) arena: ExprArena,
    pub(crate) depth: u32,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::new(),
            depth: 0,
        }
    }

    fn finish(mut self, kind: ExpressionKind) -> Result<ExprTree, ParseError> {
        let root = match kind {
            ExpressionKind::Type => self.parse_chain()?,
            ExpressionKind::Value => self.parse_expr()?,
            ExpressionKind::Statement => self.parse_assignment()?,
        };
        if !self.cursor.is_at_end() {
            return Err(ParseError::unexpected(
                self.cursor.current(),
                "end of expression",
            ));
        }
        Ok(ExprTree::new(self.arena, root))
    }
}

/// Parse `text` with the grammar selected by `kind`.
#[tracing::instrument(level = "trace", skip_all, fields(?kind, len = text.len()))]
pub fn parse(kind: ExpressionKind, text: &str) -> Result<ExprTree, ParseError> {
    let tokens = efs_lexer::lex(text);
    trace!(tokens = tokens.len(), "lexed");
    Parser::new(&tokens).finish(kind)
}

pub fn parse_type(text: &str) -> Result<ExprTree, ParseError> {
    parse(ExpressionKind::Type, text)
}

pub fn parse_expression(text: &str) -> Result<ExprTree, ParseError> {
    parse(ExpressionKind::Value, text)
}

pub fn parse_statement(text: &str) -> Result<ExprTree, ParseError> {
    parse(ExpressionKind::Statement, text)
}

/// Attempt a parse and discard the tree.
pub fn is_valid(kind: ExpressionKind, text: &str) -> bool {
    parse(kind, text).is_ok()
}
