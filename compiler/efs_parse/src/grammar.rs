//! Expression grammar.
//!
//! ```text
//! or        := and ("OR" and)*
//! and       := cmp ("AND" cmp)*
//! cmp       := add (relop add)?
//! add       := mul (("+" | "-") mul)*
//! mul       := unary (("*" | "/") unary)*
//! unary     := "NOT" unary | "-" unary | postfix
//! postfix   := chain ("(" args ")")? | primary
//! chain     := designator ("." IDENT)*
//! primary   := literal | "(" or ")" | quantifier
//! quantifier:= ("THERE_IS" | "FORALL") IDENT "IN" or "|" or
//! arg       := (IDENT "=>")? or
//! ```

use efs_diagnostic::ErrorCode;
use efs_ir::{
    BinaryOp, CallArg, Designator, Expr, ExprId, ExprKind, Literal, QuantifierKind, Span, UnaryOp,
};
use efs_lexer::TokenKind;
use tracing::trace;

use crate::{ParseError, Parser};

/// Nesting limit, keeps deeply parenthesised input off the native stack.
const MAX_DEPTH: u32 = 128;

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::new(
                ErrorCode::E1001,
                "expression nests too deeply",
                self.cursor.current_span(),
            ));
        }
        let result = self.parse_or();
        self.depth -= 1;
        result
    }

    fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_and()?;
        while self.cursor.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = self.alloc_binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_comparison()?;
        while self.cursor.eat(&TokenKind::And) {
            let right = self.parse_comparison()?;
            left = self.alloc_binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        let left = self.parse_additive()?;
        let op = match self.cursor.current_kind() {
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            _ => return Ok(left),
        };
        self.cursor.advance();
        let right = self.parse_additive()?;
        Ok(self.alloc_binary(op, left, right))
    }

    fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_multiplicative()?;
            left = self.alloc_binary(op, left, right);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_unary()?;
            left = self.alloc_binary(op, left, right);
        }
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_postfix(),
        };
        let start = self.cursor.advance().span;
        let operand = self.parse_unary()?;
        let span = start.merge(self.arena.get_expr(operand).span);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Unary { op, operand }, span)))
    }

    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        if !self.cursor.current_kind().is_designator_start() {
            return self.parse_primary();
        }
        let chain = self.parse_chain()?;
        if self.cursor.check(&TokenKind::LParen) {
            self.parse_call(chain)
        } else {
            Ok(chain)
        }
    }

    /// `designator ("." IDENT)*`: a lone designator, or a dereference
    /// spanning the whole chain.
    pub(crate) fn parse_chain(&mut self) -> Result<ExprId, ParseError> {
        let first = self.parse_designator(true)?;
        if !self.cursor.check(&TokenKind::Dot) {
            return Ok(first);
        }

        let mut segments = vec![first];
        while self.cursor.eat(&TokenKind::Dot) {
            segments.push(self.parse_designator(false)?);
        }

        let start = self.arena.get_expr(first).span;
        let span = start.merge(self.cursor.previous_span());
        trace!(segments = segments.len(), %span, "dereference");
        let args = self.arena.alloc_expr_list(segments);
        Ok(self.arena.alloc_expr(Expr::new(ExprKind::Deref(args), span)))
    }

    fn parse_designator(&mut self, allow_this: bool) -> Result<ExprId, ParseError> {
        let token = self.cursor.current().clone();
        let name = match &token.kind {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::This if allow_this => Designator::THIS.to_string(),
            _ => {
                let err = ParseError::unexpected(&token, "identifier");
                return Err(if err.code == ErrorCode::E1001 {
                    ParseError { code: ErrorCode::E1004, ..err }
                } else {
                    err
                });
            }
        };
        self.cursor.advance();
        Ok(self.arena.alloc_expr(Expr::new(
            ExprKind::Designator(Designator::new(name)),
            token.span,
        )))
    }

    fn parse_call(&mut self, func: ExprId) -> Result<ExprId, ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();

        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_call_arg()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }

        if !self.cursor.check(&TokenKind::RParen) {
            return Err(self.unclosed(open));
        }
        let close = self.cursor.advance().span;
        let span = self.arena.get_expr(func).span.merge(close);
        let args = self.arena.alloc_call_args(args);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Call { func, args }, span)))
    }

    fn parse_call_arg(&mut self) -> Result<CallArg, ParseError> {
        let start = self.cursor.current_span();
        let name = if matches!(self.cursor.current_kind(), TokenKind::Ident(_))
            && matches!(self.cursor.peek_kind(), TokenKind::FatArrow)
        {
            let name = self.parse_designator(false)?;
            self.cursor.advance();
            Some(name)
        } else {
            None
        };
        let value = self.parse_expr()?;
        let span = start.merge(self.arena.get_expr(value).span);
        Ok(CallArg { name, value, span })
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current().clone();
        let literal = match &token.kind {
            TokenKind::Int(value) => Literal::Int(*value),
            TokenKind::Float(text) => Literal::Float(text.clone()),
            TokenKind::Str(text) => Literal::Str(text.clone()),
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::ThereIs => return self.parse_quantifier(QuantifierKind::ThereIs),
            TokenKind::ForAll => return self.parse_quantifier(QuantifierKind::ForAll),
            _ => {
                let err = ParseError::unexpected(&token, "expression");
                return Err(if err.code == ErrorCode::E1001 {
                    ParseError::new(
                        ErrorCode::E1002,
                        format!("expected expression, found `{token}`"),
                        token.span,
                    )
                } else {
                    err
                });
            }
        };
        self.cursor.advance();
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Literal(literal), token.span)))
    }

    fn parse_parenthesized(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen)?;
        let inner = self.parse_expr()?;
        if !self.cursor.eat(&TokenKind::RParen) {
            return Err(self.unclosed(open));
        }
        Ok(inner)
    }

    fn parse_quantifier(&mut self, kind: QuantifierKind) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let token = self.cursor.current().clone();
        let TokenKind::Ident(variable) = &token.kind else {
            return Err(ParseError::unexpected(&token, "iterator variable"));
        };
        let variable = variable.clone();
        self.cursor.advance();
        self.cursor.expect(&TokenKind::In)?;
        let collection = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Pipe)?;
        let condition = self.parse_expr()?;
        let span = start.merge(self.arena.get_expr(condition).span);
        Ok(self.arena.alloc_expr(Expr::new(
            ExprKind::Quantifier {
                kind,
                variable,
                variable_span: token.span,
                collection,
                condition,
            },
            span,
        )))
    }

    /// `chain "<-" or`
    pub(crate) fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        let target = self.parse_chain()?;
        self.cursor.expect(&TokenKind::LeftArrow)?;
        let value = self.parse_expr()?;
        let span = self
            .arena
            .get_expr(target)
            .span
            .merge(self.arena.get_expr(value).span);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Assign { target, value }, span)))
    }

    fn alloc_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self
            .arena
            .get_expr(left)
            .span
            .merge(self.arena.get_expr(right).span);
        self.arena
            .alloc_expr(Expr::new(ExprKind::Binary { op, left, right }, span))
    }

    #[cold]
    fn unclosed(&self, open: Span) -> ParseError {
        let current = self.cursor.current();
        if matches!(
            current.kind,
            TokenKind::Error | TokenKind::UnterminatedString
        ) {
            return ParseError::unexpected(current, "`)`");
        }
        ParseError::new(ErrorCode::E1003, "unclosed delimiter `(`", current.span)
            .with_related(open, "unclosed delimiter opened here")
    }
}
