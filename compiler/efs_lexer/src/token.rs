//! Token types produced by the lexer.

use std::fmt;

use efs_ir::Span;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    Ident(String),
    Int(i64),
    /// Integer literal that does not fit in an `i64`, kept as written.
    LargeInt(String),
    /// Float literal, kept as written.
    Float(String),
    /// String literal contents, without quotes.
    Str(String),

    // Keywords
    This,
    And,
    Or,
    Not,
    ThereIs,
    ForAll,
    In,
    True,
    False,

    // Punctuation
    Dot,
    Comma,
    LParen,
    RParen,
    Pipe,
    FatArrow,
    LeftArrow,

    // Operators
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,

    /// String literal missing its closing quote.
    UnterminatedString,
    /// Bytes no rule matches.
    Error,
    Eof,
}

impl TokenKind {
    /// Short human-readable description for diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) | TokenKind::LargeInt(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::Str(_) | TokenKind::UnterminatedString => "string",
            TokenKind::This => "THIS",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::ThereIs => "THERE_IS",
            TokenKind::ForAll => "FORALL",
            TokenKind::In => "IN",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Pipe => "|",
            TokenKind::FatArrow => "=>",
            TokenKind::LeftArrow => "<-",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of expression",
        }
    }

    /// Check if this token can start a designator.
    pub fn is_designator_start(&self) -> bool {
        matches!(self, TokenKind::Ident(_) | TokenKind::This)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Ident(name) => write!(f, "{name}"),
            TokenKind::Int(value) => write!(f, "{value}"),
            TokenKind::LargeInt(text) | TokenKind::Float(text) => write!(f, "{text}"),
            TokenKind::Str(text) => write!(f, "\"{text}\""),
            other => write!(f, "{}", other.display_name()),
        }
    }
}

/// Lexer output. Always terminated by a single `Eof` token.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &TokenKind> {
        self.tokens.iter().map(|t| &t.kind)
    }
}
