//! Raw token rules for logos.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    // === Keywords ===
    #[token("THIS")]
    This,
    #[token("AND")]
    And,
    #[token("OR")]
    Or,
    #[token("NOT")]
    Not,
    #[token("THERE_IS")]
    ThereIs,
    #[token("FORALL")]
    ForAll,
    #[token("IN")]
    In,
    #[token("True")]
    True,
    #[token("False")]
    False,

    // === Punctuation ===
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("|")]
    Pipe,
    #[token("=>")]
    FatArrow,
    #[token("<-")]
    LeftArrow,

    // === Operators ===
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // === Literals ===
    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    #[regex(r#""([^"\\]|\\.)*"#)]
    UnterminatedStr,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}
