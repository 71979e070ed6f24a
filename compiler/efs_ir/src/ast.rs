//! Interpretation tree nodes.
//!
//! Nodes are flat: children are `ExprId` indices into the owning
//! [`ExprArena`](crate::ExprArena). Each node carries the span it was parsed
//! from and, once bound, a reference to the model element it denotes.

use std::fmt;

use crate::{CallArgRange, ElementId, ExprId, ExprRange, Span};

/// How a designator was resolved.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Location {
    /// Not bound yet, or binding failed.
    #[default]
    Unresolved,
    /// A model element reached through the namespace hierarchy.
    Model,
    /// A member of the enclosing structure instance.
    Instance,
    /// A parameter or quantifier variable.
    Stack,
    /// The `THIS` self reference.
    This,
}

/// A single identifier occurrence.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Designator {
    pub name: String,
    pub location: Location,
}

impl Designator {
    /// Spelling of the self reference keyword.
    pub const THIS: &'static str = "THIS";

    pub fn new(name: impl Into<String>) -> Self {
        Designator {
            name: name.into(),
            location: Location::Unresolved,
        }
    }

    /// Keyword designators name no model element and are never rewritten.
    pub fn is_keyword(&self) -> bool {
        self.name == Self::THIS
    }

    pub fn is_self_reference(&self) -> bool {
        self.location == Location::This
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Int(i64),
    /// Kept as source text so the tree stays `Eq + Hash`.
    Float(String),
    Str(String),
    Bool(bool),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum QuantifierKind {
    ThereIs,
    ForAll,
}

/// `name => value` or positional `value` in a call.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallArg {
    /// Designator naming the parameter, if given.
    pub name: Option<ExprId>,
    pub value: ExprId,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Designator(Designator),
    /// `a.b.c`: ordered arguments, each normally a designator.
    Deref(ExprRange),
    Call {
        func: ExprId,
        args: CallArgRange,
    },
    Literal(Literal),
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    /// `THERE_IS X IN collection | condition`.
    Quantifier {
        kind: QuantifierKind,
        variable: String,
        variable_span: Span,
        collection: ExprId,
        condition: ExprId,
    },
    /// Rule action `target <- value`.
    Assign {
        target: ExprId,
        value: ExprId,
    },
    Error,
}

/// A node of the interpretation tree.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Model element this node resolves to, filled in by the binder.
    pub reference: Option<ElementId>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            reference: None,
        }
    }

    pub fn as_designator(&self) -> Option<&Designator> {
        match &self.kind {
            ExprKind::Designator(designator) => Some(designator),
            _ => None,
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)?;
        if let Some(reference) = self.reference {
            write!(f, " -> {reference:?}")?;
        }
        Ok(())
    }
}
