use efs_ir::ExprTree;
use efs_parse::{ExpressionKind, ParseError};
use efs_refactor::Expressionable;

/// Expression text owned by a model element, with its tree once compiled.
///
/// The tree's spans point into `text` as it was when parsed, so any text
/// change drops the tree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Expression {
    kind: ExpressionKind,
    text: String,
    tree: Option<ExprTree>,
}

impl Expression {
    pub fn new(kind: ExpressionKind, text: impl Into<String>) -> Self {
        Expression {
            kind,
            text: text.into(),
            tree: None,
        }
    }

    pub fn type_ref(text: impl Into<String>) -> Self {
        Self::new(ExpressionKind::Type, text)
    }

    pub fn value(text: impl Into<String>) -> Self {
        Self::new(ExpressionKind::Value, text)
    }

    pub fn statement(text: impl Into<String>) -> Self {
        Self::new(ExpressionKind::Statement, text)
    }

    pub fn kind(&self) -> ExpressionKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> Option<&ExprTree> {
        self.tree.as_ref()
    }

    pub(crate) fn tree_mut(&mut self) -> Option<&mut ExprTree> {
        self.tree.as_mut()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.tree = None;
    }

    /// Parse the current text, replacing any previous tree.
    pub(crate) fn parse(&mut self) -> Result<(), ParseError> {
        self.tree = None;
        self.tree = Some(efs_parse::parse(self.kind, &self.text)?);
        Ok(())
    }
}

impl Expressionable for Expression {
    fn expression_text(&self) -> &str {
        &self.text
    }

    fn set_expression_text(&mut self, text: String) {
        self.set_text(text);
    }

    fn tree(&self) -> Option<&ExprTree> {
        self.tree.as_ref()
    }

    fn check_valid_expression(&self, candidate: &str) -> bool {
        efs_parse::is_valid(self.kind, candidate)
    }
}
