//! How elements are spelled from a given place in the model.

use efs_ir::ElementId;
use efs_refactor::ModelNames;

use crate::{ElementKind, Model};

impl Model {
    /// Resolve a dotted path the way a designator chain written inside
    /// `context` would resolve: the first segment through the enclosing
    /// scopes, the rest as children.
    pub fn resolve_path(&self, context: ElementId, path: &str) -> Option<ElementId> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let head = self
            .scope_chain(context)
            .find_map(|scope| self.child_by_name(scope, first))?;
        segments.try_fold(head, |scope, segment| self.child_by_name(scope, segment))
    }

    /// Dotted path of `element` relative to `base`, which must enclose it.
    fn path_from(&self, base: ElementId, element: ElementId) -> String {
        let mut segments: Vec<&str> = self
            .scope_chain(element)
            .take_while(|&scope| scope != base)
            .map(|scope| self.name(scope))
            .collect();
        segments.reverse();
        segments.join(".")
    }
}

impl ModelNames for Model {
    fn reference_name(&self, element: ElementId, context: ElementId) -> String {
        let target = self.element(element);
        if target.is_predefined()
            || matches!(
                target.kind(),
                ElementKind::StructureElement { .. } | ElementKind::Parameter { .. }
            )
        {
            return target.name().to_string();
        }

        // Innermost enclosing scope first, so the first path that resolves
        // is the shortest one.
        self.scope_chain(context)
            .filter(|&scope| self.is_ancestor(scope, element))
            .map(|scope| self.path_from(scope, element))
            .find(|path| self.resolve_path(context, path) == Some(element))
            .unwrap_or_else(|| self.full_name(element))
    }

    fn is_structure_element(&self, element: ElementId) -> bool {
        matches!(self.kind(element), ElementKind::StructureElement { .. })
    }

    fn is_predefined(&self, element: ElementId) -> bool {
        self.element(element).is_predefined()
    }
}
