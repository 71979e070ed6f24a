use efs_ir::ElementId;

/// Naming queries answered by the model graph.
pub trait ModelNames {
    /// Text that refers to `element` from inside `context`.
    ///
    /// The shortest path that still resolves to `element` through the
    /// scopes enclosing `context`, fully qualified when none does. Members
    /// (structure elements, parameters) are named by their bare name.
    fn reference_name(&self, element: ElementId, context: ElementId) -> String;

    /// Check if `element` is a member of a structure.
    fn is_structure_element(&self, element: ElementId) -> bool;

    /// Check if `element` is a predefined type.
    fn is_predefined(&self, element: ElementId) -> bool;
}
