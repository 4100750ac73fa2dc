//! Document traversal with per-node-kind callbacks.
//!
//! A [`Visitor`] is called once per matching node in document order. Each
//! callback receives the flattened ancestor stack and may return
//! [`VisitAction::Skip`] to keep the walk out of that node's subtree.

use crate::sdl::ast::{Definition, Document, FieldDefinition, TypeDefinition, TypeKind};

/// What the walker should do after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitAction {
    /// Descend into the node's children.
    #[default]
    Continue,
    /// Do not visit the node's children.
    Skip,
}

/// A node on the ancestor stack.
#[derive(Debug, Clone, Copy)]
pub enum Ancestor<'ast> {
    /// The document root.
    Document(&'ast Document),
    /// A type definition or type extension.
    Type(&'ast TypeDefinition),
}

/// Ancestors of the node being visited, root first.
///
/// The document root is always at the bottom of the stack, so the sibling
/// definitions of any ancestor are reachable without a recursive search.
#[derive(Debug, Clone, Default)]
pub struct Ancestors<'ast> {
    stack: Vec<Ancestor<'ast>>,
}

impl<'ast> Ancestors<'ast> {
    /// Returns the closest enclosing type definition or extension.
    #[must_use]
    pub fn parent_type(&self) -> Option<&'ast TypeDefinition> {
        self.stack.iter().rev().find_map(|a| match a {
            Ancestor::Type(t) => Some(*t),
            Ancestor::Document(_) => None,
        })
    }

    /// Finds the interface definition with the given name.
    ///
    /// Searches the stack itself and the definition list of the document
    /// root. Interface extensions never match.
    #[must_use]
    pub fn find_interface(&self, name: &str) -> Option<&'ast TypeDefinition> {
        let is_match = |t: &TypeDefinition| {
            t.kind == TypeKind::Interface && !t.extension && t.name.value == name
        };

        self.stack.iter().find_map(|a| match a {
            Ancestor::Type(t) if is_match(t) => Some(*t),
            Ancestor::Document(d) => d.type_definitions().find(|t| is_match(t)),
            Ancestor::Type(_) => None,
        })
    }

    fn push(&mut self, ancestor: Ancestor<'ast>) {
        self.stack.push(ancestor);
    }

    fn pop(&mut self) {
        self.stack.pop();
    }
}

/// Callbacks invoked while walking a document.
///
/// Type callbacks default to [`VisitAction::Continue`]. Fields are leaves, so
/// their callback has nothing to steer.
pub trait Visitor<'ast> {
    /// Called for every type definition (not extensions).
    fn visit_type_definition(
        &mut self,
        _node: &'ast TypeDefinition,
        _ancestors: &Ancestors<'ast>,
    ) -> VisitAction {
        VisitAction::Continue
    }

    /// Called for every `extend ...` type extension.
    fn visit_type_extension(
        &mut self,
        _node: &'ast TypeDefinition,
        _ancestors: &Ancestors<'ast>,
    ) -> VisitAction {
        VisitAction::Continue
    }

    /// Called for every field of an object or interface type or extension.
    fn visit_field_definition(
        &mut self,
        _node: &'ast FieldDefinition,
        _ancestors: &Ancestors<'ast>,
    ) {
    }
}

/// Walks a document in source order.
pub fn walk_document<'ast, V>(visitor: &mut V, document: &'ast Document)
where
    V: Visitor<'ast> + ?Sized,
{
    let mut ancestors = Ancestors::default();
    ancestors.push(Ancestor::Document(document));

    for definition in &document.definitions {
        if let Definition::Type(node) = definition {
            walk_type(visitor, node, &mut ancestors);
        }
    }
}

fn walk_type<'ast, V>(visitor: &mut V, node: &'ast TypeDefinition, ancestors: &mut Ancestors<'ast>)
where
    V: Visitor<'ast> + ?Sized,
{
    let action = if node.extension {
        visitor.visit_type_extension(node, ancestors)
    } else {
        visitor.visit_type_definition(node, ancestors)
    };
    if action == VisitAction::Skip {
        return;
    }

    ancestors.push(Ancestor::Type(node));
    for field in &node.fields {
        visitor.visit_field_definition(field, ancestors);
    }
    ancestors.pop();
}
