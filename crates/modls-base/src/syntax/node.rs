//! The generic syntax tree the rest of the core consumes.
//!
//! Tree helpers, references, and the resolver all talk to this arena
//! instead of to `pest::Pairs` directly (spec.md §9, "Parser interop": wrap
//! the external parser's incremental/callback surface behind a narrow
//! interface). A node is addressed by index into its owning tree and is
//! only valid for the lifetime of that tree — see `syntax::parser` for the
//! whole-buffer-reparse policy that invalidates old indices on every edit.

use crate::core::{Point, Span};

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub kind: &'static str,
    pub span: Span,
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub fields: Vec<(&'static str, NodeId)>,
}

/// An arena of nodes produced by one parse. Node 0 is always the root.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub(crate) nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub(crate) fn new(nodes: Vec<NodeData>) -> Self {
        Self { nodes }
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.node(0)
    }

    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, id }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// A handle into a [`SyntaxTree`]. Cheap to copy; borrows the tree it was
/// produced from, so it cannot outlive the next parse.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNode<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'static str {
        self.data().kind
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind() == kind
    }

    pub fn text(&self) -> &'t str {
        &self.data().text
    }

    pub fn span(&self) -> Span {
        self.data().span
    }

    pub fn start(&self) -> Point {
        self.data().span.start
    }

    pub fn end(&self) -> Point {
        self.data().span.end
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// First named child with the given field name, if any.
    pub fn child_by_field(&self, field: &str) -> Option<SyntaxNode<'t>> {
        self.data()
            .fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, id)| self.tree.node(*id))
    }

    /// All named children with the given field name, in field-assignment order.
    pub fn children_by_field(&self, field: &str) -> Vec<SyntaxNode<'t>> {
        self.data()
            .fields
            .iter()
            .filter(|(name, _)| *name == field)
            .map(|(_, id)| self.tree.node(*id))
            .collect()
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }
}

impl std::fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxNode")
            .field("kind", &self.kind())
            .field("span", &self.span())
            .finish()
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}
