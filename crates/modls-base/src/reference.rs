//! Reference value types (spec.md §3/§4.2): unresolved relative,
//! unresolved absolute, and resolved symbol references.
//!
//! Grounded on the teacher's `semantic/symbol_table/symbol.rs` `Symbol`
//! enum — one tagged union, a handful of shared `match`-based accessors —
//! with two variants instead of seven, and modeled as a sum type per the
//! Design Notes (spec.md §9: "Reference as tagged union... avoid an
//! inheritance hierarchy"). A resolved reference borrows its document and
//! declaring node rather than owning them, since spec.md §9 ("Syntax
//! nodes are ephemeral") requires that nothing outside a `Document`
//! outlive an edit holding a node handle — these types are recomputed per
//! request and never stored.

use crate::core::CoreError;
use crate::project::document::Document;
use crate::syntax::SyntaxNode;

/// A non-empty ordered sequence of identifiers, compared structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolPath(Vec<String>);

impl SymbolPath {
    pub fn new(components: Vec<String>) -> Result<Self, CoreError> {
        if components.is_empty() {
            return Err(CoreError::invariant_violated(
                "symbol path must have at least one component",
            ));
        }
        Ok(Self(components))
    }

    pub fn single(component: impl Into<String>) -> Self {
        Self(vec![component.into()])
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn last(&self) -> &str {
        self.0.last().expect("SymbolPath is never empty")
    }

}

impl std::fmt::Display for SymbolPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A tag drawn from {class, variable, unknown}, used to prune lookup
/// (superclasses are only followed when searching for a variable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Class,
    Variable,
    Unknown,
}

impl ReferenceKind {
    pub fn allows_superclass_search(self) -> bool {
        !matches!(self, ReferenceKind::Class)
    }
}

/// A symbol path not yet resolved to a declaration.
#[derive(Debug, Clone)]
pub enum UnresolvedReference<'d> {
    /// "Starting from the set of known library roots, the first component
    /// names a library and successive components descend into it."
    Absolute {
        path: SymbolPath,
        kind: Option<ReferenceKind>,
    },
    /// "Resolve starting from the innermost lexical scope enclosing the
    /// anchor node." The anchor must be in scope of the use site.
    Relative {
        path: SymbolPath,
        kind: Option<ReferenceKind>,
        document: &'d Document,
        anchor: SyntaxNode<'d>,
    },
}

impl<'d> UnresolvedReference<'d> {
    pub fn is_absolute(&self) -> bool {
        matches!(self, UnresolvedReference::Absolute { .. })
    }

    pub fn path(&self) -> &SymbolPath {
        match self {
            UnresolvedReference::Absolute { path, .. } => path,
            UnresolvedReference::Relative { path, .. } => path,
        }
    }

    pub fn kind(&self) -> Option<ReferenceKind> {
        match self {
            UnresolvedReference::Absolute { kind, .. } => *kind,
            UnresolvedReference::Relative { kind, .. } => *kind,
        }
    }

    pub fn absolute(path: SymbolPath, kind: Option<ReferenceKind>) -> Self {
        UnresolvedReference::Absolute { path, kind }
    }

    pub fn relative(
        path: SymbolPath,
        kind: Option<ReferenceKind>,
        document: &'d Document,
        anchor: SyntaxNode<'d>,
    ) -> Self {
        UnresolvedReference::Relative {
            path,
            kind,
            document,
            anchor,
        }
    }
}

/// A declaration found by the resolver.
///
/// Invariant: `node` actually declares `path`'s last component, and
/// `document` contains `node`. `kind` is never `Unknown`.
#[derive(Clone)]
pub struct ResolvedReference<'d> {
    document: &'d Document,
    node: SyntaxNode<'d>,
    path: SymbolPath,
    kind: ReferenceKind,
}

impl<'d> ResolvedReference<'d> {
    /// Builds a `ResolvedReference`, rejecting `Unknown` per the §3
    /// invariant.
    pub fn new(
        document: &'d Document,
        node: SyntaxNode<'d>,
        path: SymbolPath,
        kind: ReferenceKind,
    ) -> Result<Self, CoreError> {
        if kind == ReferenceKind::Unknown {
            return Err(CoreError::invariant_violated(
                "a resolved reference's kind must be class or variable, never unknown",
            ));
        }
        Ok(Self {
            document,
            node,
            path,
            kind,
        })
    }

    pub fn document(&self) -> &'d Document {
        self.document
    }

    pub fn node(&self) -> SyntaxNode<'d> {
        self.node
    }

    pub fn path(&self) -> &SymbolPath {
        &self.path
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }
}

impl std::fmt::Debug for ResolvedReference<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedReference")
            .field("path", &self.path.to_string())
            .field("kind", &self.kind)
            .field("node_kind", &self.node.kind())
            .finish()
    }
}

impl PartialEq for ResolvedReference<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.kind == other.kind && self.node == other.node
    }
}

impl Eq for ResolvedReference<'_> {}
