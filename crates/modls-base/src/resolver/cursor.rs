//! Cursor identification: maps a `(line, column)` position
//! in a document to the reference sitting under it, if any.

use crate::project::Document;
use crate::reference::{ReferenceKind, SymbolPath, UnresolvedReference};
use crate::syntax::SyntaxNode;
use crate::syntax::helpers;

/// Identifies the reference at `(line, column)` in `document`.
///
/// Tries, in order: a dotted `name` (lifted to its enclosing
/// `type_specifier` when present) as a class-kind reference; a
/// `component_reference` as a variable-kind reference; a bare `IDENT` as an
/// unknown-kind reference. Returns `None` when the cursor touches none of
/// these.
pub fn reference_at_cursor(document: &Document, line: usize, column: usize) -> Option<UnresolvedReference<'_>> {
    let offset = document.offset_at(line, column)?;
    let root = document.tree().root();

    if let Some(name_node) = innermost_of_kind(&root, offset, "name") {
        let lifted = name_node.parent().filter(|p| p.is_kind("type_specifier"));
        let is_global = lifted
            .map(|ts| ts.child_by_field("global").is_some())
            .unwrap_or(false);
        let idents = helpers::name_identifiers(&name_node);
        if let Some(reference) = build_reference(document, idents, is_global, offset, ReferenceKind::Class) {
            return Some(reference);
        }
    }

    if let Some(cref) = innermost_of_kind(&root, offset, "component_reference") {
        let is_global = cref.child_by_field("global").is_some();
        let idents = helpers::name_identifiers(&cref);
        if let Some(reference) =
            build_reference(document, idents, is_global, offset, ReferenceKind::Variable)
        {
            return Some(reference);
        }
    }

    if let Some(ident) = innermost_of_kind(&root, offset, "IDENT") {
        let path = SymbolPath::single(ident.text());
        return Some(UnresolvedReference::relative(path, None, document, ident));
    }

    None
}

/// The innermost descendant of `root` of kind `kind` whose span contains or
/// touches `offset`.
fn innermost_of_kind<'t>(root: &SyntaxNode<'t>, offset: usize, kind: &str) -> Option<SyntaxNode<'t>> {
    let mut best: Option<SyntaxNode<'t>> = None;
    helpers::for_each(root, &mut |n| {
        if !n.span().contains_or_touches(offset) {
            return false;
        }
        if n.is_kind(kind) {
            best = Some(*n);
        }
        true
    });
    best
}

/// Drops every identifier whose start lies strictly after `offset` (so
/// `A.B.|C` resolves `A.B`, not `A.B.C`), then builds the remaining
/// sequence into a reference anchored at the last kept identifier.
fn build_reference<'d>(
    document: &'d Document,
    idents: Vec<SyntaxNode<'d>>,
    is_global: bool,
    offset: usize,
    kind: ReferenceKind,
) -> Option<UnresolvedReference<'d>> {
    let kept: Vec<SyntaxNode<'d>> = idents
        .into_iter()
        .filter(|id| id.start().byte <= offset)
        .collect();
    let last = *kept.last()?;
    let path = SymbolPath::new(kept.iter().map(|n| n.text().to_string()).collect()).ok()?;

    Some(if is_global {
        UnresolvedReference::absolute(path, Some(kind))
    } else {
        UnresolvedReference::relative(path, Some(kind), document, last)
    })
}
