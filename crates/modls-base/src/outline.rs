//! Document symbols: the one explicitly in-scope outline helper (spec.md
//! §1, "Document outline generation beyond a single helper that flattens
//! declared class names from one tree").
//!
//! Grounded on the teacher's `semantic/adapters/sysml/selection.rs`
//! pattern of walking one file's tree and collecting a flat `Vec` of
//! results — narrowed here to top-level and nested class-definition names
//! only, since a full SysML-style document-symbol hierarchy (with
//! features, ports, etc.) is out of scope.

use crate::core::Span;
use crate::syntax::SyntaxNode;
use crate::syntax::helpers;

/// One declared class, with its name, the kind of declaration it came
/// from, and its source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredClass {
    pub name: String,
    pub kind: DeclaredClassKind,
    pub span: Span,
}

/// Distinguishes a top-level class (declared directly by a `stored_definition`)
/// from one nested inside another class's element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredClassKind {
    TopLevel,
    Nested,
}

/// Flattens every declared class name out of one parsed document's tree,
/// top-level classes first in document order, followed by nested classes
/// in pre-order.
///
/// Builtin scalar types never appear here (spec.md §1 Non-goals: they are
/// never declared in any library), since this only reports nodes the parse
/// tree itself introduces as `class_definition`s.
pub fn document_symbols<'t>(root: &SyntaxNode<'t>) -> Vec<DeclaredClass> {
    let mut out = Vec::new();
    for stored_definition in root.children().filter(|c| c.is_kind("stored_definition")) {
        if let Some(class_def) = stored_definition.child_by_field("classDefinition") {
            collect_class(&class_def, DeclaredClassKind::TopLevel, &mut out);
        }
    }
    out
}

fn collect_class(class_def: &SyntaxNode<'_>, kind: DeclaredClassKind, out: &mut Vec<DeclaredClass>) {
    let Some(name) = helpers::declared_identifiers(class_def).into_iter().next() else {
        return;
    };
    out.push(DeclaredClass {
        name,
        kind,
        span: class_def.span(),
    });

    for nested in nested_class_definitions(class_def) {
        collect_class(&nested, DeclaredClassKind::Nested, out);
    }
}

/// Every `class_definition` declared directly inside `class_def`'s element
/// lists (one level: a `named_element` whose `classDefinition` field is
/// present), in document order.
fn nested_class_definitions<'t>(class_def: &SyntaxNode<'t>) -> Vec<SyntaxNode<'t>> {
    let Some(specifier) = class_def.child_by_field("classSpecifier") else {
        return Vec::new();
    };
    let Some(composition) = specifier.children().find(|c| c.is_kind("composition")) else {
        return Vec::new();
    };

    composition
        .children()
        .flat_map(|child| unwrap_element_list(&child))
        .flat_map(|list| list.children())
        .filter(|c| c.is_kind("named_element"))
        .filter_map(|named| named.child_by_field("classDefinition"))
        .collect()
}

/// `element_list` stands for itself; `public_element_list`/
/// `protected_element_list` wrap one `element_list` child one level in.
fn unwrap_element_list<'t>(n: &SyntaxNode<'t>) -> Option<SyntaxNode<'t>> {
    match n.kind() {
        "element_list" => Some(*n),
        "public_element_list" | "protected_element_list" => {
            n.children().find(|c| c.is_kind("element_list"))
        }
        _ => None,
    }
}
