//! The absolute-reference walk: the bounded state machine
//! that descends a `[s1, ..., sn]` absolute path through a library's root
//! package, sibling files, class members, and superclasses.
//!
//! The `kind` tag handed to [`resolve_absolute`] is threaded through every
//! step unchanged rather than re-derived per step (see `DESIGN.md`'s "known
//! bug" note): it only ever gates whether superclass search is attempted at
//! a given step, never which member-search matches count.

use std::path::Path;

use crate::core::CoreError;
use crate::core::constants::PACKAGE_FILE_NAME;
use crate::project::{Document, Project};
use crate::reference::{ReferenceKind, ResolvedReference, SymbolPath};
use crate::syntax::SyntaxNode;
use crate::syntax::helpers;

use super::type_lookup;

/// One step of the bounded walk: the document and node a prefix of the
/// path has resolved to so far, and that step's kind.
#[derive(Clone, Copy)]
pub(crate) struct Step<'d> {
    pub document: &'d Document,
    pub node: SyntaxNode<'d>,
    pub kind: ReferenceKind,
}

pub(crate) fn resolve_absolute<'d>(
    project: &'d Project,
    path: &SymbolPath,
    kind: Option<ReferenceKind>,
) -> Result<Option<ResolvedReference<'d>>, CoreError> {
    let components = path.components();

    let library = match project.library_by_name(&components[0]) {
        Some(l) => l,
        None => return Ok(None),
    };

    let package_mo = library.root_path().join(PACKAGE_FILE_NAME);
    let root_document = match library.get(&package_mo) {
        Some(d) => d,
        None => return Ok(None),
    };
    let root_class = match top_level_class(root_document.tree().root(), &components[0]) {
        Some(n) => n,
        None => return Ok(None),
    };

    let mut current = Step {
        document: root_document,
        node: root_class,
        kind: ReferenceKind::Class,
    };

    for symbol in &components[1..] {
        if current.kind == ReferenceKind::Variable {
            current = match type_lookup::lookup_type(project, &current)? {
                Some(step) => step,
                None => return Ok(None),
            };
        }

        current = match resolve_step(project, &current, symbol, kind)? {
            Some(step) => step,
            None => return Ok(None),
        };
    }

    let resolved = ResolvedReference::new(current.document, current.node, path.clone(), current.kind)?;
    Ok(Some(resolved))
}

fn resolve_step<'d>(
    project: &'d Project,
    current: &Step<'d>,
    symbol: &str,
    kind: Option<ReferenceKind>,
) -> Result<Option<Step<'d>>, CoreError> {
    let dir = current
        .document
        .path()
        .parent()
        .unwrap_or_else(|| Path::new(""));

    // 3b: filesystem-first.
    if let Some(step) = try_subfile(project, current.document, dir, symbol) {
        return Ok(Some(step));
    }

    // 3c: member of the current class.
    if let Some(step) = find_member(current.document, current.node, symbol) {
        return Ok(Some(step));
    }

    // 3d: superclasses, only when the reference being looked up isn't a class.
    if kind.map(ReferenceKind::allows_superclass_search).unwrap_or(true) {
        return search_superclasses(project, current, symbol);
    }

    Ok(None)
}

/// `D/s.mo` before `D/s/package.mo`: when both exist, the single-file form
/// wins.
fn try_subfile<'d>(
    project: &'d Project,
    document: &'d Document,
    dir: &Path,
    symbol: &str,
) -> Option<Step<'d>> {
    let library = project.library_by_name(document.library_name())?;

    let single_file = dir.join(format!("{symbol}.mo"));
    if let Some(doc) = library.get(&single_file) {
        if let Some(class_node) = top_level_class(doc.tree().root(), symbol) {
            return Some(Step {
                document: doc,
                node: class_node,
                kind: ReferenceKind::Class,
            });
        }
    }

    let package_file = dir.join(symbol).join(PACKAGE_FILE_NAME);
    if let Some(doc) = library.get(&package_file) {
        if let Some(class_node) = top_level_class(doc.tree().root(), symbol) {
            return Some(Step {
                document: doc,
                node: class_node,
                kind: ReferenceKind::Class,
            });
        }
    }

    None
}

fn top_level_class<'t>(tree_root: SyntaxNode<'t>, name: &str) -> Option<SyntaxNode<'t>> {
    tree_root
        .children()
        .filter(|c| c.is_kind("stored_definition"))
        .filter_map(|sd| sd.child_by_field("classDefinition"))
        .find(|cd| helpers::declared_identifiers(cd).iter().any(|d| d == name))
}

fn composition_of<'t>(class_node: &SyntaxNode<'t>) -> Option<SyntaxNode<'t>> {
    let specifier = class_node.child_by_field("classSpecifier")?;
    specifier.children().find(|c| c.is_kind("composition"))
}

/// Every `element_list` reachable from `composition`, unwrapping the
/// `public`/`protected` wrappers one level deep (all three forms are
/// treated alike).
pub(crate) fn element_lists_of<'t>(composition: &SyntaxNode<'t>) -> Vec<SyntaxNode<'t>> {
    let mut lists = Vec::new();
    for child in composition.children() {
        match child.kind() {
            "element_list" => lists.push(child),
            "public_element_list" | "protected_element_list" => {
                if let Some(inner) = child.children().find(|c| c.is_kind("element_list")) {
                    lists.push(inner);
                }
            }
            _ => {}
        }
    }
    lists
}

pub(crate) fn import_clauses_of<'t>(class_node: &SyntaxNode<'t>) -> Vec<SyntaxNode<'t>> {
    composition_of(class_node)
        .map(|comp| {
            element_lists_of(&comp)
                .into_iter()
                .flat_map(|el| el.children())
                .filter(|c| c.is_kind("import_clause"))
                .collect()
        })
        .unwrap_or_default()
}

fn members_of<'t>(class_node: &SyntaxNode<'t>) -> Vec<SyntaxNode<'t>> {
    composition_of(class_node)
        .map(|comp| {
            element_lists_of(&comp)
                .into_iter()
                .flat_map(|el| el.children())
                .filter(|c| c.is_kind("named_element"))
                .collect()
        })
        .unwrap_or_default()
}

fn extends_clauses_of<'t>(class_node: &SyntaxNode<'t>) -> Vec<SyntaxNode<'t>> {
    composition_of(class_node)
        .map(|comp| {
            element_lists_of(&comp)
                .into_iter()
                .flat_map(|el| el.children())
                .filter(|c| c.is_kind("extends_clause"))
                .collect()
        })
        .unwrap_or_default()
}

/// First member by declared identifier wins (document order). No kind
/// filter here: a matched variable simply drives the next loop iteration's
/// type-lookup promotion if more symbols remain.
fn find_member<'d>(document: &'d Document, class_node: SyntaxNode<'d>, symbol: &str) -> Option<Step<'d>> {
    for member in members_of(&class_node) {
        if helpers::declared_identifiers(&member).iter().any(|d| d == symbol) {
            if let Some(cd) = member.child_by_field("classDefinition") {
                return Some(Step {
                    document,
                    node: cd,
                    kind: ReferenceKind::Class,
                });
            }
            if let Some(cc) = member.child_by_field("componentClause") {
                return Some(Step {
                    document,
                    node: cc,
                    kind: ReferenceKind::Variable,
                });
            }
        }
    }
    None
}

/// Resolves every `extends_clause` superclass of `current.node` to its
/// declaring class through the full resolver, then searches its members and
/// (recursively) its own superclasses, in declaration order.
fn search_superclasses<'d>(
    project: &'d Project,
    current: &Step<'d>,
    symbol: &str,
) -> Result<Option<Step<'d>>, CoreError> {
    for extends in extends_clauses_of(&current.node) {
        let Some(type_ref) = type_lookup::reference_from_type_specifier(current.document, extends)
        else {
            continue;
        };
        let resolved = super::resolve_reference(project, &type_ref, super::ResolutionMode::Declaration)?;
        let Some(super_class) = resolved else {
            continue;
        };

        let super_step = Step {
            document: super_class.document(),
            node: super_class.node(),
            kind: ReferenceKind::Class,
        };

        if let Some(found) = find_member(super_step.document, super_step.node, symbol) {
            return Ok(Some(found));
        }
        if let Some(found) = search_superclasses(project, &super_step, symbol)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
