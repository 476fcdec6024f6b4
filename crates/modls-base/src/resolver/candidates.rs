//! Relative-to-absolute promotion: builds the ordered sequence of absolute
//! candidate paths for a reference anchored at a use
//! site. The caller (`resolver::mod`) tries each candidate through the
//! absolute walk and stops at the first success, so this only has to
//! produce the sequence in the right order — it never itself decides
//! success or failure.
//!
//! Candidates alternate, from the innermost enclosing class outward: the
//! fully (or progressively less-fully) qualified path through
//! `document.within ++ ancestors`, interleaved with the four `import_clause`
//! forms visible at each enclosing class, so that inner scopes win.

use crate::project::Document;
use crate::reference::SymbolPath;
use crate::syntax::SyntaxNode;
use crate::syntax::helpers;

use super::absolute;

pub(crate) fn generate_candidates(
    document: &Document,
    anchor: SyntaxNode<'_>,
    symbols: &SymbolPath,
) -> Vec<SymbolPath> {
    let ancestor_classes = enclosing_classes(&anchor);
    let ancestor_names: Vec<String> = ancestor_classes
        .iter()
        .map(|c| {
            helpers::declared_identifiers(c)
                .into_iter()
                .next()
                .unwrap_or_default()
        })
        .collect();

    let within = document.within_path();
    let mut full_prefix = within.to_vec();
    full_prefix.extend(ancestor_names.iter().rev().cloned());

    let within_len = within.len();
    let ancestor_count = ancestor_names.len();

    let mut candidates = Vec::new();
    for depth in 0..=full_prefix.len() {
        let trimmed = full_prefix.len() - depth;
        let components: Vec<String> = full_prefix[..trimmed]
            .iter()
            .cloned()
            .chain(symbols.components().iter().cloned())
            .collect();
        if let Ok(path) = SymbolPath::new(components) {
            candidates.push(path);
        }

        // Import clauses live inside a class body; once `trimmed` has
        // receded past `document.within`'s length we're above every
        // enclosing class and there is nothing left to scan.
        let ancestors_remaining = trimmed.saturating_sub(within_len);
        if ancestors_remaining > 0 && ancestors_remaining <= ancestor_count {
            let idx = ancestor_count - ancestors_remaining;
            if let Some(class_node) = ancestor_classes.get(idx) {
                candidates.extend(import_candidates(class_node, symbols));
            }
        }
    }

    candidates
}

/// Enclosing `class_definition` nodes of `anchor`, innermost first.
fn enclosing_classes<'t>(anchor: &SyntaxNode<'t>) -> Vec<SyntaxNode<'t>> {
    let mut classes = Vec::new();
    let mut current = anchor.parent();
    while let Some(n) = current {
        if helpers::is_definition(&n) {
            classes.push(n);
        }
        current = n.parent();
    }
    classes
}

/// The four `import_clause` forms, checked against `symbols`' first
/// component at one enclosing class.
fn import_candidates(class_node: &SyntaxNode, symbols: &SymbolPath) -> Vec<SymbolPath> {
    let s1 = symbols.first();
    let rest = &symbols.components()[1..];
    let mut out = Vec::new();

    for import in absolute::import_clauses_of(class_node) {
        if let Some(alias) = import.child_by_field("alias") {
            // §4.5.2(d): an alias substitutes unconditionally, regardless of
            // whether the caller is looking for a class or a variable.
            if alias.text() == s1 {
                if let Some(target) = import.child_by_field("qualifier") {
                    if let Some(path) = build_path(&name_components(&target), rest) {
                        out.push(path);
                    }
                }
            }
        } else if let Some(wildcard) = import.child_by_field("wildcard") {
            let qualifier = name_components(&wildcard);
            if let Some(path) = build_path(&qualifier, symbols.components()) {
                out.push(path);
            }
        } else {
            let imports = import.children_by_field("imports");
            if !imports.is_empty() {
                if imports.iter().any(|n| n.text() == s1) {
                    if let Some(qualifier_node) = import.child_by_field("qualifier") {
                        let mut qualifier = name_components(&qualifier_node);
                        qualifier.push(s1.to_string());
                        if let Some(path) = build_path(&qualifier, rest) {
                            out.push(path);
                        }
                    }
                }
            } else if let Some(qualifier_node) = import.child_by_field("qualifier") {
                let qualifier = name_components(&qualifier_node);
                if qualifier.last().map(String::as_str) == Some(s1) {
                    let base = &qualifier[..qualifier.len() - 1];
                    if let Some(path) = build_path(base, rest) {
                        out.push(path);
                    }
                }
            }
        }
    }

    out
}

fn name_components(name_node: &SyntaxNode) -> Vec<String> {
    helpers::name_identifiers(name_node)
        .iter()
        .map(|n| n.text().to_string())
        .collect()
}

fn build_path(prefix: &[String], suffix: &[String]) -> Option<SymbolPath> {
    let mut v = prefix.to_vec();
    v.extend(suffix.iter().cloned());
    SymbolPath::new(v).ok()
}
