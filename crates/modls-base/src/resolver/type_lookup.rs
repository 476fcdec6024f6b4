//! Type-lookup: promotes a resolved variable step to the
//! class its declared type names, so the absolute walk can keep descending
//! through component references.

use crate::core::CoreError;
use crate::project::{Document, Project};
use crate::reference::{ReferenceKind, SymbolPath, UnresolvedReference};
use crate::syntax::SyntaxNode;
use crate::syntax::helpers;

use super::ResolutionMode;
use super::absolute::Step;
use super::resolve_reference;

/// Builds an unresolved reference from a node with a `typeSpecifier` field
/// (a `component_clause` or an `extends_clause`), anchored at `anchor` when
/// the specifier isn't globally rooted.
pub(crate) fn reference_from_type_specifier<'d>(
    document: &'d Document,
    anchor: SyntaxNode<'d>,
) -> Option<UnresolvedReference<'d>> {
    let (idents, is_global) = helpers::type_specifier_path(&anchor)?;
    let components: Vec<String> = idents.iter().map(|n| n.text().to_string()).collect();
    let path = SymbolPath::new(components).ok()?;
    Some(if is_global {
        UnresolvedReference::absolute(path, Some(ReferenceKind::Class))
    } else {
        UnresolvedReference::relative(path, Some(ReferenceKind::Class), document, anchor)
    })
}

/// Resolves `current`'s declared type to the class it names. Returns
/// `Ok(None)` for a builtin scalar type (`Real`/`Integer`/`Boolean`/
/// `String`), which is never declared anywhere and halts the chain per
/// builtin scalar.
pub(crate) fn lookup_type<'d>(
    project: &'d Project,
    current: &Step<'d>,
) -> Result<Option<Step<'d>>, CoreError> {
    let reference = match reference_from_type_specifier(current.document, current.node) {
        Some(r) => r,
        None => return Ok(None),
    };
    let resolved = resolve_reference(project, &reference, ResolutionMode::Declaration)?;
    Ok(resolved.map(|r| Step {
        document: r.document(),
        node: r.node(),
        kind: ReferenceKind::Class,
    }))
}
