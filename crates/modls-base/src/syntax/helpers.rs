//! Tree helpers (spec.md §4.1): pure functions over [`SyntaxNode`] that the
//! rest of the core uses instead of touching node kinds directly.
//!
//! Grounded on the recursive position/predicate walks in the teacher's
//! `semantic/adapters/sysml/selection.rs` (`find_selection_spans`,
//! `collect_containing_spans`), generalized from a typed SysML AST walk to
//! a walk over the generic [`SyntaxNode`] this crate builds instead.

use crate::syntax::node::SyntaxNode;

/// True iff `n`'s kind is a class definition.
pub fn is_definition(n: &SyntaxNode) -> bool {
    n.is_kind("class_definition")
}

/// True for a component-clause, a component-redeclaration, or a
/// named-element whose class-definition child is absent.
pub fn is_variable_declaration(n: &SyntaxNode) -> bool {
    match n.kind() {
        "component_clause" | "component_redeclaration" => true,
        "named_element" => n.child_by_field("classDefinition").is_none(),
        _ => false,
    }
}

/// True for any of the element-list variants.
pub fn is_element_list(n: &SyntaxNode) -> bool {
    matches!(
        n.kind(),
        "element_list" | "public_element_list" | "protected_element_list"
    )
}

/// The identifiers a declaration node introduces into its enclosing scope.
///
/// Unknown declaration kinds produce the empty sequence.
pub fn declared_identifiers<'t>(n: &SyntaxNode<'t>) -> Vec<String> {
    match n.kind() {
        "class_definition" => n
            .child_by_field("classSpecifier")
            .and_then(|spec| spec.child_by_field("identifier"))
            .map(|id| vec![id.text().to_string()])
            .unwrap_or_default(),
        "component_clause" => n
            .children_by_field("componentDeclarations")
            .iter()
            .filter_map(|decl| decl.child_by_field("declaration"))
            .filter_map(|d| d.child_by_field("identifier"))
            .map(|id| id.text().to_string())
            .collect(),
        "component_redeclaration" => n
            .child_by_field("componentClause")
            .map(|cc| declared_identifiers(&cc))
            .or_else(|| n.child_by_field("classSpecifier").map(|_| vec![]))
            .unwrap_or_default(),
        "named_element" => {
            if let Some(cd) = n.child_by_field("classDefinition") {
                declared_identifiers(&cd)
            } else if let Some(cc) = n.child_by_field("componentClause") {
                declared_identifiers(&cc)
            } else {
                Vec::new()
            }
        }
        "element_list" | "public_element_list" | "protected_element_list" | "stored_definitions" => n
            .children()
            .flat_map(|c| declared_identifiers(&c))
            .collect(),
        "stored_definition" => n
            .child_by_field("classDefinition")
            .map(|cd| declared_identifiers(&cd))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// For a `name` or `component_reference` use site, the ordered sequence of
/// identifier subnodes making up the dotted path.
pub fn name_identifiers<'t>(n: &SyntaxNode<'t>) -> Vec<SyntaxNode<'t>> {
    match n.kind() {
        "name" | "component_reference" => n.children().filter(|c| c.is_kind("IDENT")).collect(),
        "IDENT" => vec![*n],
        _ => Vec::new(),
    }
}

/// Given a node containing a `type_specifier` descendant (or the
/// `type_specifier` itself), the dotted identifier sequence plus whether
/// the specifier is rooted at the global scope (a leading `.`).
pub fn type_specifier_path<'t>(n: &SyntaxNode<'t>) -> Option<(Vec<SyntaxNode<'t>>, bool)> {
    let spec = if n.is_kind("type_specifier") {
        Some(*n)
    } else {
        n.child_by_field("typeSpecifier")
    }?;
    let name = spec.child_by_field("name")?;
    let is_global = spec.child_by_field("global").is_some();
    Some((name_identifiers(&name), is_global))
}

/// Pre-order depth-first search for the first node satisfying `predicate`.
pub fn find_first<'t, F>(root: &SyntaxNode<'t>, predicate: F) -> Option<SyntaxNode<'t>>
where
    F: Fn(&SyntaxNode<'t>) -> bool + Copy,
{
    if predicate(root) {
        return Some(*root);
    }
    for child in root.children() {
        if let Some(found) = find_first(&child, predicate) {
            return Some(found);
        }
    }
    None
}

/// Walks parent pointers upward from `node` (exclusive) until `predicate`
/// holds or the root is passed.
pub fn find_parent<'t, F>(node: &SyntaxNode<'t>, predicate: F) -> Option<SyntaxNode<'t>>
where
    F: Fn(&SyntaxNode<'t>) -> bool,
{
    let mut current = node.parent();
    while let Some(n) = current {
        if predicate(&n) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Pre-order walk; `visit` returning `false` prunes that node's subtree.
pub fn for_each<'t, F>(root: &SyntaxNode<'t>, visit: &mut F)
where
    F: FnMut(&SyntaxNode<'t>) -> bool,
{
    if !visit(root) {
        return;
    }
    for child in root.children() {
        for_each(&child, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parser::parse_content;

    #[test]
    fn classifies_definitions_and_variables() {
        let src = "model M\n Real x;\nend M;\n";
        let tree = parse_content(src).unwrap();
        let class_def = find_first(&tree.root(), |n| n.is_kind("class_definition")).unwrap();
        assert!(is_definition(&class_def));

        let named_element = find_first(&tree.root(), |n| n.is_kind("named_element")).unwrap();
        assert!(is_variable_declaration(&named_element));
        assert!(!is_definition(&named_element));
    }

    #[test]
    fn declared_identifiers_for_class_and_component() {
        let src = "model M\n Real x, y;\nend M;\n";
        let tree = parse_content(src).unwrap();
        let class_def = find_first(&tree.root(), |n| n.is_kind("class_definition")).unwrap();
        assert_eq!(declared_identifiers(&class_def), vec!["M".to_string()]);

        let component_clause = find_first(&tree.root(), |n| n.is_kind("component_clause")).unwrap();
        assert_eq!(
            declared_identifiers(&component_clause),
            vec!["x".to_string(), "y".to_string()]
        );
    }

    #[test]
    fn type_specifier_path_reports_global_flag() {
        let src = "model M\n .Foo.Bar x;\nend M;\n";
        let tree = parse_content(src).unwrap();
        let component_clause = find_first(&tree.root(), |n| n.is_kind("component_clause")).unwrap();
        let (idents, is_global) = type_specifier_path(&component_clause).unwrap();
        assert!(is_global);
        let names: Vec<_> = idents.iter().map(|n| n.text()).collect();
        assert_eq!(names, vec!["Foo", "Bar"]);
    }

    #[test]
    fn for_each_prunes_subtree() {
        let src = "model M\n Real x;\n Real y;\nend M;\n";
        let tree = parse_content(src).unwrap();
        let mut visited_clauses = 0;
        for_each(&tree.root(), &mut |n| {
            if n.is_kind("component_clause") {
                visited_clauses += 1;
                return false;
            }
            true
        });
        assert_eq!(visited_clauses, 2);
    }

    #[test]
    fn find_parent_walks_up_to_enclosing_class() {
        let src = "model M\n Real x;\nend M;\n";
        let tree = parse_content(src).unwrap();
        let ident = find_first(&tree.root(), |n| n.is_kind("IDENT") && n.text() == "x").unwrap();
        let enclosing = find_parent(&ident, is_definition).unwrap();
        assert_eq!(declared_identifiers(&enclosing), vec!["M".to_string()]);
    }
}
