//! The resolver — the core's single public operation.
//!
//! This is new code, not adapted from a prior implementation: the closest
//! reference implementation's
//! `semantic/resolver.rs` / `NameResolver` resolves qualified-name strings
//! against a single pre-populated global `SymbolTable`, whereas this
//! resolver walks the filesystem and a live syntax tree symbol-by-symbol.
//! Only that implementation's *shape* — a thin struct
//! wrapping shared state with small, single-purpose methods — carries
//! over; see `DESIGN.md` for the full grounding note.

mod absolute;
mod candidates;
mod cursor;
mod type_lookup;

pub use cursor::reference_at_cursor;

use crate::core::CoreError;
use crate::project::Project;
use crate::reference::{ReferenceKind, ResolvedReference, UnresolvedReference};

/// `resolution ∈ {declaration, definition}`. Only
/// `declaration` is implemented; `definition` is a placeholder for future
/// work and fails explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    Declaration,
    Definition,
}

/// `resolveReference(project, reference, resolution) -> resolved | none`.
pub fn resolve_reference<'d>(
    project: &'d Project,
    reference: &UnresolvedReference<'d>,
    resolution: ResolutionMode,
) -> Result<Option<ResolvedReference<'d>>, CoreError> {
    if resolution == ResolutionMode::Definition {
        return Err(CoreError::unsupported(
            "definition resolution is not implemented; only declaration lookup is supported",
        ));
    }

    match reference {
        UnresolvedReference::Absolute { path, kind } => {
            absolute::resolve_absolute(project, path, *kind)
        }
        UnresolvedReference::Relative {
            path,
            kind,
            document,
            anchor,
        } => {
            let candidate_paths = candidates::generate_candidates(document, *anchor, path);
            for candidate in candidate_paths {
                // Per-candidate failures are swallowed and drive the
                // generator forward; only the caller-facing
                // failure (definition-mode, above) is surfaced.
                match absolute::resolve_absolute(project, &candidate, *kind) {
                    Ok(Some(resolved)) => return Ok(Some(resolved)),
                    Ok(None) | Err(_) => continue,
                }
            }
            Ok(None)
        }
    }
}

pub(crate) fn default_kind(kind: Option<ReferenceKind>) -> ReferenceKind {
    kind.unwrap_or(ReferenceKind::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::document::EditRange;
    use crate::project::Library;
    use crate::reference::SymbolPath;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(path: &std::path::Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut f = fs::File::create(path).unwrap();
        write!(f, "{contents}").unwrap();
    }

    fn seed_test_library(root: &std::path::Path) {
        write_file(
            &root.join("package.mo"),
            "package TestLibrary\nend TestLibrary;\n",
        );
        write_file(
            &root.join("Constants.mo"),
            "within TestLibrary;\npackage Constants\n  constant Real e = 2.71828;\n  constant Real pi = 3.14159;\nend Constants;\n",
        );
        write_file(
            &root.join("TestPackage/TestClass.mo"),
            "within TestLibrary.TestPackage;\nimport TestLibrary.Constants.pi;\nfunction TestClass\n  input Real twoE = 2 * Constants.e;\n  input Real tau = 2 * pi;\n  input Real notTau = tau / twoE;\nend TestClass;\n",
        );
    }

    fn build_project() -> (tempfile::TempDir, Project) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("TestLibrary");
        seed_test_library(&root);
        let mut project = Project::new();
        project.load_library(root, true).unwrap();
        (dir, project)
    }

    #[test]
    fn resolves_absolute_class() {
        let (_dir, project) = build_project();
        let path = SymbolPath::new(
            vec!["TestLibrary", "TestPackage", "TestClass"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .unwrap();
        let reference = UnresolvedReference::absolute(path, Some(ReferenceKind::Class));
        let resolved = resolve_reference(&project, &reference, ResolutionMode::Declaration)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.kind(), ReferenceKind::Class);
        assert_eq!(resolved.node().kind(), "class_definition");
    }

    #[test]
    fn resolves_absolute_variable() {
        let (_dir, project) = build_project();
        let path = SymbolPath::new(
            vec!["TestLibrary", "Constants", "e"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .unwrap();
        let reference = UnresolvedReference::absolute(path, Some(ReferenceKind::Variable));
        let resolved = resolve_reference(&project, &reference, ResolutionMode::Declaration)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.kind(), ReferenceKind::Variable);
    }

    #[test]
    fn builtin_type_stops_the_chain() {
        let (_dir, project) = build_project();
        let path = SymbolPath::new(
            vec!["TestLibrary", "TestPackage", "TestClass", "tau", "anything"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .unwrap();
        let reference = UnresolvedReference::absolute(path, None);
        let resolved = resolve_reference(&project, &reference, ResolutionMode::Declaration).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn definition_mode_is_unsupported() {
        let (_dir, project) = build_project();
        let path = SymbolPath::single("TestLibrary");
        let reference = UnresolvedReference::absolute(path, None);
        let err = resolve_reference(&project, &reference, ResolutionMode::Definition).unwrap_err();
        assert!(matches!(err, CoreError::Unsupported { .. }));
    }

    #[test]
    fn resolves_relative_local_variable() {
        let (_dir, mut project) = build_project();
        let class_path = project
            .libraries()
            .iter()
            .flat_map(|l| l.documents())
            .find(|(p, _)| p.ends_with("TestClass.mo"))
            .unwrap()
            .0
            .clone();

        // Force-touch the document through the project API to exercise
        // `get_or_load_document` as the LSP layer would.
        let doc = project.get_or_load_document(&class_path).unwrap();
        let tree = doc.tree();
        let use_site = crate::syntax::helpers::find_first(&tree.root(), |n| {
            n.is_kind("IDENT") && n.text() == "tau"
        })
        .unwrap();

        // Re-borrow through the project so the reference's lifetime ties
        // back to project storage rather than the local `doc` binding.
        let doc2 = project.get_document(&class_path).unwrap();
        let anchor = crate::syntax::helpers::find_parent(&use_site, |n| n.is_kind("declaration"))
            .unwrap_or(use_site);
        let reference = UnresolvedReference::relative(
            SymbolPath::single("tau"),
            None,
            doc2,
            anchor,
        );
        let resolved = resolve_reference(&project, &reference, ResolutionMode::Declaration)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.kind(), ReferenceKind::Variable);
        assert_eq!(
            resolved.path().components(),
            &["TestLibrary", "TestPackage", "TestClass", "tau"]
        );
    }

    fn seed_alias_library(root: &std::path::Path) {
        write_file(
            &root.join("package.mo"),
            "package TestLibrary\nend TestLibrary;\n",
        );
        write_file(
            &root.join("Constants.mo"),
            "within TestLibrary;\npackage Constants\n  constant Real e = 2.71828;\nend Constants;\n",
        );
        write_file(
            &root.join("TestPackage/TestClass.mo"),
            "within TestLibrary.TestPackage;\nmodel TestClass\nend TestClass;\n",
        );
        write_file(
            &root.join("AliasUser.mo"),
            "within TestLibrary;\nimport AliasedClass = TestLibrary.TestPackage.TestClass;\nimport AliasedVar = TestLibrary.Constants.e;\nmodel AliasUser\n  Real dummy = 1;\nend AliasUser;\n",
        );
    }

    fn alias_user_path(project: &Project) -> std::path::PathBuf {
        project
            .libraries()
            .iter()
            .flat_map(|l| l.documents())
            .find(|(p, _)| p.ends_with("AliasUser.mo"))
            .unwrap()
            .0
            .clone()
    }

    /// §4.5.2(d): an `import z = A.B.C` alias substitutes unconditionally,
    /// whether the caller is resolving a class or a variable through it.
    #[test]
    fn resolves_class_through_import_alias() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("TestLibrary");
        seed_alias_library(&root);
        let mut project = Project::new();
        project.load_library(root, true).unwrap();

        let class_path = alias_user_path(&project);
        let doc = project.get_or_load_document(&class_path).unwrap();
        let tree = doc.tree();
        let use_site = crate::syntax::helpers::find_first(&tree.root(), |n| {
            n.is_kind("IDENT") && n.text() == "dummy"
        })
        .unwrap();
        let anchor = crate::syntax::helpers::find_parent(&use_site, |n| n.is_kind("declaration"))
            .unwrap_or(use_site);

        let doc2 = project.get_document(&class_path).unwrap();
        let reference = UnresolvedReference::relative(
            SymbolPath::single("AliasedClass"),
            Some(ReferenceKind::Class),
            doc2,
            anchor,
        );
        let resolved = resolve_reference(&project, &reference, ResolutionMode::Declaration)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.kind(), ReferenceKind::Class);
        assert_eq!(
            resolved.path().components(),
            &["TestLibrary", "TestPackage", "TestClass"]
        );
    }

    #[test]
    fn resolves_variable_through_import_alias() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("TestLibrary");
        seed_alias_library(&root);
        let mut project = Project::new();
        project.load_library(root, true).unwrap();

        let class_path = alias_user_path(&project);
        let doc = project.get_or_load_document(&class_path).unwrap();
        let tree = doc.tree();
        let use_site = crate::syntax::helpers::find_first(&tree.root(), |n| {
            n.is_kind("IDENT") && n.text() == "dummy"
        })
        .unwrap();
        let anchor = crate::syntax::helpers::find_parent(&use_site, |n| n.is_kind("declaration"))
            .unwrap_or(use_site);

        let doc2 = project.get_document(&class_path).unwrap();
        let reference = UnresolvedReference::relative(
            SymbolPath::single("AliasedVar"),
            Some(ReferenceKind::Variable),
            doc2,
            anchor,
        );
        let resolved = resolve_reference(&project, &reference, ResolutionMode::Declaration)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.kind(), ReferenceKind::Variable);
        assert_eq!(
            resolved.path().components(),
            &["TestLibrary", "Constants", "e"]
        );
    }

    #[test]
    fn update_document_then_resolve_sees_new_text() {
        let (_dir, mut project) = build_project();
        let path = project
            .libraries()
            .iter()
            .flat_map(|l| l.documents())
            .find(|(p, _)| p.ends_with("package.mo"))
            .unwrap()
            .0
            .clone();
        project
            .update_document(
                &path,
                "kg".to_string(),
                Some(EditRange {
                    start_line: 0,
                    start_column: 8,
                    end_line: 0,
                    end_column: 19,
                }),
            )
            .unwrap();
        let doc = project.get_document(&path).unwrap();
        assert!(doc.text().contains("package kg"));
    }
}
