//! The container holding loaded libraries and documents (spec.md §3/§4.4).
//!
//! Grounded on the teacher's `semantic/workspace.rs` CRUD surface
//! (`add_file`/`get_file`/`update_file`/`remove_file`), generalized from
//! one flat file map to an ordered list of [`Library`] roots, since
//! Modelica scoping is filesystem-hierarchical rather than a single global
//! namespace.

use std::path::{Path, PathBuf};

use crate::core::CoreError;
use crate::project::document::{Document, EditRange};
use crate::project::library::Library;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddDocumentOutcome {
    Added,
    AlreadyPresent,
}

/// Owns an ordered list of libraries. Library names are unique within a
/// project; a document belongs to at most one library — both are relied
/// on by the resolver (spec.md §4.5.1 step 1: "find the unique library
/// whose name equals `s₁`").
///
/// Spec.md also has Project "own a reference to the parser"; this crate's
/// parser (`syntax::parser`) is a stateless set of free functions, so
/// there is nothing stateful to hold here — Project simply calls into it.
pub struct Project {
    libraries: Vec<Library>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    pub fn new() -> Self {
        Self {
            libraries: Vec::new(),
        }
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// Appends `library`, enforcing the project-wide name-uniqueness
    /// invariant.
    pub fn add_library(&mut self, library: Library) -> Result<(), CoreError> {
        if self.library_by_name(library.name()).is_some() {
            return Err(CoreError::invariant_violated(format!(
                "a library named '{}' is already loaded",
                library.name()
            )));
        }
        self.libraries.push(library);
        Ok(())
    }

    /// Walks `root_path` for `.mo` files, parses them, and adds the
    /// resulting library to the project.
    pub fn load_library(&mut self, root_path: PathBuf, is_workspace: bool) -> Result<(), CoreError> {
        let library = Library::load(root_path, is_workspace)?;
        self.add_library(library)
    }

    pub fn library_by_name(&self, name: &str) -> Option<&Library> {
        self.libraries.iter().find(|l| l.name() == name)
    }

    fn library_index_for_path(&self, path: &Path) -> Option<usize> {
        self.libraries
            .iter()
            .position(|l| l.contains_path(path) && l.get(path).is_some())
            .or_else(|| self.libraries.iter().position(|l| l.contains_path(path)))
    }

    /// Locates the unique library whose root is an ancestor of `path`,
    /// loads the file, and inserts it there. If no library matches, loads
    /// the file as a standalone library rooted at its containing
    /// directory — but only if the file's `within` clause is empty;
    /// otherwise the document does not belong to any known library and
    /// this fails with `not-found`.
    pub fn add_document(&mut self, path: &Path) -> Result<AddDocumentOutcome, CoreError> {
        if self.get_document(path).is_some() {
            return Ok(AddDocumentOutcome::AlreadyPresent);
        }

        if let Some(idx) = self.library_index_for_path(path) {
            let library = &mut self.libraries[idx];
            let doc = Document::load(path, library.root_path(), library.name())?;
            library.insert(path.to_path_buf(), doc);
            return Ok(AddDocumentOutcome::Added);
        }

        let text = crate::core::file_io::load_file(&path.to_path_buf())?;
        let tree = crate::syntax::parser::parse_content(&text)?;
        let has_nonempty_within = tree
            .root()
            .children()
            .find(|c| c.is_kind("within_clause"))
            .map(|w| w.child_by_field("name").is_some())
            .unwrap_or(false);
        if has_nonempty_within {
            return Err(CoreError::not_found(format!(
                "no library contains {}",
                path.display()
            )));
        }

        let root = path
            .parent()
            .ok_or_else(|| CoreError::invariant_violated("document path has no parent directory"))?
            .to_path_buf();
        let name = root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let doc = Document::from_text(path, &root, &name, text)?;
        let mut library = Library::new(root, false);
        library.insert(path.to_path_buf(), doc);
        self.add_library(library)?;
        Ok(AddDocumentOutcome::Added)
    }

    /// A pure lookup against already-loaded documents. This is the
    /// `{load: false}` case of spec.md §4.4's `getDocument(path, {load?})` —
    /// it never reads the filesystem. The `{load}`-defaulting-to-true case
    /// (consult every library's document table; on miss, attempt
    /// `addDocument`) needs `&mut self` to load a fresh document, so it is
    /// exposed separately as [`Self::get_or_load_document`], which is the
    /// operation spec.md actually names `getDocument`.
    pub fn get_document(&self, path: &Path) -> Option<&Document> {
        self.libraries.iter().find_map(|l| l.get(path))
    }

    /// `getDocument(path, {load})` with `load` defaulting to true: returns
    /// the document, attempting `addDocument` first on a miss.
    pub fn get_or_load_document(&mut self, path: &Path) -> Option<&Document> {
        if self.get_document(path).is_none() {
            let _ = self.add_document(path);
        }
        self.get_document(path)
    }

    /// Finds the document and updates it in place; `false` if absent.
    pub fn update_document(
        &mut self,
        path: &Path,
        text: String,
        range: Option<EditRange>,
    ) -> Result<bool, CoreError> {
        let idx = match self.library_index_for_path_with_doc(path) {
            Some(idx) => idx,
            None => return Ok(false),
        };
        let library = &mut self.libraries[idx];
        let doc = library
            .get_mut(path)
            .expect("library_index_for_path_with_doc guarantees presence");

        match range {
            Some(range) => doc.apply_edit(range, &text)?,
            None => doc.replace_text(text)?,
        }
        Ok(true)
    }

    fn library_index_for_path_with_doc(&self, path: &Path) -> Option<usize> {
        self.libraries.iter().position(|l| l.get(path).is_some())
    }

    /// Removes the document from its library; returns whether anything was
    /// removed.
    pub fn remove_document(&mut self, path: &Path) -> bool {
        for library in &mut self.libraries {
            if library.remove(path).is_some() {
                return true;
            }
        }
        false
    }
}
