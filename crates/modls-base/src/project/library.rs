//! A Modelica library: a root directory and every `.mo` document loaded
//! under it (spec.md §3/§4.4).
//!
//! Grounded on the teacher's `semantic/workspace.rs` (`files: HashMap<PathBuf,
//! _>` plus `add_file`/`get_file`/`update_file`/`remove_file`) for the
//! document table, and `project/stdlib_loader/loader.rs` (`rayon::par_iter`
//! over a recursively-collected file list) for `Library::load` — except
//! spec.md's model is one `Library` per root directory rather than one
//! flat `Workspace`, since Modelica scoping is filesystem-hierarchical.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::core::constants::SUPPORTED_EXTENSIONS;
use crate::core::CoreError;
use crate::project::document::Document;

/// Owns a root directory and the documents loaded from beneath it. The
/// library's name — the basename of its root — is the first component of
/// every contained document's package path.
pub struct Library {
    root_path: PathBuf,
    name: String,
    is_workspace: bool,
    documents: HashMap<PathBuf, Document>,
}

impl Library {
    pub fn new(root_path: PathBuf, is_workspace: bool) -> Self {
        let name = root_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        Self {
            root_path,
            name,
            is_workspace,
            documents: HashMap::new(),
        }
    }

    /// Walks `root_path` for `.mo` files and parses each at load time.
    /// Individual parse/read failures are skipped rather than aborting the
    /// whole load (mirroring the teacher's stdlib loader); only a failure
    /// to read the root directory itself is fatal.
    pub fn load(root_path: PathBuf, is_workspace: bool) -> Result<Self, CoreError> {
        let mut library = Self::new(root_path.clone(), is_workspace);
        let file_paths = collect_mo_files(&root_path)?;
        let name = library.name.clone();

        let parsed: Vec<(PathBuf, Result<Document, CoreError>)> = file_paths
            .par_iter()
            .map(|path| (path.clone(), Document::load(path, &root_path, &name)))
            .collect();

        for (path, result) in parsed {
            if let Ok(doc) = result {
                library.documents.insert(path, doc);
            }
        }

        Ok(library)
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_workspace(&self) -> bool {
        self.is_workspace
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        path.starts_with(&self.root_path)
    }

    pub fn get(&self, path: &Path) -> Option<&Document> {
        self.documents.get(path)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Document> {
        self.documents.get_mut(path)
    }

    pub fn insert(&mut self, path: PathBuf, document: Document) {
        self.documents.insert(path, document);
    }

    pub fn remove(&mut self, path: &Path) -> Option<Document> {
        self.documents.remove(path)
    }

    pub fn documents(&self) -> impl Iterator<Item = (&PathBuf, &Document)> {
        self.documents.iter()
    }
}

fn collect_mo_files(dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    Ok(paths)
}

fn collect_recursive(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), CoreError> {
    let entries = fs::read_dir(dir).map_err(|_| CoreError::io_directory_not_found(&dir.to_path_buf()))?;

    for entry in entries {
        let entry = entry.map_err(|e| CoreError::internal(format!("bad directory entry: {e}")))?;
        let path = entry.path();

        if path.is_dir() {
            collect_recursive(&path, paths)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        {
            paths.push(path);
        }
    }

    Ok(())
}
