//! A parsed text buffer with its syntax tree and derived package identity
//! (spec.md §3/§4.3).
//!
//! Grounded on the teacher's `semantic/workspace/file.rs` `WorkspaceFile`
//! (owns a path, content, and a populated flag) generalized to also own a
//! live syntax tree and support partial-edit application, since spec.md's
//! Document — unlike the teacher's whole-file-replace `WorkspaceFile` —
//! must support incremental updates (§4.3).

use std::path::{Path, PathBuf};

use crate::core::text_utils::LineIndex;
use crate::core::{CoreError, Point};
use crate::syntax::parser;
use crate::syntax::SyntaxTree;

/// A half-open `(startLine, startCol)`–`(endLine, endCol)` edit range, as
/// delivered by the editor transport layer (outside the core's scope).
/// Columns are UTF-8 byte offsets within their line, matching `Point`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRange {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

/// A parsed `.mo` file bound to the library that owns it.
pub struct Document {
    path: PathBuf,
    uri: String,
    library_name: String,
    text: String,
    tree: SyntaxTree,
    line_index: LineIndex,
    version: u64,
    package_path: Vec<String>,
}

impl Document {
    /// Loads `path` from disk and parses it. `library_root`/`library_name`
    /// identify the owning library so the package path can be derived.
    pub fn load(
        path: &Path,
        library_root: &Path,
        library_name: &str,
    ) -> Result<Self, CoreError> {
        let text = crate::core::file_io::load_file(&path.to_path_buf())?;
        Self::from_text(path, library_root, library_name, text)
    }

    /// Constructs a document from already-read text (editor-provided
    /// `didOpen` content, or a file just read from disk).
    pub fn from_text(
        path: &Path,
        library_root: &Path,
        library_name: &str,
        text: String,
    ) -> Result<Self, CoreError> {
        let tree = parser::parse_content(&text)?;
        let line_index = LineIndex::new(&text);
        let package_path = compute_package_path(library_name, library_root, path);
        Ok(Self {
            path: path.to_path_buf(),
            uri: path_to_uri(path),
            library_name: library_name.to_string(),
            text,
            tree,
            line_index,
            version: 0,
            package_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// The fully-qualified identifier sequence of the class this file
    /// defines (spec.md §3: `<libRoot>/A/B/C.mo` → `[lib, A, B, C]`;
    /// `<libRoot>/A/B/package.mo` → `[lib, A, B]`).
    pub fn package_path(&self) -> &[String] {
        &self.package_path
    }

    /// `package_path` minus its last component: the enclosing package.
    pub fn within_path(&self) -> &[String] {
        let len = self.package_path.len();
        if len == 0 {
            &self.package_path
        } else {
            &self.package_path[..len - 1]
        }
    }

    pub fn offset_at(&self, line: usize, column: usize) -> Option<usize> {
        self.line_index.offset_at_position(line, column)
    }

    pub fn point_at(&self, offset: usize) -> Point {
        self.line_index.point_at_offset(offset)
    }

    /// Replaces the whole buffer and reparses from scratch.
    pub fn replace_text(&mut self, new_text: String) -> Result<(), CoreError> {
        self.tree = parser::apply_edit(&new_text)?;
        self.line_index = LineIndex::new(&new_text);
        self.text = new_text;
        self.version += 1;
        Ok(())
    }

    /// Applies an incremental edit: splice `replacement` into the buffer at
    /// `range`, then reparse. `pest` has no incremental-reparse API (see
    /// `syntax::parser`'s module doc), so "reparse using that tree as a
    /// hint" concretely means "reparse the whole updated buffer" here.
    pub fn apply_edit(&mut self, range: EditRange, replacement: &str) -> Result<(), CoreError> {
        let start = self
            .line_index
            .offset_at_position(range.start_line, range.start_column)
            .ok_or_else(|| CoreError::invariant_violated("edit range start out of bounds"))?;
        let end = self
            .line_index
            .offset_at_position(range.end_line, range.end_column)
            .ok_or_else(|| CoreError::invariant_violated("edit range end out of bounds"))?;
        if start > end {
            return Err(CoreError::invariant_violated(
                "edit range start after end",
            ));
        }

        let mut new_text = String::with_capacity(self.text.len() - (end - start) + replacement.len());
        new_text.push_str(&self.text[..start]);
        new_text.push_str(replacement);
        new_text.push_str(&self.text[end..]);

        self.replace_text(new_text)
    }
}

/// Derives a document's package path from its location relative to its
/// library root.
fn compute_package_path(library_name: &str, library_root: &Path, file_path: &Path) -> Vec<String> {
    let mut path = vec![library_name.to_string()];

    let relative = match file_path.strip_prefix(library_root) {
        Ok(rel) => rel,
        Err(_) => return path,
    };

    let mut components: Vec<&std::ffi::OsStr> = relative
        .components()
        .map(|c| c.as_os_str())
        .collect();

    if let Some(last) = components.pop() {
        let last = Path::new(last);
        for dir in &components {
            if let Some(s) = dir.to_str() {
                path.push(s.to_string());
            }
        }
        let is_package_file = last
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n == crate::core::constants::PACKAGE_FILE_NAME)
            .unwrap_or(false);
        if !is_package_file {
            if let Some(stem) = last.file_stem().and_then(|s| s.to_str()) {
                path.push(stem.to_string());
            }
        }
    }

    path
}

fn path_to_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}
