use super::LspServer;
use crate::server::helpers::uri_to_path;
use modls::CoreError;
use tower_lsp::lsp_types::Url;

impl LspServer {
    /// `textDocument/didOpen` → `addDocument`. The editor's text is then
    /// pushed through `updateDocument` so an unsaved buffer (or one that
    /// differs from what's on disk) becomes the authoritative content,
    /// since `addDocument` itself only ever reads from disk (spec.md §3).
    pub fn open_document(&mut self, uri: &Url, text: &str) -> Result<(), CoreError> {
        let path = uri_to_path(uri)
            .ok_or_else(|| CoreError::invariant_violated(format!("not a file URI: {uri}")))?;
        self.project.add_document(&path)?;
        self.project.update_document(&path, text.to_string(), None)?;
        Ok(())
    }

    /// `textDocument/didChange` → `updateDocument`, full-text sync (the
    /// teacher's own `TextDocumentSyncKind::FULL` choice, carried forward
    /// per SPEC_FULL.md §5).
    pub fn change_document(&mut self, uri: &Url, text: &str) -> Result<(), CoreError> {
        let path = uri_to_path(uri)
            .ok_or_else(|| CoreError::invariant_violated(format!("not a file URI: {uri}")))?;
        self.project.update_document(&path, text.to_string(), None)?;
        Ok(())
    }

    /// `textDocument/didClose` is a no-op: documents stay resident so
    /// cross-file references through them remain resolvable after the
    /// editor tab closes (SPEC_FULL.md §5).
    pub fn close_document(&mut self, _uri: &Url) {}
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn open_document_makes_the_editor_text_authoritative() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("TestLibrary");
        let file = root.join("package.mo");
        write_file(&file, "package TestLibrary\nend TestLibrary;\n");

        let mut server = LspServer::with_library_roots(vec![root]);
        let uri = Url::from_file_path(&file).unwrap();
        let edited = "package TestLibrary\n  constant Real pi = 3.14;\nend TestLibrary;\n";
        server.open_document(&uri, edited).unwrap();

        let doc = server.project().get_document(&file).unwrap();
        assert_eq!(doc.text(), edited);
    }

    #[test]
    fn change_document_updates_an_already_open_document() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("TestLibrary");
        let file = root.join("package.mo");
        write_file(&file, "package TestLibrary\nend TestLibrary;\n");

        let mut server = LspServer::with_library_roots(vec![root]);
        let uri = Url::from_file_path(&file).unwrap();
        server.open_document(&uri, "package TestLibrary\nend TestLibrary;\n").unwrap();

        let edited = "package TestLibrary\n  constant Real e = 2.71828;\nend TestLibrary;\n";
        server.change_document(&uri, edited).unwrap();

        let doc = server.project().get_document(&file).unwrap();
        assert_eq!(doc.text(), edited);
    }

    #[test]
    fn close_document_leaves_it_resident() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("TestLibrary");
        let file = root.join("package.mo");
        write_file(&file, "package TestLibrary\nend TestLibrary;\n");

        let mut server = LspServer::with_library_roots(vec![root]);
        let uri = Url::from_file_path(&file).unwrap();
        server.open_document(&uri, "package TestLibrary\nend TestLibrary;\n").unwrap();

        server.close_document(&uri);
        assert!(server.project().get_document(&file).is_some());
    }

    #[test]
    fn open_document_rejects_a_non_file_uri() {
        let mut server = LspServer::new();
        let uri = Url::parse("untitled:Untitled-1").unwrap();
        let err = server.open_document(&uri, "model M\nend M;\n").unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolated { .. }));
    }
}
