use super::LspServer;
use crate::server::helpers::span_to_lsp_range;
use modls::outline;
use tower_lsp::lsp_types::{SymbolInformation, SymbolKind, Url};

impl LspServer {
    /// `textDocument/documentSymbol` → `getDeclarationsForUri`: every
    /// declared class in one document, flattened (spec.md §1's "single
    /// helper", not a full SysML-style nested outline).
    #[allow(deprecated)] // SymbolInformation::deprecated has no replacement field
    pub fn get_document_symbols(&self, uri: &Url) -> Vec<SymbolInformation> {
        let Some(path) = uri.to_file_path().ok() else {
            return Vec::new();
        };
        let Some(document) = self.project.get_document(&path) else {
            return Vec::new();
        };

        outline::document_symbols(&document.tree().root())
            .into_iter()
            .map(|class| SymbolInformation {
                name: class.name,
                kind: SymbolKind::CLASS,
                tags: None,
                deprecated: None,
                location: tower_lsp::lsp_types::Location {
                    uri: uri.clone(),
                    range: span_to_lsp_range(document.text(), &class.span),
                },
                container_name: None,
            })
            .collect()
    }
}
