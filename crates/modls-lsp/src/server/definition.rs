use super::LspServer;
use crate::server::helpers::{position_to_byte_column, span_to_lsp_range, uri_to_path};
use modls::resolver::reference_at_cursor;
use modls::{resolve_reference, ResolutionMode};
use tower_lsp::lsp_types::{Location, Position, Url};

impl LspServer {
    /// `textDocument/definition` → `findDeclaration`: identify the
    /// reference under the cursor, then `resolveReference(.., Declaration)`.
    pub fn get_definition(&self, uri: &Url, position: Position) -> Option<Location> {
        let path = uri_to_path(uri)?;
        let document = self.project.get_document(&path)?;
        let (line, column) = position_to_byte_column(document.text(), position);
        let reference = reference_at_cursor(document, line, column)?;

        let resolved = resolve_reference(&self.project, &reference, ResolutionMode::Declaration)
            .ok()
            .flatten()?;

        let def_uri = Url::from_file_path(resolved.document().path()).ok()?;
        let range = span_to_lsp_range(resolved.document().text(), &resolved.node().span());
        Some(Location { uri: def_uri, range })
    }
}
