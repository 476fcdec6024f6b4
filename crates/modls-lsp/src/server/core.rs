use std::path::PathBuf;

use modls::Project;
use tower_lsp::lsp_types::*;

const LSP_SERVER_NAME: &str = "modls-lsp";
const LSP_SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Owns the `Project` and serves every operation the LSP shell wires up
/// (spec.md §6's resolver/outline surface only — see `DESIGN.md`).
pub struct LspServer {
    pub(super) project: Project,
}

impl Default for LspServer {
    fn default() -> Self {
        Self::new()
    }
}

impl LspServer {
    pub fn new() -> Self {
        Self {
            project: Project::new(),
        }
    }

    /// `initializationOptions` is `{ "libraryRoots": ["..."] }`; each root
    /// is loaded as its own library (spec.md §3's filesystem-hierarchical
    /// scoping — there is no single global namespace to merge them into).
    pub fn parse_init_options(options: Option<serde_json::Value>) -> Vec<PathBuf> {
        let Some(serde_json::Value::Object(opts)) = options else {
            return Vec::new();
        };
        opts.get("libraryRoots")
            .and_then(|v| v.as_array())
            .map(|roots| {
                roots
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Loads every configured library root into a fresh `Project`,
    /// skipping a root that fails to load rather than aborting the whole
    /// handshake (an unreadable library shouldn't stop the server from
    /// serving the libraries that did load).
    pub fn with_library_roots(roots: Vec<PathBuf>) -> Self {
        let mut project = Project::new();
        for root in roots {
            if let Err(err) = project.load_library(root.clone(), true) {
                tracing::warn!("failed to load library root {}: {err}", root.display());
            }
        }
        Self { project }
    }

    pub fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            definition_provider: Some(OneOf::Left(true)),
            document_symbol_provider: Some(OneOf::Left(true)),
            ..Default::default()
        }
    }

    pub fn initialize_result() -> InitializeResult {
        InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: LSP_SERVER_NAME.to_string(),
                version: Some(LSP_SERVER_VERSION.to_string()),
            }),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }
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
    fn parse_init_options_reads_library_roots() {
        let options = serde_json::json!({ "libraryRoots": ["/a", "/b"] });
        let roots = LspServer::parse_init_options(Some(options));
        assert_eq!(roots, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
    }

    #[test]
    fn parse_init_options_defaults_to_empty_without_options() {
        assert!(LspServer::parse_init_options(None).is_empty());
        assert!(LspServer::parse_init_options(Some(serde_json::json!({}))).is_empty());
    }

    #[test]
    fn with_library_roots_loads_each_root_and_skips_failures() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("TestLibrary");
        write_file(&root.join("package.mo"), "package TestLibrary\nend TestLibrary;\n");

        let missing = dir.path().join("DoesNotExist");
        let server = LspServer::with_library_roots(vec![root, missing]);
        assert_eq!(server.project().libraries().len(), 1);
    }

    #[test]
    fn server_capabilities_advertise_only_the_wired_operations() {
        let caps = LspServer::server_capabilities();
        assert!(caps.definition_provider.is_some());
        assert!(caps.document_symbol_provider.is_some());
        assert!(caps.hover_provider.is_none());
        assert!(caps.completion_provider.is_none());
        assert!(caps.rename_provider.is_none());
    }
}
