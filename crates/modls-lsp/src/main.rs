use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server as TowerServer};

mod server;
use server::LspServer;

struct ModelicaLanguageServer {
    client: Client,
    server: Arc<Mutex<LspServer>>,
}

#[tower_lsp::async_trait]
impl LanguageServer for ModelicaLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let roots = LspServer::parse_init_options(params.initialization_options);

        let mut server = self.server.lock().await;
        *server = LspServer::with_library_roots(roots);

        Ok(LspServer::initialize_result())
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "modls-lsp initialized")
            .await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let mut server = self.server.lock().await;
        if let Err(err) = server.open_document(&uri, &params.text_document.text) {
            self.client
                .log_message(MessageType::ERROR, format!("failed to open {uri}: {err}"))
                .await;
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full-text sync: exactly one change carrying the whole buffer.
        if let Some(change) = params.content_changes.into_iter().next() {
            let mut server = self.server.lock().await;
            if let Err(err) = server.change_document(&uri, &change.text) {
                self.client
                    .log_message(MessageType::ERROR, format!("failed to update {uri}: {err}"))
                    .await;
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let mut server = self.server.lock().await;
        server.close_document(&params.text_document.uri);
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let server = self.server.lock().await;
        Ok(server
            .get_definition(&uri, position)
            .map(GotoDefinitionResponse::Scalar))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        let server = self.server.lock().await;
        let symbols = server.get_document_symbols(&uri);

        if symbols.is_empty() {
            Ok(None)
        } else {
            Ok(Some(DocumentSymbolResponse::Flat(symbols)))
        }
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    // tracing must never write to stdout: stdout carries the LSP JSON-RPC
    // stream, and interleaved log lines would corrupt it.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| ModelicaLanguageServer {
        client,
        server: Arc::new(Mutex::new(LspServer::new())),
    });
    TowerServer::new(stdin, stdout, socket).serve(service).await;
}
