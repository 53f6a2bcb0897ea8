//! Language server backend
//!
//! Serves folding ranges for C, C++ and C# documents and runs the fold
//! commands. Every request rescans the stored text; nothing is cached
//! between requests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, ExecuteCommandOptions, ExecuteCommandParams, FoldingRange,
    FoldingRangeParams, FoldingRangeProviderCapability, InitializeParams, InitializeResult,
    InitializedParams, MessageType, ServerCapabilities, ServerInfo, TextDocumentIdentifier,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkDoneProgressOptions,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use cfold_core::{
    FoldCommand, FoldRequest, FoldingAnalyzer, RangeRepository, ScanConfig, Scanner, Settings,
};

use crate::protocol::{to_lsp_range, CommandArgs, FoldNotification, FoldParams};

/// Settings file looked up in the workspace root
pub const CONFIG_FILE: &str = "cfold.toml";

/// An open document
#[derive(Debug, Clone)]
struct StoredDocument {
    text: String,
    language_id: String,
}

/// LSP Backend state
pub struct Backend {
    /// LSP client for sending notifications
    client: Client,
    /// Document store for open documents
    documents: Arc<RwLock<HashMap<Url, StoredDocument>>>,
    /// Current settings, replaced wholesale on configuration changes
    settings: Arc<RwLock<Settings>>,
    /// Per-scan event logging
    trace: Arc<AtomicBool>,
}

impl Backend {
    /// Create a new backend instance
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            settings: Arc::new(RwLock::new(Settings::default())),
            trace: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of the active settings
    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace.load(Ordering::Relaxed)
    }

    /// Store document text
    async fn store_document(&self, uri: Url, text: String, language_id: Option<String>) {
        let mut docs = self.documents.write().await;
        let language_id = language_id
            .or_else(|| docs.get(&uri).map(|doc| doc.language_id.clone()))
            .unwrap_or_default();
        docs.insert(uri, StoredDocument { text, language_id });
    }

    /// Remove document from store
    async fn remove_document(&self, uri: &Url) {
        let mut docs = self.documents.write().await;
        docs.remove(uri);
    }

    /// Replace settings from an editor JSON object; bad input keeps the old ones
    async fn apply_settings(&self, value: &Value) {
        match Settings::from_json(value) {
            Ok(settings) => {
                debug!("Settings updated: {:?}", settings);
                *self.settings.write().await = settings;
            }
            Err(e) => warn!("Ignoring invalid settings: {}", e),
        }
    }

    /// Load `cfold.toml` from the workspace root, if there is one
    async fn load_workspace_settings(&self, root: &Url) {
        let Ok(dir) = root.to_file_path() else {
            debug!("Workspace root is not a file path: {}", root);
            return;
        };
        match Settings::load_from_path(dir.join(CONFIG_FILE)) {
            Ok(Some(settings)) => {
                info!("Loaded settings from {}", dir.join(CONFIG_FILE).display());
                *self.settings.write().await = settings;
            }
            Ok(None) => debug!("No {} in {}", CONFIG_FILE, dir.display()),
            Err(e) => warn!("{}", e),
        }
    }

    /// Scan a stored document; `None` for unknown documents or languages
    /// switched off in the settings
    async fn scan(&self, uri: &Url) -> Option<(RangeRepository, ScanConfig)> {
        let settings = self.settings().await;
        let docs = self.documents.read().await;
        let Some(doc) = docs.get(uri) else {
            warn!("Document not found for folding: {}", uri);
            return None;
        };
        if !settings.language_enabled(&doc.language_id) {
            debug!("Folding disabled for language '{}': {}", doc.language_id, uri);
            return None;
        }

        let config = settings.scan_config();
        let repo = Scanner::new(config)
            .with_trace(self.trace_enabled())
            .scan_text(&doc.text);
        Some((repo, config))
    }

    /// Folding ranges of a stored document
    pub async fn fold_ranges(&self, uri: &Url) -> Option<Vec<FoldingRange>> {
        let (repo, config) = self.scan(uri).await?;
        let ranges: Vec<FoldingRange> = FoldingAnalyzer::generate_ranges(&repo, &config)
            .iter()
            .map(to_lsp_range)
            .collect();
        debug!("Generated {} folding ranges for {}", ranges.len(), uri);
        Some(ranges)
    }

    /// Plan a fold command and push it to the client
    pub async fn run_fold_command(
        &self,
        command: FoldCommand,
        args: &CommandArgs,
    ) -> Option<FoldRequest> {
        let uri = &args.text_document.uri;
        let (repo, config) = self.scan(uri).await?;
        let Some(request) = command.plan(&repo, &config, &args.context()) else {
            debug!("{} is a no-op for {}", command, uri);
            return None;
        };

        info!(
            "{}: folding {} anchor lines in {}",
            command,
            request.selection_lines().len(),
            uri
        );
        self.client
            .send_notification::<FoldNotification>(FoldParams {
                text_document: TextDocumentIdentifier::new(uri.clone()),
                request: request.clone(),
            })
            .await;
        Some(request)
    }

    /// Flip per-scan logging, returning the new state
    pub async fn toggle_trace(&self) -> bool {
        let enabled = !self.trace.fetch_xor(true, Ordering::Relaxed);
        let state = if enabled { "enabled" } else { "disabled" };
        info!("Scan logging {}", state);
        self.client
            .log_message(MessageType::INFO, format!("cfold: scan logging {}", state))
            .await;
        enabled
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("cfold LSP server initializing");

        let root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .map(|folder| folder.uri.clone())
            .or_else(|| params.root_uri.clone());
        if let Some(root) = root {
            self.load_workspace_settings(&root).await;
        }
        // Editor settings win over the workspace file
        if let Some(options) = &params.initialization_options {
            self.apply_settings(options).await;
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: FoldCommand::ALL
                        .iter()
                        .map(|command| command.id().to_string())
                        .collect(),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "cfold-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("cfold LSP server initialized");
        self.client
            .log_message(MessageType::INFO, "cfold language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("cfold LSP server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("Document opened: {}", params.text_document.uri);
        let doc = params.text_document;
        self.store_document(doc.uri, doc.text, Some(doc.language_id))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("Document changed: {}", params.text_document.uri);
        // Since we use FULL sync, the entire content is in the first change
        if let Some(change) = params.content_changes.into_iter().next() {
            self.store_document(params.text_document.uri, change.text, None)
                .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);
        self.remove_document(&params.text_document.uri).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        debug!("Configuration changed");
        self.apply_settings(&params.settings).await;
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        let uri = params.text_document.uri;
        debug!("Folding range request for: {}", uri);
        Ok(self.fold_ranges(&uri).await)
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        let Some(command) = FoldCommand::from_id(&params.command) else {
            return Err(Error::invalid_params(format!(
                "Unknown command: {}",
                params.command
            )));
        };
        debug!("Execute command: {}", command);

        if !command.is_fold() {
            let enabled = self.toggle_trace().await;
            return Ok(Some(json!({ "trace": enabled })));
        }

        let Some(argument) = params.arguments.into_iter().next() else {
            return Err(Error::invalid_params(format!(
                "{} expects a textDocument argument",
                command
            )));
        };
        let args: CommandArgs = serde_json::from_value(argument)
            .map_err(|e| Error::invalid_params(format!("Invalid arguments for {}: {}", command, e)))?;

        match self.run_fold_command(command, &args).await {
            Some(request) => serde_json::to_value(request)
                .map(Some)
                .map_err(|_| Error::internal_error()),
            None => Ok(None),
        }
    }
}

/// Run the language server over stdin/stdout
pub async fn run_server() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting cfold Language Server v{}", env!("CARGO_PKG_VERSION"));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
