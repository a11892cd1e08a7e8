use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    cache::FileCache,
    config::load_config,
    php::SourceFile,
    provider::{EnvProvider, Request, Response},
};

use super::types::{
    CodeActionsResult, CompletionResult, DefinitionResult, DiagnosticsResult, FileParams,
    HoverResult, KeyInfo, KeysResult, PositionParams, ProjectParams, RangeParams,
};

/// Providers are created once per project root and share one file cache.
#[derive(Default)]
struct ServerState {
    cache: Arc<FileCache>,
    providers: Mutex<HashMap<PathBuf, Arc<EnvProvider>>>,
}

#[derive(Clone)]
pub struct EnvLensMcpServer {
    tool_router: ToolRouter<Self>,
    state: Arc<ServerState>,
}

impl Default for EnvLensMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl EnvLensMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            state: Arc::new(ServerState::default()),
        }
    }

    /// Value of the env key used at a position
    #[tool(
        description = "Show the value of the env() key at a position in a PHP file. Returns \"[undefined]\" for missing keys and \"[empty]\" for empty values."
    )]
    pub async fn env_hover(
        &self,
        params: Parameters<PositionParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let request = Request::Hover {
            position: params.position(),
        };
        let hover = match self.dispatch(&params.project_root_path, &params.file_path, request)? {
            Some(Response::Hover(hover)) => Some(hover),
            _ => None,
        };
        to_result(&HoverResult { hover })
    }

    /// Definition location of the env key used at a position
    #[tool(
        description = "Find where the env() key at a position in a PHP file is defined in the .env file (0-based line and column)."
    )]
    pub async fn env_definition(
        &self,
        params: Parameters<PositionParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let request = Request::Definition {
            position: params.position(),
        };
        let definition =
            match self.dispatch(&params.project_root_path, &params.file_path, request)? {
                Some(Response::Definition(location)) => Some(location),
                _ => None,
            };
        to_result(&DefinitionResult { definition })
    }

    /// Keys matching the partial key at a position
    #[tool(
        description = "List defined env keys that complete the partial env() key at a position in a PHP file."
    )]
    pub async fn env_completion(
        &self,
        params: Parameters<PositionParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let request = Request::Completion {
            position: params.position(),
        };
        let items = match self.dispatch(&params.project_root_path, &params.file_path, request)? {
            Some(Response::Completion(items)) => items,
            _ => Vec::new(),
        };
        to_result(&CompletionResult { items })
    }

    /// Undefined keys used without a default in one file
    #[tool(
        description = "Report env() calls in a PHP file whose key is not defined in the .env file and that have no default value."
    )]
    pub async fn env_diagnostics(
        &self,
        params: Parameters<FileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let diagnostics = match self.dispatch(
            &params.project_root_path,
            &params.file_path,
            Request::Diagnostics,
        )? {
            Some(Response::Diagnostics(diagnostics)) => diagnostics,
            _ => Vec::new(),
        };
        to_result(&DiagnosticsResult {
            total_count: diagnostics.len(),
            diagnostics,
        })
    }

    /// Quick fixes for undefined keys in a range
    #[tool(
        description = "Suggest quick fixes for undefined env() keys in a range of a PHP file. Each action inserts `text` plus a newline at `line` of the .env file."
    )]
    pub async fn env_code_actions(
        &self,
        params: Parameters<RangeParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let request = Request::CodeActions {
            range: params.range(),
        };
        let actions = match self.dispatch(&params.project_root_path, &params.file_path, request)? {
            Some(Response::CodeActions(actions)) => actions,
            _ => Vec::new(),
        };
        to_result(&CodeActionsResult { actions })
    }

    /// All keys defined in the env file
    #[tool(
        description = "List every key defined in the project's .env file, plus keys defined only in the example file."
    )]
    pub async fn env_list_keys(
        &self,
        params: Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let provider = self.provider(&params.0.project_root_path)?;
        provider.refresh().map_err(|e| {
            McpError::internal_error(format!("Failed to load env file: {}", e), None)
        })?;

        let keys: Vec<KeyInfo> = provider
            .repository()
            .find("")
            .into_iter()
            .map(|(key, entry)| KeyInfo {
                key,
                value: entry.value,
                position: entry.position,
            })
            .collect();
        let env = provider.repository().snapshot();
        let missing_from_env = provider
            .example_repository()
            .keys()
            .into_iter()
            .filter(|key| !env.exists(key))
            .collect();

        to_result(&KeysResult {
            env_file: provider.env_path().display().to_string(),
            total_count: keys.len(),
            keys,
            missing_from_env,
        })
    }

    /// Provider for `root`, created from the project's configuration on first use.
    fn provider(&self, root: &str) -> Result<Arc<EnvProvider>, McpError> {
        let root = PathBuf::from(root).canonicalize().map_err(|e| {
            McpError::invalid_params(format!("Invalid project root {}: {}", root, e), None)
        })?;

        let mut providers = self.state.providers.lock();
        if let Some(provider) = providers.get(&root) {
            return Ok(Arc::clone(provider));
        }

        let config = load_config(&root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?
            .config;
        debug!(root = %root.display(), "creating provider");
        let provider = Arc::new(EnvProvider::new(
            &root,
            config.provider_options(),
            Arc::clone(&self.state.cache),
        ));
        providers.insert(root, Arc::clone(&provider));
        Ok(provider)
    }

    /// Parse `file_path` and run `request` against the project's provider.
    fn dispatch(
        &self,
        root: &str,
        file_path: &str,
        request: Request,
    ) -> Result<Option<Response>, McpError> {
        let provider = self.provider(root)?;
        let path = provider.root().join(file_path);
        let file = SourceFile::read(&path)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        // A request the provider cannot answer publishes nothing.
        let mut published: Option<Response> = None;
        provider.handle(&file, request, &CancellationToken::new(), &mut published);
        Ok(published)
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for EnvLensMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "envlens MCP resolves Laravel-style env() calls in PHP files against the project's .env file.\n\n\
                 Available tools:\n\
                 1. env_list_keys - List keys defined in .env and keys only in the example file\n\
                 2. env_diagnostics - Report undefined keys used without a default in a file\n\
                 3. env_code_actions - Suggest lines to add to .env for undefined keys\n\
                 4. env_hover - Show the value of the key at a position\n\
                 5. env_definition - Find where the key at a position is defined\n\
                 6. env_completion - Complete a partial key at a position\n\n\
                 Lines and columns are 0-based; columns count bytes."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = EnvLensMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
