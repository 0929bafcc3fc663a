//! MCP server exposing documentation search over a session.

use crate::config::Settings;
use crate::i18n::{BuiltinMessages, Messages};
use crate::session::SearchSession;
use crate::source::IndexSource;
use crate::tools::search::{SearchRequest, handle_search};
use crate::tools::set_index::{SetIndexRequest, handle_set_index};
use crate::tools::status::handle_index_status;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// Parameters for the index_status tool
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct IndexStatusRequest {}

/// MCP Server for documentation search
#[derive(Clone)]
pub struct DocsServer {
    /// Session owning the loaded index
    session: SearchSession,

    /// Display strings for status messages
    messages: Arc<dyn Messages>,

    default_lang: Arc<str>,
    base_path: Arc<str>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsServer")
            .field("session", &self.session)
            .field("default_lang", &self.default_lang)
            .finish()
    }
}

#[tool_router]
impl DocsServer {
    /// Create a server and start loading the index from `source`.
    pub fn new(source: Arc<dyn IndexSource>, settings: &Settings) -> Self {
        Self {
            session: SearchSession::open(source, settings.search),
            messages: Arc::new(BuiltinMessages::default()),
            default_lang: settings.default_lang.as_str().into(),
            base_path: settings.base_path.as_str().into(),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Fuzzy search the documentation site. Matches document titles, section headings and body text, tolerating typos and partial words. Returns ranked results with navigation paths and highlighted snippets.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search_docs(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(
            &self.session,
            self.messages.as_ref(),
            &self.default_lang,
            request,
        )
        .await
    }

    #[tool(
        description = "Replace the search index. Accepts a search-index.json file, a directory containing one, or an http(s) URL. The index is re-fetched and replaced wholesale."
    )]
    async fn set_index(
        &self,
        Parameters(request): Parameters<SetIndexRequest>,
    ) -> std::result::Result<String, String> {
        handle_set_index(&self.session, &self.base_path, request)
            .await
            .map_err(|e| format!("Failed to set index: {}", e))
    }

    #[tool(description = "Show whether the search index is loaded, its source, entry count and languages.")]
    async fn index_status(
        &self,
        Parameters(_request): Parameters<IndexStatusRequest>,
    ) -> std::result::Result<String, String> {
        Ok(handle_index_status(&self.session))
    }
}

#[tool_handler]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "docsift: fuzzy search over a documentation site's prebuilt search index. \
                 Use search_docs to find pages and sections; results link to /docs/<slug>#<heading>. \
                 Use set_index to point at a different index file or site."
                    .to_string(),
            ),
        }
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// so optional parameters render as plain fields rather than `$ref` patterns.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
