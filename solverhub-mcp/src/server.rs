//! JSON-RPC request handling
//!
//! Tools are generated from the plugin registry: every registered
//! function becomes a tool whose input schema comes from its `ArgMeta`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use solverhub_core::{codes, Value};
use solverhub_plugin::{EvalContext, FunctionMeta, PluginRegistry};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "solverhub";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

const HELP_TOOL: &str = "help";

#[derive(Debug, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        McpError { code, message: message.into(), data: None }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

impl McpResponse {
    fn success(id: Option<JsonValue>, result: JsonValue) -> Self {
        McpResponse { jsonrpc: "2.0".to_string(), id, result: Some(result), error: None }
    }

    fn failure(id: Option<JsonValue>, error: McpError) -> Self {
        McpResponse { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
    }
}

/// Unit converter exposed over MCP
pub struct Server {
    ctx: EvalContext,
}

impl Server {
    pub fn new(config: &ServerConfig) -> Self {
        let registry = solverhub_units::load_units_library(PluginRegistry::new());
        let ctx = config.apply(EvalContext::new(Arc::new(registry)));
        Server { ctx }
    }

    /// Handle one line of input. Returns `None` for notifications and
    /// blank lines.
    pub fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let raw: JsonValue = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                return Some(McpResponse::failure(None, McpError::new(PARSE_ERROR, format!("Parse error: {}", e))));
            }
        };

        // Well-formed JSON that is not a request object
        let request = match McpRequest::deserialize(&raw) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "invalid request");
                let id = raw.get("id").cloned();
                return Some(McpResponse::failure(id, McpError::new(INVALID_REQUEST, format!("Invalid request: {}", e))));
            }
        };

        debug!(method = %request.method, "processing request");
        let response = self.handle_request(&request);

        // Notifications (no id) never receive a response
        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            return None;
        }
        Some(response)
    }

    pub fn handle_request(&self, request: &McpRequest) -> McpResponse {
        if request.jsonrpc != "2.0" {
            return McpResponse::failure(
                request.id.clone(),
                McpError::new(INVALID_REQUEST, format!("Unsupported jsonrpc version: {}", request.jsonrpc)),
            );
        }

        let result = match request.method.as_str() {
            "initialize" => self.initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list()),
            "tools/call" => self.tool_call(&request.params),
            _ => Err(McpError::new(METHOD_NOT_FOUND, format!("Method not found: {}", request.method))),
        };

        match result {
            Ok(r) => McpResponse::success(request.id.clone(), r),
            Err(e) => McpResponse::failure(request.id.clone(), e),
        }
    }

    fn initialize(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let client_info = params.as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|c| c.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");

        // Use client's protocol version for compatibility
        let client_protocol = params.as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(|v| v.as_str())
            .unwrap_or(PROTOCOL_VERSION);

        info!(client = client_info, protocol = client_protocol, "client connected");

        Ok(json!({
            "protocolVersion": client_protocol,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
                "description": "Unit conversion for length, weight, temperature and volume"
            },
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "instructions": "Use list_categories and list_units to discover unit names, then convert or format_conversion. Unit and category names are case-sensitive."
        }))
    }

    fn tools_list(&self) -> JsonValue {
        let mut tools: Vec<JsonValue> = self.ctx.registry.function_names().iter()
            .filter_map(|name| self.ctx.registry.get_function(name))
            .map(|f| tool_schema(&f.meta()))
            .collect();

        tools.push(json!({
            "name": HELP_TOOL,
            "description": "Get documentation for a tool. Omit name for an overview.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Tool name" }
                }
            }
        }));

        json!({ "tools": tools })
    }

    fn tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params.get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));
        if !args.is_object() {
            return Err(McpError::invalid_params("Tool arguments must be an object"));
        }

        if name == HELP_TOOL {
            let topic = args.get("name").and_then(|v| v.as_str());
            return Ok(tool_result(&self.ctx.registry.help(topic)));
        }

        // Positional arguments in declaration order; stop at the first
        // missing one and let the function report the count
        let positional: Vec<Value> = self.ctx.registry.get_function(name)
            .map(|f| f.meta().args.iter()
                .map_while(|arg| args.get(arg.name).map(Value::from_json))
                .collect())
            .unwrap_or_default();

        match self.ctx.call(name, &positional) {
            Value::Error(e) if e.code == codes::UNDEFINED_FUNC => {
                warn!(tool = name, "unknown tool");
                Err(McpError {
                    code: INVALID_PARAMS,
                    message: e.to_string(),
                    data: serde_json::to_value(&e).ok(),
                })
            }
            result => {
                if let Value::Error(e) = &result {
                    info!(tool = name, code = %e.code, "tool returned error");
                } else {
                    debug!(tool = name, "tool succeeded");
                }
                Ok(tool_result(&result))
            }
        }
    }
}

/// MCP tool descriptor for a function
fn tool_schema(meta: &FunctionMeta) -> JsonValue {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for arg in meta.args {
        // Values may also arrive as the raw text a user typed
        let typ = match arg.typ {
            "Number" => json!(["number", "string"]),
            _ => json!("string"),
        };
        properties.insert(arg.name.to_string(), json!({
            "type": typ,
            "description": arg.description,
        }));
        if !arg.optional {
            required.push(arg.name);
        }
    }

    json!({
        "name": meta.name,
        "description": format!("{} Usage: {}", meta.description, meta.usage),
        "inputSchema": {
            "type": "object",
            "properties": properties,
            "required": required,
        }
    })
}

fn tool_result(value: &Value) -> JsonValue {
    match value {
        Value::Error(e) => json!({
            "content": [{ "type": "text", "text": e.to_string() }],
            "error": e,
            "isError": true
        }),
        other => json!({
            "content": [{ "type": "text", "text": other.to_string() }],
            "value": other.to_json(),
            "isError": false
        }),
    }
}
