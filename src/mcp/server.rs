/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls against the habit store
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::domain::{local_today, DomainError};
use crate::mcp::protocol::*;
use crate::share::EmailTransport;
use crate::storage::KeyValueStore;
use crate::tools;
use crate::{HabitTrackerServer, ServerError};

/// MCP server that handles communication with the client
pub struct McpServer<S, T> {
    /// The underlying habit tracker server
    habit_tracker: HabitTrackerServer<S, T>,
    /// Whether the client has confirmed initialization
    initialized: bool,
}

impl<S: KeyValueStore, T: EmailTransport> McpServer<S, T> {
    /// Create a new MCP server
    pub fn new(habit_tracker: HabitTrackerServer<S, T>) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.handle_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn habit_tracker(&self) -> &HabitTrackerServer<S, T> {
        &self.habit_tracker
    }

    /// Handle a JSON-RPC request or notification
    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            if request.method.ends_with("initialized") {
                self.initialized = true;
            }
            debug!("Received notification: {}", request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, json!(null))
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Tracker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools = vec![
            tool::<tools::CreateHabitParams>("habit_create", "Create a new habit to track"),
            tool::<tools::DeleteHabitParams>("habit_delete", "Delete a habit and all of its completion history"),
            tool::<tools::ListHabitsParams>("habit_list", "List all habits with their completion grid for the last seven days"),
            tool::<tools::ToggleParams>(
                "habit_toggle",
                "Mark a habit done (or undo it) for a day in the last week or for a specific date",
            ),
            tool::<tools::WeekParams>("habit_week", "Show this week's completed days and success rate for every habit"),
            tool::<tools::CalendarParams>(
                "habit_calendar",
                "Show a month calendar, optionally with each habit's status on a selected date",
            ),
            tool::<tools::ShareParams>("habit_share", "Email this week's habit progress to a friend"),
            tool::<tools::GetSettingsParams>("settings_get", "Show the current theme and notification settings"),
            tool::<tools::UpdateSettingsParams>("settings_update", "Change the theme or toggle notifications"),
            tool::<tools::ClearDataParams>("data_clear", "Delete all habits and completion history"),
        ];

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        debug!("Calling tool: {}", tool_params.name);
        let result = self.call_tool(&tool_params.name, tool_params.arguments).await;

        to_response(id, &result)
    }

    /// Route a tool call to its implementation
    async fn call_tool(&mut self, name: &str, args: HashMap<String, Value>) -> ToolCallResult {
        let today = local_today();

        match name {
            "habit_create" => respond(
                parse_args(args).and_then(|p| Ok(tools::create_habit(self.habit_tracker.store_mut(), p)?)),
                |r| r.message,
            ),
            "habit_delete" => respond(
                parse_args(args).and_then(|p| Ok(tools::delete_habit(self.habit_tracker.store_mut(), p)?)),
                |r| r.message,
            ),
            "habit_list" => respond(
                parse_args(args).and_then(|p| Ok(tools::list_habits(self.habit_tracker.store(), p, today)?)),
                |r| r.message,
            ),
            "habit_toggle" => respond(
                parse_args(args).and_then(|p| Ok(tools::toggle_habit(self.habit_tracker.store_mut(), p, today)?)),
                |r| r.message,
            ),
            "habit_week" => respond(
                parse_args(args).and_then(|p| Ok(tools::weekly_summary(self.habit_tracker.store(), p, today)?)),
                |r| r.message,
            ),
            "habit_calendar" => respond(
                parse_args(args).and_then(|p| Ok(tools::show_calendar(self.habit_tracker.store(), p, today)?)),
                |r| r.message,
            ),
            "habit_share" => {
                let result = match parse_args::<tools::ShareParams>(args) {
                    Ok(p) => {
                        tools::share_week(self.habit_tracker.store(), self.habit_tracker.share_service(), p, today).await
                    }
                    Err(e) => Err(e),
                };
                respond(result, |r| r.message)
            }
            "settings_get" => respond(
                parse_args(args).and_then(|p| Ok(tools::get_settings(self.habit_tracker.store(), p)?)),
                |r| r.message,
            ),
            "settings_update" => respond(
                parse_args(args).and_then(|p| Ok(tools::update_settings(self.habit_tracker.store(), p)?)),
                |r| r.message,
            ),
            "data_clear" => respond(
                parse_args(args).and_then(|p| Ok(tools::clear_data(self.habit_tracker.store_mut(), p)?)),
                |r| r.message,
            ),
            _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
        }
    }
}

/// Describe a tool, deriving its input schema from the parameter struct
fn tool<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let input_schema = serde_json::to_value(schemars::schema_for!(P))
        .unwrap_or_else(|_| json!({ "type": "object" }));

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Deserialize tool arguments into a parameter struct
fn parse_args<P: DeserializeOwned>(args: HashMap<String, Value>) -> Result<P, ServerError> {
    let object: serde_json::Map<String, Value> = args.into_iter().collect();
    serde_json::from_value(Value::Object(object))
        .map_err(|e| DomainError::InvalidArgument(format!("Invalid arguments: {}", e)).into())
}

/// Turn a tool outcome into a tool result, logging failures
fn respond<R>(result: Result<R, ServerError>, message: impl FnOnce(R) -> String) -> ToolCallResult {
    match result {
        Ok(response) => ToolCallResult::success(message(response)),
        Err(e) => {
            debug!("Tool call failed: {}", e);
            ToolCallResult::error(e.to_string())
        }
    }
}

fn to_response<R: serde::Serialize>(id: Value, result: &R) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to encode result: {}", e),
            None,
        ),
    }
}
