/// Basic integration tests
use async_trait::async_trait;
use chrono::NaiveDate;
use habit_tracker::mcp::McpServer;
use habit_tracker::*;
use serde_json::{json, Value};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Transport that records outgoing emails instead of sending them
#[derive(Default)]
struct OutboxTransport {
    sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait]
impl EmailTransport for OutboxTransport {
    async fn send(&self, message: &EmailMessage) -> Result<ShareReceipt, ShareError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(ShareReceipt { message_id: Some("test-message".to_string()) })
    }
}

fn test_server() -> McpServer<MemoryStore, OutboxTransport> {
    let store = HabitStore::open(MemoryStore::new()).expect("Failed to open store");
    McpServer::new(HabitTrackerServer::with_parts(store, ShareService::new(OutboxTransport::default())))
}

async fn call(server: &mut McpServer<MemoryStore, OutboxTransport>, id: u64, tool: &str, args: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": tool, "arguments": args }
    });
    let response = server.handle_line(&request.to_string()).await.expect("expected a response");
    serde_json::to_value(response).unwrap()
}

fn text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        let read_id = {
            let mut server = HabitTrackerServer::new(db_path.clone(), ShareConfig::default())
                .await
                .expect("Failed to create first server");
            let store = server.store_mut();
            let read = store.add_habit("Read").unwrap();
            store.add_habit("Run").unwrap();
            store.toggle(&read.id, today, 6).unwrap();
            store.toggle(&read.id, today, 4).unwrap();
            read.id
        };

        // Second server on the same file sees everything the first one wrote
        let server = HabitTrackerServer::new(db_path, ShareConfig::default())
            .await
            .expect("Failed to create second server");
        let store = server.store();

        let names: Vec<String> = store.list_habits().into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Read", "Run"]);
        assert_eq!(
            store.weekly_completions(&read_id, today).unwrap(),
            [false, false, false, false, true, false, true]
        );
        assert_eq!(store.aggregate(&read_id, today).unwrap().percentage, 29);
    }

    #[tokio::test]
    async fn test_delete_cascades_across_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        {
            let mut server = HabitTrackerServer::new(db_path.clone(), ShareConfig::default()).await.unwrap();
            let store = server.store_mut();
            let read = store.add_habit("Read").unwrap();
            store.toggle(&read.id, today, 6).unwrap();
            assert!(store.delete_habit(&read.id).unwrap());
        }

        let backend = SqliteStore::new(db_path).unwrap();
        assert_eq!(backend.get(HABITS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(backend.get(COMPLETIONS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_mcp_handshake_and_tool_list() {
        let mut server = test_server();

        let init = json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}});
        let response = serde_json::to_value(server.handle_line(&init.to_string()).await.unwrap()).unwrap();
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], "Habit Tracker");

        let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(server.handle_line(&notification.to_string()).await.is_none());
        assert!(server.is_initialized());

        let list = json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"});
        let response = serde_json::to_value(server.handle_line(&list.to_string()).await.unwrap()).unwrap();
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 10);

        let toggle = tools.iter().find(|t| t["name"] == "habit_toggle").unwrap();
        assert!(toggle["inputSchema"]["properties"]["habit_id"].is_object());
        assert!(toggle["inputSchema"]["properties"]["day_index"].is_object());
    }

    #[tokio::test]
    async fn test_mcp_rejects_bad_input() {
        let mut server = test_server();

        let response = serde_json::to_value(server.handle_line("{not json").await.unwrap()).unwrap();
        assert_eq!(response["error"]["code"], -32700);

        let unknown = json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"});
        let response = serde_json::to_value(server.handle_line(&unknown.to_string()).await.unwrap()).unwrap();
        assert_eq!(response["error"]["code"], -32601);

        let response = call(&mut server, 4, "habit_create", json!({ "name": "   " })).await;
        assert_eq!(response["result"]["isError"], true);
        assert!(text(&response).contains("Invalid habit name"));

        let response = call(&mut server, 5, "habit_create", json!({})).await;
        assert_eq!(response["result"]["isError"], true);
        assert!(text(&response).contains("Invalid arguments"));

        let response = call(&mut server, 6, "habit_fly", json!({})).await;
        assert!(text(&response).contains("Unknown tool"));
        assert!(server.habit_tracker().store().list_habits().is_empty());
    }

    #[tokio::test]
    async fn test_mcp_habit_workflow() {
        let mut server = test_server();
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        let response = call(&mut server, 1, "habit_create", json!({ "name": "Read" })).await;
        assert_eq!(response["result"]["isError"], false);
        let habit_id = server.habit_tracker().store().list_habits()[0].id.clone();

        let toggle = json!({ "habit_id": habit_id.to_string(), "date": "2024-06-10" });
        let response = call(&mut server, 2, "habit_toggle", toggle.clone()).await;
        assert_eq!(response["result"]["isError"], false);
        assert!(text(&response).contains("Monday, June 10, 2024"));

        let store = server.habit_tracker().store();
        assert!(store.is_completed_on(&habit_id, day));
        assert_eq!(
            store.weekly_completions(&habit_id, day).unwrap(),
            [false, false, false, false, false, false, true]
        );
        assert_eq!(store.aggregate(&habit_id, day).unwrap().percentage, 14);

        let response = call(&mut server, 3, "habit_week", json!({})).await;
        assert_eq!(response["result"]["isError"], false);
        assert!(text(&response).contains("- Read: "));

        let response = call(&mut server, 4, "habit_share", json!({ "recipient_email": "friend@example.com" })).await;
        assert_eq!(response["result"]["isError"], false);
        {
            let sent = server.habit_tracker().share_service().transport().sent.lock().unwrap();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].to, "friend@example.com");
            assert_eq!(sent[0].subject, SHARE_SUBJECT);
            assert!(sent[0].html.contains("<td>Read</td>"));
        }

        // Toggling the same day again clears it
        call(&mut server, 5, "habit_toggle", toggle).await;
        assert!(!server.habit_tracker().store().is_completed_on(&habit_id, day));

        let response = call(&mut server, 6, "habit_delete", json!({ "habit_id": habit_id.to_string() })).await;
        assert!(text(&response).contains("Deleted habit 'Read'"));
        assert!(server.habit_tracker().store().ledger().is_empty());
    }

    #[tokio::test]
    async fn test_mcp_settings_and_clear() {
        let mut server = test_server();
        call(&mut server, 1, "habit_create", json!({ "name": "Read" })).await;

        let response = call(&mut server, 2, "settings_update", json!({ "theme": "dark", "notifications": false })).await;
        assert_eq!(response["result"]["isError"], false);

        let response = call(&mut server, 3, "data_clear", json!({ "confirm": true })).await;
        assert!(text(&response).contains("Deleted 1 habit(s)"));
        assert!(server.habit_tracker().store().list_habits().is_empty());

        let response = call(&mut server, 4, "settings_get", json!({})).await;
        assert!(text(&response).contains("Theme: dark"));
        assert!(text(&response).contains("Notifications: off"));
    }

    #[tokio::test]
    async fn test_share_without_api_key_reports_not_configured() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut tracker = HabitTrackerServer::new(temp_file.path().to_path_buf(), ShareConfig::default())
            .await
            .expect("Failed to create server");
        tracker.store_mut().add_habit("Read").unwrap();

        let mut server = McpServer::new(tracker);
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": "habit_share", "arguments": { "recipient_email": "friend@example.com" } }
        });
        let response = serde_json::to_value(server.handle_line(&request.to_string()).await.unwrap()).unwrap();

        assert_eq!(response["result"]["isError"], true);
        assert!(text(&response).contains("RESEND_API_KEY"));
    }
}
