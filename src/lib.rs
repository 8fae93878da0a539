/// Public library interface for the Habit Tracker MCP server
///
/// This module exports the main server implementation and public types
/// that can be used by other applications or tests.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod store;
mod analytics;
mod settings;
mod share;
pub mod tools;
pub mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{
    KeyValueStore, MemoryStore, SqliteStore, StorageError,
    COMPLETIONS_KEY, HABITS_KEY, NOTIFICATIONS_KEY, THEME_KEY,
};
pub use store::{HabitStore, StoreError};
pub use analytics::{aggregate, completion_percentage, overall_percentage, weekly_stats, WeeklyStat};
pub use settings::Settings;
pub use share::{
    render_weekly_email, EmailMessage, EmailTransport, ResendTransport, ShareConfig, ShareError,
    ShareReceipt, ShareRequest, ShareService, SHARE_SUBJECT,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Share(#[from] ShareError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main habit tracker server that implements the MCP protocol
///
/// This server owns the habit store (habits, completions and settings behind
/// a key-value backend) and the service used to email weekly summaries.
pub struct HabitTrackerServer<S = SqliteStore, T = ResendTransport> {
    store: HabitStore<S>,
    share: ShareService<T>,
}

impl HabitTrackerServer {
    /// Create a new habit tracker server with the specified database path
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist, then load all persisted habit data.
    /// Sharing is wired to Resend using `share_config`; without an API key
    /// habit_share fails with a "not configured" error.
    pub async fn new(db_path: PathBuf, share_config: ShareConfig) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Tracker server with database: {:?}", db_path);

        let backend = SqliteStore::new(db_path)?;
        let store = HabitStore::open(backend)?;
        let transport = ResendTransport::new(share_config)?;

        Ok(Self::with_parts(store, ShareService::new(transport)))
    }
}

impl<S: KeyValueStore, T: EmailTransport> HabitTrackerServer<S, T> {
    /// Assemble a server from an opened store and a share service
    pub fn with_parts(store: HabitStore<S>, share: ShareService<T>) -> Self {
        Self { store, share }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until the server is shut down or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            "Server started successfully, found {} existing habits",
            self.store.registry().len()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the habit store (useful for testing)
    pub fn store(&self) -> &HabitStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut HabitStore<S> {
        &mut self.store
    }

    pub fn share_service(&self) -> &ShareService<T> {
        &self.share
    }
}
