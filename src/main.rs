/// Main entry point for the Habit Tracker MCP server
///
/// Parses command line flags, sets up logging on stderr, resolves where the
/// habit database lives and reads the email sharing configuration before
/// handing stdin/stdout to the MCP server.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use habit_tracker::{HabitTrackerServer, ShareConfig};

/// File name of the habit database inside the data directory
const DB_FILE_NAME: &str = "habits.db";

/// Command line arguments for the Habit Tracker MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite file holding habits, completions and settings
    /// If not provided, uses ~/.habit_tracker/habits.db (with platform fallbacks)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.debug {
            "info"
        } else {
            "warn"
        }
    }
}

/// Directories tried for the default database, most preferred first
fn data_dir_candidates() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|p| p.join(".habit_tracker")),
        dirs::data_dir().map(|p| p.join("habit_tracker")),
        dirs::config_dir().map(|p| p.join("habit_tracker")),
        std::env::current_dir().ok().map(|p| p.join(".habit_tracker")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Create `dir` if needed and check that a file can be written inside it
fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }

    let marker = dir.join(".write_check");
    if std::fs::write(&marker, b"").is_err() {
        return false;
    }
    if let Err(e) = std::fs::remove_file(&marker) {
        debug!("Could not remove {}: {}", marker.display(), e);
    }
    true
}

/// Pick the first writable data directory, falling back to the temp dir
fn default_database_path() -> std::io::Result<PathBuf> {
    if let Some(dir) = data_dir_candidates().into_iter().find(|dir| is_writable_dir(dir)) {
        return Ok(dir.join(DB_FILE_NAME));
    }

    let dir = std::env::temp_dir().join("habit_tracker");
    std::fs::create_dir_all(&dir)?;
    warn!("No writable data directory found, habits will be stored under {}", dir.display());
    Ok(dir.join(DB_FILE_NAME))
}

/// Resolve the database path from the flag or the default locations
fn resolve_database_path(flag: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match flag {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Ok(path)
        }
        None => default_database_path(),
    }
}

/// Log whether habit_share can deliver email
fn report_share_config(config: &ShareConfig) {
    if config.is_configured() {
        info!("Weekly sharing enabled, sending from {}", config.from);
    } else {
        warn!("RESEND_API_KEY not set, habit_share will report that email is not configured");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries JSON-RPC only
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("habit_tracker={}", args.log_level())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let db_path = resolve_database_path(args.database)?;
    info!("Using habit database at {}", db_path.display());

    let share_config = ShareConfig::from_env();
    report_share_config(&share_config);

    let server = HabitTrackerServer::new(db_path, share_config).await?;
    server.run().await?;

    info!("Habit Tracker MCP server shutdown complete");
    Ok(())
}
