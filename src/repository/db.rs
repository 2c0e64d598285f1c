//! Database Connection and Setup
//!
//! Manages SQLite database connection and migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, DEFAULT_COVER_COLOR};

/// Connection shared by all repositories (None until initialized)
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    pub db_path: PathBuf,
}

impl DbState {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            db_path,
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}

/// Borrow the connection out of a locked guard
pub(crate) fn ready(guard: &Option<Connection>) -> DomainResult<&Connection> {
    guard
        .as_ref()
        .ok_or_else(|| DomainError::Internal("Database not initialized".to_string()))
}

/// Initialize database with path (":memory:" for a throwaway database)
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()?
    } else {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Internal(format!("Failed to create data dir: {}", e)))?;
        }
        Connection::open(db_path)?
    };

    // Cascading deletes on board_location depend on this
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    run_migrations(&conn)?;
    log::info!("Database ready at {}", db_path.display());

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);

    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(names) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };
    let found = names.flatten().any(|name| name == column);
    found
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    // Tags live in a JSON array column
    conn.execute(
        "CREATE TABLE IF NOT EXISTS location (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT NOT NULL DEFAULT '',
            country TEXT,
            category TEXT,
            tag TEXT NOT NULL DEFAULT '[]',
            note TEXT,
            is_favorite INTEGER NOT NULL DEFAULT 0,
            image_src TEXT,
            source_link TEXT,
            created_at INTEGER,
            updated_at INTEGER
        )",
        [],
    )?;

    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS boards (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                cover_image TEXT NOT NULL DEFAULT '{}',
                owner TEXT,
                created_at INTEGER
            )",
            DEFAULT_COVER_COLOR
        ),
        [],
    )?;

    if !column_exists(conn, "boards", "last_accessed") {
        conn.execute("ALTER TABLE boards ADD COLUMN last_accessed INTEGER", [])
            .map_err(|e| DomainError::Internal(format!("Failed to add last_accessed: {}", e)))?;
    }

    conn.execute(
        "CREATE TABLE IF NOT EXISTS board_location (
            board_id TEXT NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
            location_id TEXT NOT NULL REFERENCES location(id) ON DELETE CASCADE,
            added_at INTEGER,
            PRIMARY KEY (board_id, location_id)
        )",
        [],
    )?;

    // Reverse lookups (which boards hold a location) and cascade deletes
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_board_location_location ON board_location(location_id)",
        [],
    )?;

    Ok(())
}
