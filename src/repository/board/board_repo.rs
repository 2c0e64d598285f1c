//! Board Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Board CRUD operations.
//! Membership operations live in `board_location`.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{
    new_id, require_name, Board, BoardSummary, DomainError, DomainResult, DEFAULT_COVER_COLOR,
};
use crate::filter::matches_query;

use super::super::db::{ready, SharedConnection};
use super::super::traits::{Repository, SearchableRepository};
use super::board_location::load_board_locations;

const SUMMARY_QUERY: &str = "SELECT b.id, b.name, b.cover_image, COUNT(bl.location_id), b.last_accessed
     FROM boards b
     LEFT JOIN board_location bl ON bl.board_id = b.id";

/// SQLite implementation of Board repository
pub struct BoardRepository {
    pub(super) conn: SharedConnection,
}

impl BoardRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// All boards with their location counts, newest first
    pub async fn list_summaries(&self) -> DomainResult<Vec<BoardSummary>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "{} GROUP BY b.id ORDER BY b.created_at DESC, b.rowid DESC",
            SUMMARY_QUERY
        ))?;
        let mut rows = stmt.query([])?;

        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            summaries.push(row_to_summary(row)?);
        }
        Ok(summaries)
    }

    pub async fn find_summary(&self, id: &str) -> DomainResult<Option<BoardSummary>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut stmt = conn.prepare(&format!("{} WHERE b.id = ? GROUP BY b.id", SUMMARY_QUERY))?;
        let row = stmt
            .query_row(params![id], |row| Ok(row_to_summary(row)))
            .optional()?;
        row.transpose()
    }

    /// Record that a board was opened at `now` (ms)
    pub async fn touch(&self, id: &str, now: i64) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        touch_board(conn, id, now)
    }
}

#[async_trait]
impl Repository<Board> for BoardRepository {
    async fn create(&self, entity: &Board) -> DomainResult<Board> {
        require_name("Board", &entity.name)?;

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let now = chrono::Utc::now().timestamp_millis();
        let mut board = entity.clone();
        if board.id.trim().is_empty() {
            board.id = new_id();
        }
        board.name = entity.name.trim().to_string();
        if board.cover_image.trim().is_empty() {
            board.cover_image = DEFAULT_COVER_COLOR.to_string();
        }
        board.created_at = Some(entity.created_at.unwrap_or(now));
        board.last_accessed = Some(entity.last_accessed.unwrap_or(now));
        // Members are attached through BoardLocationOperations
        board.locations = Vec::new();

        conn.execute(
            "INSERT INTO boards (id, name, cover_image, owner, created_at, last_accessed)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                board.id,
                board.name,
                board.cover_image,
                board.owner,
                board.created_at,
                board.last_accessed,
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::Conflict(format!("board {} already exists", board.id))
            }
            other => other.into(),
        })?;

        log::info!("Created board {} ({})", board.name, board.id);
        Ok(board)
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Board>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let board = {
            let mut stmt = conn.prepare(
                "SELECT id, name, cover_image, owner, last_accessed, created_at FROM boards WHERE id = ?",
            )?;
            stmt.query_row(params![id], |row| Ok(row_to_board(row)))
                .optional()?
                .transpose()?
        };

        match board {
            Some(mut board) => {
                board.locations = load_board_locations(conn, &board.id)?;
                Ok(Some(board))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Board>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut boards = {
            let mut stmt = conn.prepare(
                "SELECT id, name, cover_image, owner, last_accessed, created_at FROM boards
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let mut rows = stmt.query([])?;

            let mut boards = Vec::new();
            while let Some(row) = rows.next()? {
                boards.push(row_to_board(row)?);
            }
            boards
        };

        for board in &mut boards {
            board.locations = load_board_locations(conn, &board.id)?;
        }
        Ok(boards)
    }

    async fn update(&self, entity: &Board) -> DomainResult<Board> {
        require_name("Board", &entity.name)?;

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut board = entity.clone();
        board.name = entity.name.trim().to_string();
        board.set_cover(Some(entity.cover_image.as_str()));

        let changed = conn.execute(
            "UPDATE boards SET name = ?, cover_image = ?, owner = ?, last_accessed = ? WHERE id = ?",
            params![board.name, board.cover_image, board.owner, board.last_accessed, board.id],
        )?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("board {}", entity.id)));
        }

        board.locations = load_board_locations(conn, &board.id)?;
        Ok(board)
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        // Join rows cascade; the locations themselves stay
        let changed = conn.execute("DELETE FROM boards WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("board {}", id)));
        }

        log::info!("Deleted board {}", id);
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Board> for BoardRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<Board>> {
        let all = self.list().await?;
        Ok(all
            .into_iter()
            .filter(|board| matches_query(&board.name, query))
            .collect())
    }
}

pub(super) fn touch_board(conn: &Connection, id: &str, now: i64) -> DomainResult<()> {
    let changed = conn.execute(
        "UPDATE boards SET last_accessed = ? WHERE id = ?",
        params![now, id],
    )?;
    if changed == 0 {
        return Err(DomainError::NotFound(format!("board {}", id)));
    }
    Ok(())
}

pub(super) fn board_exists(conn: &Connection, id: &str) -> DomainResult<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM boards WHERE id = ?", params![id], |row| row.get(0))
        .optional()?;
    Ok(found.is_some())
}

/// Convert a boards row to Board (locations not loaded)
fn row_to_board(row: &rusqlite::Row) -> DomainResult<Board> {
    Ok(Board {
        id: row.get(0)?,
        name: row.get(1)?,
        cover_image: row
            .get::<_, Option<String>>(2)?
            .unwrap_or_else(|| DEFAULT_COVER_COLOR.to_string()),
        owner: row.get(3)?,
        locations: Vec::new(),
        last_accessed: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub(super) fn row_to_summary(row: &rusqlite::Row) -> DomainResult<BoardSummary> {
    let count: i64 = row.get(3)?;
    Ok(BoardSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        cover_image: row
            .get::<_, Option<String>>(2)?
            .unwrap_or_else(|| DEFAULT_COVER_COLOR.to_string()),
        location_count: usize::try_from(count).unwrap_or(0),
        last_accessed: row.get(4)?,
    })
}
