//! Board-Location Relationship Operations
//!
//! Operations for managing the many-to-many relationship between boards and locations.

use async_trait::async_trait;
use rusqlite::{params, Connection};

use crate::domain::{BoardSummary, DomainError, DomainResult, Location};

use super::super::db::ready;
use super::super::location_repo::{find_location, row_to_location, LOCATION_COLUMNS};
use super::board_repo::{board_exists, row_to_summary, touch_board, BoardRepository};

/// Trait for board-location relationship operations
#[async_trait]
pub trait BoardLocationOperations {
    /// Add a location to a board, returns false if it was already there
    async fn add_location_to_board(&self, board_id: &str, location_id: &str) -> DomainResult<bool>;

    /// Add several locations, skipping existing members; returns how many were new
    async fn add_locations_to_board(&self, board_id: &str, location_ids: &[String]) -> DomainResult<usize>;

    /// Add the locations to every board, all or nothing; returns how many memberships were new
    async fn add_locations_to_boards(&self, board_ids: &[String], location_ids: &[String]) -> DomainResult<usize>;

    /// Remove a location from a board, the location itself is kept
    async fn remove_location_from_board(&self, board_id: &str, location_id: &str) -> DomainResult<bool>;

    /// Get all locations on a board, in the order they were added
    async fn get_locations_for_board(&self, board_id: &str) -> DomainResult<Vec<Location>>;

    /// Get the ids of all locations on a board
    async fn get_location_ids_for_board(&self, board_id: &str) -> DomainResult<Vec<String>>;

    /// Get every board holding a location
    async fn get_boards_for_location(&self, location_id: &str) -> DomainResult<Vec<BoardSummary>>;
}

#[async_trait]
impl BoardLocationOperations for BoardRepository {
    async fn add_location_to_board(&self, board_id: &str, location_id: &str) -> DomainResult<bool> {
        let added = self
            .add_locations_to_board(board_id, &[location_id.to_string()])
            .await?;
        Ok(added == 1)
    }

    async fn add_locations_to_board(&self, board_id: &str, location_ids: &[String]) -> DomainResult<usize> {
        self.add_locations_to_boards(&[board_id.to_string()], location_ids)
            .await
    }

    async fn add_locations_to_boards(&self, board_ids: &[String], location_ids: &[String]) -> DomainResult<usize> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let tx = conn.unchecked_transaction()?;
        let now = chrono::Utc::now().timestamp_millis();

        let mut added = 0;
        for board_id in board_ids {
            added += insert_members(&tx, board_id, location_ids, now)?;
        }
        tx.commit()?;

        log::info!(
            "Added {} memberships ({} locations, {} boards)",
            added,
            location_ids.len(),
            board_ids.len()
        );
        Ok(added)
    }

    async fn remove_location_from_board(&self, board_id: &str, location_id: &str) -> DomainResult<bool> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let removed = conn.execute(
            "DELETE FROM board_location WHERE board_id = ? AND location_id = ?",
            params![board_id, location_id],
        )?;
        Ok(removed > 0)
    }

    async fn get_locations_for_board(&self, board_id: &str) -> DomainResult<Vec<Location>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        load_board_locations(conn, board_id)
    }

    async fn get_location_ids_for_board(&self, board_id: &str) -> DomainResult<Vec<String>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut stmt = conn.prepare(
            "SELECT location_id FROM board_location WHERE board_id = ? ORDER BY added_at, rowid",
        )?;
        let ids = stmt
            .query_map(params![board_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    async fn get_boards_for_location(&self, location_id: &str) -> DomainResult<Vec<BoardSummary>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        // Count every member, not just the matching row
        let mut stmt = conn.prepare(
            "SELECT b.id, b.name, b.cover_image,
                (SELECT COUNT(*) FROM board_location c WHERE c.board_id = b.id),
                b.last_accessed
             FROM boards b
             JOIN board_location bl ON bl.board_id = b.id
             WHERE bl.location_id = ?
             ORDER BY b.name",
        )?;
        let mut rows = stmt.query(params![location_id])?;

        let mut boards = Vec::new();
        while let Some(row) = rows.next()? {
            boards.push(row_to_summary(row)?);
        }
        Ok(boards)
    }
}

/// Insert missing memberships of one board; unknown ids abort the caller's transaction
fn insert_members(conn: &Connection, board_id: &str, location_ids: &[String], now: i64) -> DomainResult<usize> {
    if !board_exists(conn, board_id)? {
        return Err(DomainError::NotFound(format!("board {}", board_id)));
    }

    let mut added = 0;
    for location_id in location_ids {
        if find_location(conn, location_id)?.is_none() {
            return Err(DomainError::NotFound(format!("location {}", location_id)));
        }
        added += conn.execute(
            "INSERT OR IGNORE INTO board_location (board_id, location_id, added_at) VALUES (?, ?, ?)",
            params![board_id, location_id, now],
        )?;
    }

    if added > 0 {
        touch_board(conn, board_id, now)?;
    }
    Ok(added)
}

/// Locations on a board, in the order they were added
pub(super) fn load_board_locations(conn: &Connection, board_id: &str) -> DomainResult<Vec<Location>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM location l
         JOIN board_location bl ON bl.location_id = l.id
         WHERE bl.board_id = ?
         ORDER BY bl.added_at, bl.rowid",
        LOCATION_COLUMNS
    ))?;
    let mut rows = stmt.query(params![board_id])?;

    let mut locations = Vec::new();
    while let Some(row) = rows.next()? {
        locations.push(row_to_location(row)?);
    }
    Ok(locations)
}
