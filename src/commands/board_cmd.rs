//! Commands for Board operations
//!
//! Board CRUD, membership, recents and sharing.

use crate::domain::{
    new_id, recent_boards as pick_recent, select_for_share, share_text, Board, BoardSummary,
    Location, RECENT_LIMIT,
};
use crate::filter::addable_locations;
use crate::repository::{BoardLocationOperations, Repository};
use crate::AppState;

/// Create a new board owned by the signed-in user
pub async fn create_board(
    state: &AppState,
    name: String,
    cover_image: Option<String>,
) -> Result<Board, String> {
    let mut board = Board::new(new_id(), name);
    board.set_cover(cover_image.as_deref());
    board.owner = state.services.session.user_id();

    let created = state.board_repo.create(&board).await.map_err(|e| e.to_string())?;
    state
        .services
        .success(&format!("Board \"{}\" created", created.name));
    Ok(created)
}

/// List all boards with their location counts
pub async fn list_boards(state: &AppState) -> Result<Vec<BoardSummary>, String> {
    state.board_repo.list_summaries().await.map_err(|e| e.to_string())
}

/// Get board by ID with its locations
pub async fn get_board(state: &AppState, id: String) -> Result<Option<Board>, String> {
    state.board_repo.find_by_id(&id).await.map_err(|e| e.to_string())
}

/// Open a board: marks it accessed, then loads it
pub async fn open_board(state: &AppState, id: String) -> Result<Board, String> {
    touch_board(state, id.clone()).await?;
    load(state, &id).await
}

/// Mark a board as accessed now
pub async fn touch_board(state: &AppState, id: String) -> Result<(), String> {
    let now = chrono::Utc::now().timestamp_millis();
    state.board_repo.touch(&id, now).await.map_err(|e| e.to_string())
}

/// Boards opened within the last week, newest first
pub async fn recent_boards(state: &AppState) -> Result<Vec<BoardSummary>, String> {
    let boards = state.board_repo.list_summaries().await.map_err(|e| e.to_string())?;
    let now = chrono::Utc::now().timestamp_millis();
    Ok(pick_recent(&boards, now, RECENT_LIMIT).into_iter().cloned().collect())
}

pub async fn rename_board(state: &AppState, id: String, name: String) -> Result<Board, String> {
    let mut board = load(state, &id).await?;
    board.name = name;
    state.board_repo.update(&board).await.map_err(|e| e.to_string())
}

/// Change the cover; blank or absent falls back to the default color
pub async fn set_board_cover(
    state: &AppState,
    id: String,
    cover_image: Option<String>,
) -> Result<Board, String> {
    let mut board = load(state, &id).await?;
    board.set_cover(cover_image.as_deref());
    state.board_repo.update(&board).await.map_err(|e| e.to_string())
}

/// Delete a board; its locations are kept
pub async fn delete_board(state: &AppState, id: String) -> Result<(), String> {
    state.board_repo.delete(&id).await.map_err(|e| e.to_string())
}

// ========================
// Board-Location Relationships
// ========================

/// Add the selected locations to a board, skipping ones already on it.
/// Returns how many were added.
pub async fn add_locations_to_board(
    state: &AppState,
    board_id: String,
    location_ids: Vec<String>,
) -> Result<usize, String> {
    let added = state
        .board_repo
        .add_locations_to_board(&board_id, &location_ids)
        .await
        .map_err(|e| e.to_string())?;

    if added == 0 {
        state
            .services
            .info("All selected locations are already in this board");
    } else {
        state.services.success(&format!("{} location(s) added!", added));
    }
    Ok(added)
}

/// Add the given locations to each selected board. Nothing is kept if any id is unknown.
pub async fn add_locations_to_boards(
    state: &AppState,
    location_ids: Vec<String>,
    board_ids: Vec<String>,
) -> Result<usize, String> {
    if board_ids.is_empty() {
        state.services.error("Please select at least one board");
        return Err("Invalid input: no board selected".to_string());
    }

    let added = match state
        .board_repo
        .add_locations_to_boards(&board_ids, &location_ids)
        .await
    {
        Ok(added) => added,
        Err(e) => {
            log::error!("Adding locations to boards failed: {}", e);
            state.services.error("Failed to add locations to boards");
            return Err(e.to_string());
        }
    };

    state.services.success("Locations added to selected boards");
    Ok(added)
}

/// Remove a location from a board, keeping the location itself
pub async fn remove_location_from_board(
    state: &AppState,
    board_id: String,
    location_id: String,
) -> Result<bool, String> {
    state
        .board_repo
        .remove_location_from_board(&board_id, &location_id)
        .await
        .map_err(|e| e.to_string())
}

/// Locations for the "add to board" list: not on the board, name matching `query`
pub async fn locations_not_in_board(
    state: &AppState,
    board_id: String,
    query: String,
) -> Result<Vec<Location>, String> {
    let board = load(state, &board_id).await?;
    let all = state.location_repo.list().await.map_err(|e| e.to_string())?;
    Ok(addable_locations(&all, &board, &query)
        .into_iter()
        .cloned()
        .collect())
}

/// Share text for the selected locations of a board
pub async fn share_board_selection(
    state: &AppState,
    board_id: String,
    selected_ids: Vec<String>,
) -> Result<String, String> {
    let board = load(state, &board_id).await?;
    let selected = select_for_share(&board.locations, &selected_ids);
    if selected.is_empty() {
        return Err("Invalid input: no locations selected".to_string());
    }
    Ok(share_text(selected))
}

async fn load(state: &AppState, id: &str) -> Result<Board, String> {
    state
        .board_repo
        .find_by_id(&id.to_string())
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Board {} not found", id))
}
