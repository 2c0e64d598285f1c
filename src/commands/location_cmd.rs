//! Commands for Location operations
//!
//! Location CRUD, tag and note edits, favorites and link capture.

use serde::{Deserialize, Serialize};

use crate::domain::{distinct_tags, is_share_link, new_id, Location};
use crate::filter::{suggested_tags, TokenSet};
use crate::repository::{Repository, SearchableRepository};
use crate::AppState;

/// Fields of the "new location" form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub country: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub note: Option<String>,
    pub image_src: Option<String>,
}

/// Create a new location
pub async fn create_location(state: &AppState, input: NewLocation) -> Result<Location, String> {
    let mut location = Location::new(new_id(), input.name, input.location);
    location.country = input.country;
    location.category = input.category;
    location.image_src = input.image_src;
    location.set_tags(&input.tags);
    if let Some(note) = input.note {
        location.set_note(&note);
    }

    state.location_repo.create(&location).await.map_err(|e| e.to_string())
}

/// List all locations, newest first
pub async fn list_locations(state: &AppState) -> Result<Vec<Location>, String> {
    state.location_repo.list().await.map_err(|e| e.to_string())
}

/// Locations whose name contains `query`
pub async fn search_locations(state: &AppState, query: String) -> Result<Vec<Location>, String> {
    state.location_repo.search(&query).await.map_err(|e| e.to_string())
}

/// Get location by ID
pub async fn get_location(state: &AppState, id: String) -> Result<Option<Location>, String> {
    state.location_repo.find_by_id(&id).await.map_err(|e| e.to_string())
}

/// Update location details; absent fields keep their value
pub async fn update_location(
    state: &AppState,
    id: String,
    name: Option<String>,
    location: Option<String>,
    country: Option<String>,
    category: Option<String>,
    image_src: Option<String>,
) -> Result<Location, String> {
    let mut existing = load(state, &id).await?;

    if let Some(name) = name {
        existing.name = name;
    }
    if let Some(location) = location {
        existing.location = location;
    }
    existing.country = country.or(existing.country);
    existing.category = category.or(existing.category);
    existing.image_src = image_src.or(existing.image_src);

    let updated = state.location_repo.update(&existing).await.map_err(|e| e.to_string())?;
    state.services.success("Location updated successfully");
    Ok(updated)
}

/// Delete location; it disappears from every board
pub async fn delete_location(state: &AppState, id: String) -> Result<(), String> {
    state.location_repo.delete(&id).await.map_err(|e| e.to_string())?;
    state.services.success("Location deleted successfully");
    Ok(())
}

// ========================
// Tags, notes, favorites
// ========================

/// Replace a location's tags
pub async fn set_location_tags(state: &AppState, id: String, tags: Vec<String>) -> Result<Location, String> {
    let mut location = load(state, &id).await?;
    let tags: TokenSet = tags.iter().collect();
    location.set_tags(tags.iter());
    save(state, &location).await
}

/// Append tags the location does not have yet
pub async fn add_location_tags(state: &AppState, id: String, tags: Vec<String>) -> Result<Location, String> {
    let mut location = load(state, &id).await?;
    if location.add_tags(&tags) == 0 {
        return Ok(location);
    }
    save(state, &location).await
}

pub async fn remove_location_tag(state: &AppState, id: String, tag: String) -> Result<Location, String> {
    let mut location = load(state, &id).await?;
    if !location.remove_tag(&tag) {
        return Ok(location);
    }
    save(state, &location).await
}

/// Set the note; blank text clears it
pub async fn set_location_note(state: &AppState, id: String, note: String) -> Result<Location, String> {
    let mut location = load(state, &id).await?;
    location.set_note(&note);
    save(state, &location).await
}

pub async fn toggle_favorite(state: &AppState, id: String) -> Result<Location, String> {
    let mut location = load(state, &id).await?;
    let now_favorite = location.toggle_favorite();
    let saved = save(state, &location).await?;

    state.services.success(if now_favorite {
        "Added to favorites"
    } else {
        "Removed from favorites"
    });
    Ok(saved)
}

/// Every tag in use across all locations, collated
pub async fn list_tags_in_use(state: &AppState) -> Result<Vec<String>, String> {
    let locations = state.location_repo.list().await.map_err(|e| e.to_string())?;
    Ok(distinct_tags(&locations))
}

/// Predefined tags the location does not carry yet
pub async fn tag_suggestions(state: &AppState, id: String) -> Result<Vec<String>, String> {
    let location = load(state, &id).await?;
    Ok(suggested_tags(&[location.tags.as_slice()])
        .into_iter()
        .map(str::to_string)
        .collect())
}

// ========================
// Link capture
// ========================

/// Save the place names extracted from a shared link
pub async fn save_extracted_locations(
    state: &AppState,
    source_link: String,
    names: Vec<String>,
) -> Result<Vec<Location>, String> {
    let link = source_link.trim();
    if link.is_empty() {
        state.services.error("Please enter a link");
        return Err("Invalid input: link cannot be empty".to_string());
    }
    if !is_share_link(link) {
        state.services.error("Failed to process link. Please try again.");
        return Err(format!("Invalid input: not a link: {}", link));
    }

    let locations: Vec<Location> = names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| Location::from_link(new_id(), name.to_string(), link.to_string()))
        .collect();
    if locations.is_empty() {
        return Err("Invalid input: no locations found in link".to_string());
    }

    let saved = state
        .location_repo
        .create_many(&locations)
        .await
        .map_err(|e| e.to_string())?;

    log::info!("Extracted {} locations from {}", saved.len(), link);
    Ok(saved)
}

async fn load(state: &AppState, id: &str) -> Result<Location, String> {
    state
        .location_repo
        .find_by_id(&id.to_string())
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Location {} not found", id))
}

async fn save(state: &AppState, location: &Location) -> Result<Location, String> {
    state.location_repo.update(location).await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::test_state;
    use crate::commands::NoticeKind;

    fn form(name: &str) -> NewLocation {
        NewLocation {
            name: name.to_string(),
            ..NewLocation::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (state, _) = test_state().await;

        let input = NewLocation {
            name: "Totoro Cafe".into(),
            location: "Setagaya, Tokyo".into(),
            country: Some("Japan".into()),
            tags: vec!["Food".into(), "Food".into(), " ".into()],
            note: Some("  ".into()),
            ..NewLocation::default()
        };
        let created = create_location(&state, input).await.unwrap();
        assert_eq!(created.tags, vec!["Food"]);
        assert_eq!(created.note, None);

        let all = list_locations(&state).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].place(), "Japan");
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (state, _) = test_state().await;
        let err = create_location(&state, form("  ")).await.unwrap_err();
        assert!(err.contains("name cannot be empty"));
    }

    #[tokio::test]
    async fn test_update_keeps_absent_fields() {
        let (state, notifier) = test_state().await;

        let mut input = form("Totoro Cafe");
        input.country = Some("Japan".into());
        let created = create_location(&state, input).await.unwrap();

        let updated = update_location(&state, created.id.clone(), Some("Totoro Bakery".into()), None, None, None, None)
            .await
            .unwrap();
        assert_eq!(updated.name, "Totoro Bakery");
        assert_eq!(updated.country.as_deref(), Some("Japan"));
        assert_eq!(
            notifier.last(),
            Some((NoticeKind::Success, "Location updated successfully".to_string()))
        );

        let err = update_location(&state, "ghost".into(), None, None, None, None, None).await.unwrap_err();
        assert!(err.contains("not found"));
    }

    #[tokio::test]
    async fn test_tag_editing() {
        let (state, _) = test_state().await;
        let created = create_location(&state, form("Totoro Cafe")).await.unwrap();
        let id = created.id.clone();

        let loc = set_location_tags(&state, id.clone(), vec!["Food".into(), " Food ".into(), "Nature".into()])
            .await
            .unwrap();
        assert_eq!(loc.tags, vec!["Food", "Nature"]);

        let loc = add_location_tags(&state, id.clone(), vec!["Nature".into(), "Photo Spot".into()])
            .await
            .unwrap();
        assert_eq!(loc.tags, vec!["Food", "Nature", "Photo Spot"]);

        let loc = remove_location_tag(&state, id.clone(), "Nature".into()).await.unwrap();
        assert_eq!(loc.tags, vec!["Food", "Photo Spot"]);

        let stored = get_location(&state, id.clone()).await.unwrap().unwrap();
        assert_eq!(stored.tags, vec!["Food", "Photo Spot"]);

        let suggestions = tag_suggestions(&state, id).await.unwrap();
        assert_eq!(suggestions.len(), 8);
        assert!(!suggestions.contains(&"Food".to_string()));
    }

    #[tokio::test]
    async fn test_note_is_persisted() {
        let (state, _) = test_state().await;
        let created = create_location(&state, form("Totoro Cafe")).await.unwrap();

        set_location_note(&state, created.id.clone(), "Closed on Mondays".into()).await.unwrap();
        let stored = get_location(&state, created.id.clone()).await.unwrap().unwrap();
        assert_eq!(stored.note.as_deref(), Some("Closed on Mondays"));

        set_location_note(&state, created.id.clone(), "   ".into()).await.unwrap();
        let stored = get_location(&state, created.id).await.unwrap().unwrap();
        assert_eq!(stored.note, None);
    }

    #[tokio::test]
    async fn test_toggle_favorite_notices() {
        let (state, notifier) = test_state().await;
        let created = create_location(&state, form("Totoro Cafe")).await.unwrap();

        let loc = toggle_favorite(&state, created.id.clone()).await.unwrap();
        assert!(loc.is_favorite);
        assert_eq!(notifier.last().unwrap().1, "Added to favorites");

        let loc = toggle_favorite(&state, created.id).await.unwrap();
        assert!(!loc.is_favorite);
        assert_eq!(notifier.last().unwrap().1, "Removed from favorites");
    }

    #[tokio::test]
    async fn test_delete_location() {
        let (state, notifier) = test_state().await;
        let created = create_location(&state, form("Totoro Cafe")).await.unwrap();

        delete_location(&state, created.id.clone()).await.unwrap();
        assert!(get_location(&state, created.id.clone()).await.unwrap().is_none());
        assert_eq!(notifier.last().unwrap().1, "Location deleted successfully");

        assert!(delete_location(&state, created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_tags_in_use() {
        let (state, _) = test_state().await;

        let mut a = form("Totoro Cafe");
        a.tags = vec!["ramen".into(), "Food".into()];
        let mut b = form("Times Square");
        b.tags = vec!["Food".into(), "Landmark".into()];
        create_location(&state, a).await.unwrap();
        create_location(&state, b).await.unwrap();

        let tags = list_tags_in_use(&state).await.unwrap();
        assert_eq!(tags, vec!["Food", "Landmark", "ramen"]);
    }

    #[tokio::test]
    async fn test_save_extracted_locations() {
        let (state, _) = test_state().await;

        let saved = save_extracted_locations(
            &state,
            " https://maps.example.com/list/42 ".into(),
            vec!["Totoro Cafe".into(), "  ".into(), "Times Square".into()],
        )
        .await
        .unwrap();

        assert_eq!(saved.len(), 2);
        assert!(saved
            .iter()
            .all(|l| l.source_link.as_deref() == Some("https://maps.example.com/list/42")));
        assert_eq!(list_locations(&state).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_extracted_rejects_bad_links() {
        let (state, notifier) = test_state().await;

        assert!(save_extracted_locations(&state, "  ".into(), vec!["A".into()]).await.is_err());
        assert_eq!(
            notifier.last(),
            Some((NoticeKind::Error, "Please enter a link".to_string()))
        );

        assert!(save_extracted_locations(&state, "not a link".into(), vec!["A".into()]).await.is_err());
        assert!(save_extracted_locations(&state, "https://example.com".into(), vec![" ".into()]).await.is_err());
        assert!(list_locations(&state).await.unwrap().is_empty());
    }
}
