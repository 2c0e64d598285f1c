//! Location Repository
//!
//! SQLite-backed storage for locations. Tags are kept in the `tag`
//! column as a JSON array.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{new_id, require_name, DomainError, DomainResult, Location};
use crate::filter::matches_query;

use super::db::{ready, SharedConnection};
use super::traits::{Repository, SearchableRepository};

/// Column list shared by every location query (aliased as `l`)
pub(crate) const LOCATION_COLUMNS: &str = "l.id, l.name, l.address, l.country, l.category, l.tag, \
     l.note, l.is_favorite, l.image_src, l.source_link, l.created_at, l.updated_at";

/// SQLite implementation of Location repository
pub struct LocationRepository {
    pub(super) conn: SharedConnection,
}

impl LocationRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Insert several locations in one transaction
    pub async fn create_many(&self, entities: &[Location]) -> DomainResult<Vec<Location>> {
        for entity in entities {
            require_name("Location", &entity.name)?;
        }

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        let tx = conn.unchecked_transaction()?;

        let mut created = Vec::with_capacity(entities.len());
        for entity in entities {
            created.push(insert_location(&tx, entity)?);
        }
        tx.commit()?;

        log::info!("Saved {} locations", created.len());
        Ok(created)
    }
}

#[async_trait]
impl Repository<Location> for LocationRepository {
    async fn create(&self, entity: &Location) -> DomainResult<Location> {
        require_name("Location", &entity.name)?;

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        let location = insert_location(conn, entity)?;

        log::debug!("Created location {} ({})", location.name, location.id);
        Ok(location)
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Location>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        find_location(conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Location>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM location l ORDER BY l.created_at DESC, l.rowid DESC",
            LOCATION_COLUMNS
        ))?;
        let mut rows = stmt.query([])?;

        let mut locations = Vec::new();
        while let Some(row) = rows.next()? {
            locations.push(row_to_location(row)?);
        }
        Ok(locations)
    }

    async fn update(&self, entity: &Location) -> DomainResult<Location> {
        require_name("Location", &entity.name)?;

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let now = chrono::Utc::now().timestamp_millis();
        let location = normalized(entity, now);
        let tags = serde_json::to_string(&location.tags)?;
        let changed = conn.execute(
            "UPDATE location SET name = ?, address = ?, country = ?, category = ?, tag = ?,
                note = ?, is_favorite = ?, image_src = ?, source_link = ?, updated_at = ?
             WHERE id = ?",
            params![
                location.name,
                location.location,
                location.country,
                location.category,
                tags,
                location.note,
                location.is_favorite,
                location.image_src,
                location.source_link,
                location.updated_at,
                location.id,
            ],
        )?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("location {}", entity.id)));
        }
        Ok(location)
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        // board_location rows go with it (ON DELETE CASCADE)
        let changed = conn.execute("DELETE FROM location WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("location {}", id)));
        }

        log::info!("Deleted location {}", id);
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Location> for LocationRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<Location>> {
        let all = self.list().await?;
        Ok(all
            .into_iter()
            .filter(|loc| matches_query(&loc.name, query))
            .collect())
    }
}

fn insert_location(conn: &Connection, entity: &Location) -> DomainResult<Location> {
    let now = chrono::Utc::now().timestamp_millis();

    let mut location = normalized(entity, now);
    if location.id.trim().is_empty() {
        location.id = new_id();
    }
    location.created_at = Some(entity.created_at.unwrap_or(now));

    let tags = serde_json::to_string(&location.tags)?;
    conn.execute(
        "INSERT INTO location (id, name, address, country, category, tag, note, is_favorite,
            image_src, source_link, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            location.id,
            location.name,
            location.location,
            location.country,
            location.category,
            tags,
            location.note,
            location.is_favorite,
            location.image_src,
            location.source_link,
            location.created_at,
            location.updated_at,
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DomainError::Conflict(format!("location {} already exists", location.id))
        }
        other => other.into(),
    })?;

    Ok(location)
}

/// Copy of `entity` as it is written: trimmed name, tags without blanks or duplicates
fn normalized(entity: &Location, now: i64) -> Location {
    let mut location = entity.clone();
    location.name = entity.name.trim().to_string();
    location.set_tags(&entity.tags);
    location.updated_at = Some(now);
    location
}

pub(super) fn find_location(conn: &Connection, id: &str) -> DomainResult<Option<Location>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM location l WHERE l.id = ?",
        LOCATION_COLUMNS
    ))?;
    let row = stmt
        .query_row(params![id], |row| Ok(row_to_location(row)))
        .optional()?;
    row.transpose()
}

/// Convert a database row (selected with `LOCATION_COLUMNS`) to Location
pub(crate) fn row_to_location(row: &rusqlite::Row) -> DomainResult<Location> {
    let tags: Option<String> = row.get(5)?;
    let tags: Vec<String> = match tags.as_deref() {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)?,
        _ => Vec::new(),
    };

    Ok(Location {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        country: row.get(3)?,
        category: row.get(4)?,
        tags,
        note: row.get(6)?,
        is_favorite: row.get::<_, Option<bool>>(7)?.unwrap_or(false),
        image_src: row.get(8)?,
        source_link: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
