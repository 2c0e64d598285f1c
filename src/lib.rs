//! Scurry Backend
//!
//! Capture, tag and organize places into boards.
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - filter: Search and filter engine shared by every list
//! - repository: Data access abstractions and implementations
//! - commands: Screen-level handlers
//! - config: Application configuration

pub mod domain;
pub mod filter;
pub mod repository;
pub mod commands;
pub mod config;

use commands::Services;
use config::AppConfig;
use domain::{DomainError, DomainResult};
use repository::{init_db, BoardRepository, DbState, LocationRepository};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub location_repo: LocationRepository,
    pub board_repo: BoardRepository,
    pub services: Services,
    pub config: AppConfig,
}

/// Open the database described by `config` and wire up the repositories
pub async fn open(config: AppConfig, services: Services) -> DomainResult<AppState> {
    let db_path = config.db_path();
    log::info!("Opening database at {}", db_path.display());

    let db_state = init_db(&db_path).await?;

    Ok(AppState {
        location_repo: LocationRepository::new(db_state.conn.clone()),
        board_repo: BoardRepository::new(db_state.conn.clone()),
        db_state,
        services,
        config,
    })
}

/// Start the rolling file logger in the configured log directory
pub fn init_logging(config: &AppConfig) -> DomainResult<()> {
    rolling_logger::init_logger(config.log_dir(), &config.app_name)
        .map_err(|e| DomainError::Internal(format!("Failed to init logger: {}", e)))?;
    let _ = rolling_logger::info(&format!("{} logging to {}", config.app_name, config.log_dir().display()));
    Ok(())
}
