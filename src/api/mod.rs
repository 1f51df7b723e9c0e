//! API module - HTTP handlers and routing.

pub mod attachment;
pub mod handlers;
pub mod routes;

use crate::config::Config;
use crate::services::ProjectService;
use crate::storage::StorageBackend;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: SqlitePool,
    pub storage: Arc<dyn StorageBackend>,
}

impl AppState {
    pub fn new(config: Config, db: SqlitePool, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            config,
            db,
            storage,
        }
    }

    /// Create a ProjectService over the shared pool and storage.
    pub fn create_project_service(&self) -> ProjectService {
        ProjectService::new(self.db.clone(), self.storage.clone())
    }
}

pub type SharedState = Arc<AppState>;
