use std::sync::Arc;

use taproom_db::store::{MemoryStore, PgStore};
use taproom_db::DbPool;

use crate::config::{ServerConfig, StoreBackend};
use crate::services::{BeerService, CustomerService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; services hold their store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database pool; `None` when running on the in-memory backend.
    pub pool: Option<DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    pub beers: BeerService,
    pub customers: CustomerService,
}

impl AppState {
    /// State backed by PostgreSQL through `pool`.
    pub fn postgres(pool: DbPool, config: ServerConfig) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            pool: Some(pool),
            config: Arc::new(config),
            beers: BeerService::new(store.clone()),
            customers: CustomerService::new(store),
        }
    }

    /// State backed by a fresh process-local store.
    pub fn in_memory(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            pool: None,
            config: Arc::new(config),
            beers: BeerService::new(store.clone()),
            customers: CustomerService::new(store),
        }
    }

    pub fn backend(&self) -> StoreBackend {
        if self.pool.is_some() {
            StoreBackend::Postgres
        } else {
            StoreBackend::Memory
        }
    }
}
