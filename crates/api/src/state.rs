use std::sync::Arc;

use canvass_core::statistics::StatsEngine;
use canvass_db::PgStatsStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else is
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: canvass_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Statistics engine reading from the same pool.
    pub stats: Arc<StatsEngine<PgStatsStore>>,
}

impl AppState {
    /// Build the state from a pool and configuration, wiring the statistics
    /// engine to the pool.
    pub fn new(pool: canvass_db::DbPool, config: ServerConfig) -> Self {
        let stats = StatsEngine::new(PgStatsStore::new(pool.clone()))
            .with_text_sample_limit(config.text_sample_limit);
        Self {
            pool,
            config: Arc::new(config),
            stats: Arc::new(stats),
        }
    }
}
