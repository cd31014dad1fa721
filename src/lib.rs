//! Exercise Tracker Library
//!
//! Users, their exercise logs, and the date/limit query engine over those logs.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod log_query;
pub mod models;
pub mod routes;

pub use config::Config;
pub use db::{Db, open_database};
pub use error::{AppError, Result};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Self {
        Self { db, config }
    }
}
