//! Maintenance planning server
//!
//! Tracks industrial equipment, the maintenance standards for each equipment
//! type, and the planned maintenance generated from them, behind a REST JSON
//! API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
