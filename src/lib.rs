//! Sepilok Wildlife Booking
//!
//! Server side of the single-page booking widget: catalog and pricing,
//! per-visitor booking sessions, the spreadsheet log plus messaging handoff
//! on submission, and display-only wildlife facts.

use std::sync::Arc;

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
