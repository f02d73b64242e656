//! Bibliothèque library catalog server
//!
//! A REST JSON API for managing a school library catalog: books, the placards and
//! shelves they are stored on, and ISBN/barcode lookups against external
//! bibliographic sources (BnF, Google Books, Open Library) to prefill new entries.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod sources;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
