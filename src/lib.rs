pub mod config;
pub mod db;
pub mod error;

// Ingestion pipeline
pub mod import;

// Ingredient search
pub mod search;

// HTTP API
pub mod api;

// CLI
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
