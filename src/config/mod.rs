pub mod rules;

pub use rules::{CategoryRules, DietaryRules, Rules, Vocabulary};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub rules: RuleFilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum trigram similarity for an ingredient to match a query term
    pub similarity_threshold: f64,
}

/// Paths to the YAML rule tables loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleFilesConfig {
    pub category_rules_path: PathBuf,
    pub dietary_tags_path: PathBuf,
    pub ingredient_vocabulary_path: PathBuf,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/recipebox.db".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "25".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATABASE_MAX_CONNECTIONS value".to_string()))?;

        let min_connections = std::env::var("DATABASE_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATABASE_MIN_CONNECTIONS value".to_string()))?;

        let connection_timeout_seconds = std::env::var("DATABASE_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATABASE_CONNECTION_TIMEOUT value".to_string()))?;

        let idle_timeout_seconds = std::env::var("DATABASE_IDLE_TIMEOUT")
            .unwrap_or_else(|_| "600".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATABASE_IDLE_TIMEOUT value".to_string()))?;

        let similarity_threshold = std::env::var("SEARCH_SIMILARITY_THRESHOLD")
            .unwrap_or_else(|_| "0.2".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEARCH_SIMILARITY_THRESHOLD value".to_string()))?;

        let category_rules_path = std::env::var("CATEGORY_RULES_PATH")
            .unwrap_or_else(|_| "./config/category_rules.yml".to_string())
            .into();

        let dietary_tags_path = std::env::var("DIETARY_TAGS_PATH")
            .unwrap_or_else(|_| "./config/dietary_tags.yml".to_string())
            .into();

        let ingredient_vocabulary_path = std::env::var("INGREDIENT_VOCABULARY_PATH")
            .unwrap_or_else(|_| "./config/ingredient_vocabulary.yml".to_string())
            .into();

        Ok(Settings {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                min_connections,
                connection_timeout_seconds,
                idle_timeout_seconds,
            },
            server: ServerConfig { host, port },
            search: SearchConfig {
                similarity_threshold,
            },
            rules: RuleFilesConfig {
                category_rules_path,
                dietary_tags_path,
                ingredient_vocabulary_path,
            },
        })
    }

    /// Validate settings after loading
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(Error::Config("DATABASE_URL must not be empty".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(Error::Config(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(Error::Config(
                "DATABASE_MIN_CONNECTIONS must not exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.search.similarity_threshold) {
            return Err(Error::Config(
                "SEARCH_SIMILARITY_THRESHOLD must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}
