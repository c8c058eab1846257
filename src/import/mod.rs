pub mod batch;
pub mod categorizer;
pub mod dietary;
pub mod ingredient_parser;
pub mod pipeline;
pub mod rating;

pub use batch::{import_batch, BatchOutcome};
pub use pipeline::import_recipe_record;

use serde::{Deserialize, Serialize};

/// One raw recipe record as delivered by an import source.
///
/// Field names follow the upstream JSON dumps; `ratings` carries a single
/// raw score despite the plural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    #[serde(default)]
    pub cook_time: i64,
    #[serde(default)]
    pub prep_time: i64,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, alias = "rating")]
    pub ratings: Option<f64>,
}
