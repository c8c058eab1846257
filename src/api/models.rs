use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub ingredients: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub recipes: Vec<RecipeCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCard {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub cuisine: Option<String>,
    pub matching_ingredients_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetailResponse {
    pub ingredients: Vec<IngredientDetail>,
    pub category: String,
    pub dietary_tags: Vec<String>,
    pub ratings: Vec<RatingDetail>,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDetail {
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingDetail {
    pub score: i64,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub status: String,
    pub imported: usize,
}
