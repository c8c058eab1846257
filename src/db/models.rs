use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DietaryTag {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
    pub category_id: i64,
    pub cook_time: i64,
    pub prep_time: i64,
    pub cuisine: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Recipe fields assigned on every import of a (title, owner) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeAttributes {
    pub title: String,
    pub user_id: i64,
    pub category_id: i64,
    pub cook_time: i64,
    pub prep_time: i64,
    pub cuisine: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: i64,
    pub recipe_id: i64,
    pub user_id: i64,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IngredientWithQuantity {
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RatingWithUser {
    pub score: i64,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeWithDetails {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub category: String,
    pub ingredients: Vec<IngredientWithQuantity>,
    pub dietary_tags: Vec<String>,
    pub ratings: Vec<RatingWithUser>,
    pub average_rating: f64,
}
