use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    config::Rules,
    db,
    import::{self, BatchOutcome, RecipeRecord},
    search, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub rules: Arc<Rules>,
    pub settings: crate::config::Settings,
}

/// GET /api/v1/recipes/search - Fuzzy ingredient search
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    debug!("Search request: {:?}", params);

    let matches = search::find_by_ingredients(
        &state.pool,
        &params.ingredients,
        state.settings.search.similarity_threshold,
    )
    .await?;

    let mut recipes = Vec::with_capacity(matches.len());
    for item in matches {
        let category = db::categories::get_category(&state.pool, item.recipe.category_id).await?;

        recipes.push(RecipeCard {
            id: item.recipe.id,
            title: item.recipe.title,
            category: category.name,
            cuisine: item.recipe.cuisine,
            matching_ingredients_count: item.matched_ingredients,
        });
    }

    Ok(Json(SearchResponse { recipes }))
}

/// GET /api/v1/recipes/:id - Recipe detail with ingredients and ratings
pub async fn get_recipe_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetailResponse>> {
    debug!("Recipe detail request: {}", id);

    let details = db::recipes::get_recipe_with_details(&state.pool, id).await?;

    let ingredients = details
        .ingredients
        .into_iter()
        .map(|i| IngredientDetail {
            name: i.name,
            quantity: i.quantity,
            unit: i.unit,
        })
        .collect();

    let ratings = details
        .ratings
        .into_iter()
        .map(|r| RatingDetail {
            score: r.score,
            user_name: r.user_name,
        })
        .collect();

    Ok(Json(RecipeDetailResponse {
        ingredients,
        category: details.category,
        dietary_tags: details.dietary_tags,
        ratings,
        average_rating: details.average_rating,
    }))
}

/// POST /api/v1/recipes/import - Batch import, all-or-nothing
pub async fn import_recipes(
    State(state): State<AppState>,
    Json(records): Json<Vec<RecipeRecord>>,
) -> Result<Json<ImportResponse>> {
    debug!(count = records.len(), "Import request");

    let outcome = import::import_batch(&state.pool, &records, &state.rules).await?;

    let response = match outcome {
        BatchOutcome::Imported(count) => ImportResponse {
            status: "imported".to_string(),
            imported: count,
        },
        BatchOutcome::RolledBack => ImportResponse {
            status: "rolled_back".to_string(),
            imported: 0,
        },
    };

    Ok(Json(response))
}

/// GET /health - Liveness check
pub async fn health_check() -> &'static str {
    "OK"
}
