pub mod query;
pub mod trigram;

pub use query::normalize_query;
pub use trigram::similarity;

use crate::db::{ingredients, models::Recipe, recipes, DbPool};
use crate::error::Result;
use std::collections::{HashMap, HashSet};

/// A recipe ranked by how many of its distinct ingredients matched the query
#[derive(Debug, Clone)]
pub struct RecipeMatch {
    pub recipe: Recipe,
    pub matched_ingredients: i64,
}

/// Rank stored recipes by fuzzy ingredient overlap with a raw comma-separated
/// query. Read-only; an empty result list is a valid outcome.
///
/// Ranking: count of distinct matched ingredients descending, ties broken by
/// ascending recipe id.
pub async fn find_by_ingredients(
    pool: &DbPool,
    raw_query: &str,
    similarity_threshold: f64,
) -> Result<Vec<RecipeMatch>> {
    let terms = normalize_query(raw_query)?;

    let stored = ingredients::list_ingredients(pool).await?;
    let matched_ingredient_ids: HashSet<i64> = stored
        .iter()
        .filter(|ingredient| {
            terms
                .iter()
                .any(|term| similarity(&ingredient.name, term) > similarity_threshold)
        })
        .map(|ingredient| ingredient.id)
        .collect();

    if matched_ingredient_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut counts: HashMap<i64, i64> = HashMap::new();
    for (recipe_id, ingredient_id) in ingredients::list_recipe_ingredient_pairs(pool).await? {
        if matched_ingredient_ids.contains(&ingredient_id) {
            *counts.entry(recipe_id).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(i64, i64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut results = Vec::with_capacity(ranked.len());
    for (recipe_id, matched) in ranked {
        let recipe = recipes::get_recipe(pool, recipe_id).await?;
        results.push(RecipeMatch {
            recipe,
            matched_ingredients: matched,
        });
    }

    Ok(results)
}
