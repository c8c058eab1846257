use crate::config::Rules;
use crate::db::models::{Recipe, RecipeAttributes};
use crate::db::{categories, dietary_tags, ingredients, ratings, recipes, users, DbPool};
use crate::error::{Error, Result};
use crate::import::{categorizer, dietary, ingredient_parser, rating, RecipeRecord};
use sqlx::SqliteConnection;
use tracing::error;
use url::Url;

const DEFAULT_AUTHOR: &str = "John Doe";

/// Import one recipe record on an open connection. The caller owns the
/// transaction; any error here must abort it.
///
/// Steps are sequential because each depends on identities persisted by the
/// previous one: owner, then recipe, then ingredients, tags, and rating.
pub async fn import_recipe(
    conn: &mut SqliteConnection,
    record: &RecipeRecord,
    rules: &Rules,
) -> Result<Recipe> {
    validate(record)?;

    let author = match record.author.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => DEFAULT_AUTHOR,
    };
    let owner = users::get_or_create_user(conn, author).await?;

    let parsed: Vec<ingredient_parser::ParsedIngredient> = record
        .ingredients
        .iter()
        .map(|line| ingredient_parser::parse(line, &rules.vocabulary))
        .collect();
    let ingredient_names: Vec<String> = parsed.iter().map(|p| p.name.clone()).collect();

    let category_name = resolve_category(record, &ingredient_names, rules);
    let category = categories::get_or_create_category(conn, &category_name).await?;

    let recipe = recipes::upsert_recipe(
        conn,
        &RecipeAttributes {
            title: record.title.clone(),
            user_id: owner.id,
            category_id: category.id,
            cook_time: record.cook_time,
            prep_time: record.prep_time,
            cuisine: record.cuisine.clone(),
            image_url: unwrap_image_url(record.image.as_deref()),
        },
    )
    .await?;

    for item in &parsed {
        let ingredient = ingredients::get_or_create_ingredient(conn, &item.name).await?;
        ingredients::upsert_recipe_ingredient(
            conn,
            recipe.id,
            ingredient.id,
            item.quantity.as_deref(),
            item.unit.as_deref(),
        )
        .await?;
    }

    for tag_name in dietary::matched_tags(&record.title, &ingredient_names, &rules.dietary) {
        let tag = dietary_tags::get_or_create_tag(conn, &tag_name).await?;
        dietary_tags::add_recipe_tag(conn, recipe.id, tag.id).await?;
    }

    if let Some(raw_score) = record.ratings {
        let score = rating::normalize_score(raw_score);
        ratings::create_rating(conn, recipe.id, owner.id, score).await?;
    }

    Ok(recipe)
}

/// Import a single record in its own transaction
pub async fn import_recipe_record(
    pool: &DbPool,
    record: &RecipeRecord,
    rules: &Rules,
) -> Result<Recipe> {
    let mut tx = pool.begin().await?;

    let recipe = match import_recipe(&mut *tx, record, rules).await {
        Ok(recipe) => recipe,
        Err(err) => {
            error!(title = %record.title, "Failed to import recipe: {}", err.log_safe());
            tx.rollback().await?;
            return Err(err);
        }
    };

    tx.commit().await?;
    Ok(recipe)
}

fn validate(record: &RecipeRecord) -> Result<()> {
    if record.title.trim().is_empty() {
        return Err(Error::Validation("Recipe title is required".to_string()));
    }

    if record.cook_time < 0 || record.prep_time < 0 {
        return Err(Error::Validation(
            "cook_time and prep_time must not be negative".to_string(),
        ));
    }

    Ok(())
}

fn resolve_category(record: &RecipeRecord, ingredient_names: &[String], rules: &Rules) -> String {
    match record.category.as_deref() {
        // Supplied names are trusted verbatim.
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => categorizer::categorize(&record.title, ingredient_names, &rules.categories),
    }
}

/// Extract the real image URL from a service-wrapped one. Wrappers encode
/// the target as a `url` query parameter; anything else passes through.
fn unwrap_image_url(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = Url::parse(raw) {
        if let Some((_, inner)) = parsed.query_pairs().find(|(key, _)| key == "url") {
            if !inner.is_empty() {
                return Some(inner.into_owned());
            }
        }
    }

    Some(raw.to_string())
}
