use crate::db::{models::*, ratings, DbPool};
use crate::error::{Error, Result};
use chrono::Utc;
use sqlx::SqliteConnection;

/// Find-or-initialize a recipe keyed by (title, owner) and assign its
/// attributes. This is the import idempotency point: a re-import of the same
/// pair updates the row in place instead of inserting a duplicate.
pub async fn upsert_recipe(
    conn: &mut SqliteConnection,
    attributes: &RecipeAttributes,
) -> Result<Recipe> {
    let now = Utc::now();

    let existing = sqlx::query_as::<_, Recipe>(
        "SELECT * FROM recipes WHERE title = ? AND user_id = ?",
    )
    .bind(&attributes.title)
    .bind(attributes.user_id)
    .fetch_optional(&mut *conn)
    .await?;

    let recipe = if let Some(existing) = existing {
        sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET category_id = ?, cook_time = ?, prep_time = ?, cuisine = ?,
                image_url = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(attributes.category_id)
        .bind(attributes.cook_time)
        .bind(attributes.prep_time)
        .bind(&attributes.cuisine)
        .bind(&attributes.image_url)
        .bind(now)
        .bind(existing.id)
        .fetch_one(&mut *conn)
        .await?
    } else {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (
                title, user_id, category_id, cook_time, prep_time,
                cuisine, image_url, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&attributes.title)
        .bind(attributes.user_id)
        .bind(attributes.category_id)
        .bind(attributes.cook_time)
        .bind(attributes.prep_time)
        .bind(&attributes.cuisine)
        .bind(&attributes.image_url)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?
    };

    Ok(recipe)
}

/// Get recipe by ID
pub async fn get_recipe(pool: &DbPool, recipe_id: i64) -> Result<Recipe> {
    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {recipe_id} not found")))?;

    Ok(recipe)
}

/// Count all recipes
pub async fn count_recipes(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// Get a recipe with its category, ingredients, tags, and ratings
pub async fn get_recipe_with_details(pool: &DbPool, recipe_id: i64) -> Result<RecipeWithDetails> {
    let recipe = get_recipe(pool, recipe_id).await?;

    let category: String = sqlx::query_scalar("SELECT name FROM categories WHERE id = ?")
        .bind(recipe.category_id)
        .fetch_one(pool)
        .await?;

    let ingredients = crate::db::ingredients::get_ingredients_for_recipe(pool, recipe_id).await?;
    let dietary_tags = crate::db::dietary_tags::get_tags_for_recipe(pool, recipe_id).await?;
    let rating_rows = ratings::get_ratings_for_recipe(pool, recipe_id).await?;
    let average_rating = ratings::average_rating(&rating_rows);

    Ok(RecipeWithDetails {
        recipe,
        category,
        ingredients,
        dietary_tags,
        ratings: rating_rows,
        average_rating,
    })
}
