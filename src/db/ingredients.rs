use crate::db::{models::*, DbPool};
use crate::error::Result;
use chrono::Utc;
use sqlx::SqliteConnection;

/// Get or create an ingredient by its exact parsed name. The name is the
/// deduplication key and is stored without normalization.
pub async fn get_or_create_ingredient(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Ingredient> {
    let existing = sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(ingredient) = existing {
        Ok(ingredient)
    } else {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            "INSERT INTO ingredients (name, created_at) VALUES (?, ?) RETURNING *",
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(ingredient)
    }
}

/// Upsert the (recipe, ingredient) association, overwriting quantity and
/// unit in place. Re-importing the same pair never inserts a duplicate row.
pub async fn upsert_recipe_ingredient(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    ingredient_id: i64,
    quantity: Option<&str>,
    unit: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(recipe_id)
    .bind(ingredient_id)
    .bind(quantity)
    .bind(unit)
    .execute(conn)
    .await?;

    Ok(())
}

/// Get ingredients for a recipe
pub async fn get_ingredients_for_recipe(
    pool: &DbPool,
    recipe_id: i64,
) -> Result<Vec<IngredientWithQuantity>> {
    let ingredients = sqlx::query_as::<_, IngredientWithQuantity>(
        r#"
        SELECT i.name, ri.quantity, ri.unit
        FROM ingredients i
        JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
        WHERE ri.recipe_id = ?
        ORDER BY i.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(ingredients)
}

/// List all stored ingredients
pub async fn list_ingredients(pool: &DbPool) -> Result<Vec<Ingredient>> {
    let ingredients = sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(ingredients)
}

/// Get all (recipe_id, ingredient_id) association pairs
pub async fn list_recipe_ingredient_pairs(pool: &DbPool) -> Result<Vec<(i64, i64)>> {
    let pairs: Vec<(i64, i64)> =
        sqlx::query_as("SELECT recipe_id, ingredient_id FROM recipe_ingredients")
            .fetch_all(pool)
            .await?;

    Ok(pairs)
}

/// Count associations for a recipe
pub async fn count_recipe_ingredients(pool: &DbPool, recipe_id: i64) -> Result<i64> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM recipe_ingredients WHERE recipe_id = ?")
            .bind(recipe_id)
            .fetch_one(pool)
            .await?;
    Ok(count.0)
}
