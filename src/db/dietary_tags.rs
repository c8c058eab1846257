use crate::db::{models::DietaryTag, DbPool};
use crate::error::Result;
use chrono::Utc;
use sqlx::SqliteConnection;

/// Get or create a dietary tag by name
pub async fn get_or_create_tag(conn: &mut SqliteConnection, name: &str) -> Result<DietaryTag> {
    let existing = sqlx::query_as::<_, DietaryTag>("SELECT * FROM dietary_tags WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(tag) = existing {
        Ok(tag)
    } else {
        let tag = sqlx::query_as::<_, DietaryTag>(
            "INSERT INTO dietary_tags (name, created_at) VALUES (?, ?) RETURNING *",
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(tag)
    }
}

/// Associate a tag with a recipe; repeat associations are a no-op
pub async fn add_recipe_tag(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    tag_id: i64,
) -> Result<()> {
    sqlx::query(
        "INSERT OR IGNORE INTO recipe_dietary_tags (recipe_id, dietary_tag_id) VALUES (?, ?)",
    )
    .bind(recipe_id)
    .bind(tag_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Get tag names for a recipe
pub async fn get_tags_for_recipe(pool: &DbPool, recipe_id: i64) -> Result<Vec<String>> {
    let tags: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT t.name
        FROM dietary_tags t
        JOIN recipe_dietary_tags rt ON rt.dietary_tag_id = t.id
        WHERE rt.recipe_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// Count tag associations for a recipe
pub async fn count_recipe_tags(pool: &DbPool, recipe_id: i64) -> Result<i64> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM recipe_dietary_tags WHERE recipe_id = ?")
            .bind(recipe_id)
            .fetch_one(pool)
            .await?;
    Ok(count.0)
}
