use crate::db::{models::Category, DbPool};
use crate::error::{Error, Result};
use chrono::Utc;
use sqlx::SqliteConnection;

/// Get or create a category by name (stored as given, case-sensitive)
pub async fn get_or_create_category(conn: &mut SqliteConnection, name: &str) -> Result<Category> {
    let existing = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(category) = existing {
        Ok(category)
    } else {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, created_at) VALUES (?, ?) RETURNING *",
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(category)
    }
}

/// Get a category by id
pub async fn get_category(pool: &DbPool, category_id: i64) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ?")
        .bind(category_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Category {category_id} not found")))?;

    Ok(category)
}
