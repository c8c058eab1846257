use crate::db::models::User;
use crate::error::Result;
use chrono::Utc;
use sqlx::SqliteConnection;

/// Get or create a user by exact name
pub async fn get_or_create_user(conn: &mut SqliteConnection, name: &str) -> Result<User> {
    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(user) = existing {
        Ok(user)
    } else {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, created_at) VALUES (?, ?) RETURNING *",
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }
}
