use crate::db::{models::*, DbPool};
use crate::error::Result;
use chrono::Utc;
use sqlx::SqliteConnection;

/// Create a rating. A user rates a recipe at most once; a second rating for
/// the same (user, recipe) pair surfaces as `Error::Conflict`.
pub async fn create_rating(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    user_id: i64,
    score: i64,
) -> Result<Rating> {
    let rating = sqlx::query_as::<_, Rating>(
        r#"
        INSERT INTO ratings (recipe_id, user_id, score, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(recipe_id)
    .bind(user_id)
    .bind(score)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(rating)
}

/// Get ratings for a recipe with the rater's name
pub async fn get_ratings_for_recipe(pool: &DbPool, recipe_id: i64) -> Result<Vec<RatingWithUser>> {
    let ratings = sqlx::query_as::<_, RatingWithUser>(
        r#"
        SELECT r.score, u.name AS user_name
        FROM ratings r
        JOIN users u ON u.id = r.user_id
        WHERE r.recipe_id = ?
        ORDER BY r.id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(ratings)
}

/// Average score rounded to two decimals, 0.0 when unrated
pub fn average_rating(ratings: &[RatingWithUser]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let sum: i64 = ratings.iter().map(|r| r.score).sum();
    let average = sum as f64 / ratings.len() as f64;
    (average * 100.0).round() / 100.0
}
