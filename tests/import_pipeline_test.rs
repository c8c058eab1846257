use recipebox::config::{RuleFilesConfig, Rules};
use recipebox::db::{dietary_tags, ingredients, recipes};
use recipebox::error::Error;
use recipebox::import::{self, BatchOutcome, RecipeRecord};
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn test_rules() -> Rules {
    Rules::load(&RuleFilesConfig {
        category_rules_path: "./config/category_rules.yml".into(),
        dietary_tags_path: "./config/dietary_tags.yml".into(),
        ingredient_vocabulary_path: "./config/ingredient_vocabulary.yml".into(),
    })
    .expect("Failed to load rule files")
}

fn banana_bread(cook_time: i64, rating: Option<f64>) -> RecipeRecord {
    RecipeRecord {
        title: "Classic Banana Bread".to_string(),
        cook_time,
        prep_time: 15,
        cuisine: Some("American".to_string()),
        image: None,
        author: Some("Jane Smith".to_string()),
        category: None,
        ingredients: vec![
            "2 cups all-purpose flour".to_string(),
            "1/2 cup sugar".to_string(),
            "3 large eggs".to_string(),
            "2 ripe bananas".to_string(),
        ],
        ratings: rating,
    }
}

#[tokio::test]
async fn test_import_parses_and_persists_ingredients() {
    let pool = test_pool().await;
    let rules = test_rules();

    let recipe = import::import_recipe_record(&pool, &banana_bread(60, None), &rules)
        .await
        .unwrap();

    let stored = ingredients::get_ingredients_for_recipe(&pool, recipe.id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 4);

    let flour = stored
        .iter()
        .find(|i| i.name == "all-purpose flour")
        .expect("flour should be stored under its parsed name");
    assert_eq!(flour.quantity.as_deref(), Some("2"));
    assert_eq!(flour.unit.as_deref(), Some("cups"));

    let eggs = stored.iter().find(|i| i.name == "large eggs").unwrap();
    assert_eq!(eggs.quantity.as_deref(), Some("3"));
    assert_eq!(eggs.unit, None);
}

#[tokio::test]
async fn test_reimport_updates_in_place() {
    let pool = test_pool().await;
    let rules = test_rules();

    let first = import::import_recipe_record(&pool, &banana_bread(60, Some(4.74)), &rules)
        .await
        .unwrap();

    // Second import of the same (title, owner): new fields win, nothing is
    // duplicated. The rating is omitted because the owner already rated it.
    let second = import::import_recipe_record(&pool, &banana_bread(45, None), &rules)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.cook_time, 45);
    assert_eq!(recipes::count_recipes(&pool).await.unwrap(), 1);
    assert_eq!(
        ingredients::count_recipe_ingredients(&pool, first.id)
            .await
            .unwrap(),
        4
    );
}

#[tokio::test]
async fn test_missing_author_defaults_to_john_doe() {
    let pool = test_pool().await;
    let rules = test_rules();

    let mut record = banana_bread(60, None);
    record.author = None;

    import::import_recipe_record(&pool, &record, &rules)
        .await
        .unwrap();

    let owner: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE name = 'John Doe'")
        .fetch_optional(&pool)
        .await
        .unwrap();
    assert!(owner.is_some());
}

#[tokio::test]
async fn test_supplied_category_is_stored_verbatim() {
    let pool = test_pool().await;
    let rules = test_rules();

    let mut record = banana_bread(60, None);
    record.category = Some("Grandma's Favourites".to_string());

    let recipe = import::import_recipe_record(&pool, &record, &rules)
        .await
        .unwrap();

    let details = recipes::get_recipe_with_details(&pool, recipe.id)
        .await
        .unwrap();
    assert_eq!(details.category, "Grandma's Favourites");
}

#[tokio::test]
async fn test_missing_category_runs_the_categorizer() {
    let pool = test_pool().await;
    let rules = test_rules();

    let recipe = import::import_recipe_record(&pool, &banana_bread(60, None), &rules)
        .await
        .unwrap();

    let details = recipes::get_recipe_with_details(&pool, recipe.id)
        .await
        .unwrap();
    assert_eq!(details.category, "Baking");
}

#[tokio::test]
async fn test_dietary_tags_assigned_once_across_reimports() {
    let pool = test_pool().await;
    let rules = test_rules();

    let record = RecipeRecord {
        title: "Vegan Stir Fry".to_string(),
        cook_time: 20,
        prep_time: 10,
        cuisine: None,
        image: None,
        author: Some("Jane Smith".to_string()),
        category: None,
        ingredients: vec!["200 grams tofu".to_string(), "1 red pepper".to_string()],
        ratings: None,
    };

    let recipe = import::import_recipe_record(&pool, &record, &rules)
        .await
        .unwrap();
    import::import_recipe_record(&pool, &record, &rules)
        .await
        .unwrap();

    let tags = dietary_tags::get_tags_for_recipe(&pool, recipe.id)
        .await
        .unwrap();
    assert_eq!(tags, vec!["vegan".to_string()]);
}

#[tokio::test]
async fn test_rating_is_normalized_and_duplicate_is_a_conflict() {
    let pool = test_pool().await;
    let rules = test_rules();

    let recipe = import::import_recipe_record(&pool, &banana_bread(60, Some(4.74)), &rules)
        .await
        .unwrap();

    let score: (i64,) = sqlx::query_as("SELECT score FROM ratings WHERE recipe_id = ?")
        .bind(recipe.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(score.0, 5);

    // Re-import with a rating: the owner already rated this recipe, so the
    // whole record import aborts with a conflict.
    let result = import::import_recipe_record(&pool, &banana_bread(60, Some(3.0)), &rules).await;
    assert!(matches!(result, Err(Error::Conflict(_))));

    // The aborted transaction must not have touched the recipe.
    let recipe = recipes::get_recipe(&pool, recipe.id).await.unwrap();
    assert_eq!(recipe.cook_time, 60);
}

#[tokio::test]
async fn test_blank_title_aborts_the_import() {
    let pool = test_pool().await;
    let rules = test_rules();

    let mut record = banana_bread(60, None);
    record.title = "   ".to_string();

    let result = import::import_recipe_record(&pool, &record, &rules).await;
    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(recipes::count_recipes(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_batch_import_succeeds() {
    let pool = test_pool().await;
    let rules = test_rules();

    let mut second = banana_bread(30, None);
    second.title = "Banana Muffins".to_string();

    let outcome = import::import_batch(&pool, &[banana_bread(60, None), second], &rules)
        .await
        .unwrap();

    assert_eq!(outcome, BatchOutcome::Imported(2));
    assert_eq!(recipes::count_recipes(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn test_one_bad_record_rolls_back_the_whole_batch() {
    let pool = test_pool().await;
    let rules = test_rules();

    let mut bad = banana_bread(30, None);
    bad.title = String::new();

    let outcome = import::import_batch(&pool, &[banana_bread(60, None), bad], &rules)
        .await
        .unwrap();

    assert_eq!(outcome, BatchOutcome::RolledBack);
    assert_eq!(recipes::count_recipes(&pool).await.unwrap(), 0);

    let user_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(user_count.0, 0);
}
