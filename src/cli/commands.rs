use crate::config::{Rules, Settings};
use crate::db::{self, DbPool};
use crate::error::{Error, Result};
use crate::import::{self, BatchOutcome, RecipeRecord};
use crate::search;
use tracing::info;

async fn connect(settings: &Settings) -> Result<DbPool> {
    let pool = db::init_pool_with_config(&settings.database).await?;
    db::run_migrations(&pool).await?;
    Ok(pool)
}

/// Batch-import recipe records from a JSON file
pub async fn import(settings: &Settings, file: &str) -> Result<()> {
    let content = tokio::fs::read_to_string(file).await?;
    let records: Vec<RecipeRecord> = serde_json::from_str(&content)
        .map_err(|e| Error::Validation(format!("Invalid import file {file}: {e}")))?;

    info!(count = records.len(), "Importing records from {file}");

    let rules = Rules::load(&settings.rules)?;
    let pool = connect(settings).await?;

    match import::import_batch(&pool, &records, &rules).await? {
        BatchOutcome::Imported(count) => {
            println!("Imported {count} recipes");
        }
        BatchOutcome::RolledBack => {
            println!("Import failed; the batch was rolled back");
        }
    }

    Ok(())
}

/// Search the local database by ingredient list
pub async fn search(settings: &Settings, ingredients: &str) -> Result<()> {
    let pool = connect(settings).await?;

    let matches =
        search::find_by_ingredients(&pool, ingredients, settings.search.similarity_threshold)
            .await?;

    if matches.is_empty() {
        println!("No recipes found");
        return Ok(());
    }

    println!("Found {} recipes:", matches.len());
    for item in matches {
        println!(
            "  [{}] {} ({} matching ingredients)",
            item.recipe.id, item.recipe.title, item.matched_ingredients
        );
    }

    Ok(())
}

/// Run pending migrations and exit
pub async fn migrate(settings: &Settings) -> Result<()> {
    let pool = db::init_pool_with_config(&settings.database).await?;
    db::run_migrations(&pool).await?;
    println!("Migrations applied");
    Ok(())
}
