use crate::config::Rules;
use crate::db::DbPool;
use crate::error::Result;
use crate::import::{pipeline, RecipeRecord};
use tracing::{error, info};

/// Outcome of a batch import. A rolled-back batch is a normal outcome, not
/// an `Err`: the failure is logged and the caller observes only the absence
/// of persisted changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    Imported(usize),
    RolledBack,
}

/// Import a list of records inside one outer transaction.
///
/// All-or-nothing: one bad record rolls back the entire batch, including
/// records that had already imported cleanly. There is no per-record
/// isolation.
pub async fn import_batch(
    pool: &DbPool,
    records: &[RecipeRecord],
    rules: &Rules,
) -> Result<BatchOutcome> {
    let mut tx = pool.begin().await?;

    for record in records {
        if let Err(err) = pipeline::import_recipe(&mut *tx, record, rules).await {
            error!(
                title = %record.title,
                "Failed to import batch of recipes: {}",
                err.log_safe()
            );
            tx.rollback().await?;
            return Ok(BatchOutcome::RolledBack);
        }
    }

    tx.commit().await?;
    info!(count = records.len(), "Imported recipe batch");
    Ok(BatchOutcome::Imported(records.len()))
}
