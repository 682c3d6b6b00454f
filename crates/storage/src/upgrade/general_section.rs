#![forbid(unsafe_code)]

use super::UpgradeConfig;
use crate::store::{StoreError, show_general_sections_tx};
use rusqlite::Transaction;

// An earlier platform upgrade could leave section 0 hidden, which breaks course navigation.
pub(super) fn repair_general_section_step(
    tx: &Transaction<'_>,
    config: &UpgradeConfig,
) -> Result<(), StoreError> {
    let repaired = show_general_sections_tx(tx, &config.format)?;
    if repaired > 0 {
        tracing::info!(format = %config.format, repaired, "general sections made visible");
    }
    Ok(())
}
