#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use cvo_core::version::PluginVersion;
use rusqlite::{Connection, OptionalExtension, Transaction, params};

const VERSION_KEY: &str = "version";

impl SqliteStore {
    /// Last upgrade step recorded for `plugin`, `None` before installation.
    pub fn plugin_version(&self, plugin: &str) -> Result<Option<PluginVersion>, StoreError> {
        plugin_version_conn(&self.conn, plugin)
    }
}

fn plugin_version_conn(
    conn: &Connection,
    plugin: &str,
) -> Result<Option<PluginVersion>, StoreError> {
    let raw = conn
        .query_row(
            "SELECT value FROM config_plugins WHERE plugin=?1 AND name=?2",
            params![plugin, VERSION_KEY],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    match raw {
        None => Ok(None),
        Some(raw) => raw
            .parse::<PluginVersion>()
            .map(Some)
            .map_err(|_| StoreError::InvalidInput("stored plugin version is not a number")),
    }
}

/// Moves the version marker forward. Writing the current value again is a no-op;
/// an older value is rejected.
pub(crate) fn advance_plugin_version_tx(
    tx: &Transaction<'_>,
    plugin: &str,
    version: PluginVersion,
) -> Result<(), StoreError> {
    if let Some(stored) = plugin_version_conn(tx, plugin)? {
        if stored > version {
            return Err(StoreError::VersionRegression {
                stored: stored.get(),
                requested: version.get(),
            });
        }
    }

    tx.execute(
        r#"
        INSERT INTO config_plugins(plugin, name, value) VALUES (?1, ?2, ?3)
        ON CONFLICT(plugin, name) DO UPDATE SET value=excluded.value
        "#,
        params![plugin, VERSION_KEY, version.to_string()],
    )?;
    Ok(())
}
