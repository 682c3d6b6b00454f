#![forbid(unsafe_code)]

mod courses;
mod error;
mod options;
mod plugin_config;
mod requests;
mod sections;
mod support;
mod types;

pub use error::StoreError;
pub use options::NUMSECTIONS_OPTION;
pub use requests::*;
pub use types::*;

pub(crate) use options::{delete_format_option_tx, format_option_values_tx};
pub(crate) use plugin_config::advance_plugin_version_tx;
pub(crate) use sections::{
    delete_section_tx, hide_section_tx, max_section_by_course_tx, sections_after_tx,
    show_general_sections_tx,
};

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DB_FILE_NAME: &str = "cvo_format.db";

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: Option<PathBuf>,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let conn = Connection::open(storage_dir.join(DB_FILE_NAME))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        support::install_schema(&conn)?;

        Ok(Self {
            conn,
            storage_dir: Some(storage_dir),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        support::install_schema(&conn)?;
        Ok(Self {
            conn,
            storage_dir: None,
        })
    }

    /// `None` for in-memory stores.
    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage_dir.as_deref()
    }

    pub(crate) fn transaction(&mut self) -> Result<Transaction<'_>, StoreError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}

fn to_sqlite_i64(value: u32) -> i64 {
    i64::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_install_is_repeatable() {
        let store = SqliteStore::open_in_memory().expect("in-memory store");
        support::install_schema(&store.conn).expect("second install is a no-op");

        let tables: Vec<String> = store
            .conn
            .prepare(
                "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .expect("prepare")
            .query_map([], |row| row.get(0))
            .expect("query")
            .collect::<Result<_, _>>()
            .expect("collect");

        assert_eq!(
            tables,
            vec![
                "config_plugins",
                "course",
                "course_format_options",
                "course_sections"
            ]
        );
        assert!(store.storage_dir().is_none());
    }
}
