#![forbid(unsafe_code)]

mod sql;

use super::super::StoreError;
use rusqlite::Connection;

pub(in crate::store) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(&sql::full_schema_sql())?;
    Ok(())
}
