#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use cvo_core::ids::{CourseId, FormatName};
use rusqlite::{OptionalExtension, Transaction, params};

/// Deprecated "fixed number of sections" setting.
pub const NUMSECTIONS_OPTION: &str = "numsections";

impl SqliteStore {
    pub fn format_option(
        &self,
        course: CourseId,
        format: &FormatName,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM course_format_options \
                 WHERE courseid=?1 AND format=?2 AND sectionid=0 AND name=?3",
                params![course.get(), format.as_str(), name],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten())
    }

    pub fn set_format_option(
        &mut self,
        course: CourseId,
        format: &FormatName,
        name: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let tx = self.transaction()?;
        set_format_option_tx(&tx, course, format, name, value)?;
        tx.commit()?;
        Ok(())
    }
}

pub(super) fn set_format_option_tx(
    tx: &Transaction<'_>,
    course: CourseId,
    format: &FormatName,
    name: &str,
    value: &str,
) -> Result<(), StoreError> {
    let exists = tx
        .query_row("SELECT 1 FROM course WHERE id=?1", params![course.get()], |_| Ok(()))
        .optional()?
        .is_some();
    if !exists {
        return Err(StoreError::UnknownId);
    }

    tx.execute(
        r#"
        INSERT INTO course_format_options(courseid, format, sectionid, name, value)
        VALUES (?1, ?2, 0, ?3, ?4)
        ON CONFLICT(courseid, format, sectionid, name) DO UPDATE SET value=excluded.value
        "#,
        params![course.get(), format.as_str(), name, value],
    )?;
    Ok(())
}

/// Course-wide values of option `name` for `format`, ordered by course id.
pub(crate) fn format_option_values_tx(
    tx: &Transaction<'_>,
    format: &FormatName,
    name: &str,
) -> Result<Vec<(CourseId, Option<String>)>, StoreError> {
    let mut stmt = tx.prepare(
        "SELECT courseid, value FROM course_format_options \
         WHERE format=?1 AND sectionid=0 AND name=?2 \
         ORDER BY courseid ASC",
    )?;
    let mut rows = stmt.query(params![format.as_str(), name])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let course = CourseId::try_new(row.get::<_, i64>(0)?)
            .map_err(|_| StoreError::InvalidInput("invalid course id in format options"))?;
        out.push((course, row.get::<_, Option<String>>(1)?));
    }
    Ok(out)
}

pub(crate) fn delete_format_option_tx(
    tx: &Transaction<'_>,
    format: &FormatName,
    name: &str,
) -> Result<usize, StoreError> {
    Ok(tx.execute(
        "DELETE FROM course_format_options WHERE format=?1 AND sectionid=0 AND name=?2",
        params![format.as_str(), name],
    )?)
}
