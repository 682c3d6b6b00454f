#![forbid(unsafe_code)]

use super::support::format_sequence;
use super::{SectionRow, SqliteStore, StoreError};
use cvo_core::ids::{CourseId, FormatName, SectionId, SectionIndex};
use cvo_core::naming::normalize_section_name;
use rusqlite::{OptionalExtension, Transaction, params};

const SECTION_COLUMNS: &str = "id, course, section, name, sequence, visible";

impl SqliteStore {
    pub fn list_sections(&self, course: CourseId) -> Result<Vec<SectionRow>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SECTION_COLUMNS} FROM course_sections WHERE course=?1 ORDER BY section ASC"
        ))?;
        let rows = stmt.query_map(params![course.get()], section_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_section(
        &self,
        course: CourseId,
        index: SectionIndex,
    ) -> Result<Option<SectionRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!(
                    "SELECT {SECTION_COLUMNS} FROM course_sections WHERE course=?1 AND section=?2"
                ),
                params![course.get(), index.get()],
                section_row,
            )
            .optional()?)
    }

    pub fn section_by_id(&self, id: SectionId) -> Result<Option<SectionRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {SECTION_COLUMNS} FROM course_sections WHERE id=?1"),
                params![id.get()],
                section_row,
            )
            .optional()?)
    }

    pub fn count_sections(&self, course: CourseId) -> Result<usize, StoreError> {
        let count = self.conn.query_row(
            "SELECT COUNT(1) FROM course_sections WHERE course=?1",
            params![course.get()],
            |row| row.get::<_, i64>(0),
        )?;
        usize::try_from(count).map_err(|_| StoreError::InvalidInput("negative section count"))
    }

    pub fn set_section_visible(
        &mut self,
        course: CourseId,
        index: SectionIndex,
        visible: bool,
    ) -> Result<(), StoreError> {
        let tx = self.transaction()?;
        let updated = tx.execute(
            "UPDATE course_sections SET visible=?3 WHERE course=?1 AND section=?2",
            params![course.get(), index.get(), visible],
        )?;
        if updated == 0 {
            return Err(StoreError::UnknownId);
        }
        tx.commit()?;
        Ok(())
    }

    /// Replaces the content item references of a section.
    pub fn set_section_sequence(
        &mut self,
        course: CourseId,
        index: SectionIndex,
        items: &[i64],
    ) -> Result<(), StoreError> {
        let tx = self.transaction()?;
        let updated = tx.execute(
            "UPDATE course_sections SET sequence=?3 WHERE course=?1 AND section=?2",
            params![course.get(), index.get(), format_sequence(items)],
        )?;
        if updated == 0 {
            return Err(StoreError::UnknownId);
        }
        tx.commit()?;
        Ok(())
    }

    /// Renames a section of a course that uses `format`. A blank name restores the default.
    ///
    /// Sections of courses in another format are reported as [`StoreError::UnknownId`],
    /// exactly like missing sections.
    pub fn rename_section(
        &mut self,
        format: &FormatName,
        id: SectionId,
        name: &str,
    ) -> Result<SectionRow, StoreError> {
        let name = normalize_section_name(name);

        let tx = self.transaction()?;
        let updated = tx.execute(
            r#"
            UPDATE course_sections SET name=?3
            WHERE id=?1 AND course IN (SELECT id FROM course WHERE format=?2)
            "#,
            params![id.get(), format.as_str(), name],
        )?;
        if updated == 0 {
            return Err(StoreError::UnknownId);
        }
        let row = tx.query_row(
            &format!("SELECT {SECTION_COLUMNS} FROM course_sections WHERE id=?1"),
            params![id.get()],
            section_row,
        )?;
        tx.commit()?;
        Ok(row)
    }
}

/// Sections of `course` with an index strictly greater than `after`, highest first.
pub(crate) fn sections_after_tx(
    tx: &Transaction<'_>,
    course: CourseId,
    after: SectionIndex,
) -> Result<Vec<SectionRow>, StoreError> {
    let mut stmt = tx.prepare(&format!(
        "SELECT {SECTION_COLUMNS} FROM course_sections \
         WHERE course=?1 AND section>?2 ORDER BY section DESC"
    ))?;
    let rows = stmt.query_map(params![course.get(), after.get()], section_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Highest section index per course of `format`. Courses without sections are absent.
pub(crate) fn max_section_by_course_tx(
    tx: &Transaction<'_>,
    format: &FormatName,
) -> Result<Vec<(CourseId, SectionIndex)>, StoreError> {
    let mut stmt = tx.prepare(
        r#"
        SELECT cs.course, MAX(cs.section)
        FROM course_sections cs
        JOIN course c ON c.id = cs.course
        WHERE c.format = ?1
        GROUP BY cs.course
        ORDER BY cs.course ASC
        "#,
    )?;
    let mut rows = stmt.query(params![format.as_str()])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let course = CourseId::try_new(row.get::<_, i64>(0)?)
            .map_err(|_| StoreError::InvalidInput("invalid course id in sections"))?;
        let max = SectionIndex::try_new(row.get::<_, i64>(1)?)
            .map_err(|_| StoreError::InvalidInput("invalid section index"))?;
        out.push((course, max));
    }
    Ok(out)
}

pub(crate) fn hide_section_tx(tx: &Transaction<'_>, id: SectionId) -> Result<bool, StoreError> {
    let updated = tx.execute(
        "UPDATE course_sections SET visible=0 WHERE id=?1 AND visible<>0",
        params![id.get()],
    )?;
    Ok(updated > 0)
}

pub(crate) fn delete_section_tx(tx: &Transaction<'_>, id: SectionId) -> Result<bool, StoreError> {
    let deleted = tx.execute("DELETE FROM course_sections WHERE id=?1", params![id.get()])?;
    Ok(deleted > 0)
}

/// Makes section 0 visible in every course of `format`. Returns the number of repaired rows.
pub(crate) fn show_general_sections_tx(
    tx: &Transaction<'_>,
    format: &FormatName,
) -> Result<usize, StoreError> {
    Ok(tx.execute(
        r#"
        UPDATE course_sections SET visible=1
        WHERE section=0 AND visible<>1
          AND course IN (SELECT id FROM course WHERE format=?1)
        "#,
        params![format.as_str()],
    )?)
}

fn section_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SectionRow> {
    let raw_id = row.get::<_, i64>(0)?;
    let raw_course = row.get::<_, i64>(1)?;
    let raw_section = row.get::<_, i64>(2)?;
    Ok(SectionRow {
        id: SectionId::try_new(raw_id)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, raw_id))?,
        course: CourseId::try_new(raw_course)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(1, raw_course))?,
        section: SectionIndex::try_new(raw_section)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(2, raw_section))?,
        name: row.get(3)?,
        sequence: row.get(4)?,
        visible: row.get::<_, i64>(5)? != 0,
    })
}
