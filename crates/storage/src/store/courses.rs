#![forbid(unsafe_code)]

use super::options::set_format_option_tx;
use super::{
    CourseRow, CreateCourseRequest, NUMSECTIONS_OPTION, SqliteStore, StoreError, to_sqlite_i64,
};
use cvo_core::ids::{CourseId, FormatName};
use rusqlite::{OptionalExtension, params};

impl SqliteStore {
    pub fn create_course(&mut self, request: CreateCourseRequest) -> Result<CourseRow, StoreError> {
        let shortname = request.shortname.trim().to_string();
        if shortname.is_empty() {
            return Err(StoreError::InvalidInput("course shortname must not be empty"));
        }

        let tx = self.transaction()?;
        tx.execute(
            "INSERT INTO course(shortname, format, startdate) VALUES (?1, ?2, ?3)",
            params![shortname, request.format.as_str(), request.start_date],
        )?;
        let id = CourseId::try_new(tx.last_insert_rowid())
            .map_err(|_| StoreError::InvalidInput("invalid course id"))?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO course_sections(course, section, name, sequence, visible) \
                 VALUES (?1, ?2, NULL, '', 1)",
            )?;
            for index in 0..to_sqlite_i64(request.section_count) {
                insert.execute(params![id.get(), index])?;
            }
        }

        if let Some(numsections) = request.numsections {
            set_format_option_tx(
                &tx,
                id,
                &request.format,
                NUMSECTIONS_OPTION,
                &numsections.to_string(),
            )?;
        }

        tx.commit()?;
        Ok(CourseRow {
            id,
            shortname,
            format: request.format.as_str().to_string(),
            start_date: request.start_date,
        })
    }

    pub fn get_course(&self, course: CourseId) -> Result<Option<CourseRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, shortname, format, startdate FROM course WHERE id=?1",
                params![course.get()],
                course_row,
            )
            .optional()?)
    }

    pub fn list_courses(&self, format: &FormatName) -> Result<Vec<CourseRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, shortname, format, startdate FROM course WHERE format=?1 ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![format.as_str()], course_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn course_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CourseRow> {
    let raw_id = row.get::<_, i64>(0)?;
    let id =
        CourseId::try_new(raw_id).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, raw_id))?;
    Ok(CourseRow {
        id,
        shortname: row.get(1)?,
        format: row.get(2)?,
        start_date: row.get(3)?,
    })
}
