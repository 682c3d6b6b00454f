#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        -- Per-course format settings. Course-wide options use sectionid = 0.
        CREATE TABLE IF NOT EXISTS course_format_options (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          courseid INTEGER NOT NULL,
          format TEXT NOT NULL,
          sectionid INTEGER NOT NULL DEFAULT 0,
          name TEXT NOT NULL,
          value TEXT,
          UNIQUE(courseid, format, sectionid, name),
          FOREIGN KEY(courseid) REFERENCES course(id) ON DELETE CASCADE
        );
"#;
