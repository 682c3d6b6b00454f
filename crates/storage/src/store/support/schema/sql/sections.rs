#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        -- `sequence` is a comma separated list of content item ids, '' when empty.
        -- `name` NULL means the default section name applies.
        CREATE TABLE IF NOT EXISTS course_sections (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          course INTEGER NOT NULL,
          section INTEGER NOT NULL,
          name TEXT,
          sequence TEXT NOT NULL DEFAULT '',
          visible INTEGER NOT NULL DEFAULT 1,
          UNIQUE(course, section),
          FOREIGN KEY(course) REFERENCES course(id) ON DELETE CASCADE,
          CHECK(section >= 0),
          CHECK(visible IN (0, 1))
        );
"#;
