#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS course (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          shortname TEXT NOT NULL,
          format TEXT NOT NULL,
          startdate INTEGER NOT NULL DEFAULT 0
        );
"#;
