#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_course_format ON course(format, id);
        CREATE INDEX IF NOT EXISTS idx_course_format_options_lookup
          ON course_format_options(format, sectionid, name, courseid);
"#;
