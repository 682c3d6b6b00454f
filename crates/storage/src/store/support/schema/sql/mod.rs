#![forbid(unsafe_code)]

mod config;
mod course;
mod format_options;
mod indexes;
mod pragmas;
mod sections;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(pragmas::SQL);
    sql.push_str(course::SQL);
    sql.push_str(sections::SQL);
    sql.push_str(format_options::SQL);
    sql.push_str(config::SQL);
    sql.push_str(indexes::SQL);
    sql
}
