#![forbid(unsafe_code)]

use cvo_core::ids::FormatName;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateCourseRequest {
    pub shortname: String,
    pub format: FormatName,
    pub start_date: i64,
    /// Sections `0..section_count` are created, all visible and empty.
    pub section_count: u32,
    /// Legacy `numsections` format option, written only when set.
    pub numsections: Option<i64>,
}
