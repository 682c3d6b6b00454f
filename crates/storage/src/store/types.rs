#![forbid(unsafe_code)]

use super::support::{parse_sequence, sequence_has_content};
use cvo_core::ids::{CourseId, SectionId, SectionIndex};
use cvo_core::naming::section_name;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseRow {
    pub id: CourseId,
    pub shortname: String,
    pub format: String,
    pub start_date: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionRow {
    pub id: SectionId,
    pub course: CourseId,
    pub section: SectionIndex,
    pub name: Option<String>,
    pub sequence: String,
    pub visible: bool,
}

impl SectionRow {
    pub fn has_content(&self) -> bool {
        sequence_has_content(&self.sequence)
    }

    pub fn content_items(&self) -> Vec<i64> {
        parse_sequence(&self.sequence)
    }

    pub fn display_name(&self) -> String {
        section_name(self.section, self.name.as_deref())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtraSectionsOutcome {
    pub hidden: usize,
    pub deleted: usize,
}

impl ExtraSectionsOutcome {
    pub fn is_noop(&self) -> bool {
        self.hidden == 0 && self.deleted == 0
    }

    pub(crate) fn absorb(&mut self, other: ExtraSectionsOutcome) {
        self.hidden += other.hidden;
        self.deleted += other.deleted;
    }
}
