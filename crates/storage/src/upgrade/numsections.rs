#![forbid(unsafe_code)]

use super::UpgradeConfig;
use crate::store::{
    ExtraSectionsOutcome, NUMSECTIONS_OPTION, SqliteStore, StoreError, delete_format_option_tx,
    delete_section_tx, format_option_values_tx, hide_section_tx, max_section_by_course_tx,
    sections_after_tx,
};
use cvo_core::ids::{CourseId, SectionIndex};
use rusqlite::Transaction;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumsectionsOutcome {
    pub options_removed: usize,
    pub courses_trimmed: usize,
    pub sections: ExtraSectionsOutcome,
}

/// Drops the deprecated `numsections` option for every course of the configured format
/// and trims the sections past each course's retained count.
///
/// Once no option of the format is left there is nothing to retain against, so the
/// fallback count is not applied and a repeated run changes nothing.
pub fn remove_numsections(
    store: &mut SqliteStore,
    config: &UpgradeConfig,
) -> Result<NumsectionsOutcome, StoreError> {
    let tx = store.transaction()?;
    let outcome = remove_numsections_tx(&tx, config)?;
    tx.commit()?;
    Ok(outcome)
}

/// Trims every section of `course` after `max_index`.
///
/// The trailing run of empty sections is deleted. Everything before the last section
/// with content is hidden instead, so section indices stay contiguous.
pub fn hide_extra_sections(
    store: &mut SqliteStore,
    course: CourseId,
    max_index: SectionIndex,
) -> Result<ExtraSectionsOutcome, StoreError> {
    let tx = store.transaction()?;
    let outcome = hide_extra_sections_tx(&tx, course, max_index)?;
    tx.commit()?;
    Ok(outcome)
}

pub(super) fn remove_numsections_step(
    tx: &Transaction<'_>,
    config: &UpgradeConfig,
) -> Result<(), StoreError> {
    remove_numsections_tx(tx, config).map(|_| ())
}

fn remove_numsections_tx(
    tx: &Transaction<'_>,
    config: &UpgradeConfig,
) -> Result<NumsectionsOutcome, StoreError> {
    let format = &config.format;
    let stored: BTreeMap<CourseId, Option<i64>> =
        format_option_values_tx(tx, format, NUMSECTIONS_OPTION)?
            .into_iter()
            .map(|(course, value)| (course, parse_numsections(course, value.as_deref())))
            .collect();
    if stored.is_empty() {
        tracing::debug!(format = %format, "no numsections options left");
        return Ok(NumsectionsOutcome::default());
    }

    let mut outcome = NumsectionsOutcome::default();
    for (course, max_section) in max_section_by_course_tx(tx, format)? {
        let retained = stored
            .get(&course)
            .copied()
            .flatten()
            .or(config.fallback_numsections);
        let Some(retained) = retained else {
            continue;
        };
        // Section 0 is never a candidate, even for a stored count below zero.
        let retained = SectionIndex::try_new(retained.max(0))
            .map_err(|_| StoreError::InvalidInput("invalid numsections"))?;
        if max_section <= retained {
            continue;
        }

        let trimmed = hide_extra_sections_tx(tx, course, retained)?;
        tracing::debug!(
            course = %course,
            retained = %retained,
            hidden = trimmed.hidden,
            deleted = trimmed.deleted,
            "extra sections trimmed"
        );
        outcome.courses_trimmed += 1;
        outcome.sections.absorb(trimmed);
    }

    outcome.options_removed = delete_format_option_tx(tx, format, NUMSECTIONS_OPTION)?;
    tracing::info!(
        format = %format,
        options_removed = outcome.options_removed,
        courses_trimmed = outcome.courses_trimmed,
        hidden = outcome.sections.hidden,
        deleted = outcome.sections.deleted,
        "numsections option removed"
    );
    Ok(outcome)
}

fn hide_extra_sections_tx(
    tx: &Transaction<'_>,
    course: CourseId,
    max_index: SectionIndex,
) -> Result<ExtraSectionsOutcome, StoreError> {
    let mut outcome = ExtraSectionsOutcome::default();
    let mut trailing = true;
    // Highest index first.
    for section in sections_after_tx(tx, course, max_index)? {
        trailing &= !section.has_content();
        if trailing {
            if delete_section_tx(tx, section.id)? {
                outcome.deleted += 1;
            }
        } else if hide_section_tx(tx, section.id)? {
            outcome.hidden += 1;
        }
    }
    Ok(outcome)
}

fn parse_numsections(course: CourseId, value: Option<&str>) -> Option<i64> {
    let raw = value?.trim();
    match raw.parse::<i64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(course = %course, value = raw, "ignoring unparsable numsections option");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numsections_values_are_trimmed_integers() {
        let course = CourseId::try_new(1).expect("course");
        assert_eq!(parse_numsections(course, Some(" 5 ")), Some(5));
        assert_eq!(parse_numsections(course, Some("five")), None);
        assert_eq!(parse_numsections(course, None), None);
    }
}
