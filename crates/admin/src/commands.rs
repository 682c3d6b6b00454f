#![forbid(unsafe_code)]

use crate::AdminError;
use crate::cli::Command;
use cvo_core::dates::default_course_end_date;
use cvo_core::ids::{CourseId, SectionId, SectionIndex};
use cvo_storage::{
    CourseRow, PendingOutcome, SqliteStore, StoreError, UpgradeConfig, hide_extra_sections,
    remove_numsections, run_pending, status,
};

/// Runs one subcommand and returns the lines to print.
pub(crate) fn execute(
    store: &mut SqliteStore,
    config: &UpgradeConfig,
    command: &Command,
) -> Result<Vec<String>, AdminError> {
    match command {
        Command::Upgrade => match run_pending(store, config)? {
            PendingOutcome::Installed(version) => {
                Ok(vec![format!("installed {} at version {version}", config.plugin())])
            }
            PendingOutcome::UpToDate(version) => {
                Ok(vec![format!("{} is up to date ({version})", config.plugin())])
            }
            PendingOutcome::Upgraded(report) => {
                let mut lines = vec![format!(
                    "upgraded {} from {} to {}",
                    config.plugin(),
                    report.from,
                    report.current
                )];
                lines.extend(report.applied.iter().map(|version| format!("  applied {version}")));
                Ok(lines)
            }
        },
        Command::Status => {
            let status = status(store, config)?;
            let stored = status
                .stored
                .map(|version| version.to_string())
                .unwrap_or_else(|| "not installed".to_string());
            let mut lines = vec![
                format!("plugin: {}", config.plugin()),
                format!("stored: {stored}"),
                format!("latest: {}", status.latest),
            ];
            if status.pending.is_empty() {
                lines.push("pending: none".to_string());
            } else {
                lines.extend(status.pending.iter().map(|version| format!("pending: {version}")));
            }
            Ok(lines)
        }
        Command::Courses => {
            let courses = store.list_courses(&config.format)?;
            if courses.is_empty() {
                return Ok(vec![format!("no {} courses", config.format)]);
            }
            courses
                .iter()
                .map(|course| course_line(store, course))
                .collect()
        }
        Command::Sections { course } => {
            let course = CourseId::try_new(*course)
                .map_err(|_| AdminError::Usage("--course must be a positive id"))?;
            let row = store.get_course(course)?.ok_or(StoreError::UnknownId)?;
            let mut lines = vec![course_line(store, &row)?];
            lines.extend(store.list_sections(course)?.iter().map(|section| {
                format!(
                    "  {} {:?} visible={} items={}",
                    section.section,
                    section.display_name(),
                    section.visible,
                    section.content_items().len()
                )
            }));
            Ok(lines)
        }
        Command::RemoveNumsections => {
            let outcome = remove_numsections(store, config)?;
            Ok(vec![format!(
                "removed {} numsections options; trimmed {} courses (hidden={}, deleted={})",
                outcome.options_removed,
                outcome.courses_trimmed,
                outcome.sections.hidden,
                outcome.sections.deleted
            )])
        }
        Command::HideExtraSections { course, max } => {
            let course = CourseId::try_new(*course)
                .map_err(|_| AdminError::Usage("--course must be a positive id"))?;
            let max = SectionIndex::try_new(*max)
                .map_err(|_| AdminError::Usage("--max must not be negative"))?;
            let outcome = hide_extra_sections(store, course, max)?;
            Ok(vec![format!(
                "course {course}: hidden={}, deleted={}",
                outcome.hidden, outcome.deleted
            )])
        }
        Command::RenameSection { section_id, name } => {
            let section_id = SectionId::try_new(*section_id)
                .map_err(|_| AdminError::Usage("--section-id must be a positive id"))?;
            let row = store.rename_section(&config.format, section_id, name)?;
            Ok(vec![format!(
                "section {} of course {} is now {:?}",
                row.id,
                row.course,
                row.display_name()
            )])
        }
    }
}

fn course_line(store: &SqliteStore, course: &CourseRow) -> Result<String, AdminError> {
    let end_date = default_course_end_date(course.start_date)
        .map(|end_date| end_date.to_string())
        .unwrap_or_else(|_| "out of range".to_string());
    Ok(format!(
        "course {} {:?} format={} sections={} start={} end={end_date}",
        course.id,
        course.shortname,
        course.format,
        store.count_sections(course.id)?,
        course.start_date
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvo_core::ids::FormatName;
    use cvo_storage::CreateCourseRequest;

    fn config() -> UpgradeConfig {
        UpgradeConfig::new(FormatName::try_new("cvo").expect("format"))
    }

    #[test]
    fn upgrade_installs_then_reports_up_to_date() {
        let mut store = SqliteStore::open_in_memory().expect("store");
        let first = execute(&mut store, &config(), &Command::Upgrade).expect("install");
        assert_eq!(first, vec!["installed format_cvo at version 2018031900"]);

        let second = execute(&mut store, &config(), &Command::Upgrade).expect("second");
        assert_eq!(second, vec!["format_cvo is up to date (2018031900)"]);

        let status = execute(&mut store, &config(), &Command::Status).expect("status");
        assert_eq!(status.last().map(String::as_str), Some("pending: none"));
    }

    #[test]
    fn hide_extra_sections_validates_arguments() {
        let mut store = SqliteStore::open_in_memory().expect("store");
        let err = execute(
            &mut store,
            &config(),
            &Command::HideExtraSections { course: 0, max: 5 },
        )
        .expect_err("invalid course");
        assert!(matches!(err, AdminError::Usage(_)));

        let course = store
            .create_course(CreateCourseRequest {
                shortname: "c1".to_string(),
                format: FormatName::try_new("cvo").expect("format"),
                start_date: 0,
                section_count: 7,
                numsections: None,
            })
            .expect("course");
        let lines = execute(
            &mut store,
            &config(),
            &Command::HideExtraSections {
                course: course.id.get(),
                max: 5,
            },
        )
        .expect("hide extra");
        assert_eq!(lines, vec![format!("course {}: hidden=0, deleted=1", course.id)]);
    }

    #[test]
    fn courses_and_sections_report_end_date_and_content() {
        let mut store = SqliteStore::open_in_memory().expect("store");
        assert_eq!(
            execute(&mut store, &config(), &Command::Courses).expect("empty list"),
            vec!["no cvo courses"]
        );

        let course = store
            .create_course(CreateCourseRequest {
                shortname: "c1".to_string(),
                format: FormatName::try_new("cvo").expect("format"),
                start_date: 1_445_644_800,
                section_count: 2,
                numsections: None,
            })
            .expect("course");
        store
            .set_section_sequence(course.id, SectionIndex::try_new(1).expect("index"), &[4, 9])
            .expect("content");

        let header = format!(
            "course {} \"c1\" format=cvo sections=2 start=1445644800 end=1477267200",
            course.id
        );
        assert_eq!(
            execute(&mut store, &config(), &Command::Courses).expect("courses"),
            vec![header.clone()]
        );
        assert_eq!(
            execute(
                &mut store,
                &config(),
                &Command::Sections {
                    course: course.id.get()
                }
            )
            .expect("sections"),
            vec![
                header,
                "  0 \"General\" visible=true items=0".to_string(),
                "  1 \"Topic 1\" visible=true items=2".to_string(),
            ]
        );

        let err = execute(&mut store, &config(), &Command::Sections { course: 999 })
            .expect_err("unknown course");
        assert!(matches!(err, AdminError::Store(StoreError::UnknownId)));
    }
}
