#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Maintenance tool for the cvo course format tables.
#[derive(Parser, Debug)]
#[command(name = "cvo-admin")]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "CVO_ADMIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the database; overrides `storage_dir` from the config file
    #[arg(long, global = true, env = "CVO_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Course format to operate on; overrides `format` from the config file
    #[arg(long, global = true)]
    pub format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Run pending upgrade steps (installs the version marker on a fresh database)
    Upgrade,

    /// Show the stored version marker and pending steps
    Status,

    /// List the courses using the format with their default end dates
    Courses,

    /// List the sections of one course
    Sections {
        #[arg(long)]
        course: i64,
    },

    /// Remove the deprecated numsections option and trim orphaned sections
    RemoveNumsections,

    /// Hide or delete every section of a course after the given index
    HideExtraSections {
        #[arg(long)]
        course: i64,
        #[arg(long)]
        max: i64,
    },

    /// Rename a section; an empty name restores the default
    RenameSection {
        #[arg(long)]
        section_id: i64,
        #[arg(long)]
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommand_arguments_parse() {
        let cli = Cli::try_parse_from([
            "cvo-admin",
            "--storage-dir",
            "/tmp/cvo",
            "hide-extra-sections",
            "--course",
            "3",
            "--max",
            "5",
        ])
        .expect("parse");
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/cvo")));
        assert_eq!(cli.command, Command::HideExtraSections { course: 3, max: 5 });
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["cvo-admin", "status", "--format", "topics"]).expect("parse");
        assert_eq!(cli.format.as_deref(), Some("topics"));
        assert_eq!(cli.command, Command::Status);
    }

    #[test]
    fn sections_requires_course() {
        assert!(Cli::try_parse_from(["cvo-admin", "sections"]).is_err());
        let cli = Cli::try_parse_from(["cvo-admin", "sections", "--course", "4"]).expect("parse");
        assert_eq!(cli.command, Command::Sections { course: 4 });
    }
}
