#![forbid(unsafe_code)]

use crate::ids::SectionIndex;

pub const GENERAL_SECTION_NAME: &str = "General";
pub const SECTION_LABEL: &str = "Topic";

pub fn default_section_name(index: SectionIndex) -> String {
    if index.is_general() {
        return GENERAL_SECTION_NAME.to_string();
    }
    format!("{SECTION_LABEL} {index}")
}

/// Display name of a section: the stored name when set, the default otherwise.
pub fn section_name(index: SectionIndex, stored: Option<&str>) -> String {
    match stored.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default_section_name(index),
    }
}

/// Blank input clears the stored name so the default applies again.
pub fn normalize_section_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
