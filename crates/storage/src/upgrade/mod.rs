#![forbid(unsafe_code)]

mod error;
mod general_section;
mod numsections;

pub use error::UpgradeError;
pub use numsections::{NumsectionsOutcome, hide_extra_sections, remove_numsections};

use crate::store::{SqliteStore, StoreError, advance_plugin_version_tx};
use cvo_core::ids::FormatName;
use cvo_core::version::PluginVersion;
use rusqlite::Transaction;

type StepFn = fn(&Transaction<'_>, &UpgradeConfig) -> Result<(), StoreError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeConfig {
    pub format: FormatName,
    /// Retained section count for courses that never stored `numsections`.
    /// `None` leaves such courses untouched.
    pub fallback_numsections: Option<i64>,
}

impl UpgradeConfig {
    pub fn new(format: FormatName) -> Self {
        Self {
            format,
            fallback_numsections: None,
        }
    }

    pub fn with_fallback_numsections(mut self, numsections: i64) -> Self {
        self.fallback_numsections = Some(numsections);
        self
    }

    pub fn plugin(&self) -> String {
        self.format.plugin_component()
    }
}

pub struct UpgradeStep {
    pub version: PluginVersion,
    pub summary: &'static str,
    apply: StepFn,
}

impl std::fmt::Debug for UpgradeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpgradeStep")
            .field("version", &self.version)
            .field("summary", &self.summary)
            .finish()
    }
}

/// Ordered by version, strictly increasing.
pub const UPGRADE_STEPS: &[UpgradeStep] = &[
    UpgradeStep {
        version: PluginVersion::new(2_017_070_600),
        summary: "remove numsections option, hide or delete orphaned sections",
        apply: numsections::remove_numsections_step,
    },
    UpgradeStep {
        version: PluginVersion::new(2_018_031_900),
        summary: "make the general section visible",
        apply: general_section::repair_general_section_step,
    },
];

pub const LATEST_VERSION: PluginVersion = PluginVersion::new(2_018_031_900);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeReport {
    pub from: PluginVersion,
    pub applied: Vec<PluginVersion>,
    pub current: PluginVersion,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingOutcome {
    /// No marker was stored; the latest version was recorded without running steps.
    Installed(PluginVersion),
    UpToDate(PluginVersion),
    Upgraded(UpgradeReport),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeStatus {
    pub stored: Option<PluginVersion>,
    pub latest: PluginVersion,
    pub pending: Vec<PluginVersion>,
}

/// Runs every step newer than `old_version`, each in its own transaction together
/// with the marker advance. Stops at the first failing step.
pub fn upgrade(
    store: &mut SqliteStore,
    old_version: PluginVersion,
    config: &UpgradeConfig,
) -> Result<UpgradeReport, UpgradeError> {
    if old_version >= LATEST_VERSION {
        return Err(UpgradeError::Downgrade {
            from: old_version,
            latest: LATEST_VERSION,
        });
    }

    let plugin = config.plugin();
    let mut applied = Vec::new();
    for step in UPGRADE_STEPS
        .iter()
        .filter(|step| old_version < step.version)
    {
        apply_step(store, step, &plugin, config).map_err(|source| {
            tracing::error!(
                plugin = %plugin,
                version = %step.version,
                error = %source,
                "upgrade step failed"
            );
            UpgradeError::Step {
                version: step.version,
                source,
            }
        })?;
        tracing::info!(
            plugin = %plugin,
            version = %step.version,
            summary = step.summary,
            "upgrade step applied"
        );
        applied.push(step.version);
    }

    Ok(UpgradeReport {
        from: old_version,
        applied,
        current: LATEST_VERSION,
    })
}

/// Host entry point: upgrades from the stored marker, installs when none is stored.
pub fn run_pending(
    store: &mut SqliteStore,
    config: &UpgradeConfig,
) -> Result<PendingOutcome, UpgradeError> {
    let plugin = config.plugin();
    match store.plugin_version(&plugin)? {
        None => {
            let tx = store.transaction()?;
            advance_plugin_version_tx(&tx, &plugin, LATEST_VERSION)?;
            tx.commit().map_err(StoreError::from)?;
            tracing::info!(plugin = %plugin, version = %LATEST_VERSION, "plugin installed");
            Ok(PendingOutcome::Installed(LATEST_VERSION))
        }
        Some(stored) if stored == LATEST_VERSION => {
            tracing::debug!(plugin = %plugin, version = %stored, "no pending upgrade steps");
            Ok(PendingOutcome::UpToDate(stored))
        }
        Some(stored) => upgrade(store, stored, config).map(PendingOutcome::Upgraded),
    }
}

pub fn status(store: &SqliteStore, config: &UpgradeConfig) -> Result<UpgradeStatus, UpgradeError> {
    let stored = store.plugin_version(&config.plugin())?;
    let pending = match stored {
        Some(stored) => UPGRADE_STEPS
            .iter()
            .filter(|step| stored < step.version)
            .map(|step| step.version)
            .collect(),
        None => Vec::new(),
    };
    Ok(UpgradeStatus {
        stored,
        latest: LATEST_VERSION,
        pending,
    })
}

fn apply_step(
    store: &mut SqliteStore,
    step: &UpgradeStep,
    plugin: &str,
    config: &UpgradeConfig,
) -> Result<(), StoreError> {
    let tx = store.transaction()?;
    (step.apply)(&tx, config)?;
    advance_plugin_version_tx(&tx, plugin, step.version)?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_strictly_ordered_and_end_at_latest() {
        assert!(
            UPGRADE_STEPS
                .windows(2)
                .all(|pair| pair[0].version < pair[1].version)
        );
        assert_eq!(
            UPGRADE_STEPS.last().map(|step| step.version),
            Some(LATEST_VERSION)
        );
    }

    #[test]
    fn plugin_component_follows_format() {
        let config = UpgradeConfig::new(FormatName::try_new("cvo").expect("format"));
        assert_eq!(config.plugin(), "format_cvo");
        assert_eq!(config.fallback_numsections, None);
        assert_eq!(
            config.with_fallback_numsections(4).fallback_numsections,
            Some(4)
        );
    }
}
