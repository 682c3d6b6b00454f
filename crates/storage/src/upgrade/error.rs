#![forbid(unsafe_code)]

use crate::store::StoreError;
use cvo_core::version::PluginVersion;

#[derive(Debug)]
pub enum UpgradeError {
    /// The stored marker is already at or past every known step.
    Downgrade {
        from: PluginVersion,
        latest: PluginVersion,
    },
    /// A step failed; its changes were rolled back and the marker was not advanced.
    Step {
        version: PluginVersion,
        source: StoreError,
    },
    Store(StoreError),
}

impl UpgradeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Downgrade { .. } => "DOWNGRADE",
            Self::Step { .. } => "STEP_FAILED",
            Self::Store(err) => err.code(),
        }
    }
}

impl std::fmt::Display for UpgradeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Downgrade { from, latest } => write!(
                f,
                "cannot downgrade (from={from}, latest known step={latest})"
            ),
            Self::Step { version, source } => {
                write!(f, "upgrade step {version} failed: {source}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for UpgradeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Downgrade { .. } => None,
            Self::Step { source, .. } => Some(source),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for UpgradeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
