#![forbid(unsafe_code)]

use cvo_core::ids::FormatName;
use cvo_storage::UpgradeConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::AdminError;

const DEFAULT_FORMAT: &str = "cvo";

/// Contents of `cvo-admin.toml`. Every key is optional.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AdminConfig {
    pub storage_dir: PathBuf,
    pub format: String,
    pub fallback_numsections: Option<i64>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("."),
            format: DEFAULT_FORMAT.to_string(),
            fallback_numsections: None,
        }
    }
}

impl AdminConfig {
    pub(crate) fn load(path: &Path) -> Result<Self, AdminError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            AdminError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::parse(&raw)
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, AdminError> {
        toml::from_str(raw).map_err(|err| AdminError::Config(err.to_string()))
    }

    pub(crate) fn upgrade_config(&self) -> Result<UpgradeConfig, AdminError> {
        let format = FormatName::try_new(self.format.as_str())
            .map_err(|err| AdminError::Config(format!("invalid format {:?}: {err:?}", self.format)))?;
        let config = UpgradeConfig::new(format);
        Ok(match self.fallback_numsections {
            Some(numsections) => config.with_fallback_numsections(numsections),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(AdminConfig::parse("").expect("parse"), AdminConfig::default());
    }

    #[test]
    fn all_keys_are_read() {
        let config = AdminConfig::parse(
            "storage_dir = \"/var/lib/cvo\"\nformat = \"topics\"\nfallback_numsections = 4\n",
        )
        .expect("parse");
        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/cvo"));
        assert_eq!(config.format, "topics");

        let upgrade = config.upgrade_config().expect("upgrade config");
        assert_eq!(upgrade.plugin(), "format_topics");
        assert_eq!(upgrade.fallback_numsections, Some(4));
    }

    #[test]
    fn unknown_keys_and_bad_formats_are_rejected() {
        assert!(matches!(
            AdminConfig::parse("numsections = 3\n"),
            Err(AdminError::Config(_))
        ));

        let config = AdminConfig::parse("format = \"Bad-Format\"\n").expect("parse");
        assert!(matches!(config.upgrade_config(), Err(AdminError::Config(_))));
    }
}
