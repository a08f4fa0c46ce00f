//! Dashboard configuration file handling.
//!
//! The configuration names the directory holding the stage CSVs, the file for
//! each stage, and the identity/display column names. Every field has a
//! default, so a missing file or a partial JSON object still yields a usable
//! configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{FunnelStage, KeyFields};

/// Where one stage's table is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSource {
    pub stage: FunnelStage,
    /// CSV file, relative to `data_dir` unless absolute
    pub file: PathBuf,
}

/// Dashboard configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Title shown above the dashboard
    pub title: String,
    /// Directory the stage files are resolved against
    pub data_dir: PathBuf,
    /// Column identifying a person across stages
    pub identity_field: String,
    /// Column shown next to the identity
    pub display_field: String,
    /// One entry per funnel stage
    pub sources: Vec<StageSource>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let keys = KeyFields::default();
        Self {
            title: "DSFP Dashboard".to_string(),
            data_dir: PathBuf::from("."),
            identity_field: keys.identity,
            display_field: keys.display,
            sources: FunnelStage::all()
                .into_iter()
                .map(|stage| StageSource {
                    stage,
                    file: PathBuf::from(stage.default_file()),
                })
                .collect(),
        }
    }
}

impl DashboardConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let identity = self.identity_field.trim();
        let display = self.display_field.trim();
        if identity.is_empty() {
            anyhow::bail!("Identity field must be specified");
        }
        if display.is_empty() {
            anyhow::bail!("Display field must be specified");
        }
        if identity == display {
            anyhow::bail!("Identity and display fields must be different columns");
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.stage) {
                anyhow::bail!("Stage '{}' is configured more than once", source.stage);
            }
            if source.file.as_os_str().is_empty() {
                anyhow::bail!("Stage '{}' has an empty file path", source.stage);
            }
        }
        if let Some(missing) = FunnelStage::all().into_iter().find(|s| !seen.contains(s)) {
            anyhow::bail!("Stage '{}' has no source file", missing);
        }

        Ok(())
    }

    /// Identity and display column names
    pub fn key_fields(&self) -> KeyFields {
        KeyFields {
            identity: self.identity_field.trim().to_string(),
            display: self.display_field.trim().to_string(),
        }
    }

    /// Resolved path of a stage's CSV file
    pub fn path_for(&self, stage: FunnelStage) -> PathBuf {
        let file = self
            .sources
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.file.clone())
            .unwrap_or_else(|| PathBuf::from(stage.default_file()));
        if file.is_absolute() {
            file
        } else {
            self.data_dir.join(file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.key_fields(), KeyFields::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        let mut config = DashboardConfig::default();
        config.data_dir = PathBuf::from("/srv/funnel");
        config.save_to_file(&path).unwrap();

        let loaded = DashboardConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"identity_field": "email_address"}"#).unwrap();
        assert_eq!(config.identity_field, "email_address");
        assert_eq!(config.display_field, "Name");
        assert_eq!(config.sources.len(), 4);
    }

    #[test]
    fn test_validate_rejects_same_key_columns() {
        let mut config = DashboardConfig::default();
        config.display_field = "Email".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must be different"));
    }

    #[test]
    fn test_validate_rejects_missing_stage() {
        let mut config = DashboardConfig::default();
        config.sources.retain(|s| s.stage != FunnelStage::GaveFeedback);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Gave Feedback"));
    }

    #[test]
    fn test_validate_rejects_duplicate_stage() {
        let mut config = DashboardConfig::default();
        let first = config.sources[0].clone();
        config.sources.push(first);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_path_for_joins_data_dir() {
        let mut config = DashboardConfig::default();
        config.data_dir = PathBuf::from("data");
        assert_eq!(
            config.path_for(FunnelStage::AttendedPreview),
            PathBuf::from("data/Attended_Preview.csv")
        );
    }
}
