//! User settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::resolution::LabelCatalog;
use crate::rules::DEFAULT_ABILITY_RANK;

/// Settings read from a JSON file.
///
/// ```json
/// { "debugLogs": true, "labels": "fr.json", "rankDefault": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    /// Log every resolution at debug level.
    pub debug_logs: bool,
    /// Label catalog overriding the English labels.
    pub labels: Option<PathBuf>,
    /// Rank given to abilities a sheet leaves out.
    pub rank_default: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logs: false,
            labels: None,
            rank_default: DEFAULT_ABILITY_RANK,
        }
    }
}

impl Settings {
    /// Default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug logging.
    pub fn with_debug_logs(mut self, enabled: bool) -> Self {
        self.debug_logs = enabled;
        self
    }

    /// Use the label catalog at `path`.
    pub fn with_labels(mut self, path: impl Into<PathBuf>) -> Self {
        self.labels = Some(path.into());
        self
    }

    /// Set the rank of missing abilities.
    pub fn with_rank_default(mut self, rank: u32) -> Self {
        self.rank_default = rank;
        self
    }

    /// Parse settings from JSON. Absent fields take their defaults.
    pub fn from_json(json: &str) -> MechResult<Self> {
        serde_json::from_str(json).map_err(|e| MechError::InvalidSettings(e.to_string()))
    }

    /// Read a settings file. A file that does not exist yields defaults.
    ///
    /// A relative `labels` path is taken relative to the settings file.
    pub fn load(path: &Path) -> MechResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| MechError::InvalidSettings(format!("{}: {e}", path.display())))?;
        let mut settings = Self::from_json(&json)?;
        if let Some(labels) = &settings.labels {
            if labels.is_relative() {
                if let Some(dir) = path.parent() {
                    settings.labels = Some(dir.join(labels));
                }
            }
        }
        Ok(settings)
    }

    /// Log filter directive for these settings.
    pub fn log_directive(&self) -> &'static str {
        if self.debug_logs {
            "sifrp=debug"
        } else {
            "sifrp=info"
        }
    }

    /// Load the configured label catalog, or an empty one that renders
    /// English.
    pub fn label_catalog(&self) -> MechResult<LabelCatalog> {
        match &self.labels {
            Some(path) => LabelCatalog::load(path),
            None => Ok(LabelCatalog::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::{LabelKey, Labels};

    #[test]
    fn defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.rank_default, 2);
        assert_eq!(settings.log_directive(), "sifrp=info");
    }

    #[test]
    fn builder() {
        let settings = Settings::new()
            .with_debug_logs(true)
            .with_rank_default(3)
            .with_labels("de.json");
        assert_eq!(settings.log_directive(), "sifrp=debug");
        assert_eq!(settings.rank_default, 3);
        assert_eq!(settings.labels, Some(PathBuf::from("de.json")));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            Settings::from_json(r#"{ "debugLog": true }"#),
            Err(MechError::InvalidSettings(_))
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/sifrp.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn labels_resolve_next_to_settings() {
        let dir = std::env::temp_dir().join(format!("sifrp-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("es.json"), r#"{ "actor.wounds": "Heridas" }"#).unwrap();
        std::fs::write(dir.join("settings.json"), r#"{ "labels": "es.json" }"#).unwrap();

        let settings = Settings::load(&dir.join("settings.json")).unwrap();
        let catalog = settings.label_catalog().unwrap();
        assert_eq!(catalog.text(LabelKey::Wounds), "Heridas");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn no_catalog_renders_english() {
        let catalog = Settings::default().label_catalog().unwrap();
        assert_eq!(catalog.text(LabelKey::Fatigue), "Fatigue");
    }
}
