//! Mask configuration and named presets
//!
//! A [`MaskConfig`] pairs a pattern with a placeholder character. Presets
//! map names to configs and persist in `~/.config/maskfield/presets.yaml`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_placeholder() -> char {
    ' '
}

/// A mask pattern plus the character shown for unfilled slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskConfig {
    pub pattern: String,

    #[serde(default = "default_placeholder")]
    pub placeholder: char,
}

impl MaskConfig {
    pub fn new(pattern: &str, placeholder: char) -> Self {
        Self {
            pattern: pattern.to_string(),
            placeholder,
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            placeholder: default_placeholder(),
        }
    }
}

/// Named mask presets for the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskPresets {
    #[serde(default)]
    pub masks: BTreeMap<String, MaskConfig>,
}

impl MaskPresets {
    /// Built-in presets available without a presets file
    pub fn builtin() -> Self {
        let mut masks = BTreeMap::new();
        masks.insert(
            "credit-card".to_string(),
            MaskConfig::new("9999 9999 9999 9999", ' '),
        );
        masks.insert("phone-us".to_string(), MaskConfig::new("(999) 999-9999", '_'));
        masks.insert("date".to_string(), MaskConfig::new("99/99/9999", '_'));
        masks.insert("time".to_string(), MaskConfig::new("99:99", '_'));
        masks.insert("zip".to_string(), MaskConfig::new("99999-9999", '_'));
        Self { masks }
    }

    /// Load presets from an explicit file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read presets from {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse presets at {}", path.display()))
    }

    /// Built-in presets merged with the user's presets file, if one exists.
    /// User entries win on name collisions; unreadable files degrade to the
    /// builtins with a warning.
    pub fn load_or_builtin() -> Self {
        let mut presets = Self::builtin();

        let Some(path) = crate::config_paths::presets_file() else {
            tracing::debug!("no config directory available, using builtin presets");
            return presets;
        };
        if !path.exists() {
            return presets;
        }

        match Self::load(&path) {
            Ok(user) => {
                tracing::info!("loaded presets from {}", path.display());
                presets.masks.extend(user.masks);
            }
            Err(e) => {
                tracing::warn!("{e:#}, using builtin presets");
            }
        }
        presets
    }

    /// Save presets to an explicit file path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(self).context("failed to serialize presets")?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write presets to {}", path.display()))?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MaskConfig> {
        self.masks.get(name)
    }

    /// Preset names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.masks.keys().map(String::as_str)
    }
}
