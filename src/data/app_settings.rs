use crate::calendar::DefaultView;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub log_level: String,
    pub log_file: String,
    pub default_view: DefaultView,
    /// Drop a day from the calendar record when it is cleared instead of
    /// keeping an empty entry.
    pub prune_empty_entries: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            log_level: "info".to_string(),
            log_file: "moodbits.log".to_string(),
            default_view: DefaultView::Quadrimester,
            prune_empty_entries: true,
        }
    }
}

/// Shape of config.yaml: everything lives under a `settings` key.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl AppSettings {
    /// Missing file -> defaults.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let wrapper: SettingsWrapper = serde_norway::from_str(&contents)
            .with_context(|| format!("failed to parse YAML from {}", path.display()))?;
        Ok(wrapper.settings)
    }

    /// Runs before logging is up, so the fallback is reported on stderr.
    pub fn load_or_default(dir: &Path) -> Self {
        match Self::load_from(dir) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("warning: {e:#}; using default settings");
                warn!(error = %format!("{e:#}"), "config.yaml unreadable");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        let yaml = serde_norway::to_string(&wrapper).context("failed to serialize YAML")?;
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, yaml).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
