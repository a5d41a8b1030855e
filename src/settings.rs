//! User settings, stored as YAML under the platform config directory.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scale::DEFAULT_SIZE;

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "daltonview";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Initial page size in pixels (the size control's starting value)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Number of gallery tiles per row
    #[serde(default = "default_gallery_columns")]
    pub gallery_columns: u16,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_page_size() -> u32 {
    DEFAULT_SIZE
}

fn default_gallery_columns() -> u16 {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            page_size: default_page_size(),
            gallery_columns: default_gallery_columns(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on a missing or malformed
    /// file (malformed files are logged, not fatal).
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("malformed settings at {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist settings, creating the config directory if needed.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::settings_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, yaml)
    }

    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(SETTINGS_FILENAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.yaml"));
        assert_eq!(settings.page_size, DEFAULT_SIZE);
        assert_eq!(settings.gallery_columns, 3);
    }

    #[test]
    fn defaults_when_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "page_size: [not a number").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.page_size, DEFAULT_SIZE);
    }

    #[test]
    fn yaml_round_trip() {
        let mut settings = Settings::default();
        settings.page_size = 500;
        settings.gallery_columns = 2;

        let yaml = serde_yaml::to_string(&settings).unwrap();
        let back: Settings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.page_size, 500);
        assert_eq!(back.gallery_columns, 2);
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut settings = Settings::default();
        settings.page_size = 450;
        settings.save_to(&path).unwrap();

        let back = Settings::load_from(&path);
        assert_eq!(back.page_size, 450);
        assert_eq!(back.version, CURRENT_VERSION);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let settings: Settings = serde_yaml::from_str("page_size: 700").unwrap();
        assert_eq!(settings.page_size, 700);
        assert_eq!(settings.gallery_columns, 3);
        assert_eq!(settings.version, CURRENT_VERSION);
    }
}
