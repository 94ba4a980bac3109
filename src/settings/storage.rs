use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{Settings, SettingsError, validate};

const CONFIG_DIR: &str = "replykit";
const SETTINGS_FILE: &str = "settings.toml";

pub fn settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(SETTINGS_FILE))
}

/// File-backed settings store
///
/// Tracks the file's modification time so the console can pick up edits
/// made from another terminal while it is running.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    last_modified: Option<SystemTime>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_modified: None,
        }
    }

    /// Store at the default location (`~/.config/replykit/settings.toml`)
    pub fn open_default() -> Result<Self, SettingsError> {
        settings_path()
            .map(Self::new)
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, writing the defaults on first run
    pub fn load(&mut self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            let settings = Settings::default();
            self.write(&settings)?;
            log::info!("Created default settings at {}", self.path.display());
            return Ok(settings);
        }

        // A broken file is reported once per edit, not on every reload check
        self.last_modified = modified_time(&self.path);
        let contents = fs::read_to_string(&self.path)?;
        parse_settings_toml(&self.path, &contents)
    }

    /// Load settings that are safe to act on
    ///
    /// Hand edits can put values out of range; those are rejected here
    /// rather than reaching the worker or the request deadline.
    pub fn load_checked(&mut self) -> Result<Settings, SettingsError> {
        let settings = self.load()?;
        validate(&settings)?;
        Ok(settings)
    }

    /// Validate and persist settings
    pub fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        validate(settings)?;
        self.write(settings)
    }

    /// Overwrite the file with defaults
    pub fn reset(&mut self) -> Result<Settings, SettingsError> {
        let settings = Settings::default();
        self.write(&settings)?;
        Ok(settings)
    }

    /// Re-read the file if it changed since the last load or save
    ///
    /// Returns `Ok(None)` when nothing changed or the file vanished. A file
    /// that parses but fails validation is an error, reported once per edit.
    pub fn reload_if_changed(&mut self) -> Result<Option<Settings>, SettingsError> {
        let Some(modified) = modified_time(&self.path) else {
            return Ok(None);
        };
        if self.last_modified == Some(modified) {
            return Ok(None);
        }
        self.load_checked().map(Some)
    }

    fn write(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(settings).map_err(|e| SettingsError::Parse {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        fs::write(&self.path, contents)?;
        self.last_modified = modified_time(&self.path);
        Ok(())
    }
}

pub fn parse_settings_toml(path: &Path, content: &str) -> Result<Settings, SettingsError> {
    toml::from_str::<Settings>(content).map_err(|e| SettingsError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod storage_tests;
