//! Light/dark display preference and the key-value store it lives in.

use anyhow::{Context, Result};
use std::{collections::BTreeMap, fmt, fs, path::PathBuf};

use crate::config::project_dirs;

/// Storage key for the display mode.
pub const MODE_KEY: &str = "weatherAppMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
        }
    }

    /// CSS class used by the HTML presenter.
    pub fn css_class(&self) -> &'static str {
        match self {
            DisplayMode::Light => "light-mode",
            DisplayMode::Dark => "dark-mode",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }

    /// Parse a stored value. Accepts the bare and `-mode` suffixed spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" | "light-mode" => Some(DisplayMode::Light),
            "dark" | "dark-mode" => Some(DisplayMode::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String key-value storage that survives between runs.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Application state handed to presenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppState {
    pub mode: DisplayMode,
}

impl AppState {
    /// Read the saved mode once. Missing or unknown values mean light.
    pub fn load(store: &dyn PreferenceStore) -> Result<Self> {
        let mode = match store.get(MODE_KEY)? {
            Some(raw) => DisplayMode::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown display mode in preferences, using light");
                DisplayMode::Light
            }),
            None => DisplayMode::Light,
        };
        Ok(Self { mode })
    }

    pub fn set_mode(&mut self, mode: DisplayMode, store: &mut dyn PreferenceStore) -> Result<()> {
        self.mode = mode;
        store.set(MODE_KEY, mode.as_str())
    }

    /// Flip the mode and persist it.
    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) -> Result<DisplayMode> {
        let next = self.mode.toggled();
        self.set_mode(next, store)?;
        Ok(next)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat TOML table on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = project_dirs()?;
        Ok(Self::new(dirs.data_dir().join("preferences.toml")))
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences: {}", self.path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences: {}", self.path.display()))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string(&values).context("Failed to serialize preferences")?;
        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_light_when_unset() {
        let store = MemoryPreferenceStore::default();
        let state = AppState::load(&store).unwrap();
        assert_eq!(state.mode, DisplayMode::Light);
    }

    #[test]
    fn toggle_persists_every_change() {
        let mut store = MemoryPreferenceStore::default();
        let mut state = AppState::load(&store).unwrap();

        assert_eq!(state.toggle(&mut store).unwrap(), DisplayMode::Dark);
        assert_eq!(store.get(MODE_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(state.toggle(&mut store).unwrap(), DisplayMode::Light);
        assert_eq!(store.get(MODE_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn accepts_suffixed_and_falls_back_on_garbage() {
        let mut store = MemoryPreferenceStore::default();
        store.set(MODE_KEY, "dark-mode").unwrap();
        assert_eq!(AppState::load(&store).unwrap().mode, DisplayMode::Dark);

        store.set(MODE_KEY, "sepia").unwrap();
        assert_eq!(AppState::load(&store).unwrap().mode, DisplayMode::Light);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs").join("preferences.toml");

        let mut store = FilePreferenceStore::new(&path);
        let mut state = AppState::load(&store).unwrap();
        state.set_mode(DisplayMode::Dark, &mut store).unwrap();
        store.set("other", "kept").unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(AppState::load(&reopened).unwrap().mode, DisplayMode::Dark);
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("kept"));
    }
}
