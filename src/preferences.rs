// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User preferences and their JSON file store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PreferencesError;

/// User preferences of the monitoring client.
///
/// Keys missing from a stored file take their default value, so files
/// written by older versions still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Connect to the van automatically on start.
    pub auto_connect: bool,
    /// Minimum delay between two notifications, in milliseconds.
    #[serde(rename = "notification_interval")]
    pub notification_interval_ms: u32,
    /// Keep the screen on while the dashboard is shown.
    pub keep_screen_on: bool,
    /// Use the dark theme.
    pub dark_theme: bool,
}

impl Preferences {
    /// Default notification interval in milliseconds.
    pub const DEFAULT_NOTIFICATION_INTERVAL_MS: u32 = 2000;

    /// Returns the notification interval as a [`Duration`].
    #[must_use]
    pub fn notification_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.notification_interval_ms))
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_connect: true,
            notification_interval_ms: Self::DEFAULT_NOTIFICATION_INTERVAL_MS,
            keep_screen_on: true,
            dark_theme: false,
        }
    }
}

/// Preferences backed by a JSON file.
///
/// # Examples
///
/// ```no_run
/// use vansync::preferences::PreferenceStore;
///
/// # fn main() -> vansync::Result<()> {
/// let mut store = PreferenceStore::open("/var/lib/vansync/preferences.json");
/// store.update(|prefs| prefs.dark_theme = true)?;
/// assert!(store.get().dark_theme);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    preferences: Preferences,
}

impl PreferenceStore {
    /// Loads the preferences stored at `path`.
    ///
    /// A missing file gives the defaults. An unreadable or corrupt file is
    /// logged and also gives the defaults; it is overwritten on the next
    /// save.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let preferences = Self::load(&path);
        Self { path, preferences }
    }

    fn load(path: &Path) -> Preferences {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(preferences) => {
                    tracing::info!("Loaded preferences from {}", path.display());
                    preferences
                }
                Err(e) => {
                    tracing::error!("Failed to parse preferences file: {e}");
                    Preferences::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(
                    "No preferences file found at {}, using defaults",
                    path.display()
                );
                Preferences::default()
            }
            Err(e) => {
                tracing::error!("Failed to read preferences file: {e}");
                Preferences::default()
            }
        }
    }

    /// Returns the file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current preferences.
    #[must_use]
    pub fn get(&self) -> &Preferences {
        &self.preferences
    }

    /// Modifies the preferences and saves them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written. The in-memory
    /// preferences keep the modification.
    pub fn update(&mut self, f: impl FnOnce(&mut Preferences)) -> Result<(), PreferencesError> {
        f(&mut self.preferences);
        self.save()
    }

    /// Writes the preferences to disk, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.preferences)?;
        fs::write(&self.path, contents)?;

        tracing::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("vansync-prefs-{}-{name}", std::process::id()))
            .join("preferences.json")
    }

    #[test]
    fn defaults() {
        let prefs = Preferences::default();
        assert!(prefs.auto_connect);
        assert!(prefs.keep_screen_on);
        assert!(!prefs.dark_theme);
        assert_eq!(prefs.notification_interval(), Duration::from_secs(2));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"dark_theme": true}"#).unwrap();
        assert!(prefs.dark_theme);
        assert!(prefs.auto_connect);
        assert_eq!(prefs.notification_interval_ms, 2000);
    }

    #[test]
    fn stored_key_names() {
        let value = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(value["notification_interval"], 2000);
        assert_eq!(value["keep_screen_on"], true);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let store = PreferenceStore::open(scratch_path("missing"));
        assert_eq!(store.get(), &Preferences::default());
    }

    #[test]
    fn update_persists() {
        let path = scratch_path("update");
        let mut store = PreferenceStore::open(&path);
        store
            .update(|prefs| {
                prefs.auto_connect = false;
                prefs.notification_interval_ms = 500;
            })
            .unwrap();

        let reopened = PreferenceStore::open(&path);
        assert!(!reopened.get().auto_connect);
        assert_eq!(reopened.get().notification_interval_ms, 500);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let store = PreferenceStore::open(&path);
        assert_eq!(store.get(), &Preferences::default());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
