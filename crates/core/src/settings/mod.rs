//! User facing settings, stored as TOML.
//!
//! ```toml
//! [app-bar]
//! animate-icon = true
//! open-drawer-description = "Open navigation drawer"
//! navigate-up-description = "Navigate up"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! max-files = 3
//! directory = "logs"
//! ```
//!
//! Every key is optional. Missing keys take the values shown above, except
//! `directory`: without it logs go to standard error.

use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub app_bar: AppBarSettings,
    pub logging: LoggingSettings,
}

/// How the app bar binding presents the navigation icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AppBarSettings {
    /// Morph the icon between the drawer glyph and the up arrow instead of
    /// switching instantly.
    pub animate_icon: bool,
    /// Accessibility text of the drawer glyph.
    pub open_drawer_description: String,
    /// Accessibility text of the up arrow.
    pub navigate_up_description: String,
}

impl Default for AppBarSettings {
    fn default() -> Self {
        AppBarSettings {
            animate_icon: true,
            open_drawer_description: "Open navigation drawer".to_string(),
            navigate_up_description: "Navigate up".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Number of run log files to keep (0 keeps them all).
    pub max_files: usize,
    /// Directory of the JSON run logs, relative to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: true,
            level: "info".to_string(),
            max_files: 3,
            directory: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(contents: &str) -> Result<Settings, Error> {
        toml::from_str(contents).context("can't parse settings")
    }

    /// Reads the settings file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, Error> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("can't read settings file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("can't load settings file {}", path.display()))
    }

    /// Like [`Settings::load`], but falls back to the defaults.
    ///
    /// Runs before logging is set up, so problems are reported on standard
    /// error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Settings {
        let path = path.as_ref();
        if !path.exists() {
            return Settings::default();
        }

        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{:#}; using default settings", e);
                Settings::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let contents = toml::to_string(self).context("can't serialize settings")?;
        fs::write(path, contents)
            .with_context(|| format!("can't write settings file {}", path.display()))
    }
}
