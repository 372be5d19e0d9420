//! Persisted light/dark theme preference.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Parse a stored value; anything unrecognized is treated as light.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = PreferenceError;

    /// Strict parse for user input; stored values go through [`Theme::from_stored`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(PreferenceError::UnknownTheme(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Theme::from_stored(&raw))
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("unknown theme '{0}'; expected light or dark")]
    UnknownTheme(String),

    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preference file: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default)]
    theme: Theme,
}

/// Read the saved theme. A missing or unreadable file yields [`Theme::Light`].
#[must_use]
pub fn load_theme(path: &Path) -> Theme {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Theme::Light;
    };
    match serde_json::from_str::<PreferenceFile>(&content) {
        Ok(file) => file.theme,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed preference file");
            Theme::Light
        }
    }
}

/// Persist `theme`, creating parent directories as needed.
///
/// # Errors
///
/// Returns `PreferenceError::Io` if the file cannot be written.
pub fn save_theme(path: &Path, theme: Theme) -> Result<(), PreferenceError> {
    let io_err = |source| PreferenceError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let body = serde_json::to_string(&PreferenceFile { theme })?;
    std::fs::write(path, body).map_err(io_err)?;
    tracing::debug!(path = %path.display(), %theme, "saved theme preference");
    Ok(())
}
