use std::path::Path;

use clap::Subcommand;
use promodesk_core::{load_theme, save_theme, Theme};

#[derive(Debug, Subcommand)]
pub enum ThemeCommands {
    /// Print the saved theme (light when nothing is saved)
    Show,
    /// Save a theme
    Set {
        /// `light` or `dark`
        theme: Theme,
    },
    /// Switch between light and dark
    Toggle,
}

/// Apply `command` to the preference file at `path` and return the
/// resulting theme.
pub(crate) fn run_theme(path: &Path, command: ThemeCommands) -> anyhow::Result<Theme> {
    let theme = match command {
        ThemeCommands::Show => return Ok(load_theme(path)),
        ThemeCommands::Set { theme } => theme,
        ThemeCommands::Toggle => load_theme(path).toggle(),
    };
    save_theme(path, theme)?;
    tracing::debug!(path = %path.display(), %theme, "theme saved");
    Ok(theme)
}
