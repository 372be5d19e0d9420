use std::path::PathBuf;

use clap::Subcommand;
use promodesk_core::{AppConfig, Fixtures};

#[derive(Debug, Subcommand)]
pub enum FixturesCommands {
    /// Parse and validate a fixtures file and print per-collection counts
    Check {
        /// Fixtures file; defaults to `PROMODESK_FIXTURES_PATH`, then the built-in set
        path: Option<PathBuf>,
    },
}

pub(crate) fn run_fixtures(config: &AppConfig, command: FixturesCommands) -> anyhow::Result<()> {
    match command {
        FixturesCommands::Check { path } => {
            let path = path.as_deref().or(config.fixtures_path.as_deref());
            let fixtures = promodesk_core::load_fixtures_or_builtin(path)?;
            print!("{}", summarize(&fixtures));
            println!("fixtures ok");
            Ok(())
        }
    }
}

/// One `kind: count` line per collection.
pub(crate) fn summarize(fixtures: &Fixtures) -> String {
    let rows = [
        ("brands", fixtures.brands.len()),
        ("promotional_items", fixtures.promotional_items.len()),
        ("campaigns", fixtures.campaigns.len()),
        ("content", fixtures.content.len()),
        ("affiliate_links", fixtures.affiliate_links.len()),
        ("earnings", fixtures.earnings.len()),
    ];
    let mut out = String::new();
    for (kind, count) in rows {
        out.push_str(&format!("{kind:<18} {count}\n"));
    }
    out.push_str(&format!("{:<18} {}\n", "profile", fixtures.profile.username));
    out
}
