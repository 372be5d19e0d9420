mod browse;
mod db;
mod fixtures;
mod generate;
mod theme;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
    browse::BrowseArgs, db::DbCommands, fixtures::FixturesCommands, generate::GenerateCommands,
    theme::ThemeCommands,
};

#[derive(Debug, Parser)]
#[command(name = "promodesk-cli")]
#[command(about = "PromoDesk command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database administration
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Inspect seed fixtures
    Fixtures {
        #[command(subcommand)]
        command: FixturesCommands,
    },
    /// Run a text generation flow
    Generate {
        #[command(subcommand)]
        command: GenerateCommands,
    },
    /// Page through a fixture collection with the list filters
    Browse(BrowseArgs),
    /// Show or change the saved colour theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("promodesk-cli: run with --help to list commands");
        return Ok(());
    };

    let config = promodesk_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Db { command } => db::run_db(&config, command).await,
        Commands::Browse(args) => browse::run_browse(&config, args).await,
        Commands::Fixtures { command } => fixtures::run_fixtures(&config, command),
        Commands::Generate { command } => generate::run_generate(&config, command).await,
        Commands::Theme { command } => {
            let theme = theme::run_theme(&config.theme_path, command)?;
            println!("{theme}");
            Ok(())
        }
    }
}
