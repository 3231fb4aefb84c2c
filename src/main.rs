use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod catalog;
mod commands;
mod config;
mod db;
mod models;
mod onboarding;
mod prefs;
mod timefmt;

use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, ShowCommand,
};
use config::Config;
use db::{init_db, RecipeRepository};
use prefs::Preferences;

#[derive(Parser)]
#[command(name = "recipebook")]
#[command(version)]
#[command(about = "A local recipe catalog", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new recipe
    Add(AddCommand),

    /// List recipes, optionally filtered by a search query
    List(ListCommand),

    /// Show a recipe's details
    Show(ShowCommand),

    /// Edit an existing recipe
    Edit(EditCommand),

    /// Delete a recipe
    Delete(DeleteCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    show_onboarding_once(&config);

    match cli.command {
        Some(Commands::Add(cmd)) => {
            let repo = open_repo(&config).await?;
            cmd.run(&repo).await?;
        }
        Some(Commands::List(cmd)) => {
            let repo = open_repo(&config).await?;
            cmd.run(&repo).await?;
        }
        Some(Commands::Show(cmd)) => {
            let repo = open_repo(&config).await?;
            cmd.run(&repo).await?;
        }
        Some(Commands::Edit(cmd)) => {
            let repo = open_repo(&config).await?;
            cmd.run(&repo).await?;
        }
        Some(Commands::Delete(cmd)) => {
            let repo = open_repo(&config).await?;
            cmd.run(&repo).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

async fn open_repo(config: &Config) -> Result<RecipeRepository, Box<dyn std::error::Error>> {
    let pool = init_db(config.database_path.clone()).await?;
    let repo = RecipeRepository::new(pool);
    repo.on_change(|event| tracing::debug!("store change: {:?} {}", event.kind, event.id));
    Ok(repo)
}

/// Prints the welcome tour on the very first run, then records that it was
/// seen. A preferences failure only loses the tour, never the command.
fn show_onboarding_once(config: &Config) {
    match Preferences::load(&config.preferences_path) {
        Ok(prefs) if !prefs.onboarded => {
            println!("{}", onboarding::render());
            let seen = Preferences { onboarded: true };
            if let Err(e) = seen.save(&config.preferences_path) {
                tracing::warn!("could not save preferences: {}", e);
            }
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!("could not load preferences: {}", e);
        }
    }
}
