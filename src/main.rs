use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{
    AuthCommand, ConfigCommand, FeedbackCommand, GroceryCommand, InventoryCommand,
    NutritionCommand, PlanCommand, ProfileCommand, WeightCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "mealbuddy")]
#[command(version)]
#[command(about = "Weekly meal plans and pantry inventory from the command line", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// View and change the weekly meal plan
    Plan(PlanCommand),

    /// Manage pantry inventory
    Inventory(InventoryCommand),

    /// Grocery list and ordering
    Grocery(GroceryCommand),

    /// Track body weight
    Weight(WeightCommand),

    /// Rate a recipe
    Feedback(FeedbackCommand),

    /// Show nutrition targets
    Nutrition(NutritionCommand),

    /// Update onboarding profile details
    Profile(ProfileCommand),

    /// Log in, log out, show status
    Auth(AuthCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    tracing::debug!(server_url = %config.server_url.value, "loaded configuration");

    match cli.command {
        Some(Commands::Plan(cmd)) => cmd.run(&config).await?,
        Some(Commands::Inventory(cmd)) => cmd.run(&config).await?,
        Some(Commands::Grocery(cmd)) => cmd.run(&config).await?,
        Some(Commands::Weight(cmd)) => cmd.run(&config).await?,
        Some(Commands::Feedback(cmd)) => cmd.run(&config).await?,
        Some(Commands::Nutrition(cmd)) => cmd.run(&config).await?,
        Some(Commands::Profile(cmd)) => cmd.run(&config).await?,
        Some(Commands::Auth(cmd)) => cmd.run(&config).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
