use clap::{Args, Subcommand};
use mealbuddy_core::{Outcome, WeightTracker};

use super::{connect, failure, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct WeightCommand {
    #[command(subcommand)]
    pub command: WeightSubcommand,
}

#[derive(Subcommand)]
pub enum WeightSubcommand {
    /// Show weight history, oldest first
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Record a weight measurement
    Log {
        /// Weight in kilograms
        weight_kg: f64,
    },
}

impl WeightCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let (api, session) = connect(config);
        let mut tracker = WeightTracker::new(api);

        match &self.command {
            WeightSubcommand::List { format } => {
                if let Err(e) = tracker.load(&session).await {
                    return Err(failure(e, tracker.error()));
                }
                let entries = tracker.log().entries();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(entries)?);
                    }
                    OutputFormat::Text => {
                        if entries.is_empty() {
                            println!("No weight entries");
                        }
                        for entry in entries {
                            println!("{}", entry);
                        }
                    }
                }
                Ok(())
            }

            WeightSubcommand::Log { weight_kg } => match tracker.submit(&session, *weight_kg).await {
                Ok(Outcome::Skipped) => Err(tracker.error().unwrap_or_default().into()),
                Ok(_) => {
                    if let Some(message) = tracker.message() {
                        println!("{}", message);
                    }
                    if let Some(entry) = tracker.log().latest() {
                        println!("{}", entry);
                    }
                    Ok(())
                }
                Err(e) => Err(failure(e, tracker.error())),
            },
        }
    }
}
