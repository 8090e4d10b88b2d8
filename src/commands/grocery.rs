use clap::{Args, Subcommand};
use mealbuddy_core::{ExportFormat, GroceryStore};
use std::path::PathBuf;

use super::{connect, failure, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct GroceryCommand {
    #[command(subcommand)]
    pub command: GrocerySubcommand,
}

#[derive(Subcommand)]
pub enum GrocerySubcommand {
    /// Show the budget-optimized grocery list for this week's plan
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Download the grocery list as CSV or plain text
    Export {
        /// Export format (csv, text)
        #[arg(long, short, default_value = "csv")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Order the grocery list for delivery
    Order {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl GroceryCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let (api, session) = connect(config);
        let mut store = GroceryStore::new(api);

        match &self.command {
            GrocerySubcommand::List { format } => {
                if let Err(e) = store.load(&session).await {
                    return Err(failure(e, store.error()));
                }
                let Some(list) = store.list() else {
                    return Ok(());
                };
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(list)?);
                    }
                    OutputFormat::Text => {
                        if list.is_empty() {
                            println!("Grocery list is empty");
                        } else {
                            for item in &list.items {
                                println!("{}", item);
                            }
                            println!("\nTotal: ${:.2}", list.total_estimated_cost);
                        }
                        if !list.budget_optimization_message.is_empty() {
                            println!("{}", list.budget_optimization_message);
                        }
                    }
                }
                Ok(())
            }

            GrocerySubcommand::Export { format, output } => {
                let format: ExportFormat = format.parse().map_err(|e: String| e)?;
                let body = match store.export(&session, format).await {
                    Ok(body) => body,
                    Err(e) => return Err(failure(e, store.error())),
                };
                match output {
                    Some(path) => {
                        std::fs::write(path, &body)?;
                        println!("Saved grocery list to {}", path.display());
                    }
                    None => print!("{}", body),
                }
                Ok(())
            }

            GrocerySubcommand::Order { format } => {
                if let Err(e) = store.place_order(&session).await {
                    return Err(failure(e, store.error()));
                }
                if let Some(confirmation) = store.confirmation() {
                    match format {
                        OutputFormat::Json => {
                            println!("{}", serde_json::to_string_pretty(confirmation)?);
                        }
                        OutputFormat::Text => println!("{}", confirmation),
                    }
                }
                Ok(())
            }
        }
    }
}
