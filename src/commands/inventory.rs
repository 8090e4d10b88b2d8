use clap::{Args, Subcommand};
use mealbuddy_core::{
    HttpApi, ImageUpload, Inventory, InventoryField, InventoryReconciler, Outcome, RecipeMatch,
    Session,
};
use std::path::PathBuf;

use super::{connect, failure, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct InventoryCommand {
    /// Save even if the stored inventory could not be loaded, replacing it
    #[arg(long, global = true)]
    pub force: bool,

    #[command(subcommand)]
    pub command: InventorySubcommand,
}

#[derive(Subcommand)]
pub enum InventorySubcommand {
    /// List pantry items
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Scan a pantry photo and merge the detected items
    Scan {
        /// Image file (jpg, jpeg, png, gif)
        file: PathBuf,

        /// Save the merged inventory afterwards
        #[arg(long)]
        save: bool,
    },

    /// Add an item and save
    Add {
        /// Item name
        item: String,

        /// Quantity (free text, e.g. "2 cans")
        quantity: String,
    },

    /// Change the item or quantity at a position and save
    Edit {
        /// Position as shown by `inventory list` (starting at 1)
        position: usize,

        /// Field to change (item, quantity)
        field: String,

        /// New value
        value: String,
    },

    /// Remove the item at a position and save
    Remove {
        /// Position as shown by `inventory list` (starting at 1)
        position: usize,
    },

    /// Find recipes that can be made with the current inventory
    Match {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl InventorySubcommand {
    /// Whether the subcommand ends by replacing the stored inventory.
    fn saves(&self) -> bool {
        match self {
            InventorySubcommand::Scan { save, .. } => *save,
            InventorySubcommand::Add { .. }
            | InventorySubcommand::Edit { .. }
            | InventorySubcommand::Remove { .. } => true,
            InventorySubcommand::List { .. } | InventorySubcommand::Match { .. } => false,
        }
    }
}

impl InventoryCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let (api, session) = connect(config);
        let mut reconciler = InventoryReconciler::new(api);
        if let Err(e) = reconciler.load_baseline(&session).await {
            return Err(failure(e, None));
        }
        if reconciler.baseline_degraded() {
            if self.force {
                eprintln!(
                    "Warning: the stored inventory could not be loaded; saving will replace it."
                );
                reconciler.accept_degraded_baseline();
            } else if self.command.saves() {
                return Err(degraded_refusal());
            } else {
                eprintln!(
                    "Warning: the stored inventory could not be loaded; showing an empty one."
                );
            }
        }

        match &self.command {
            InventorySubcommand::List { format } => {
                match format {
                    OutputFormat::Json => {
                        let entries = reconciler.inventory().to_entries();
                        println!("{}", serde_json::to_string_pretty(&entries)?);
                    }
                    OutputFormat::Text => print_inventory(reconciler.inventory()),
                }
                Ok(())
            }

            InventorySubcommand::Scan { file, save } => {
                let file_name = file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .ok_or_else(|| format!("Not a file: {}", file.display()))?;
                let upload = ImageUpload::new(file_name, std::fs::read(file)?)?;

                if let Err(e) = reconciler.scan(&session, &upload).await {
                    return Err(failure(e, reconciler.error()));
                }
                if let Some(message) = reconciler.message() {
                    println!("{}", message);
                }
                println!("Detected {} item(s):", reconciler.detected().len());
                for entry in reconciler.detected() {
                    println!("  {}: {}", entry.item, entry.quantity);
                }
                println!();
                print_inventory(reconciler.inventory());
                println!();
                print_matches(&reconciler);

                if *save {
                    persist(&mut reconciler, &session).await?;
                }
                Ok(())
            }

            InventorySubcommand::Add { item, quantity } => {
                if item.trim().is_empty() || quantity.trim().is_empty() {
                    return Err("Item and quantity must not be empty.".into());
                }
                reconciler.add_manual(item.as_str(), quantity.as_str());
                persist(&mut reconciler, &session).await
            }

            InventorySubcommand::Edit {
                position,
                field,
                value,
            } => {
                let field: InventoryField = field.parse().map_err(|e: String| e)?;
                reconciler.edit_at(to_index(*position)?, field, value.as_str())?;
                persist(&mut reconciler, &session).await
            }

            InventorySubcommand::Remove { position } => {
                let removed = reconciler.remove_at(to_index(*position)?)?;
                println!("Removed {} ({})", removed.item, removed.quantity);
                persist(&mut reconciler, &session).await
            }

            InventorySubcommand::Match { format } => {
                let snapshot = reconciler.inventory().to_entries();
                let matcher = reconciler.matcher_mut();
                if let Err(e) = matcher.request(&session, &snapshot).await {
                    return Err(failure(e, matcher.error()));
                }
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(matcher.matches())?);
                    }
                    OutputFormat::Text => print_match_list(matcher.matches()),
                }
                Ok(())
            }
        }
    }
}

async fn persist(
    reconciler: &mut InventoryReconciler<HttpApi>,
    session: &Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match reconciler.persist(session).await {
        Ok(Outcome::Skipped) => return Err(degraded_refusal()),
        Ok(_) => {}
        Err(e) => return Err(failure(e, reconciler.error())),
    }
    if let Some(message) = reconciler.message() {
        println!("{}", message);
    }
    Ok(())
}

fn degraded_refusal() -> Box<dyn std::error::Error> {
    "The stored inventory could not be loaded, so saving would overwrite it. \
     Retry, or pass --force to replace it."
        .into()
}

/// Converts a 1-based position from the listing into an index.
fn to_index(position: usize) -> Result<usize, String> {
    position
        .checked_sub(1)
        .ok_or_else(|| "Positions start at 1.".to_string())
}

fn print_inventory(inventory: &Inventory) {
    if inventory.is_empty() {
        println!("Inventory is empty");
        return;
    }
    println!("Inventory");
    println!("{}", "-".repeat(9));
    for (position, (_, entry)) in inventory.iter().enumerate() {
        println!("{:>3}. {}: {}", position + 1, entry.item, entry.quantity);
    }
    println!("\nTotal: {} item(s)", inventory.len());
}

fn print_matches(reconciler: &InventoryReconciler<HttpApi>) {
    match reconciler.matcher().error() {
        Some(error) => println!("Recipe matches unavailable: {}", error),
        None => print_match_list(reconciler.matches()),
    }
}

fn print_match_list(matches: &[RecipeMatch]) {
    if matches.is_empty() {
        println!("No matching recipes");
        return;
    }
    println!("Matching recipes");
    println!("{}", "-".repeat(16));
    for recipe in matches {
        println!("  {}", recipe);
    }
}
