use clap::Args;
use mealbuddy_core::{MealBuddyApi, Operation};

use super::{connect, failure, OutputFormat};
use crate::config::Config;

/// Show daily nutrition targets computed by the server
#[derive(Args)]
pub struct NutritionCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl NutritionCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let (api, session) = connect(config);
        let summary = match api.nutrition(&session).await {
            Ok(summary) => summary,
            Err(e) => {
                let message = e.user_message(Operation::Nutrition);
                return Err(failure(e, message.as_deref()));
            }
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Text => println!("{}", summary),
        }
        Ok(())
    }
}
