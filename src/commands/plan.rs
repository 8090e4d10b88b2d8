use clap::{Args, Subcommand};
use mealbuddy_core::{DayOfWeek, MealPlan, MealType, Outcome, PlanStore};

use super::{connect, failure, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Show this week's meal plan
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Replace one meal with a different recipe
    Swap {
        /// Day of week (monday..sunday)
        day: String,

        /// Meal type (breakfast, lunch, dinner)
        #[arg(value_name = "TYPE")]
        meal_type: String,
    },

    /// Shift the whole plan by a number of days
    Shift {
        /// Days to shift (sent to the planner as given)
        #[arg(allow_negative_numbers = true)]
        days: i32,
    },

    /// Suggest recipes that use up leftovers
    Leftovers {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl PlanCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let (api, session) = connect(config);
        let mut store = PlanStore::new(api);

        match &self.command {
            PlanSubcommand::Show { format } => {
                if let Err(e) = store.load(&session).await {
                    return Err(failure(e, store.error()));
                }
                if let Some(plan) = store.plan() {
                    print_plan(plan, format)?;
                }
                Ok(())
            }

            PlanSubcommand::Swap { day, meal_type } => {
                let day: DayOfWeek = day.parse().map_err(|e: String| e)?;
                let meal_type: MealType = meal_type.parse().map_err(|e: String| e)?;

                if let Err(e) = store.load(&session).await {
                    return Err(failure(e, store.error()));
                }
                match store.swap(&session, day, meal_type).await {
                    Ok(Outcome::Skipped) => Err(unstructured()),
                    Ok(_) => {
                        if let Some(week) = store.plan().and_then(|p| p.days()) {
                            println!(
                                "{} {} is now: {}",
                                capitalize(day.as_str()),
                                meal_type,
                                week.meal(day, meal_type)
                            );
                        }
                        Ok(())
                    }
                    Err(e) => Err(failure(e, store.error())),
                }
            }

            PlanSubcommand::Shift { days } => {
                if let Err(e) = store.load(&session).await {
                    return Err(failure(e, store.error()));
                }
                match store.shift(&session, *days).await {
                    Ok(Outcome::Skipped) => Err(unstructured()),
                    Ok(_) => {
                        println!("Shifted meal plan by {} day(s).\n", days);
                        if let Some(plan) = store.plan() {
                            print_plan(plan, &OutputFormat::Text)?;
                        }
                        Ok(())
                    }
                    Err(e) => Err(failure(e, store.error())),
                }
            }

            PlanSubcommand::Leftovers { format } => {
                if let Err(e) = store.load_leftovers(&session).await {
                    return Err(failure(e, store.leftover_error()));
                }
                let suggestions = store.leftovers();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(suggestions)?);
                    }
                    OutputFormat::Text => {
                        if suggestions.is_empty() {
                            println!("No leftover suggestions");
                        }
                        for suggestion in suggestions {
                            println!("- {}", suggestion);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn print_plan(plan: &MealPlan, format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
        OutputFormat::Text => print!("{}", plan),
    }
    Ok(())
}

fn unstructured() -> Box<dyn std::error::Error> {
    "The current meal plan is free text; swap and shift need a day-by-day plan.".into()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
