mod auth;
mod config_cmd;
mod feedback;
mod grocery;
mod inventory;
mod nutrition;
mod plan;
mod profile;
mod weight;

pub use auth::{AuthCommand, AuthError};
pub use config_cmd::ConfigCommand;
pub use feedback::FeedbackCommand;
pub use grocery::GroceryCommand;
pub use inventory::InventoryCommand;
pub use nutrition::NutritionCommand;
pub use plan::PlanCommand;
pub use profile::ProfileCommand;
pub use weight::WeightCommand;

use clap::ValueEnum;
use mealbuddy_core::{ApiError, HttpApi, Session};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Backend client and session for the configured server and token.
fn connect(config: &Config) -> (HttpApi, Session) {
    (
        HttpApi::new(config.server_url.value.clone()),
        Session::from_token(config.token.value.clone()),
    )
}

/// Converts a failed operation into the error reported by the CLI, preferring
/// the message the component recorded.
fn failure(err: ApiError, message: Option<&str>) -> Box<dyn std::error::Error> {
    if err.is_auth_required() {
        return Box::new(AuthError::NotLoggedIn);
    }
    match message {
        Some(message) => message.into(),
        None => Box::new(err),
    }
}
