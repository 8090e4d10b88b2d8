use clap::Args;
use mealbuddy_core::{MealBuddyApi, Operation, RecipeFeedback};

use super::{connect, failure};
use crate::config::Config;

/// Rate a recipe you cooked
#[derive(Args)]
pub struct FeedbackCommand {
    /// Recipe name
    recipe: String,

    /// Rating from 1 to 5
    #[arg(long, short)]
    rating: u8,

    /// Optional comment
    #[arg(long)]
    comment: Option<String>,
}

impl FeedbackCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let feedback = RecipeFeedback::new(self.recipe.as_str(), self.rating, self.comment.clone())?;

        let (api, session) = connect(config);
        if let Err(e) = api.submit_feedback(&session, &feedback).await {
            let message = e.user_message(Operation::Feedback);
            return Err(failure(e, message.as_deref()));
        }
        println!("Feedback submitted for {}", feedback.recipe_name);
        Ok(())
    }
}
