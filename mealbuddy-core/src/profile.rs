//! Onboarding profile updates.

use crate::api::{ApiError, MealBuddyApi, Operation};
use crate::generation::Outcome;
use crate::models::ProfileUpdate;
use crate::session::Session;

pub const UPDATED_MESSAGE: &str = "Profile updated successfully!";
pub const NOTHING_TO_UPDATE_MESSAGE: &str = "Nothing to update.";

pub struct ProfileEditor<A> {
    api: A,
    message: Option<String>,
    error: Option<String>,
}

impl<A: MealBuddyApi> ProfileEditor<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            message: None,
            error: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sends the fields that are set. An empty or out-of-range update is
    /// rejected locally and nothing is sent.
    pub async fn submit(
        &mut self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Outcome, ApiError> {
        let local = if update.is_empty() {
            Err(NOTHING_TO_UPDATE_MESSAGE.to_string())
        } else {
            update.validate()
        };
        if let Err(message) = local {
            self.message = None;
            self.error = Some(message);
            return Ok(Outcome::Skipped);
        }
        session.bearer()?;

        match self.api.update_profile(session, update).await {
            Ok(()) => {
                self.message = Some(UPDATED_MESSAGE.to_string());
                self.error = None;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.message = None;
                self.error = err.user_message(Operation::UpdateProfile);
                Err(err)
            }
        }
    }
}
