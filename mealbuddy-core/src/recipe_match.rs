//! Pass-through to the remote recipe matcher.
//!
//! Ingredients are sent verbatim and the returned list is shown as-is: no
//! local filtering, deduplication or ranking.

use crate::api::{ApiError, MealBuddyApi, Operation};
use crate::generation::{Generation, Generations, Outcome};
use crate::models::{InventoryEntry, RecipeMatch};
use crate::session::Session;

pub struct RecipeMatchRequester<A> {
    api: A,
    matches: Vec<RecipeMatch>,
    error: Option<String>,
    generations: Generations,
}

impl<A: MealBuddyApi> RecipeMatchRequester<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            matches: Vec::new(),
            error: None,
            generations: Generations::new(),
        }
    }

    /// Currently displayed candidates.
    pub fn matches(&self) -> &[RecipeMatch] {
        &self.matches
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Requests candidates for `ingredients`. On failure the displayed list
    /// is kept and the error is recorded separately.
    pub async fn request(
        &mut self,
        session: &Session,
        ingredients: &[InventoryEntry],
    ) -> Result<Outcome, ApiError> {
        session.bearer()?;
        let generation = self.generations.issue();
        tracing::debug!(
            generation = generation.value(),
            ingredients = ingredients.len(),
            "requesting recipe matches"
        );
        let result = self.api.match_recipes(session, ingredients).await;
        self.apply(generation, result)
    }

    pub fn apply(
        &mut self,
        generation: Generation,
        result: Result<Vec<RecipeMatch>, ApiError>,
    ) -> Result<Outcome, ApiError> {
        if !self.generations.is_current(generation) {
            tracing::warn!(
                generation = generation.value(),
                "discarding stale recipe matches"
            );
            return Ok(Outcome::Stale);
        }
        match result {
            Ok(matches) => {
                self.matches = matches;
                self.error = None;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.error = err.user_message(Operation::MatchRecipes);
                Err(err)
            }
        }
    }

    /// Issues a generation for a request the caller sends itself.
    pub fn begin(&mut self) -> Generation {
        self.generations.issue()
    }

    /// Clears the displayed list, e.g. after a failed scan.
    pub fn clear(&mut self) {
        self.matches.clear();
    }
}
