//! Weekly meal-plan state.
//!
//! The plan is never patched locally. Every successful load, swap or shift
//! replaces the whole value with the planner's response, and every failure
//! leaves the previous value exactly as it was.

use crate::api::{ApiError, MealBuddyApi, Operation, ShiftRequest, SwapRequest};
use crate::generation::{Generation, Generations, Outcome};
use crate::models::{DayOfWeek, MealPlan, MealType};
use crate::session::Session;

/// Lifecycle of the client-held plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlanPhase {
    #[default]
    Uninitialized,
    /// Initial load issued (or failed); nothing to show yet.
    Loading,
    Ready(MealPlan),
}

/// Pure plan state with explicit transitions.
///
/// [`PlanStore`] drives these transitions around its remote calls; callers
/// that overlap requests can use them directly.
#[derive(Debug, Clone, Default)]
pub struct PlanState {
    phase: PlanPhase,
    error: Option<String>,
    generations: Generations,
}

impl PlanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &PlanPhase {
        &self.phase
    }

    pub fn plan(&self) -> Option<&MealPlan> {
        match &self.phase {
            PlanPhase::Ready(plan) => Some(plan),
            _ => None,
        }
    }

    /// Last user-visible failure of a plan operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Swap and shift need addressable slots, i.e. a structured plan.
    pub fn can_mutate(&self) -> bool {
        self.plan().is_some_and(MealPlan::is_structured)
    }

    pub fn begin_load(&mut self) -> Generation {
        if self.phase == PlanPhase::Uninitialized {
            self.phase = PlanPhase::Loading;
        }
        self.generations.issue()
    }

    /// Issues a mutation, or `None` when the current plan has no slots.
    pub fn begin_mutation(&mut self) -> Option<Generation> {
        if !self.can_mutate() {
            return None;
        }
        self.error = None;
        Some(self.generations.issue())
    }

    /// Settles a load, swap or shift response.
    ///
    /// The returned plan may have a different shape than the current one;
    /// either variant is accepted.
    pub fn apply_plan_result(
        &mut self,
        generation: Generation,
        operation: Operation,
        result: Result<MealPlan, ApiError>,
    ) -> Result<Outcome, ApiError> {
        if !self.generations.is_current(generation) {
            tracing::warn!(
                generation = generation.value(),
                ?operation,
                "discarding stale meal plan response"
            );
            return Ok(Outcome::Stale);
        }

        match result {
            Ok(plan) => {
                tracing::debug!(
                    generation = generation.value(),
                    structured = plan.is_structured(),
                    "replacing meal plan"
                );
                self.phase = PlanPhase::Ready(plan);
                self.error = None;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.error = err.user_message(operation);
                Err(err)
            }
        }
    }
}

/// Owner of the current weekly plan and of the leftover suggestions.
pub struct PlanStore<A> {
    api: A,
    state: PlanState,
    leftovers: Vec<String>,
    leftover_error: Option<String>,
}

impl<A: MealBuddyApi> PlanStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: PlanState::new(),
            leftovers: Vec::new(),
            leftover_error: None,
        }
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    pub fn plan(&self) -> Option<&MealPlan> {
        self.state.plan()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn leftovers(&self) -> &[String] {
        &self.leftovers
    }

    pub fn leftover_error(&self) -> Option<&str> {
        self.leftover_error.as_deref()
    }

    /// Fetches the current plan. On failure the store stays in its prior
    /// phase (`Loading` on first use); there is no retry.
    pub async fn load(&mut self, session: &Session) -> Result<Outcome, ApiError> {
        session.bearer()?;
        let generation = self.state.begin_load();
        let result = self.api.meal_plan(session).await;
        self.state
            .apply_plan_result(generation, Operation::LoadPlan, result)
    }

    /// Asks the planner for a different recipe in one slot.
    ///
    /// A no-op returning [`Outcome::Skipped`] unless the plan is structured.
    pub async fn swap(
        &mut self,
        session: &Session,
        day: DayOfWeek,
        meal_type: MealType,
    ) -> Result<Outcome, ApiError> {
        session.bearer()?;
        let Some(generation) = self.state.begin_mutation() else {
            return Ok(Outcome::Skipped);
        };
        let result = self
            .api
            .swap_meal(session, SwapRequest { day, meal_type })
            .await;
        self.state
            .apply_plan_result(generation, Operation::SwapMeal, result)
    }

    /// Asks the planner to shift the plan by `delta_days`. The direction
    /// convention belongs to the planner; the value is sent as-is.
    pub async fn shift(&mut self, session: &Session, delta_days: i32) -> Result<Outcome, ApiError> {
        session.bearer()?;
        let Some(generation) = self.state.begin_mutation() else {
            return Ok(Outcome::Skipped);
        };
        let request = ShiftRequest {
            days_to_shift: delta_days,
        };
        let result = self.api.shift_meal_plan(session, request).await;
        self.state
            .apply_plan_result(generation, Operation::ShiftPlan, result)
    }

    /// Fetches recipe ideas for leftovers; failure keeps the previous list.
    pub async fn load_leftovers(&mut self, session: &Session) -> Result<Outcome, ApiError> {
        session.bearer()?;
        match self.api.leftover_suggestions(session).await {
            Ok(suggestions) => {
                self.leftovers = suggestions;
                self.leftover_error = None;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.leftover_error = err.user_message(Operation::Leftovers);
                Err(err)
            }
        }
    }
}
