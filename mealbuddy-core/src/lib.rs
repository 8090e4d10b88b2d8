//! MealBuddy Core Library
//!
//! Client-side state for MealBuddy applications: the weekly meal plan, the
//! pantry inventory and the backend contract they are synchronized through.

pub mod api;
pub mod generation;
pub mod grocery;
pub mod inventory;
pub mod models;
pub mod plan_store;
pub mod profile;
pub mod reconciler;
pub mod recipe_match;
pub mod session;
pub mod weight_log;

#[cfg(test)]
mod testing;

pub use api::{ApiError, HttpApi, ImageUpload, MealBuddyApi, Operation, Token};
pub use generation::{Generation, Generations, Outcome};
pub use grocery::GroceryStore;
pub use inventory::{merge_detected, Inventory, InventoryError};
pub use models::{
    ActivityLevel, DayMeals, DayOfWeek, EntryId, ExportFormat, Gender, Goal, GroceryItem,
    GroceryList, InventoryEntry, InventoryField, MealPlan, MealType, NutritionSummary,
    OrderConfirmation, ProfileUpdate, RecipeFeedback, RecipeMatch, ScanResult, WeekPlan,
    WeightLogEntry,
};
pub use plan_store::{PlanPhase, PlanState, PlanStore};
pub use profile::ProfileEditor;
pub use reconciler::InventoryReconciler;
pub use recipe_match::RecipeMatchRequester;
pub use session::Session;
pub use weight_log::{WeightLog, WeightTracker};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
