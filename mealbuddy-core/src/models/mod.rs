mod day_of_week;
mod grocery;
mod inventory_entry;
mod meal_plan;
mod meal_type;
mod nutrition;
mod profile;
mod recipe;
mod weight_log_entry;

pub use day_of_week::DayOfWeek;
pub use grocery::{ExportFormat, GroceryItem, GroceryList, OrderConfirmation};
pub use inventory_entry::{EntryId, InventoryEntry, InventoryField, ScanResult};
pub use meal_plan::{DayMeals, MealPlan, WeekPlan};
pub use meal_type::MealType;
pub use nutrition::NutritionSummary;
pub use profile::{ActivityLevel, Gender, Goal, ProfileUpdate};
pub use recipe::{RecipeFeedback, RecipeMatch};
pub use weight_log_entry::WeightLogEntry;

#[cfg(test)]
pub(crate) use meal_plan::sample_week;
