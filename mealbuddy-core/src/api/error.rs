//! Failure taxonomy shared by every remote operation.

use thiserror::Error;

/// Errors that can occur when talking to the MealBuddy backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No usable credential; the caller must send the user to login.
    #[error("Authentication required. Run 'mealbuddy auth login' first.")]
    AuthRequired,

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Request rejected ({}): {}", .status, .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// The backend answered successfully with a body we cannot interpret.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, ApiError::AuthRequired)
    }

    /// Text shown to the user for a failed `operation`.
    ///
    /// Returns `None` for [`ApiError::AuthRequired`], which is handled by
    /// redirecting to login rather than by displaying a message.
    pub fn user_message(&self, operation: Operation) -> Option<String> {
        match self {
            ApiError::AuthRequired => None,
            ApiError::Rejected {
                detail: Some(detail),
                ..
            } => Some(detail.clone()),
            ApiError::Rejected { detail: None, .. } => {
                Some(operation.rejected_fallback().to_string())
            }
            ApiError::Transport(_) | ApiError::Decode(_) => {
                Some(operation.transport_message().to_string())
            }
        }
    }
}

/// Remote operations, used to pick user-facing failure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadPlan,
    SwapMeal,
    ShiftPlan,
    Leftovers,
    LoadInventory,
    SaveInventory,
    ScanImage,
    MatchRecipes,
    GroceryList,
    PlaceOrder,
    WeightLog,
    Feedback,
    Nutrition,
    ExportGrocery,
    UpdateProfile,
    Login,
}

impl Operation {
    pub fn rejected_fallback(&self) -> &'static str {
        match self {
            Operation::LoadPlan => "Failed to load meal plan.",
            Operation::SwapMeal => "Failed to swap meal.",
            Operation::ShiftPlan => "Failed to shift meal plan.",
            Operation::Leftovers => "Failed to fetch leftover suggestions.",
            Operation::LoadInventory => "Failed to fetch inventory.",
            Operation::SaveInventory => "Failed to save inventory.",
            Operation::ScanImage => "Failed to upload image.",
            Operation::MatchRecipes => "Failed to fetch matching recipes.",
            Operation::GroceryList => "Failed to fetch grocery list.",
            Operation::PlaceOrder => "Failed to place Instacart order.",
            Operation::WeightLog => "Failed to log weight.",
            Operation::Feedback => "Failed to submit feedback.",
            Operation::Nutrition => "Failed to fetch nutrition data.",
            Operation::ExportGrocery => "Failed to export grocery list.",
            Operation::UpdateProfile => "Failed to update profile.",
            Operation::Login => "Login failed.",
        }
    }

    pub fn transport_message(&self) -> &'static str {
        match self {
            Operation::LoadPlan => "An error occurred while loading the meal plan.",
            Operation::SwapMeal => "An error occurred while swapping meal.",
            Operation::ShiftPlan => "An error occurred while shifting meal plan.",
            Operation::Leftovers => "An error occurred while fetching leftover suggestions.",
            Operation::LoadInventory => "An error occurred while fetching inventory.",
            Operation::SaveInventory => "An error occurred while saving inventory.",
            Operation::ScanImage => "An error occurred during upload.",
            Operation::MatchRecipes => "An error occurred while fetching recipes.",
            Operation::GroceryList => "An error occurred while fetching the grocery list.",
            Operation::PlaceOrder => "An error occurred while placing the Instacart order.",
            Operation::WeightLog => "An error occurred while logging weight.",
            Operation::Feedback => "An error occurred while submitting feedback.",
            Operation::Nutrition => "An error occurred while fetching nutrition data.",
            Operation::ExportGrocery => "An error occurred while exporting the grocery list.",
            Operation::UpdateProfile => "An error occurred while updating profile.",
            Operation::Login => "An error occurred during login.",
        }
    }
}
