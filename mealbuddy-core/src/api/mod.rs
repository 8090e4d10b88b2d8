//! Contract with the remote collaborators.
//!
//! Every backend service (planner, matcher, scanner, grocery optimizer,
//! order placement) is reached only through [`MealBuddyApi`]. The components
//! in this crate are generic over the trait so they can run against the
//! reqwest-backed [`HttpApi`] or an in-memory double.

mod error;
mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{
    DayOfWeek, ExportFormat, GroceryList, InventoryEntry, MealPlan, MealType, NutritionSummary,
    OrderConfirmation, ProfileUpdate, RecipeFeedback, RecipeMatch, ScanResult, WeightLogEntry,
};
use crate::session::Session;

pub use error::{ApiError, Operation};
pub use http::{HttpApi, Token};

pub mod paths {
    pub const LOGIN: &str = "/api/v1/auth/token";
    pub const MEAL_PLAN: &str = "/api/v1/users/meal-plan";
    pub const MEAL_PLAN_SWAP: &str = "/api/v1/users/meal-plan/swap";
    pub const MEAL_PLAN_SHIFT: &str = "/api/v1/users/meal-plan/shift";
    pub const LEFTOVERS: &str = "/api/v1/users/meal-plan/leftovers";
    pub const INVENTORY: &str = "/api/v1/users/inventory";
    pub const INVENTORY_SCAN: &str = "/api/v1/users/inventory/scan";
    pub const RECIPE_MATCH: &str = "/api/v1/users/recipes/match";
    pub const GROCERY_LIST: &str = "/api/v1/users/grocery-list";
    pub const GROCERY_EXPORT_CSV: &str = "/api/v1/users/grocery-list/export/csv";
    pub const GROCERY_EXPORT_TEXT: &str = "/api/v1/users/grocery-list/export/text";
    pub const INSTACART_ORDER: &str = "/api/v1/users/shopping/instacart";
    pub const WEIGHT_LOG: &str = "/api/v1/users/weight-log";
    pub const NUTRITION: &str = "/api/v1/users/nutrition-dashboard";
    pub const RECIPE_FEEDBACK: &str = "/api/v1/users/recipe-feedback";
    pub const PROFILE: &str = "/api/v1/users/profile";

    pub fn grocery_export(format: crate::models::ExportFormat) -> &'static str {
        match format {
            crate::models::ExportFormat::Csv => GROCERY_EXPORT_CSV,
            crate::models::ExportFormat::Text => GROCERY_EXPORT_TEXT,
        }
    }
}

/// Body of a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwapRequest {
    pub day: DayOfWeek,
    pub meal_type: MealType,
}

/// Body of a shift request. The sign convention belongs to the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftRequest {
    pub days_to_shift: i32,
}

/// Acknowledgement of a saved inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SaveAck {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
}

/// Extensions the scanner accepts.
pub const SCAN_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// A pantry photo ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    extension: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Wraps image bytes, rejecting file types the scanner refuses.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, String> {
        let file_name = file_name.into();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        if !SCAN_EXTENSIONS.contains(&extension.as_str()) {
            return Err("Invalid file type. Only JPG, JPEG, PNG, GIF are allowed.".to_string());
        }
        Ok(Self {
            file_name,
            extension,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        match self.extension.as_str() {
            "png" => "image/png",
            "gif" => "image/gif",
            _ => "image/jpeg",
        }
    }
}

/// Request/response contract of the MealBuddy backend.
///
/// Implementations must not retry, time out or reorder: each call maps to
/// exactly one request.
#[async_trait]
pub trait MealBuddyApi: Send + Sync {
    async fn meal_plan(&self, session: &Session) -> Result<MealPlan, ApiError>;

    async fn swap_meal(&self, session: &Session, request: SwapRequest)
        -> Result<MealPlan, ApiError>;

    async fn shift_meal_plan(
        &self,
        session: &Session,
        request: ShiftRequest,
    ) -> Result<MealPlan, ApiError>;

    async fn leftover_suggestions(&self, session: &Session) -> Result<Vec<String>, ApiError>;

    async fn inventory(&self, session: &Session) -> Result<Vec<InventoryEntry>, ApiError>;

    async fn save_inventory(
        &self,
        session: &Session,
        entries: &[InventoryEntry],
    ) -> Result<SaveAck, ApiError>;

    async fn scan_inventory(
        &self,
        session: &Session,
        upload: &ImageUpload,
    ) -> Result<ScanResult, ApiError>;

    async fn match_recipes(
        &self,
        session: &Session,
        ingredients: &[InventoryEntry],
    ) -> Result<Vec<RecipeMatch>, ApiError>;

    async fn grocery_list(&self, session: &Session) -> Result<GroceryList, ApiError>;

    async fn place_order(&self, session: &Session) -> Result<OrderConfirmation, ApiError>;

    /// Downloads the grocery list rendered by the server, verbatim.
    async fn export_grocery_list(
        &self,
        session: &Session,
        format: ExportFormat,
    ) -> Result<String, ApiError>;

    async fn weight_log(&self, session: &Session) -> Result<Vec<WeightLogEntry>, ApiError>;

    async fn log_weight(&self, session: &Session, weight_kg: f64)
        -> Result<WeightLogEntry, ApiError>;

    async fn nutrition(&self, session: &Session) -> Result<NutritionSummary, ApiError>;

    async fn submit_feedback(
        &self,
        session: &Session,
        feedback: &RecipeFeedback,
    ) -> Result<(), ApiError>;

    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError>;
}
