//! In-memory double of the backend for component tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, ImageUpload, MealBuddyApi, SaveAck, ShiftRequest, SwapRequest};
use crate::models::{
    ExportFormat, GroceryList, InventoryEntry, MealPlan, NutritionSummary, OrderConfirmation,
    ProfileUpdate, RecipeFeedback, RecipeMatch, ScanResult, WeightLogEntry,
};
use crate::session::Session;

/// A request the fake received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    MealPlan,
    Swap(SwapRequest),
    Shift(ShiftRequest),
    Leftovers,
    Inventory,
    SaveInventory(Vec<InventoryEntry>),
    Scan(String),
    MatchRecipes(Vec<InventoryEntry>),
    GroceryList,
    PlaceOrder,
    ExportGrocery(ExportFormat),
    WeightLog,
    LogWeight(f64),
    Nutrition,
    Feedback(RecipeFeedback),
    UpdateProfile(ProfileUpdate),
}

fn unset<T>() -> Result<T, ApiError> {
    Err(ApiError::Transport("no response configured".to_string()))
}

struct FakeState {
    calls: Vec<Call>,
    plan: Result<MealPlan, ApiError>,
    leftovers: Result<Vec<String>, ApiError>,
    inventory: Result<Vec<InventoryEntry>, ApiError>,
    save: Result<SaveAck, ApiError>,
    scan: Result<ScanResult, ApiError>,
    matches: Result<Vec<RecipeMatch>, ApiError>,
    grocery: Result<GroceryList, ApiError>,
    order: Result<OrderConfirmation, ApiError>,
    export: Result<String, ApiError>,
    weight_log: Result<Vec<WeightLogEntry>, ApiError>,
    logged: Result<WeightLogEntry, ApiError>,
    nutrition: Result<NutritionSummary, ApiError>,
    feedback: Result<(), ApiError>,
    profile: Result<(), ApiError>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            plan: unset(),
            leftovers: unset(),
            inventory: unset(),
            save: Ok(SaveAck::default()),
            scan: unset(),
            matches: Ok(Vec::new()),
            grocery: unset(),
            order: unset(),
            export: unset(),
            weight_log: unset(),
            logged: unset(),
            nutrition: unset(),
            feedback: Ok(()),
            profile: Ok(()),
        }
    }
}

/// Cloneable fake; clones share recorded calls and configured responses.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

macro_rules! setter {
    ($name:ident, $field:ident, $ty:ty) => {
        pub fn $name(&self, response: Result<$ty, ApiError>) {
            self.state.lock().unwrap().$field = response;
        }
    };
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(set_plan, plan, MealPlan);
    setter!(set_leftovers, leftovers, Vec<String>);
    setter!(set_inventory, inventory, Vec<InventoryEntry>);
    setter!(set_save, save, SaveAck);
    setter!(set_scan, scan, ScanResult);
    setter!(set_matches, matches, Vec<RecipeMatch>);
    setter!(set_grocery, grocery, GroceryList);
    setter!(set_order, order, OrderConfirmation);
    setter!(set_export, export, String);
    setter!(set_weight_log, weight_log, Vec<WeightLogEntry>);
    setter!(set_logged, logged, WeightLogEntry);

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn match_calls(&self) -> Vec<Vec<InventoryEntry>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::MatchRecipes(ingredients) => Some(ingredients),
                _ => None,
            })
            .collect()
    }

    fn record<T: Clone>(
        &self,
        call: Call,
        pick: impl FnOnce(&FakeState) -> &Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        pick(&*state).clone()
    }
}

#[async_trait]
impl MealBuddyApi for FakeApi {
    async fn meal_plan(&self, _session: &Session) -> Result<MealPlan, ApiError> {
        self.record(Call::MealPlan, |s| &s.plan)
    }

    async fn swap_meal(
        &self,
        _session: &Session,
        request: SwapRequest,
    ) -> Result<MealPlan, ApiError> {
        self.record(Call::Swap(request), |s| &s.plan)
    }

    async fn shift_meal_plan(
        &self,
        _session: &Session,
        request: ShiftRequest,
    ) -> Result<MealPlan, ApiError> {
        self.record(Call::Shift(request), |s| &s.plan)
    }

    async fn leftover_suggestions(&self, _session: &Session) -> Result<Vec<String>, ApiError> {
        self.record(Call::Leftovers, |s| &s.leftovers)
    }

    async fn inventory(&self, _session: &Session) -> Result<Vec<InventoryEntry>, ApiError> {
        self.record(Call::Inventory, |s| &s.inventory)
    }

    async fn save_inventory(
        &self,
        _session: &Session,
        entries: &[InventoryEntry],
    ) -> Result<SaveAck, ApiError> {
        self.record(Call::SaveInventory(entries.to_vec()), |s| &s.save)
    }

    async fn scan_inventory(
        &self,
        _session: &Session,
        upload: &ImageUpload,
    ) -> Result<ScanResult, ApiError> {
        self.record(Call::Scan(upload.file_name().to_string()), |s| &s.scan)
    }

    async fn match_recipes(
        &self,
        _session: &Session,
        ingredients: &[InventoryEntry],
    ) -> Result<Vec<RecipeMatch>, ApiError> {
        self.record(Call::MatchRecipes(ingredients.to_vec()), |s| &s.matches)
    }

    async fn grocery_list(&self, _session: &Session) -> Result<GroceryList, ApiError> {
        self.record(Call::GroceryList, |s| &s.grocery)
    }

    async fn place_order(&self, _session: &Session) -> Result<OrderConfirmation, ApiError> {
        self.record(Call::PlaceOrder, |s| &s.order)
    }

    async fn export_grocery_list(
        &self,
        _session: &Session,
        format: ExportFormat,
    ) -> Result<String, ApiError> {
        self.record(Call::ExportGrocery(format), |s| &s.export)
    }

    async fn weight_log(&self, _session: &Session) -> Result<Vec<WeightLogEntry>, ApiError> {
        self.record(Call::WeightLog, |s| &s.weight_log)
    }

    async fn log_weight(
        &self,
        _session: &Session,
        weight_kg: f64,
    ) -> Result<WeightLogEntry, ApiError> {
        self.record(Call::LogWeight(weight_kg), |s| &s.logged)
    }

    async fn nutrition(&self, _session: &Session) -> Result<NutritionSummary, ApiError> {
        self.record(Call::Nutrition, |s| &s.nutrition)
    }

    async fn submit_feedback(
        &self,
        _session: &Session,
        feedback: &RecipeFeedback,
    ) -> Result<(), ApiError> {
        self.record(Call::Feedback(feedback.clone()), |s| &s.feedback)
    }

    async fn update_profile(
        &self,
        _session: &Session,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        self.record(Call::UpdateProfile(update.clone()), |s| &s.profile)
    }
}
