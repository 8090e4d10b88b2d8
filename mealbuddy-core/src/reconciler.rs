//! Client-side pantry reconciliation.
//!
//! Owns the visible inventory, merges scanner detections into it, supports
//! manual editing and persists the result. A successful merge that leaves a
//! non-empty inventory immediately asks the recipe matcher for candidates.
//!
//! Remote results are settled through `apply_*` steps tagged with the
//! [`Generation`] returned by the matching `begin_*`, so a caller that keeps
//! several requests in flight gets the latest-issued-wins policy.

use crate::api::{ApiError, ImageUpload, MealBuddyApi, Operation};
use crate::generation::{Generation, Generations, Outcome};
use crate::inventory::{Inventory, InventoryError};
use crate::models::{EntryId, InventoryEntry, InventoryField, RecipeMatch, ScanResult};
use crate::recipe_match::RecipeMatchRequester;
use crate::session::Session;

pub const SAVED_MESSAGE: &str = "Inventory saved successfully!";
pub const DEGRADED_BASELINE_MESSAGE: &str =
    "The saved inventory could not be loaded; refusing to overwrite it.";

pub struct InventoryReconciler<A> {
    api: A,
    inventory: Inventory,
    detected: Vec<InventoryEntry>,
    message: Option<String>,
    error: Option<String>,
    baseline_degraded: bool,
    baseline_generations: Generations,
    scan_generations: Generations,
    matcher: RecipeMatchRequester<A>,
}

impl<A: MealBuddyApi + Clone> InventoryReconciler<A> {
    pub fn new(api: A) -> Self {
        Self {
            matcher: RecipeMatchRequester::new(api.clone()),
            api,
            inventory: Inventory::new(),
            detected: Vec::new(),
            message: None,
            error: None,
            baseline_degraded: false,
            baseline_generations: Generations::new(),
            scan_generations: Generations::new(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Entries from the most recent successful scan.
    pub fn detected(&self) -> &[InventoryEntry] {
        &self.detected
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when the last baseline fetch failed and the inventory shown is
    /// an empty stand-in rather than the saved one.
    pub fn baseline_degraded(&self) -> bool {
        self.baseline_degraded
    }

    /// Lets [`Self::persist`] replace the saved inventory even though it was
    /// never loaded.
    pub fn accept_degraded_baseline(&mut self) {
        self.baseline_degraded = false;
    }

    pub fn matches(&self) -> &[RecipeMatch] {
        self.matcher.matches()
    }

    pub fn matcher(&self) -> &RecipeMatchRequester<A> {
        &self.matcher
    }

    pub fn matcher_mut(&mut self) -> &mut RecipeMatchRequester<A> {
        &mut self.matcher
    }

    /// Loads the saved inventory. A failed fetch starts from an empty
    /// inventory and marks the baseline degraded instead of reporting an
    /// error.
    pub async fn load_baseline(&mut self, session: &Session) -> Result<Outcome, ApiError> {
        session.bearer()?;
        let generation = self.begin_baseline();
        let result = self.api.inventory(session).await;
        Ok(self.apply_baseline_result(generation, result))
    }

    pub fn begin_baseline(&mut self) -> Generation {
        self.baseline_generations.issue()
    }

    pub fn apply_baseline_result(
        &mut self,
        generation: Generation,
        result: Result<Vec<InventoryEntry>, ApiError>,
    ) -> Outcome {
        if !self.baseline_generations.is_current(generation) {
            tracing::warn!(generation = generation.value(), "discarding stale inventory");
            return Outcome::Stale;
        }
        let entries = match result {
            Ok(entries) => {
                self.baseline_degraded = false;
                entries
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch inventory, starting empty");
                self.baseline_degraded = true;
                Vec::new()
            }
        };
        self.inventory = Inventory::from_entries(entries);
        Outcome::Applied
    }

    /// Uploads a pantry photo and merges what the scanner found.
    ///
    /// On failure the inventory is untouched; detections and matches from
    /// earlier scans are cleared.
    pub async fn scan(
        &mut self,
        session: &Session,
        upload: &ImageUpload,
    ) -> Result<Outcome, ApiError> {
        session.bearer()?;
        let generation = self.begin_scan();
        let result = self.api.scan_inventory(session, upload).await;
        let outcome = self.apply_scan_result(generation, result)?;
        if outcome == Outcome::Applied {
            self.request_matches(session).await;
        }
        Ok(outcome)
    }

    pub fn begin_scan(&mut self) -> Generation {
        self.scan_generations.issue()
    }

    /// Settles a scanner response: records the detections and merges them.
    ///
    /// Does not contact the matcher; callers settling scans themselves follow
    /// an `Applied` outcome with [`Self::request_matches`].
    pub fn apply_scan_result(
        &mut self,
        generation: Generation,
        result: Result<ScanResult, ApiError>,
    ) -> Result<Outcome, ApiError> {
        if !self.scan_generations.is_current(generation) {
            tracing::warn!(generation = generation.value(), "discarding stale scan");
            return Ok(Outcome::Stale);
        }

        match result {
            Ok(scan) => {
                self.message = Some(scan.status_line());
                self.error = None;
                self.merge_local(&scan.detected_items);
                self.detected = scan.detected_items;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.error = err.user_message(Operation::ScanImage);
                self.message = None;
                self.detected.clear();
                self.matcher.clear();
                Err(err)
            }
        }
    }

    /// Merges `detected` into the inventory, then requests recipe matches
    /// for the merged inventory when it is non-empty.
    ///
    /// A matcher failure does not undo the merge; it is reported through
    /// [`RecipeMatchRequester::error`].
    pub async fn merge_detected(
        &mut self,
        session: &Session,
        detected: &[InventoryEntry],
    ) -> Result<Outcome, ApiError> {
        self.merge_local(detected);
        self.request_matches(session).await;
        Ok(Outcome::Applied)
    }

    /// Asks the matcher for candidates for the current inventory, unless it
    /// is empty.
    pub async fn request_matches(&mut self, session: &Session) {
        if self.inventory.is_empty() {
            return;
        }
        let snapshot = self.inventory.to_entries();
        if let Err(err) = self.matcher.request(session, &snapshot).await {
            tracing::warn!(error = %err, "recipe match after merge failed");
        }
    }

    fn merge_local(&mut self, detected: &[InventoryEntry]) {
        self.inventory.merge(detected);
        tracing::debug!(
            detected = detected.len(),
            total = self.inventory.len(),
            "merged detected items"
        );
    }

    /// Appends a manual entry. No uniqueness check: the same item name may
    /// appear more than once, unlike after [`Self::merge_detected`].
    pub fn add_manual(&mut self, item: impl Into<String>, quantity: impl Into<String>) -> EntryId {
        self.inventory.push(InventoryEntry::new(item, quantity))
    }

    pub fn edit_entry(
        &mut self,
        id: EntryId,
        field: InventoryField,
        value: impl Into<String>,
    ) -> Result<(), InventoryError> {
        self.inventory.edit(id, field, value)
    }

    pub fn edit_at(
        &mut self,
        index: usize,
        field: InventoryField,
        value: impl Into<String>,
    ) -> Result<(), InventoryError> {
        self.inventory.edit_at(index, field, value)
    }

    pub fn remove_entry(&mut self, id: EntryId) -> Result<InventoryEntry, InventoryError> {
        self.inventory.remove(id)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<InventoryEntry, InventoryError> {
        self.inventory.remove_at(index)
    }

    /// Replaces the stored inventory with the current sequence.
    ///
    /// Skipped while the baseline is degraded: the sequence was never
    /// reconciled with what the server holds.
    pub async fn persist(&mut self, session: &Session) -> Result<Outcome, ApiError> {
        if self.baseline_degraded {
            self.message = None;
            self.error = Some(DEGRADED_BASELINE_MESSAGE.to_string());
            return Ok(Outcome::Skipped);
        }
        session.bearer()?;
        let snapshot = self.inventory.to_entries();
        match self.api.save_inventory(session, &snapshot).await {
            Ok(_) => {
                self.message = Some(SAVED_MESSAGE.to_string());
                self.error = None;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.error = err.user_message(Operation::SaveInventory);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi};

    fn entry(item: &str, quantity: &str) -> InventoryEntry {
        InventoryEntry::new(item, quantity)
    }

    fn session() -> Session {
        Session::new("tok")
    }

    async fn reconciler_with(baseline: Vec<InventoryEntry>) -> (InventoryReconciler<FakeApi>, FakeApi) {
        let api = FakeApi::new();
        api.set_inventory(Ok(baseline));
        let mut reconciler = InventoryReconciler::new(api.clone());
        reconciler.load_baseline(&session()).await.unwrap();
        (reconciler, api)
    }

    #[tokio::test]
    async fn test_load_baseline() {
        let (reconciler, _) = reconciler_with(vec![entry("rice", "1kg")]).await;
        assert_eq!(reconciler.inventory().to_entries(), vec![entry("rice", "1kg")]);
    }

    #[tokio::test]
    async fn test_failed_baseline_starts_empty() {
        let api = FakeApi::new();
        api.set_inventory(Err(ApiError::Transport("offline".to_string())));
        let mut reconciler = InventoryReconciler::new(api);

        let outcome = reconciler.load_baseline(&session()).await.unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert!(reconciler.inventory().is_empty());
        assert!(reconciler.error().is_none());
        assert!(reconciler.baseline_degraded());
    }

    #[tokio::test]
    async fn test_degraded_baseline_is_not_persisted() {
        let api = FakeApi::new();
        api.set_inventory(Err(ApiError::Rejected {
            status: 503,
            detail: None,
        }));
        let mut reconciler = InventoryReconciler::new(api.clone());
        reconciler.load_baseline(&session()).await.unwrap();
        reconciler.add_manual("salt", "1kg");

        let outcome = reconciler.persist(&session()).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(reconciler.error(), Some(DEGRADED_BASELINE_MESSAGE));
        assert!(!api
            .calls()
            .iter()
            .any(|call| matches!(call, Call::SaveInventory(_))));
    }

    #[tokio::test]
    async fn test_accepted_degraded_baseline_persists() {
        let api = FakeApi::new();
        api.set_inventory(Err(ApiError::Transport("offline".to_string())));
        let mut reconciler = InventoryReconciler::new(api.clone());
        reconciler.load_baseline(&session()).await.unwrap();
        reconciler.add_manual("salt", "1kg");

        reconciler.accept_degraded_baseline();
        let outcome = reconciler.persist(&session()).await.unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(
            api.calls().last(),
            Some(&Call::SaveInventory(vec![entry("salt", "1kg")]))
        );
    }

    #[tokio::test]
    async fn test_successful_reload_clears_degraded_baseline() {
        let api = FakeApi::new();
        api.set_inventory(Err(ApiError::Transport("offline".to_string())));
        let mut reconciler = InventoryReconciler::new(api.clone());
        reconciler.load_baseline(&session()).await.unwrap();
        assert!(reconciler.baseline_degraded());

        api.set_inventory(Ok(vec![entry("rice", "1kg")]));
        reconciler.load_baseline(&session()).await.unwrap();

        assert!(!reconciler.baseline_degraded());
        assert_eq!(reconciler.inventory().len(), 1);
    }

    #[test]
    fn test_out_of_order_scan_response_is_discarded() {
        let mut reconciler = InventoryReconciler::new(FakeApi::new());
        let first = reconciler.begin_scan();
        let second = reconciler.begin_scan();

        // the second upload is answered before the first
        let outcome = reconciler
            .apply_scan_result(
                second,
                Ok(ScanResult {
                    message: "Image processed successfully".to_string(),
                    file_path: None,
                    detected_items: vec![entry("milk", "1L")],
                }),
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);

        let outcome = reconciler
            .apply_scan_result(
                first,
                Ok(ScanResult {
                    message: "Image processed successfully".to_string(),
                    file_path: None,
                    detected_items: vec![entry("egg", "12")],
                }),
            )
            .unwrap();

        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(reconciler.inventory().to_entries(), vec![entry("milk", "1L")]);
        assert_eq!(reconciler.detected().to_vec(), vec![entry("milk", "1L")]);
    }

    #[test]
    fn test_stale_scan_failure_keeps_newer_result() {
        let mut reconciler = InventoryReconciler::new(FakeApi::new());
        let first = reconciler.begin_scan();
        let second = reconciler.begin_scan();
        reconciler
            .apply_scan_result(
                second,
                Ok(ScanResult {
                    message: "ok".to_string(),
                    file_path: None,
                    detected_items: vec![entry("kale", "1")],
                }),
            )
            .unwrap();

        let outcome = reconciler
            .apply_scan_result(first, Err(ApiError::Transport("late".to_string())))
            .unwrap();

        assert_eq!(outcome, Outcome::Stale);
        assert!(reconciler.error().is_none());
        assert_eq!(reconciler.detected().len(), 1);
    }

    #[test]
    fn test_stale_baseline_is_discarded() {
        let mut reconciler = InventoryReconciler::new(FakeApi::new());
        let first = reconciler.begin_baseline();
        let second = reconciler.begin_baseline();

        reconciler.apply_baseline_result(second, Ok(vec![entry("rice", "1kg")]));
        let outcome =
            reconciler.apply_baseline_result(first, Err(ApiError::Transport("late".to_string())));

        assert_eq!(outcome, Outcome::Stale);
        assert!(!reconciler.baseline_degraded());
        assert_eq!(reconciler.inventory().to_entries(), vec![entry("rice", "1kg")]);
    }

    #[tokio::test]
    async fn test_merge_triggers_exactly_one_match_request() {
        let (mut reconciler, api) = reconciler_with(vec![entry("egg", "6")]).await;

        reconciler
            .merge_detected(&session(), &[entry("egg", "12"), entry("milk", "1L")])
            .await
            .unwrap();

        assert_eq!(
            api.match_calls(),
            vec![vec![entry("egg", "12"), entry("milk", "1L")]]
        );
    }

    #[tokio::test]
    async fn test_empty_merge_triggers_no_match_request() {
        let (mut reconciler, api) = reconciler_with(Vec::new()).await;

        reconciler.merge_detected(&session(), &[]).await.unwrap();

        assert!(api.match_calls().is_empty());
    }

    #[tokio::test]
    async fn test_match_failure_keeps_merge() {
        let (mut reconciler, api) = reconciler_with(Vec::new()).await;
        api.set_matches(Err(ApiError::Transport("reset".to_string())));

        let outcome = reconciler
            .merge_detected(&session(), &[entry("kale", "1 bunch")])
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(reconciler.inventory().to_entries(), vec![entry("kale", "1 bunch")]);
        assert_eq!(
            reconciler.matcher().error(),
            Some("An error occurred while fetching recipes.")
        );
    }

    #[tokio::test]
    async fn test_scan_merges_and_matches() {
        let (mut reconciler, api) = reconciler_with(vec![entry("egg", "6")]).await;
        api.set_scan(Ok(ScanResult {
            message: "Image processed successfully".to_string(),
            file_path: Some("uploads/1.jpg".to_string()),
            detected_items: vec![entry("egg", "12"), entry("milk", "1L")],
        }));
        api.set_matches(Ok(vec![RecipeMatch {
            name: "Custard".to_string(),
            ingredients_needed: vec!["sugar".to_string()],
        }]));
        let upload = ImageUpload::new("fridge.jpg", vec![1]).unwrap();

        reconciler.scan(&session(), &upload).await.unwrap();

        assert_eq!(
            reconciler.inventory().to_entries(),
            vec![entry("egg", "12"), entry("milk", "1L")]
        );
        assert_eq!(reconciler.detected().len(), 2);
        assert_eq!(
            reconciler.message(),
            Some("Image processed successfully: uploads/1.jpg")
        );
        assert_eq!(reconciler.matches().len(), 1);
        assert_eq!(
            api.calls()[1..3],
            [
                Call::Scan("fridge.jpg".to_string()),
                Call::MatchRecipes(vec![entry("egg", "12"), entry("milk", "1L")])
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_scan_leaves_inventory_and_clears_matches() {
        let (mut reconciler, api) = reconciler_with(vec![entry("egg", "6")]).await;
        api.set_matches(Ok(vec![RecipeMatch {
            name: "Omelette".to_string(),
            ingredients_needed: Vec::new(),
        }]));
        reconciler
            .merge_detected(&session(), &[entry("egg", "8")])
            .await
            .unwrap();
        assert_eq!(reconciler.matches().len(), 1);

        api.set_scan(Err(ApiError::Rejected {
            status: 400,
            detail: None,
        }));
        let upload = ImageUpload::new("fridge.png", vec![1]).unwrap();
        assert!(reconciler.scan(&session(), &upload).await.is_err());

        assert_eq!(reconciler.inventory().to_entries(), vec![entry("egg", "8")]);
        assert!(reconciler.matches().is_empty());
        assert!(reconciler.detected().is_empty());
        assert_eq!(reconciler.error(), Some("Failed to upload image."));
    }

    #[tokio::test]
    async fn test_add_manual_allows_duplicates() {
        let (mut reconciler, _) = reconciler_with(vec![entry("egg", "6")]).await;

        let id = reconciler.add_manual("egg", "2");

        assert_eq!(reconciler.inventory().position(id), Some(1));
        assert_eq!(
            reconciler.inventory().to_entries(),
            vec![entry("egg", "6"), entry("egg", "2")]
        );
    }

    #[tokio::test]
    async fn test_edit_and_remove_by_id() {
        let (mut reconciler, _) =
            reconciler_with(vec![entry("a", "1"), entry("b", "2"), entry("c", "3")]).await;
        let a = reconciler.inventory().id_at(0).unwrap();
        let c = reconciler.inventory().id_at(2).unwrap();

        reconciler.remove_entry(a).unwrap();
        reconciler
            .edit_entry(c, InventoryField::Quantity, "9")
            .unwrap();

        assert_eq!(
            reconciler.inventory().to_entries(),
            vec![entry("b", "2"), entry("c", "9")]
        );
    }

    #[tokio::test]
    async fn test_persist_sends_full_sequence() {
        let (mut reconciler, api) = reconciler_with(vec![entry("egg", "6")]).await;
        reconciler.add_manual("egg", "2");

        reconciler.persist(&session()).await.unwrap();
        reconciler.persist(&session()).await.unwrap();

        let saves: Vec<Call> = api
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::SaveInventory(_)))
            .collect();
        let expected = Call::SaveInventory(vec![entry("egg", "6"), entry("egg", "2")]);
        assert_eq!(saves, vec![expected.clone(), expected]);
        assert_eq!(reconciler.message(), Some(SAVED_MESSAGE));
    }

    #[tokio::test]
    async fn test_persist_failure_reports_detail() {
        let (mut reconciler, api) = reconciler_with(Vec::new()).await;
        api.set_save(Err(ApiError::Rejected {
            status: 422,
            detail: Some("Invalid inventory".to_string()),
        }));

        assert!(reconciler.persist(&session()).await.is_err());
        assert_eq!(reconciler.error(), Some("Invalid inventory"));
    }

    #[tokio::test]
    async fn test_scan_without_session_is_not_attempted() {
        let api = FakeApi::new();
        let mut reconciler = InventoryReconciler::new(api.clone());
        let upload = ImageUpload::new("fridge.gif", Vec::new()).unwrap();

        let err = reconciler
            .scan(&Session::anonymous(), &upload)
            .await
            .unwrap_err();
        assert!(err.is_auth_required());
        assert!(api.calls().is_empty());
    }
}
