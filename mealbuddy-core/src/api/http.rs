//! reqwest-backed implementation of [`MealBuddyApi`].
//!
//! Requests carry `Authorization: Bearer <token>` from the explicit
//! [`Session`]. No timeout and no retry is configured: a stalled call
//! stays pending until the connection gives up.

use async_trait::async_trait;
use reqwest::{multipart, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::{paths, ImageUpload, MealBuddyApi, SaveAck, ShiftRequest, SwapRequest};
use crate::models::{
    ExportFormat, GroceryList, InventoryEntry, MealPlan, NutritionSummary, OrderConfirmation,
    ProfileUpdate, RecipeFeedback, RecipeMatch, ScanResult, WeightLogEntry,
};
use crate::session::Session;

/// Access token issued by the login endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Failure payload of the backend: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct InventoryUpdate<'a> {
    pantry_inventory: &'a [InventoryEntry],
}

#[derive(Deserialize)]
struct InventoryEnvelope {
    #[serde(default)]
    inventory: Option<Vec<InventoryEntry>>,
}

#[derive(Serialize)]
struct WeightLogCreate {
    weight_kg: f64,
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    /// Creates a client for the backend at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchanges email and password for an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token, ApiError> {
        let request = self
            .client
            .post(self.url(paths::LOGIN))
            .form(&[("username", email), ("password", password)]);
        self.send(request, paths::LOGIN).await
    }

    async fn dispatch(&self, request: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        tracing::debug!(path, "sending request");
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let err = rejected(response).await;
            tracing::debug!(path, error = %err, "request rejected");
            return Err(err);
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        self.dispatch(request, path)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_text(&self, request: RequestBuilder, path: &str) -> Result<String, ApiError> {
        self.dispatch(request, path)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, session: &Session, path: &str) -> Result<T, ApiError> {
        let token = session.bearer()?;
        let request = self.client.get(self.url(path)).bearer_auth(token);
        self.send(request, path).await
    }

    async fn post_json<B, T>(&self, session: &Session, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = session.bearer()?;
        let request = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body);
        self.send(request, path).await
    }
}

async fn rejected(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(text) => Some(text),
            _ => None,
        });
    ApiError::Rejected { status, detail }
}

#[async_trait]
impl MealBuddyApi for HttpApi {
    async fn meal_plan(&self, session: &Session) -> Result<MealPlan, ApiError> {
        self.get(session, paths::MEAL_PLAN).await
    }

    async fn swap_meal(
        &self,
        session: &Session,
        request: SwapRequest,
    ) -> Result<MealPlan, ApiError> {
        self.post_json(session, paths::MEAL_PLAN_SWAP, &request).await
    }

    async fn shift_meal_plan(
        &self,
        session: &Session,
        request: ShiftRequest,
    ) -> Result<MealPlan, ApiError> {
        self.post_json(session, paths::MEAL_PLAN_SHIFT, &request)
            .await
    }

    async fn leftover_suggestions(&self, session: &Session) -> Result<Vec<String>, ApiError> {
        self.get(session, paths::LEFTOVERS).await
    }

    async fn inventory(&self, session: &Session) -> Result<Vec<InventoryEntry>, ApiError> {
        let envelope: InventoryEnvelope = self.get(session, paths::INVENTORY).await?;
        Ok(envelope.inventory.unwrap_or_default())
    }

    async fn save_inventory(
        &self,
        session: &Session,
        entries: &[InventoryEntry],
    ) -> Result<SaveAck, ApiError> {
        let token = session.bearer()?;
        let request = self
            .client
            .put(self.url(paths::INVENTORY))
            .bearer_auth(token)
            .json(&InventoryUpdate {
                pantry_inventory: entries,
            });
        self.send(request, paths::INVENTORY).await
    }

    async fn scan_inventory(
        &self,
        session: &Session,
        upload: &ImageUpload,
    ) -> Result<ScanResult, ApiError> {
        let token = session.bearer()?;
        let part = multipart::Part::bytes(upload.bytes().to_vec())
            .file_name(upload.file_name().to_string())
            .mime_str(upload.mime_type())
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);
        let request = self
            .client
            .post(self.url(paths::INVENTORY_SCAN))
            .bearer_auth(token)
            .multipart(form);
        self.send(request, paths::INVENTORY_SCAN).await
    }

    async fn match_recipes(
        &self,
        session: &Session,
        ingredients: &[InventoryEntry],
    ) -> Result<Vec<RecipeMatch>, ApiError> {
        self.post_json(session, paths::RECIPE_MATCH, ingredients)
            .await
    }

    async fn grocery_list(&self, session: &Session) -> Result<GroceryList, ApiError> {
        self.get(session, paths::GROCERY_LIST).await
    }

    async fn place_order(&self, session: &Session) -> Result<OrderConfirmation, ApiError> {
        let token = session.bearer()?;
        let request = self
            .client
            .post(self.url(paths::INSTACART_ORDER))
            .bearer_auth(token);
        self.send(request, paths::INSTACART_ORDER).await
    }

    async fn export_grocery_list(
        &self,
        session: &Session,
        format: ExportFormat,
    ) -> Result<String, ApiError> {
        let token = session.bearer()?;
        let path = paths::grocery_export(format);
        let request = self.client.get(self.url(path)).bearer_auth(token);
        self.send_text(request, path).await
    }

    async fn weight_log(&self, session: &Session) -> Result<Vec<WeightLogEntry>, ApiError> {
        self.get(session, paths::WEIGHT_LOG).await
    }

    async fn log_weight(
        &self,
        session: &Session,
        weight_kg: f64,
    ) -> Result<WeightLogEntry, ApiError> {
        self.post_json(session, paths::WEIGHT_LOG, &WeightLogCreate { weight_kg })
            .await
    }

    async fn nutrition(&self, session: &Session) -> Result<NutritionSummary, ApiError> {
        self.get(session, paths::NUTRITION).await
    }

    async fn submit_feedback(
        &self,
        session: &Session,
        feedback: &RecipeFeedback,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post_json(session, paths::RECIPE_FEEDBACK, feedback)
            .await?;
        Ok(())
    }

    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        let token = session.bearer()?;
        let request = self
            .client
            .put(self.url(paths::PROFILE))
            .bearer_auth(token)
            .json(update);
        let _: serde_json::Value = self.send(request, paths::PROFILE).await?;
        Ok(())
    }
}
