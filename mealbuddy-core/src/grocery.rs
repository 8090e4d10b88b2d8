//! Grocery list and order placement.
//!
//! All are pass-through: the optimizer's list, totals and exported files are
//! shown as returned.

use crate::api::{ApiError, MealBuddyApi, Operation};
use crate::generation::Outcome;
use crate::models::{ExportFormat, GroceryList, OrderConfirmation};
use crate::session::Session;

pub struct GroceryStore<A> {
    api: A,
    list: Option<GroceryList>,
    confirmation: Option<OrderConfirmation>,
    error: Option<String>,
}

impl<A: MealBuddyApi> GroceryStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            list: None,
            confirmation: None,
            error: None,
        }
    }

    pub fn list(&self) -> Option<&GroceryList> {
        self.list.as_ref()
    }

    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load(&mut self, session: &Session) -> Result<Outcome, ApiError> {
        session.bearer()?;
        match self.api.grocery_list(session).await {
            Ok(list) => {
                tracing::debug!(items = list.items.len(), "loaded grocery list");
                self.list = Some(list);
                self.error = None;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.error = err.user_message(Operation::GroceryList);
                Err(err)
            }
        }
    }

    /// Places an order for the current list with the delivery integration.
    pub async fn place_order(&mut self, session: &Session) -> Result<Outcome, ApiError> {
        session.bearer()?;
        match self.api.place_order(session).await {
            Ok(confirmation) => {
                tracing::debug!(order_id = %confirmation.order_id, "order placed");
                self.confirmation = Some(confirmation);
                self.error = None;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.error = err.user_message(Operation::PlaceOrder);
                Err(err)
            }
        }
    }

    /// Fetches the list rendered server-side as CSV or plain text. The
    /// cached list is left alone.
    pub async fn export(
        &mut self,
        session: &Session,
        format: ExportFormat,
    ) -> Result<String, ApiError> {
        session.bearer()?;
        match self.api.export_grocery_list(session, format).await {
            Ok(body) => {
                tracing::debug!(%format, bytes = body.len(), "exported grocery list");
                self.error = None;
                Ok(body)
            }
            Err(err) => {
                self.error = err.user_message(Operation::ExportGrocery);
                Err(err)
            }
        }
    }
}
