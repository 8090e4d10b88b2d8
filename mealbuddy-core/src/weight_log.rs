//! Body-weight history.

use crate::api::{ApiError, MealBuddyApi, Operation};
use crate::generation::Outcome;
use crate::models::WeightLogEntry;
use crate::session::Session;

pub const LOGGED_MESSAGE: &str = "Weight logged successfully!";
pub const INVALID_WEIGHT_MESSAGE: &str = "Please enter a valid weight.";

/// Cached weight entries, always ascending by `logged_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightLog {
    entries: Vec<WeightLogEntry>,
}

impl WeightLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[WeightLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&WeightLogEntry> {
        self.entries.last()
    }

    /// Inserts after any entries with the same timestamp.
    pub fn insert(&mut self, entry: WeightLogEntry) {
        let at = self
            .entries
            .partition_point(|existing| existing.logged_at <= entry.logged_at);
        self.entries.insert(at, entry);
    }

    pub fn replace_all(&mut self, mut entries: Vec<WeightLogEntry>) {
        entries.sort_by_key(|entry| entry.logged_at);
        self.entries = entries;
    }
}

pub struct WeightTracker<A> {
    api: A,
    log: WeightLog,
    message: Option<String>,
    error: Option<String>,
}

impl<A: MealBuddyApi> WeightTracker<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            log: WeightLog::new(),
            message: None,
            error: None,
        }
    }

    pub fn log(&self) -> &WeightLog {
        &self.log
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the cache with the server history. Failure keeps the cache.
    pub async fn load(&mut self, session: &Session) -> Result<Outcome, ApiError> {
        session.bearer()?;
        match self.api.weight_log(session).await {
            Ok(entries) => {
                tracing::debug!(entries = entries.len(), "loaded weight log");
                self.log.replace_all(entries);
                self.error = None;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.error = err.user_message(Operation::WeightLog);
                Err(err)
            }
        }
    }

    /// Records a measurement. Non-positive or non-finite input is rejected
    /// locally and nothing is sent.
    pub async fn submit(&mut self, session: &Session, weight_kg: f64) -> Result<Outcome, ApiError> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            self.error = Some(INVALID_WEIGHT_MESSAGE.to_string());
            self.message = None;
            return Ok(Outcome::Skipped);
        }
        session.bearer()?;

        match self.api.log_weight(session, weight_kg).await {
            Ok(entry) => {
                self.log.insert(entry);
                self.message = Some(LOGGED_MESSAGE.to_string());
                self.error = None;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                self.message = None;
                self.error = err.user_message(Operation::WeightLog);
                Err(err)
            }
        }
    }
}
