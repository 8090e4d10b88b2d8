use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recorded body-weight measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightLogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub logged_at: DateTime<Utc>,
    pub weight_kg: f64,
}

impl WeightLogEntry {
    pub fn new(logged_at: DateTime<Utc>, weight_kg: f64) -> Self {
        Self {
            id: None,
            logged_at,
            weight_kg,
        }
    }
}

impl fmt::Display for WeightLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:.1} kg",
            self.logged_at.format("%Y-%m-%d %H:%M"),
            self.weight_kg
        )
    }
}
