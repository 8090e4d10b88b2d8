use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One pantry line. `item` is the reconciliation key (exact match).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryEntry {
    pub item: String,
    pub quantity: String,
}

impl InventoryEntry {
    pub fn new(item: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            quantity: quantity.into(),
        }
    }
}

impl fmt::Display for InventoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20} {}", self.item, self.quantity)
    }
}

/// Client-side identity of an inventory entry, stable across removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which half of an entry an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryField {
    Item,
    Quantity,
}

impl std::str::FromStr for InventoryField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "item" => Ok(InventoryField::Item),
            "quantity" => Ok(InventoryField::Quantity),
            _ => Err(format!(
                "Invalid field '{}'. Valid options: item, quantity",
                s
            )),
        }
    }
}

/// Response of the image scanner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanResult {
    pub message: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub detected_items: Vec<InventoryEntry>,
}

impl ScanResult {
    /// Status line shown after a successful scan.
    pub fn status_line(&self) -> String {
        match &self.file_path {
            Some(path) => format!("{}: {}", self.message, path),
            None => self.message.clone(),
        }
    }
}
