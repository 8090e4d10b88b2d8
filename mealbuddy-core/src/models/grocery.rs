use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroceryItem {
    pub item: String,
    pub quantity: String,
    pub estimated_price: f64,
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} {:<10} ${:.2}",
            self.item, self.quantity, self.estimated_price
        )
    }
}

/// Budget-optimized shopping list produced by the remote optimizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroceryList {
    #[serde(default)]
    pub items: Vec<GroceryItem>,
    #[serde(default)]
    pub total_estimated_cost: f64,
    #[serde(default)]
    pub budget_optimization_message: String,
}

impl GroceryList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Acknowledgement from the order-placement integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    pub message: String,
    pub order_id: String,
    pub estimated_delivery_time: String,
    pub total_cost: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl fmt::Display for OrderConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Order ID: {}. Estimated Delivery: {}. Total Cost: {}",
            self.message, self.order_id, self.estimated_delivery_time, self.total_cost
        )
    }
}

/// Download formats the optimizer offers for the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Text,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "text",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(format!(
                "Invalid export format '{}'. Valid options: csv, text",
                s
            )),
        }
    }
}
