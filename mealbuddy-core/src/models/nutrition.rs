use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily intake targets as reported by the nutrition service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionSummary {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl fmt::Display for NutritionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calories: {} kcal", self.calories)?;
        writeln!(f, "Protein:  {} g", self.protein)?;
        writeln!(f, "Carbs:    {} g", self.carbs)?;
        write!(f, "Fat:      {} g", self.fat)
    }
}
