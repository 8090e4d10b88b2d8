use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate recipe returned by the remote matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeMatch {
    pub name: String,
    #[serde(default)]
    pub ingredients_needed: Vec<String>,
}

impl fmt::Display for RecipeMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Needs: {}",
            self.name,
            self.ingredients_needed.join(", ")
        )
    }
}

/// Rating submitted for a recipe the user cooked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeFeedback {
    pub recipe_name: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RecipeFeedback {
    /// Builds feedback, enforcing a non-empty name and a 1-5 rating.
    pub fn new(
        recipe_name: impl Into<String>,
        rating: u8,
        comment: Option<String>,
    ) -> Result<Self, String> {
        let recipe_name = recipe_name.into();
        if recipe_name.trim().is_empty() || rating == 0 {
            return Err("Recipe name and rating are required.".to_string());
        }
        if rating > 5 {
            return Err(format!("Rating must be between 1 and 5, got {}", rating));
        }
        Ok(Self {
            recipe_name,
            rating,
            comment: comment.filter(|c| !c.trim().is_empty()),
        })
    }
}
