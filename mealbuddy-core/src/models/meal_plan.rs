use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::day_of_week::DayOfWeek;
use super::meal_type::MealType;

/// The three recipe names planned for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMeals {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl DayMeals {
    pub fn new(
        breakfast: impl Into<String>,
        lunch: impl Into<String>,
        dinner: impl Into<String>,
    ) -> Self {
        Self {
            breakfast: breakfast.into(),
            lunch: lunch.into(),
            dinner: dinner.into(),
        }
    }

    pub fn get(&self, meal_type: MealType) -> &str {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }
}

/// A full week of meals. Always holds an entry for every day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekPlan {
    days: [DayMeals; 7],
}

impl WeekPlan {
    /// Builds a week by asking `f` for each day in canonical order.
    pub fn from_fn(f: impl FnMut(DayOfWeek) -> DayMeals) -> Self {
        Self {
            days: DayOfWeek::ALL.map(f),
        }
    }

    pub fn day(&self, day: DayOfWeek) -> &DayMeals {
        &self.days[day.index()]
    }

    pub fn meal(&self, day: DayOfWeek, meal_type: MealType) -> &str {
        self.day(day).get(meal_type)
    }

    /// Iterates Monday through Sunday.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &DayMeals)> {
        DayOfWeek::ALL.into_iter().zip(self.days.iter())
    }
}

/// The current weekly plan as returned by the remote planner.
///
/// Only a structured plan has addressable slots; swap and shift are
/// meaningless against an unstructured one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WirePlan", into = "WirePlan")]
pub enum MealPlan {
    Structured { days: WeekPlan },
    Unstructured { text: String },
}

impl MealPlan {
    pub fn is_structured(&self) -> bool {
        matches!(self, MealPlan::Structured { .. })
    }

    pub fn days(&self) -> Option<&WeekPlan> {
        match self {
            MealPlan::Structured { days } => Some(days),
            MealPlan::Unstructured { .. } => None,
        }
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealPlan::Structured { days } => {
                for (day, meals) in days.iter() {
                    writeln!(f, "{}", day)?;
                    writeln!(f, "  Breakfast: {}", meals.breakfast)?;
                    writeln!(f, "  Lunch:     {}", meals.lunch)?;
                    writeln!(f, "  Dinner:    {}", meals.dinner)?;
                }
                Ok(())
            }
            MealPlan::Unstructured { text } => writeln!(f, "{}", text),
        }
    }
}

/// Planner payload: `is_structured` plus either seven lowercase day keys or
/// `unstructured_plan_text`.
#[derive(Debug, Serialize, Deserialize)]
struct WirePlan {
    is_structured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unstructured_plan_text: Option<String>,
    #[serde(flatten)]
    days: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<WirePlan> for MealPlan {
    type Error = String;

    fn try_from(mut wire: WirePlan) -> Result<Self, Self::Error> {
        if !wire.is_structured {
            let text = wire
                .unstructured_plan_text
                .ok_or("unstructured meal plan has no unstructured_plan_text")?;
            return Ok(MealPlan::Unstructured { text });
        }

        let mut meals = Vec::with_capacity(DayOfWeek::ALL.len());
        for day in DayOfWeek::ALL {
            let value = wire
                .days
                .remove(day.as_str())
                .ok_or_else(|| format!("structured meal plan is missing {}", day))?;
            let day_meals: DayMeals = serde_json::from_value(value)
                .map_err(|e| format!("invalid meals for {}: {}", day, e))?;
            meals.push(day_meals);
        }
        let days: [DayMeals; 7] = meals
            .try_into()
            .map_err(|_| "structured meal plan must have seven days".to_string())?;

        Ok(MealPlan::Structured {
            days: WeekPlan { days },
        })
    }
}

impl From<MealPlan> for WirePlan {
    fn from(plan: MealPlan) -> Self {
        match plan {
            MealPlan::Structured { days } => WirePlan {
                is_structured: true,
                unstructured_plan_text: None,
                days: days
                    .iter()
                    .map(|(day, meals)| {
                        (
                            day.as_str().to_string(),
                            serde_json::json!({
                                "breakfast": meals.breakfast,
                                "lunch": meals.lunch,
                                "dinner": meals.dinner,
                            }),
                        )
                    })
                    .collect(),
            },
            MealPlan::Unstructured { text } => WirePlan {
                is_structured: false,
                unstructured_plan_text: Some(text),
                days: BTreeMap::new(),
            },
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_week(tag: &str) -> WeekPlan {
    WeekPlan::from_fn(|day| {
        DayMeals::new(
            format!("{} oats {}", tag, day),
            format!("{} salad {}", tag, day),
            format!("{} stew {}", tag, day),
        )
    })
}
