use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer_not_to_say",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "prefer_not_to_say" => Ok(Gender::PreferNotToSay),
            _ => Err(format!(
                "Invalid gender '{}'. Valid options: male, female, other, prefer_not_to_say",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extra_active" => Ok(ActivityLevel::ExtraActive),
            _ => Err(format!(
                "Invalid activity level '{}'. Valid options: sedentary, light, moderate, \
                 very_active, extra_active",
                s
            )),
        }
    }
}

/// What the user wants the plan to work towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    MaintainWeight,
    GainWeight,
    BuildMuscle,
    ImproveEndurance,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::MaintainWeight => "maintain_weight",
            Goal::GainWeight => "gain_weight",
            Goal::BuildMuscle => "build_muscle",
            Goal::ImproveEndurance => "improve_endurance",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "lose_weight" => Ok(Goal::LoseWeight),
            "maintain_weight" => Ok(Goal::MaintainWeight),
            "gain_weight" => Ok(Goal::GainWeight),
            "build_muscle" => Ok(Goal::BuildMuscle),
            "improve_endurance" => Ok(Goal::ImproveEndurance),
            _ => Err(format!(
                "Invalid goal '{}'. Valid options: lose_weight, maintain_weight, gain_weight, \
                 build_muscle, improve_endurance",
                s
            )),
        }
    }
}

/// Partial update of the user's onboarding profile. Only the fields that are
/// set go over the wire; the server keeps the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    /// Flags such as `vegetarian`, `vegan`, `gluten_free`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<BTreeMap<String, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disliked_ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_cuisines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_budget_cents: Option<u32>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks the bounds the server enforces on body measurements.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(height) = self.height_cm {
            if !(height > 0.0 && height <= 300.0) {
                return Err(format!(
                    "Height must be between 0 and 300 cm, got {}",
                    height
                ));
            }
        }
        if let Some(weight) = self.weight_kg {
            if !(weight > 0.0 && weight <= 500.0) {
                return Err(format!(
                    "Weight must be between 0 and 500 kg, got {}",
                    weight
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_from_str() {
        assert_eq!(
            Gender::from_str("prefer-not-to-say").unwrap(),
            Gender::PreferNotToSay
        );
        assert_eq!(
            ActivityLevel::from_str("VERY_ACTIVE").unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(Goal::from_str("build_muscle").unwrap(), Goal::BuildMuscle);
        assert!(Goal::from_str("bulk").is_err());
    }

    #[test]
    fn test_only_set_fields_are_sent() {
        let update = ProfileUpdate {
            goal: Some(Goal::LoseWeight),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2),
            dietary_restrictions: Some(BTreeMap::from([("vegan".to_string(), true)])),
            ..Default::default()
        };

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "goal": "lose_weight",
                "date_of_birth": "1990-04-02",
                "dietary_restrictions": {"vegan": true},
            })
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            allergies: Some(vec!["peanuts".to_string()]),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_validate_measurement_bounds() {
        let ok = ProfileUpdate {
            height_cm: Some(180.0),
            weight_kg: Some(500.0),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let too_tall = ProfileUpdate {
            height_cm: Some(301.0),
            ..Default::default()
        };
        assert!(too_tall.validate().is_err());

        let zero_weight = ProfileUpdate {
            weight_kg: Some(0.0),
            ..Default::default()
        };
        assert!(zero_weight.validate().is_err());
    }
}
