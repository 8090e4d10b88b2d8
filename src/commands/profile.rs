use chrono::NaiveDate;
use clap::{Args, Subcommand};
use mealbuddy_core::{ActivityLevel, Gender, Goal, Outcome, ProfileEditor, ProfileUpdate};
use std::collections::BTreeMap;

use super::{connect, failure};
use crate::config::Config;

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Update onboarding details; only the given fields change
    Set(ProfileFields),
}

#[derive(Args, Default)]
pub struct ProfileFields {
    /// Full name
    #[arg(long)]
    name: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    birth_date: Option<String>,

    /// Gender (male, female, other, prefer_not_to_say)
    #[arg(long)]
    gender: Option<String>,

    /// Height in centimeters
    #[arg(long)]
    height_cm: Option<f64>,

    /// Weight in kilograms
    #[arg(long)]
    weight_kg: Option<f64>,

    /// Activity level (sedentary, light, moderate, very_active, extra_active)
    #[arg(long)]
    activity: Option<String>,

    /// Goal (lose_weight, maintain_weight, gain_weight, build_muscle, improve_endurance)
    #[arg(long)]
    goal: Option<String>,

    /// Dietary restriction to turn on, e.g. vegan (can be repeated)
    #[arg(long = "restriction")]
    restrictions: Vec<String>,

    /// Allergy (can be repeated)
    #[arg(long = "allergy")]
    allergies: Vec<String>,

    /// Disliked ingredient (can be repeated)
    #[arg(long = "dislike")]
    dislikes: Vec<String>,

    /// Preferred cuisine (can be repeated)
    #[arg(long = "cuisine")]
    cuisines: Vec<String>,

    /// Weekly grocery budget in cents
    #[arg(long)]
    budget_cents: Option<u32>,
}

impl ProfileFields {
    fn to_update(&self) -> Result<ProfileUpdate, String> {
        let date_of_birth = self
            .birth_date
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD", s))
            })
            .transpose()?;
        let gender = self
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()?;
        let activity_level = self
            .activity
            .as_deref()
            .map(str::parse::<ActivityLevel>)
            .transpose()?;
        let goal = self.goal.as_deref().map(str::parse::<Goal>).transpose()?;

        let dietary_restrictions = (!self.restrictions.is_empty()).then(|| {
            self.restrictions
                .iter()
                .map(|r| (r.to_lowercase().replace('-', "_"), true))
                .collect::<BTreeMap<_, _>>()
        });

        Ok(ProfileUpdate {
            full_name: self.name.clone(),
            date_of_birth,
            gender,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            activity_level,
            goal,
            dietary_restrictions,
            allergies: non_empty(&self.allergies),
            disliked_ingredients: non_empty(&self.dislikes),
            preferred_cuisines: non_empty(&self.cuisines),
            weekly_budget_cents: self.budget_cents,
        })
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

impl ProfileCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProfileSubcommand::Set(fields) => {
                let update = fields.to_update()?;
                let (api, session) = connect(config);
                let mut editor = ProfileEditor::new(api);

                match editor.submit(&session, &update).await {
                    Ok(Outcome::Skipped) => Err(editor.error().unwrap_or_default().into()),
                    Ok(_) => {
                        if let Some(message) = editor.message() {
                            println!("{}", message);
                        }
                        Ok(())
                    }
                    Err(e) => Err(failure(e, editor.error())),
                }
            }
        }
    }
}
