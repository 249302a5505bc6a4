use serde::{Deserialize, Serialize};

use super::repo_types::{HeightUnit, Profile, WeightUnit};
use super::services::BmiCategory;
use crate::workouts::repo_types::FitnessLevel;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    pub height: f64,
    #[serde(default)]
    pub height_unit: HeightUnit,
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    pub fitness_level: FitnessLevel,
    #[serde(default)]
    pub goals: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub bmi_category: Option<BmiCategory>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let bmi_category = profile.bmi.map(BmiCategory::of);
        Self {
            profile,
            bmi_category,
        }
    }
}
