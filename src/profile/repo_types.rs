use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::workouts::repo_types::FitnessLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Ft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub bmi: Option<f64>,
    pub health_conditions: Vec<String>,
    pub fitness_level: FitnessLevel,
    pub goals: Vec<String>,
}

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub user_id: String,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub height_unit: String,
    pub weight: f64,
    pub weight_unit: String,
    pub bmi: Option<f64>,
    pub health_conditions: Vec<String>,
    pub fitness_level: String,
    pub goals: Vec<String>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = anyhow::Error;

    fn try_from(r: ProfileRow) -> Result<Self, Self::Error> {
        let height_unit = match r.height_unit.as_str() {
            "cm" => HeightUnit::Cm,
            "ft" => HeightUnit::Ft,
            other => anyhow::bail!("unknown height unit '{other}'"),
        };
        let weight_unit = match r.weight_unit.as_str() {
            "kg" => WeightUnit::Kg,
            "lbs" => WeightUnit::Lbs,
            other => anyhow::bail!("unknown weight unit '{other}'"),
        };
        Ok(Self {
            user_id: r.user_id,
            name: r.name,
            age: u32::try_from(r.age)?,
            gender: r.gender,
            height: r.height,
            height_unit,
            weight: r.weight,
            weight_unit,
            bmi: r.bmi,
            health_conditions: r.health_conditions,
            fitness_level: r.fitness_level.parse()?,
            goals: r.goals,
        })
    }
}

impl HeightUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Ft => "ft",
        }
    }
}

impl WeightUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}
