use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

use crate::dates::iso_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => anyhow::bail!("unknown meal type '{other}'"),
        }
    }
}

/// A meal as stored. Macros are the scaler's output at logging time and
/// are never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    pub id: Uuid,
    pub user_id: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meal_type: MealType,
    pub food_label: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

#[derive(Debug, FromRow)]
pub struct MealRow {
    pub id: Uuid,
    pub user_id: String,
    pub date: Date,
    pub meal_type: String,
    pub food_label: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl TryFrom<MealRow> for LoggedMeal {
    type Error = anyhow::Error;

    fn try_from(r: MealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            date: r.date,
            meal_type: r.meal_type.parse()?,
            food_label: r.food_label,
            calories: r.calories,
            protein: r.protein,
            carbs: r.carbs,
            fat: r.fat,
        })
    }
}
