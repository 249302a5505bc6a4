use serde::{Deserialize, Serialize};
use time::Date;

use super::foods::{FoodReferenceEntry, Unit};
use super::repo_types::MealType;
use super::scaler::{MealDraft, Nutrition};
use crate::dates::iso_date;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FoodSuggestion {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub unit: Unit,
    pub unit_label: String,
    pub suggested_quantity: f64,
}

impl From<&FoodReferenceEntry> for FoodSuggestion {
    fn from(e: &FoodReferenceEntry) -> Self {
        Self {
            name: e.name.clone(),
            calories: e.calories,
            protein: e.protein,
            carbs: e.carbs,
            fat: e.fat,
            unit: e.unit,
            unit_label: e.unit_label().to_string(),
            suggested_quantity: e.suggested_quantity(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub food: String,
    pub quantity: Option<f64>,
    pub unit_label: String,
    /// `null` until a positive quantity is supplied.
    pub nutrition: Option<Nutrition>,
}

#[derive(Debug, Deserialize)]
pub struct NewMealRequest {
    pub user_id: String,
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
    pub meal_type: MealType,
    pub food: String,
    #[serde(default)]
    pub quantity: Option<f64>,
}

impl NewMealRequest {
    pub fn draft(&self) -> MealDraft {
        MealDraft {
            food: self.food.clone(),
            quantity: self.quantity,
        }
    }
}
