use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::foods::{FoodReferenceEntry, FoodTable};

/// Absolute nutrition for a portion, each field rounded to a whole number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Largest accepted amount in any unit: 100 kg, 100 l or 100k pieces.
pub const MAX_QUANTITY: f64 = 100_000.0;

/// Scales a reference entry to `quantity` of its unit.
///
/// Returns `None` for an absent, non-positive, non-finite or oversized
/// quantity so the caller can refuse to proceed. Rounding is per field (half
/// away from zero), so the fields need not add up to a rounded total.
pub fn scale(entry: &FoodReferenceEntry, quantity: Option<f64>) -> Option<Nutrition> {
    let quantity = quantity.filter(|q| q.is_finite() && *q > 0.0 && *q <= MAX_QUANTITY)?;
    let factor = if entry.unit.per_hundred() {
        quantity / 100.0
    } else {
        quantity
    };

    let n = Nutrition {
        calories: (entry.calories * factor).round(),
        protein: (entry.protein * factor).round(),
        carbs: (entry.carbs * factor).round(),
        fat: (entry.fat * factor).round(),
    };
    [n.calories, n.protein, n.carbs, n.fat]
        .iter()
        .all(|v| v.is_finite())
        .then_some(n)
}

/// Per-request food selection: the food text and the amount entered for it.
#[derive(Debug, Clone, Deserialize)]
pub struct MealDraft {
    pub food: String,
    #[serde(default)]
    pub quantity: Option<f64>,
}

/// A draft resolved against the table, ready to be stored as a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPortion<'a> {
    pub entry: &'a FoodReferenceEntry,
    pub quantity: f64,
    pub nutrition: Nutrition,
}

impl ResolvedPortion<'_> {
    /// "rice (150 g)", "bread (2 slice)".
    pub fn label(&self) -> String {
        format!(
            "{} ({} {})",
            self.entry.name,
            self.quantity,
            self.entry.unit_label()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("unknown food '{0}'")]
    UnknownFood(String),
    #[error("quantity must be a positive number up to 100000")]
    InvalidQuantity,
}

impl MealDraft {
    pub fn resolve<'a>(&self, table: &'a FoodTable) -> Result<ResolvedPortion<'a>, DraftError> {
        let entry = table
            .lookup(&self.food)
            .ok_or_else(|| DraftError::UnknownFood(self.food.trim().to_string()))?;
        let nutrition = scale(entry, self.quantity).ok_or(DraftError::InvalidQuantity)?;
        Ok(ResolvedPortion {
            entry,
            quantity: self.quantity.unwrap_or_default(),
            nutrition,
        })
    }
}
