//! Food reference table.
//!
//! The table is an immutable, ordered list of per-unit nutrition profiles
//! loaded once at startup. Lookups are exact and case-insensitive; search
//! lives in [`super::resolver`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_FOODS: &str = include_str!("../../data/foods.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Values are per 100 g.
    Gram,
    /// Values are per 100 ml.
    Milliliter,
    /// Values are per single piece.
    Piece,
}

impl Unit {
    pub fn per_hundred(self) -> bool {
        matches!(self, Unit::Gram | Unit::Milliliter)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodReferenceEntry {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub unit: Unit,
    /// Display word for piece units, e.g. "slice" or "cup".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion: Option<String>,
    #[serde(default = "default_quantity")]
    pub default_quantity: f64,
}

fn default_quantity() -> f64 {
    1.0
}

impl FoodReferenceEntry {
    /// Word shown next to a quantity: "g", "ml", or the piece portion.
    pub fn unit_label(&self) -> &str {
        match self.unit {
            Unit::Gram => "g",
            Unit::Milliliter => "ml",
            Unit::Piece => self.portion.as_deref().unwrap_or("piece"),
        }
    }

    /// Pre-filled amount for a quantity field. Never a scaling constant.
    pub fn suggested_quantity(&self) -> f64 {
        if self.unit.per_hundred() {
            100.0
        } else {
            self.default_quantity
        }
    }
}

#[derive(Debug, Error)]
pub enum FoodTableError {
    #[error("food table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("food entry #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate food name '{0}'")]
    DuplicateName(String),

    #[error("food '{name}' has invalid {field}: {value}")]
    InvalidValue {
        name: String,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Clone)]
pub struct FoodTable {
    entries: Vec<FoodReferenceEntry>,
    index: HashMap<String, usize>,
}

impl FoodTable {
    pub fn load(json: &str) -> Result<Self, FoodTableError> {
        let raw: Vec<FoodReferenceEntry> = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    pub fn builtin() -> Result<Self, FoodTableError> {
        Self::load(BUILTIN_FOODS)
    }

    /// Loads from `path` when given, otherwise the embedded table.
    pub fn from_path_or_builtin(path: Option<&Path>) -> anyhow::Result<Self> {
        let table = match path {
            Some(p) => {
                let json = std::fs::read_to_string(p)
                    .with_context(|| format!("read food table {}", p.display()))?;
                Self::load(&json).with_context(|| format!("load food table {}", p.display()))?
            }
            None => Self::builtin().context("load builtin food table")?,
        };
        tracing::info!(foods = table.len(), "food reference table loaded");
        Ok(table)
    }

    pub fn from_entries(raw: Vec<FoodReferenceEntry>) -> Result<Self, FoodTableError> {
        let mut entries = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());
        let mut seen = HashSet::with_capacity(raw.len());

        for (i, mut entry) in raw.into_iter().enumerate() {
            entry.name = entry.name.trim().to_lowercase();
            if entry.name.is_empty() {
                return Err(FoodTableError::EmptyName { index: i });
            }
            validate_values(&entry)?;
            if !seen.insert(entry.name.clone()) {
                return Err(FoodTableError::DuplicateName(entry.name));
            }
            index.insert(entry.name.clone(), entries.len());
            entries.push(entry);
        }

        Ok(Self { entries, index })
    }

    pub fn lookup(&self, name: &str) -> Option<&FoodReferenceEntry> {
        let key = name.trim().to_lowercase();
        self.index.get(&key).map(|&i| &self.entries[i])
    }

    /// Entries in load order.
    pub fn entries(&self) -> &[FoodReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_values(entry: &FoodReferenceEntry) -> Result<(), FoodTableError> {
    let fields = [
        ("calories", entry.calories),
        ("protein", entry.protein),
        ("carbs", entry.carbs),
        ("fat", entry.fat),
        ("default_quantity", entry.default_quantity),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(FoodTableError::InvalidValue {
                name: entry.name.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}
