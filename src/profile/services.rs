use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::dto::ProfileRequest;
use super::repo_types::{HeightUnit, Profile, WeightUnit};

pub const MIN_AGE: u32 = 55;
pub const MAX_AGE: u32 = 95;

const NO_CONDITIONS: &str = "none";

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("user_id required")]
    InvalidUserId,
    #[error("name required")]
    MissingName,
    #[error("gender required")]
    MissingGender,
    #[error("age must be between 55 and 95, got {0}")]
    AgeOutOfRange(u32),
    #[error("height and weight must be positive")]
    InvalidMeasurement,
    #[error("select at least one health condition option")]
    NoHealthConditions,
    #[error("select at least one goal")]
    NoGoals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn of(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// User ids are opaque tokens handed out by the auth provider.
pub(crate) fn is_valid_user_id(user_id: &str) -> bool {
    lazy_static! {
        static ref USER_ID_RE: Regex = Regex::new(r"^[A-Za-z0-9_\-]{1,128}$").unwrap();
    }
    USER_ID_RE.is_match(user_id)
}

/// BMI rounded to one decimal, `None` when either measurement is unusable.
pub fn bmi(height: f64, height_unit: HeightUnit, weight: f64, weight_unit: WeightUnit) -> Option<f64> {
    let height_m = match height_unit {
        HeightUnit::Ft => height * 0.3048,
        HeightUnit::Cm => height / 100.0,
    };
    let weight_kg = match weight_unit {
        WeightUnit::Lbs => weight * 0.453592,
        WeightUnit::Kg => weight,
    };
    if !(height_m > 0.0 && weight_kg > 0.0) || !height_m.is_finite() || !weight_kg.is_finite() {
        return None;
    }
    let value = weight_kg / (height_m * height_m);
    Some((value * 10.0).round() / 10.0)
}

/// Trims, drops blanks and repeats, and drops "none" once a real condition is listed.
pub fn normalize_conditions(conditions: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(conditions.len());
    for c in conditions {
        let c = c.trim();
        if !c.is_empty() && !out.iter().any(|seen| seen == c) {
            out.push(c.to_string());
        }
    }
    if out.iter().any(|c| c != NO_CONDITIONS) {
        out.retain(|c| c != NO_CONDITIONS);
    }
    out
}

pub fn build_profile(req: ProfileRequest) -> Result<Profile, ProfileError> {
    let user_id = req.user_id.trim().to_string();
    if !is_valid_user_id(&user_id) {
        return Err(ProfileError::InvalidUserId);
    }
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ProfileError::MissingName);
    }
    let gender = req.gender.trim().to_string();
    if gender.is_empty() {
        return Err(ProfileError::MissingGender);
    }
    if !(MIN_AGE..=MAX_AGE).contains(&req.age) {
        return Err(ProfileError::AgeOutOfRange(req.age));
    }
    let bmi = bmi(req.height, req.height_unit, req.weight, req.weight_unit)
        .ok_or(ProfileError::InvalidMeasurement)?;

    let health_conditions = normalize_conditions(&req.health_conditions);
    if health_conditions.is_empty() {
        return Err(ProfileError::NoHealthConditions);
    }
    let goals: Vec<String> = req
        .goals
        .iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();
    if goals.is_empty() {
        return Err(ProfileError::NoGoals);
    }

    Ok(Profile {
        user_id,
        name,
        age: req.age,
        gender,
        height: req.height,
        height_unit: req.height_unit,
        weight: req.weight,
        weight_unit: req.weight_unit,
        bmi: Some(bmi),
        health_conditions,
        fitness_level: req.fitness_level,
        goals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workouts::repo_types::FitnessLevel;

    fn request() -> ProfileRequest {
        ProfileRequest {
            user_id: "u_123".into(),
            name: "Asha".into(),
            age: 68,
            gender: "female".into(),
            height: 160.0,
            height_unit: HeightUnit::Cm,
            weight: 64.0,
            weight_unit: WeightUnit::Kg,
            health_conditions: vec!["arthritis".into()],
            fitness_level: FitnessLevel::Beginner,
            goals: vec!["balance".into()],
        }
    }

    #[test]
    fn bmi_in_metric_and_imperial() {
        assert_eq!(bmi(160.0, HeightUnit::Cm, 64.0, WeightUnit::Kg), Some(25.0));
        // 5.5 ft = 1.6764 m, 150 lbs = 68.0388 kg
        assert_eq!(bmi(5.5, HeightUnit::Ft, 150.0, WeightUnit::Lbs), Some(24.2));
        assert_eq!(bmi(0.0, HeightUnit::Cm, 64.0, WeightUnit::Kg), None);
    }

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(BmiCategory::of(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::of(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::of(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::of(30.0), BmiCategory::Obese);
    }

    #[test]
    fn valid_request_builds_profile() {
        let profile = build_profile(request()).unwrap();
        assert_eq!(profile.bmi, Some(25.0));
        assert_eq!(profile.health_conditions, vec!["arthritis".to_string()]);
    }

    #[test]
    fn age_must_be_in_range() {
        let mut req = request();
        req.age = 40;
        assert_eq!(build_profile(req).unwrap_err(), ProfileError::AgeOutOfRange(40));
        let mut req = request();
        req.age = 95;
        assert!(build_profile(req).is_ok());
    }

    #[test]
    fn required_fields() {
        let mut req = request();
        req.user_id = "../etc".into();
        assert_eq!(build_profile(req).unwrap_err(), ProfileError::InvalidUserId);

        let mut req = request();
        req.name = "  ".into();
        assert_eq!(build_profile(req).unwrap_err(), ProfileError::MissingName);

        let mut req = request();
        req.goals = vec![" ".into()];
        assert_eq!(build_profile(req).unwrap_err(), ProfileError::NoGoals);

        let mut req = request();
        req.health_conditions.clear();
        assert_eq!(build_profile(req).unwrap_err(), ProfileError::NoHealthConditions);
    }

    #[test]
    fn none_is_dropped_next_to_real_conditions() {
        let conditions: Vec<String> = vec!["none".into(), " diabetes ".into(), "diabetes".into(), "".into()];
        assert_eq!(normalize_conditions(&conditions), vec!["diabetes".to_string()]);
        assert_eq!(normalize_conditions(&["none".into()]), vec!["none".to_string()]);
    }
}
