//! Static exercise library and the per-exercise burn estimates.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::repo_types::{FitnessLevel, PlanExercise, WorkoutPlan};

/// Burn estimate for exercises missing from the table.
pub const DEFAULT_EXERCISE_CALORIES: f64 = 15.0;

struct ExerciseTemplate {
    name: &'static str,
    reps: &'static str,
    minutes: u32,
    instructions: &'static str,
}

const fn ex(
    name: &'static str,
    reps: &'static str,
    minutes: u32,
    instructions: &'static str,
) -> ExerciseTemplate {
    ExerciseTemplate { name, reps, minutes, instructions }
}

static BEGINNER: [ExerciseTemplate; 4] = [
    ex("Seated Arm Raises", "10 each arm", 2, "Raise arms slowly overhead"),
    ex("Ankle Circles", "10 each foot", 2, "Rotate ankles in circles"),
    ex("Seated Marching", "20 steps", 3, "Lift knees while seated"),
    ex("Neck Stretches", "5 each side", 2, "Gentle neck rotations"),
];

static INTERMEDIATE: [ExerciseTemplate; 4] = [
    ex("Standing Leg Raises", "10 each", 3, "Hold chair, lift leg to side"),
    ex("Wall Push-ups", "10", 3, "Push-ups against wall"),
    ex("Heel-to-Toe Walk", "20 steps", 3, "Walk in straight line"),
    ex("Calf Raises", "15", 2, "Rise on toes, hold chair"),
];

static ADVANCED: [ExerciseTemplate; 4] = [
    ex("Squats with Chair", "10", 3, "Squat to chair height"),
    ex("Standing Marches", "30", 3, "March in place with arm swing"),
    ex("Side Steps", "10 each side", 3, "Step side to side"),
    ex("Standing Balance", "30 sec each leg", 2, "Stand on one leg"),
];

lazy_static! {
    static ref EXERCISE_CALORIES: HashMap<&'static str, f64> = HashMap::from([
        ("Seated Arm Raises", 15.0),
        ("Ankle Circles", 8.0),
        ("Seated Marching", 20.0),
        ("Neck Stretches", 5.0),
        ("Wrist Rotations", 5.0),
        ("Standing Leg Raises", 25.0),
        ("Wall Push-ups", 30.0),
        ("Heel-to-Toe Walk", 20.0),
        ("Seated Twists", 15.0),
        ("Calf Raises", 25.0),
        ("Squats with Chair", 40.0),
        ("Standing Marches", 35.0),
        ("Side Steps", 30.0),
        ("Arm Circles", 20.0),
        ("Standing Balance", 15.0),
    ]);
}

fn templates(level: FitnessLevel) -> &'static [ExerciseTemplate] {
    match level {
        FitnessLevel::Beginner => &BEGINNER,
        FitnessLevel::Intermediate => &INTERMEDIATE,
        FitnessLevel::Advanced => &ADVANCED,
    }
}

pub fn generate_plan(user_id: &str, level: FitnessLevel) -> WorkoutPlan {
    let exercises: Vec<PlanExercise> = templates(level)
        .iter()
        .map(|t| PlanExercise {
            name: t.name.to_string(),
            reps: t.reps.to_string(),
            duration_minutes: t.minutes,
            instructions: t.instructions.to_string(),
        })
        .collect();
    let duration_minutes = exercises.iter().map(|e| e.duration_minutes).sum();

    WorkoutPlan {
        user_id: user_id.to_string(),
        difficulty: level,
        exercises,
        duration_minutes,
    }
}

pub fn calories_for(exercise: &str) -> f64 {
    EXERCISE_CALORIES
        .get(exercise)
        .copied()
        .unwrap_or(DEFAULT_EXERCISE_CALORIES)
}

pub fn estimate_burned<S: AsRef<str>>(exercises: &[S]) -> f64 {
    exercises.iter().map(|e| calories_for(e.as_ref())).sum()
}
