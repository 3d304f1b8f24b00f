use crate::error::{FitError, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of training a session or record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    #[default]
    Gym,
    Running,
    Sprint,
    Other,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gym => "gym",
            Self::Running => "running",
            Self::Sprint => "sprint",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gym" => Some(Self::Gym),
            "running" | "run" => Some(Self::Running),
            "sprint" => Some(Self::Sprint),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A single exercise performed (or planned) within a session.
///
/// Numeric fields are optional; absent values contribute zero to every
/// aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Muscle-group or category tag (e.g. "Chest", "Compound").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Load in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Identifier of the exercise-library entry this exercise was picked from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_id: Option<String>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            sets: None,
            reps: None,
            weight: None,
            library_id: None,
        }
    }

    /// Builder shorthand for a fully specified strength exercise.
    pub fn strength(name: impl Into<String>, sets: u32, reps: u32, weight: f64) -> Self {
        Self {
            sets: Some(sets),
            reps: Some(reps),
            weight: Some(weight),
            ..Self::new(name)
        }
    }

    /// Parse a command-line exercise such as `Bench Press:4x8@80`.
    ///
    /// The set scheme and load are optional; `@80kg` is accepted too.
    pub fn parse_shorthand(text: &str) -> Result<Self> {
        let invalid = || FitError::InvalidExercise(text.to_string());
        let (name, scheme) = match text.split_once(':') {
            Some((name, scheme)) => (name.trim(), Some(scheme.trim())),
            None => (text.trim(), None),
        };
        if name.is_empty() {
            return Err(invalid());
        }
        let mut exercise = Self::new(name);
        let Some(scheme) = scheme else {
            return Ok(exercise);
        };

        let (counts, load) = match scheme.split_once('@') {
            Some((counts, load)) => (counts, Some(load)),
            None => (scheme, None),
        };
        let (sets, reps) = counts
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(invalid)?;
        exercise.sets = Some(sets.trim().parse().map_err(|_| invalid())?);
        exercise.reps = Some(reps.trim().parse().map_err(|_| invalid())?);
        if let Some(load) = load {
            let weight: f64 = load
                .trim()
                .trim_end_matches("kg")
                .trim()
                .parse()
                .map_err(|_| invalid())?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid());
            }
            exercise.weight = Some(weight);
        }
        Ok(exercise)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_library_id(mut self, id: impl Into<String>) -> Self {
        self.library_id = Some(id.into());
        self
    }

    /// sets × reps × weight, with missing fields counted as zero.
    pub fn volume(&self) -> f64 {
        let sets = self.sets.unwrap_or(0) as f64;
        let reps = self.reps.unwrap_or(0) as f64;
        let weight = self.weight.unwrap_or(0.0);
        let volume = sets * reps * weight;
        if volume.is_finite() && volume > 0.0 {
            volume
        } else {
            0.0
        }
    }

    pub fn set_count(&self) -> u32 {
        self.sets.unwrap_or(0)
    }
}

/// A logged or planned workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub workout_type: WorkoutType,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub is_planned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl WorkoutSession {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.into(),
            workout_type: WorkoutType::Gym,
            date,
            start_time: None,
            is_planned: false,
            duration_minutes: None,
            distance_km: None,
            notes: None,
            exercises: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        !self.is_planned
    }

    /// Σ sets×reps×weight across all exercises.
    pub fn volume(&self) -> f64 {
        self.exercises.iter().map(Exercise::volume).sum()
    }

    /// Σ sets, saturating at `u32::MAX`.
    pub fn total_sets(&self) -> u32 {
        self.exercises
            .iter()
            .map(Exercise::set_count)
            .fold(0, u32::saturating_add)
    }

    pub fn minutes(&self) -> f64 {
        self.duration_minutes
            .filter(|m| m.is_finite() && *m > 0.0)
            .unwrap_or(0.0)
    }
}

/// What kind of best a personal record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrType {
    OneRepMax,
    SetMax,
    BodyweightReps,
    BestTime,
}

/// A best-performance entry for an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub exercise_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub workout_type: WorkoutType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Best time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_type: Option<PrType>,
}

impl PersonalRecord {
    pub fn lift(
        exercise_name: impl Into<String>,
        date: NaiveDate,
        weight: f64,
        reps: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: String::new(),
            exercise_name: exercise_name.into(),
            date,
            workout_type: WorkoutType::Gym,
            weight: Some(weight),
            reps: Some(reps),
            time: None,
            pr_type: Some(if reps == 1 {
                PrType::OneRepMax
            } else {
                PrType::SetMax
            }),
        }
    }

    pub fn sprint(exercise_name: impl Into<String>, date: NaiveDate, seconds: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: String::new(),
            exercise_name: exercise_name.into(),
            date,
            workout_type: WorkoutType::Sprint,
            weight: None,
            reps: None,
            time: Some(seconds),
            pr_type: Some(PrType::BestTime),
        }
    }

    pub fn bodyweight(exercise_name: impl Into<String>, date: NaiveDate, reps: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: String::new(),
            exercise_name: exercise_name.into(),
            date,
            workout_type: WorkoutType::Gym,
            weight: None,
            reps: Some(reps),
            time: None,
            pr_type: Some(PrType::BodyweightReps),
        }
    }

    /// The number that best describes this record for trend charting.
    pub fn trend_value(&self) -> Option<f64> {
        match (self.pr_type, self.workout_type) {
            (Some(PrType::BodyweightReps), _) => self.reps.map(f64::from),
            (Some(PrType::BestTime), _) | (_, WorkoutType::Sprint | WorkoutType::Running) => {
                self.time
            }
            _ => self.weight.or_else(|| self.reps.map(f64::from)),
        }
    }
}

/// Everything the aggregator works on, as handed over by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub sessions: Vec<WorkoutSession>,
    #[serde(default)]
    pub personal_records: Vec<PersonalRecord>,
}

impl Dataset {
    /// Restrict the dataset to a single user.
    pub fn for_user(&self, user_id: &str) -> Dataset {
        Dataset {
            sessions: self
                .sessions
                .iter()
                .filter(|s| s.user_id == user_id)
                .cloned()
                .collect(),
            personal_records: self
                .personal_records
                .iter()
                .filter(|r| r.user_id.is_empty() || r.user_id == user_id)
                .cloned()
                .collect(),
        }
    }

    pub fn find_session(&self, id: &str) -> Option<&WorkoutSession> {
        self.sessions.iter().find(|s| s.id == id)
    }
}
