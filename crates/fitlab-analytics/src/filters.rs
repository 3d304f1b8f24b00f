//! Filters for the statistics screen.

use chrono::NaiveDate;
use fitlab_core::{PersonalRecord, WorkoutSession};
use serde::Serialize;
use std::collections::BTreeSet;

/// Optional constraints applied before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsFilter {
    /// Exercise name, matched case-insensitively.
    pub exercise: Option<String>,
    /// Raw category tag, matched exactly.
    pub category: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl StatsFilter {
    pub fn has_active(&self) -> bool {
        self.active_count() > 0
    }

    pub fn active_count(&self) -> usize {
        [
            self.exercise.is_some(),
            self.category.is_some(),
            self.start.is_some(),
            self.end.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    fn in_range(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    fn exercise_matches(&self, name: &str) -> bool {
        self.exercise
            .as_deref()
            .map_or(true, |wanted| wanted.eq_ignore_ascii_case(name.trim()))
    }

    /// Sessions inside the date bounds that contain a matching exercise and,
    /// separately, an exercise with the wanted category. Kept sessions are
    /// returned whole.
    pub fn apply_sessions(&self, sessions: &[WorkoutSession]) -> Vec<WorkoutSession> {
        sessions
            .iter()
            .filter(|s| self.in_range(s.date))
            .filter(|s| {
                self.exercise.is_none() || s.exercises.iter().any(|ex| self.exercise_matches(&ex.name))
            })
            .filter(|s| match &self.category {
                Some(c) => s.exercises.iter().any(|ex| ex.category.as_deref() == Some(c.as_str())),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Records matching the exercise and date bounds. Records carry no
    /// category, so the category filter does not apply to them.
    pub fn apply_records(&self, records: &[PersonalRecord]) -> Vec<PersonalRecord> {
        records
            .iter()
            .filter(|r| self.in_range(r.date) && self.exercise_matches(&r.exercise_name))
            .cloned()
            .collect()
    }
}

/// Distinct exercise names across sessions and records, sorted.
pub fn unique_exercises(sessions: &[WorkoutSession], records: &[PersonalRecord]) -> Vec<String> {
    let names: BTreeSet<&str> = sessions
        .iter()
        .flat_map(|s| s.exercises.iter().map(|e| e.name.as_str()))
        .chain(records.iter().map(|r| r.exercise_name.as_str()))
        .filter(|n| !n.trim().is_empty())
        .collect();
    names.into_iter().map(String::from).collect()
}

/// Distinct category tags, sorted.
pub fn unique_categories(sessions: &[WorkoutSession]) -> Vec<String> {
    let categories: BTreeSet<&str> = sessions
        .iter()
        .flat_map(|s| s.exercises.iter())
        .filter_map(|e| e.category.as_deref())
        .filter(|c| !c.trim().is_empty())
        .collect();
    categories.into_iter().map(String::from).collect()
}
