//! Personal-record progression and leaderboards.

use chrono::NaiveDate;
use fitlab_core::{PersonalRecord, PrType, WorkoutType};
use serde::Serialize;
use std::collections::BTreeMap;

/// Size of each leaderboard on the records tab.
pub const BOARD_SIZE: usize = 5;

/// One point on an exercise's PR trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub workout_type: WorkoutType,
}

/// Chronological PR history for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrProgression {
    pub exercise_name: String,
    pub points: Vec<PrPoint>,
}

impl PrProgression {
    /// Change from the first to the latest point.
    pub fn improvement(&self) -> Option<f64> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 => Some(last.value - first.value),
            _ => None,
        }
    }
}

/// Group records by exercise and order each group by date.
///
/// Records without a usable value are skipped; gaps between dates are left
/// as they are.
pub fn get_pr_progression(records: &[PersonalRecord]) -> Vec<PrProgression> {
    let mut by_exercise: BTreeMap<&str, Vec<PrPoint>> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        match record.trend_value().filter(|v| v.is_finite()) {
            Some(value) => by_exercise
                .entry(record.exercise_name.as_str())
                .or_default()
                .push(PrPoint {
                    date: record.date,
                    value,
                    workout_type: record.workout_type,
                }),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!("Skipped {} personal records without a value", skipped);
    }

    by_exercise
        .into_iter()
        .map(|(name, mut points)| {
            points.sort_by_key(|p| p.date);
            PrProgression {
                exercise_name: name.to_string(),
                points,
            }
        })
        .collect()
}

/// Most recent records first.
pub fn recent_prs(records: &[PersonalRecord], limit: usize) -> Vec<PersonalRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

fn top_by<F>(records: &[PersonalRecord], keep: impl Fn(&PersonalRecord) -> bool, key: F) -> Vec<PersonalRecord>
where
    F: Fn(&PersonalRecord) -> f64,
{
    let mut board: Vec<PersonalRecord> = records.iter().filter(|&r| keep(r)).cloned().collect();
    board.sort_by(|a, b| key(b).total_cmp(&key(a)).then_with(|| b.date.cmp(&a.date)));
    board.truncate(BOARD_SIZE);
    board
}

/// Heaviest single-rep gym lifts.
pub fn one_rep_max_prs(records: &[PersonalRecord]) -> Vec<PersonalRecord> {
    top_by(
        records,
        |r| r.workout_type == WorkoutType::Gym && r.reps == Some(1),
        |r| r.weight.unwrap_or(0.0),
    )
}

/// Heaviest weighted gym sets of six reps or more.
pub fn set_max_prs(records: &[PersonalRecord]) -> Vec<PersonalRecord> {
    top_by(
        records,
        |r| {
            r.workout_type == WorkoutType::Gym
                && r.reps.is_some_and(|reps| reps >= 6)
                && r.weight.is_some_and(|w| w > 0.0)
        },
        |r| r.weight.unwrap_or(0.0),
    )
}

/// Highest rep counts on bodyweight exercises.
pub fn bodyweight_prs(records: &[PersonalRecord]) -> Vec<PersonalRecord> {
    top_by(
        records,
        |r| r.pr_type == Some(PrType::BodyweightReps),
        |r| r.reps.unwrap_or(0) as f64,
    )
}

/// Format a time in seconds: "12.34s" below a minute, "1:05.00" above.
pub fn format_pr_time(seconds: f64) -> String {
    let centis = (seconds * 100.0).round().max(0.0) as u64;
    if centis < 6000 {
        format!("{}.{:02}s", centis / 100, centis % 100)
    } else {
        let rest = centis % 6000;
        format!("{}:{:02}.{:02}", centis / 6000, rest / 100, rest % 100)
    }
}

/// Short display of a record's result ("100kg × 5", "12.60s", "15 reps").
pub fn format_pr_value(record: &PersonalRecord) -> String {
    if record.pr_type == Some(PrType::BodyweightReps) {
        return format!("{} reps", record.reps.unwrap_or(0));
    }
    match record.workout_type {
        WorkoutType::Gym => match (record.weight, record.reps) {
            (Some(w), Some(reps)) if reps > 1 => format!("{}kg × {}", w, reps),
            (Some(w), _) => format!("{}kg", w),
            (None, Some(reps)) => format!("{} reps", reps),
            (None, None) => "-".to_string(),
        },
        _ => record
            .time
            .map(format_pr_time)
            .unwrap_or_else(|| "-".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn records() -> Vec<PersonalRecord> {
        vec![
            PersonalRecord::lift("Squat", day(20), 160.0, 1),
            PersonalRecord::lift("Bench Press", day(15), 120.0, 1),
            PersonalRecord::lift("Squat", day(3), 150.0, 1),
            PersonalRecord::lift("Squat", day(10), 140.0, 5),
            PersonalRecord::lift("Bench Press", day(12), 100.0, 6),
            PersonalRecord::bodyweight("Pull-ups", day(8), 15),
            PersonalRecord::bodyweight("Dips", day(9), 20),
            PersonalRecord::sprint("100m", day(4), 12.6),
        ]
    }

    #[test]
    fn test_pr_progression_grouped_and_sorted() {
        let progression = get_pr_progression(&records());
        let names: Vec<_> = progression.iter().map(|p| p.exercise_name.as_str()).collect();
        assert_eq!(names, vec!["100m", "Bench Press", "Dips", "Pull-ups", "Squat"]);

        let squat = progression.iter().find(|p| p.exercise_name == "Squat").unwrap();
        let dates: Vec<_> = squat.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(3), day(10), day(20)]);
        assert_eq!(squat.points[0].value, 150.0);
        assert_eq!(squat.improvement(), Some(10.0));
    }

    #[test]
    fn test_pr_progression_skips_valueless_records() {
        let mut empty = PersonalRecord::lift("Row", day(1), 0.0, 1);
        empty.weight = None;
        empty.reps = None;
        let progression = get_pr_progression(&[empty]);
        assert!(progression.is_empty());
    }

    #[test]
    fn test_single_point_has_no_improvement() {
        let progression = get_pr_progression(&[PersonalRecord::sprint("100m", day(1), 12.0)]);
        assert_eq!(progression[0].improvement(), None);
    }

    #[test]
    fn test_recent_prs() {
        let recent = recent_prs(&records(), 3);
        let dates: Vec<_> = recent.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(20), day(15), day(12)]);
    }

    #[test]
    fn test_leaderboards() {
        let all = records();

        let orm = one_rep_max_prs(&all);
        let weights: Vec<_> = orm.iter().map(|r| r.weight.unwrap()).collect();
        assert_eq!(weights, vec![160.0, 150.0, 120.0]);

        let set_max = set_max_prs(&all);
        assert_eq!(set_max.len(), 1);
        assert_eq!(set_max[0].exercise_name, "Bench Press");

        let bw = bodyweight_prs(&all);
        assert_eq!(bw[0].exercise_name, "Dips");
        assert_eq!(bw[1].exercise_name, "Pull-ups");
    }

    #[test]
    fn test_board_size_cap() {
        let many: Vec<_> = (1..=8)
            .map(|i| PersonalRecord::lift("Bench Press", day(i), 100.0 + i as f64, 1))
            .collect();
        assert_eq!(one_rep_max_prs(&many).len(), BOARD_SIZE);
    }

    #[test]
    fn test_format_pr_time() {
        assert_eq!(format_pr_time(12.3), "12.30s");
        assert_eq!(format_pr_time(65.0), "1:05.00");
        assert_eq!(format_pr_time(124.5), "2:04.50");
        assert_eq!(format_pr_time(119.999), "2:00.00");
        assert_eq!(format_pr_time(59.999), "1:00.00");
    }

    #[test]
    fn test_format_pr_value() {
        assert_eq!(format_pr_value(&PersonalRecord::lift("Squat", day(1), 140.0, 5)), "140kg × 5");
        assert_eq!(format_pr_value(&PersonalRecord::lift("Squat", day(1), 160.0, 1)), "160kg");
        assert_eq!(format_pr_value(&PersonalRecord::bodyweight("Dips", day(1), 20)), "20 reps");
        assert_eq!(format_pr_value(&PersonalRecord::sprint("100m", day(1), 12.6)), "12.60s");
    }
}
