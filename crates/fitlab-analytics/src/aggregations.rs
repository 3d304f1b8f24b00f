//! Volume, muscle-group and category aggregations.
//!
//! Every function here is pure: it borrows the session slice, ignores
//! planned sessions and returns freshly built rows. Missing numeric fields
//! on exercises count as zero.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use fitlab_core::categories::{category_color, UNCATEGORIZED};
use fitlab_core::config::Period;
use fitlab_core::{MuscleGroup, WorkoutSession};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Total volume for one calendar bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeBucket {
    /// `YYYY-MM-DD` (week start), `YYYY-MM` or `YYYY`.
    pub label: String,
    /// First day of the bucket.
    pub start: NaiveDate,
    pub volume: f64,
    pub workouts: u32,
}

/// Set count for one muscle group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuscleGroupStat {
    pub group: MuscleGroup,
    pub total_sets: u32,
    /// Share of all sets, 0..=100.
    pub percentage: f64,
    pub color: &'static str,
}

/// Per-exercise volume summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseVolume {
    pub name: String,
    pub total_volume: f64,
    pub total_sets: u32,
    /// Mean load over the entries that recorded a weight.
    pub avg_weight: f64,
}

/// Set and volume totals for one exercise category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub total_sets: u32,
    pub exercise_count: u32,
    pub total_volume: f64,
    pub color: &'static str,
}

/// How many logged exercises link back to an exercise-library entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LibraryCoverage {
    pub linked: u32,
    pub total: u32,
    pub percentage: f64,
}

fn completed(sessions: &[WorkoutSession]) -> impl Iterator<Item = &WorkoutSession> {
    sessions.iter().filter(|s| s.is_completed())
}

/// First day of the week containing `date`.
pub fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    date - Duration::days(offset as i64)
}

/// Bucket start and label for `date` at the given granularity.
pub fn bucket_for(date: NaiveDate, period: Period, week_start: Weekday) -> (NaiveDate, String) {
    match period {
        Period::Week => {
            let start = week_start_of(date, week_start);
            (start, start.format("%Y-%m-%d").to_string())
        }
        Period::Month => {
            let start = date.with_day(1).unwrap_or(date);
            (start, start.format("%Y-%m").to_string())
        }
        Period::Year => {
            let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
            (start, format!("{}", date.year()))
        }
    }
}

/// Group completed sessions into calendar buckets and sum their volume.
///
/// Buckets are sorted chronologically; buckets without sessions are omitted.
pub fn aggregate_volume_by_period(
    sessions: &[WorkoutSession],
    period: Period,
    week_start: Weekday,
) -> Vec<VolumeBucket> {
    let mut buckets: BTreeMap<NaiveDate, VolumeBucket> = BTreeMap::new();

    for session in completed(sessions) {
        let (start, label) = bucket_for(session.date, period, week_start);
        let bucket = buckets.entry(start).or_insert_with(|| VolumeBucket {
            label,
            start,
            volume: 0.0,
            workouts: 0,
        });
        bucket.volume += session.volume();
        bucket.workouts += 1;
    }

    tracing::debug!("Aggregated volume into {} {:?} buckets", buckets.len(), period);
    buckets.into_values().collect()
}

/// Σ volume over completed sessions.
pub fn total_volume(sessions: &[WorkoutSession]) -> f64 {
    completed(sessions).map(WorkoutSession::volume).sum()
}

/// Σ sets over completed sessions.
pub fn total_completed_sets(sessions: &[WorkoutSession]) -> u32 {
    completed(sessions)
        .map(WorkoutSession::total_sets)
        .fold(0, u32::saturating_add)
}

/// Sum set counts per canonical muscle group.
///
/// Exercises that cannot be classified are counted under
/// [`MuscleGroup::Unknown`], so the totals always add up to
/// [`total_completed_sets`]. Sorted by set count, largest first.
pub fn calculate_muscle_group_balance(sessions: &[WorkoutSession]) -> Vec<MuscleGroupStat> {
    let mut counts: HashMap<MuscleGroup, u32> = HashMap::new();
    for session in completed(sessions) {
        for exercise in &session.exercises {
            let sets = exercise.set_count();
            if sets == 0 {
                continue;
            }
            let group = MuscleGroup::classify(exercise.category.as_deref(), &exercise.name);
            let count = counts.entry(group).or_insert(0);
            *count = count.saturating_add(sets);
        }
    }

    let total = counts.values().fold(0u32, |acc, n| acc.saturating_add(*n));
    let mut stats: Vec<MuscleGroupStat> = counts
        .into_iter()
        .map(|(group, total_sets)| MuscleGroupStat {
            group,
            total_sets,
            percentage: percentage(total_sets as f64, total as f64),
            color: group.color(),
        })
        .collect();
    stats.sort_by(|a, b| b.total_sets.cmp(&a.total_sets).then(a.group.cmp(&b.group)));
    stats
}

/// Average volume per completed workout (0 when there are none).
pub fn calculate_average_volume(sessions: &[WorkoutSession]) -> f64 {
    let (count, volume) = completed(sessions).fold((0u32, 0.0), |(n, v), s| (n + 1, v + s.volume()));
    if count == 0 {
        0.0
    } else {
        volume / count as f64
    }
}

/// Completed workouts per week across the span of the data (at least one week).
pub fn calculate_workouts_per_week(sessions: &[WorkoutSession]) -> f64 {
    let dates: Vec<NaiveDate> = completed(sessions).map(|s| s.date).collect();
    let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) else {
        return 0.0;
    };
    let weeks = ((*last - *first).num_days() as f64 / 7.0).max(1.0);
    dates.len() as f64 / weeks
}

/// Exercises ranked by total volume, largest first.
///
/// Exercises with no weighted volume (planks, runs, unloaded sets) are left
/// out of the ranking.
pub fn get_best_exercises_by_volume(sessions: &[WorkoutSession], limit: usize) -> Vec<ExerciseVolume> {
    struct Acc {
        volume: f64,
        sets: u32,
        weight_sum: f64,
        weight_count: u32,
    }

    let mut by_name: HashMap<&str, Acc> = HashMap::new();
    for session in completed(sessions) {
        for exercise in &session.exercises {
            let acc = by_name.entry(exercise.name.as_str()).or_insert(Acc {
                volume: 0.0,
                sets: 0,
                weight_sum: 0.0,
                weight_count: 0,
            });
            acc.volume += exercise.volume();
            acc.sets = acc.sets.saturating_add(exercise.set_count());
            if let Some(w) = exercise.weight.filter(|w| w.is_finite() && *w > 0.0) {
                acc.weight_sum += w;
                acc.weight_count += 1;
            }
        }
    }

    let mut ranked: Vec<ExerciseVolume> = by_name
        .into_iter()
        .filter(|(_, acc)| acc.volume > 0.0)
        .map(|(name, acc)| ExerciseVolume {
            name: name.to_string(),
            total_volume: acc.volume,
            total_sets: acc.sets,
            avg_weight: if acc.weight_count == 0 {
                0.0
            } else {
                acc.weight_sum / acc.weight_count as f64
            },
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total_volume
            .total_cmp(&a.total_volume)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(limit);
    ranked
}

/// Set and volume totals per raw category tag, most sets first.
pub fn calculate_category_stats(sessions: &[WorkoutSession]) -> Vec<CategoryStat> {
    let mut by_category: HashMap<String, (u32, u32, f64)> = HashMap::new();
    for session in completed(sessions) {
        for exercise in &session.exercises {
            let category = exercise
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(UNCATEGORIZED);
            let entry = by_category.entry(category.to_string()).or_insert((0, 0, 0.0));
            entry.0 = entry.0.saturating_add(exercise.set_count());
            entry.1 = entry.1.saturating_add(1);
            entry.2 += exercise.volume();
        }
    }

    let mut stats: Vec<CategoryStat> = by_category
        .into_iter()
        .map(|(category, (total_sets, exercise_count, total_volume))| CategoryStat {
            color: category_color(&category),
            category,
            total_sets,
            exercise_count,
            total_volume,
        })
        .collect();
    stats.sort_by(|a, b| {
        b.total_sets
            .cmp(&a.total_sets)
            .then_with(|| a.category.cmp(&b.category))
    });
    stats
}

/// Share of logged exercises that carry a library link.
pub fn calculate_library_linkage_coverage(sessions: &[WorkoutSession]) -> LibraryCoverage {
    let (linked, total) = completed(sessions)
        .flat_map(|s| s.exercises.iter())
        .fold((0u32, 0u32), |(linked, total), ex| {
            let is_linked = ex.library_id.as_deref().is_some_and(|id| !id.is_empty());
            (linked + is_linked as u32, total + 1)
        });
    LibraryCoverage {
        linked,
        total,
        percentage: percentage(linked as f64, total as f64),
    }
}

/// `part / whole * 100`, or 0 when `whole` is zero.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Format a volume in kilograms as tonnes ("4.5t").
pub fn format_tonnes(kg: f64) -> String {
    format!("{:.1}t", kg / 1000.0)
}

/// Format minutes as a human-readable duration string.
pub fn format_duration_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    let hours = total / 60;
    let mins = total % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlab_core::Exercise;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_session(date: NaiveDate, exercises: Vec<Exercise>) -> WorkoutSession {
        let mut session = WorkoutSession::new("u1", "test", date);
        session.exercises = exercises;
        session
    }

    fn sample_sessions() -> Vec<WorkoutSession> {
        vec![
            make_session(
                date(2026, 1, 5),
                vec![
                    Exercise::strength("Bench Press", 4, 8, 80.0).with_category("Chest"),
                    Exercise::strength("Squat", 5, 5, 100.0).with_category("Legs"),
                ],
            ),
            make_session(
                date(2026, 1, 20),
                vec![Exercise::strength("Bench Press", 3, 5, 90.0).with_category("Chest")],
            ),
            make_session(
                date(2026, 2, 3),
                vec![
                    Exercise::strength("Deadlift", 3, 3, 180.0),
                    Exercise::new("Mystery").with_category("Misc"),
                ],
            ),
        ]
    }

    #[test]
    fn test_week_start_of() {
        // 2026-01-07 is a Wednesday.
        let wed = date(2026, 1, 7);
        assert_eq!(week_start_of(wed, Weekday::Mon), date(2026, 1, 5));
        assert_eq!(week_start_of(wed, Weekday::Sun), date(2026, 1, 4));
        assert_eq!(week_start_of(date(2026, 1, 4), Weekday::Sun), date(2026, 1, 4));
    }

    #[test]
    fn test_volume_by_month() {
        let buckets = aggregate_volume_by_period(&sample_sessions(), Period::Month, Weekday::Mon);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "2026-01");
        assert_eq!(buckets[0].volume, 2560.0 + 2500.0 + 1350.0);
        assert_eq!(buckets[0].workouts, 2);
        assert_eq!(buckets[1].label, "2026-02");
        assert_eq!(buckets[1].volume, 1620.0);
    }

    #[test]
    fn test_volume_same_date_single_month_bucket() {
        let d = date(2026, 3, 14);
        let sessions = vec![
            make_session(d, vec![Exercise::strength("Squat", 1, 1, 100.0)]),
            make_session(d, vec![Exercise::strength("Squat", 1, 1, 50.0)]),
            make_session(d, vec![]),
        ];
        let buckets = aggregate_volume_by_period(&sessions, Period::Month, Weekday::Mon);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].volume, 150.0);
        assert_eq!(buckets[0].workouts, 3);
    }

    #[test]
    fn test_volume_buckets_sum_to_total() {
        let sessions = sample_sessions();
        for period in [Period::Week, Period::Month, Period::Year] {
            let sum: f64 = aggregate_volume_by_period(&sessions, period, Weekday::Mon)
                .iter()
                .map(|b| b.volume)
                .sum();
            assert!((sum - total_volume(&sessions)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_volume_buckets_chronological_and_sparse() {
        let mut sessions = sample_sessions();
        sessions.reverse();
        let weeks = aggregate_volume_by_period(&sessions, Period::Week, Weekday::Mon);
        let labels: Vec<_> = weeks.iter().map(|b| b.label.as_str()).collect();
        // The empty weeks between these are not zero-filled.
        assert_eq!(labels, vec!["2026-01-05", "2026-01-19", "2026-02-02"]);
        let years = aggregate_volume_by_period(&sessions, Period::Year, Weekday::Mon);
        assert_eq!(years.len(), 1);
        assert_eq!(years[0].label, "2026");
    }

    #[test]
    fn test_planned_sessions_ignored() {
        let mut sessions = sample_sessions();
        sessions[0].is_planned = true;
        let buckets = aggregate_volume_by_period(&sessions, Period::Month, Weekday::Mon);
        assert_eq!(buckets[0].workouts, 1);
        assert_eq!(total_completed_sets(&sessions), 3 + 3);
    }

    #[test]
    fn test_aggregation_does_not_mutate_input() {
        let sessions = sample_sessions();
        let before = sessions.clone();
        let _ = aggregate_volume_by_period(&sessions, Period::Week, Weekday::Mon);
        let _ = calculate_muscle_group_balance(&sessions);
        let _ = calculate_category_stats(&sessions);
        assert_eq!(sessions, before);
    }

    #[test]
    fn test_muscle_group_balance_totals() {
        let sessions = sample_sessions();
        let balance = calculate_muscle_group_balance(&sessions);
        let sum: u32 = balance.iter().map(|g| g.total_sets).sum();
        assert_eq!(sum, total_completed_sets(&sessions));

        assert_eq!(balance[0].group, MuscleGroup::Chest);
        assert_eq!(balance[0].total_sets, 7);
        let pct: f64 = balance.iter().map(|g| g.percentage).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_muscle_group_unknown_bucket() {
        let sessions = vec![make_session(
            date(2026, 1, 1),
            vec![Exercise {
                sets: Some(4),
                ..Exercise::new("Turkish Getup")
            }],
        )];
        let balance = calculate_muscle_group_balance(&sessions);
        assert_eq!(balance.len(), 1);
        assert_eq!(balance[0].group, MuscleGroup::Unknown);
        assert_eq!(balance[0].total_sets, 4);
    }

    #[test]
    fn test_huge_set_counts_saturate() {
        let huge = |name: &str| Exercise {
            sets: Some(4_000_000_000),
            ..Exercise::new(name).with_category("Chest")
        };
        let sessions = vec![make_session(date(2026, 1, 1), vec![huge("Bench Press"), huge("Dips")])];

        assert_eq!(total_completed_sets(&sessions), u32::MAX);
        let balance = calculate_muscle_group_balance(&sessions);
        assert_eq!(balance.len(), 1);
        assert_eq!(balance[0].total_sets, u32::MAX);
        assert_eq!(balance[0].percentage, 100.0);

        let best = get_best_exercises_by_volume(&sessions, 5);
        assert!(best.is_empty());
        let categories = calculate_category_stats(&sessions);
        assert_eq!(categories[0].total_sets, u32::MAX);
    }

    #[test]
    fn test_average_volume() {
        let sessions = sample_sessions();
        let expected = total_volume(&sessions) / 3.0;
        assert!((calculate_average_volume(&sessions) - expected).abs() < 1e-9);
        assert_eq!(calculate_average_volume(&[]), 0.0);
    }

    #[test]
    fn test_workouts_per_week() {
        let sessions = sample_sessions();
        // 3 workouts over 29 days.
        let expected = 3.0 / (29.0 / 7.0);
        assert!((calculate_workouts_per_week(&sessions) - expected).abs() < 1e-9);

        let single = vec![make_session(date(2026, 1, 1), vec![])];
        assert_eq!(calculate_workouts_per_week(&single), 1.0);
        assert_eq!(calculate_workouts_per_week(&[]), 0.0);
    }

    #[test]
    fn test_best_exercises() {
        let best = get_best_exercises_by_volume(&sample_sessions(), 2);
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].name, "Bench Press");
        assert_eq!(best[0].total_volume, 2560.0 + 1350.0);
        assert_eq!(best[0].total_sets, 7);
        assert_eq!(best[0].avg_weight, 85.0);
        assert_eq!(best[1].name, "Squat");

        // "Mystery" has no sets, reps or weight and never ranks.
        let all = get_best_exercises_by_volume(&sample_sessions(), 10);
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|e| e.name != "Mystery"));
    }

    #[test]
    fn test_category_stats() {
        let stats = calculate_category_stats(&sample_sessions());
        let chest = stats.iter().find(|c| c.category == "Chest").unwrap();
        assert_eq!(chest.total_sets, 7);
        assert_eq!(chest.exercise_count, 2);
        let uncategorized = stats.iter().find(|c| c.category == UNCATEGORIZED).unwrap();
        assert_eq!(uncategorized.total_sets, 3);
        assert_eq!(stats[0].category, "Chest");
    }

    #[test]
    fn test_library_coverage() {
        let sessions = vec![make_session(
            date(2026, 1, 1),
            vec![
                Exercise::new("A").with_library_id("lib-a"),
                Exercise::new("B"),
                Exercise::new("C").with_library_id(""),
                Exercise::new("D").with_library_id("lib-d"),
            ],
        )];
        let coverage = calculate_library_linkage_coverage(&sessions);
        assert_eq!(coverage.linked, 2);
        assert_eq!(coverage.total, 4);
        assert_eq!(coverage.percentage, 50.0);

        let empty = calculate_library_linkage_coverage(&[]);
        assert_eq!(empty.percentage, 0.0);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_tonnes(4500.0), "4.5t");
        assert_eq!(format_tonnes(0.0), "0.0t");
        assert_eq!(format_duration_minutes(45.0), "45m");
        assert_eq!(format_duration_minutes(90.0), "1h 30m");
        assert_eq!(format_duration_minutes(-5.0), "0m");
    }
}
