//! Everything the statistics screen shows, computed in one pass.

use crate::aggregations::{
    aggregate_volume_by_period, calculate_average_volume, calculate_category_stats,
    calculate_library_linkage_coverage, calculate_muscle_group_balance,
    calculate_workouts_per_week, get_best_exercises_by_volume, CategoryStat, ExerciseVolume,
    LibraryCoverage, MuscleGroupStat, VolumeBucket,
};
use crate::filters::StatsFilter;
use crate::overview::{achievements, goals, overview_stats, Achievement, Goal, OverviewStats};
use crate::records::{
    bodyweight_prs, get_pr_progression, one_rep_max_prs, recent_prs, set_max_prs, PrProgression,
};
use chrono::NaiveDate;
use fitlab_core::config::{AppConfig, Period};
use fitlab_core::{PersonalRecord, WorkoutSession};
use serde::Serialize;

/// Derived statistics for one dataset, filter and period.
///
/// Overview counters, goals and achievements always cover the whole
/// dataset; charts and record boards honour the filter.
#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    pub filter: StatsFilter,
    pub period: Period,
    pub overview: OverviewStats,
    pub avg_volume: f64,
    pub workouts_per_week: f64,
    pub recent_prs: Vec<PersonalRecord>,
    pub best_exercises: Vec<ExerciseVolume>,
    pub volume: Vec<VolumeBucket>,
    pub muscle_groups: Vec<MuscleGroupStat>,
    pub categories: Vec<CategoryStat>,
    pub library: LibraryCoverage,
    pub progression: Vec<PrProgression>,
    pub one_rep_max: Vec<PersonalRecord>,
    pub set_max: Vec<PersonalRecord>,
    pub bodyweight: Vec<PersonalRecord>,
    pub goals: Vec<Goal>,
    pub achievements: Vec<Achievement>,
}

impl StatsView {
    pub fn build(
        sessions: &[WorkoutSession],
        records: &[PersonalRecord],
        filter: StatsFilter,
        period: Period,
        config: &AppConfig,
        today: NaiveDate,
    ) -> Self {
        let overview = overview_stats(sessions, today);
        let filtered_sessions = filter.apply_sessions(sessions);
        let filtered_records = filter.apply_records(records);
        let pr_limit = if filter.has_active() {
            config.stats.filtered_pr_limit
        } else {
            config.stats.recent_pr_limit
        };
        tracing::debug!(
            "Building stats over {} of {} sessions ({} active filters)",
            filtered_sessions.len(),
            sessions.len(),
            filter.active_count()
        );

        Self {
            period,
            overview,
            avg_volume: calculate_average_volume(&filtered_sessions),
            workouts_per_week: calculate_workouts_per_week(&filtered_sessions),
            recent_prs: recent_prs(&filtered_records, pr_limit),
            best_exercises: get_best_exercises_by_volume(
                &filtered_sessions,
                config.stats.top_exercises,
            ),
            volume: aggregate_volume_by_period(
                &filtered_sessions,
                period,
                config.stats.week_start.weekday(),
            ),
            muscle_groups: calculate_muscle_group_balance(&filtered_sessions),
            categories: calculate_category_stats(&filtered_sessions),
            library: calculate_library_linkage_coverage(&filtered_sessions),
            progression: get_pr_progression(&filtered_records),
            one_rep_max: one_rep_max_prs(&filtered_records),
            set_max: set_max_prs(&filtered_records),
            bodyweight: bodyweight_prs(&filtered_records),
            goals: goals(&overview, &config.goals),
            achievements: achievements(&overview, records.len()),
            filter,
        }
    }
}
