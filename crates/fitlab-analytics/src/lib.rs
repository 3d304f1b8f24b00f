//! Statistics aggregation and reporting for fitlab workout data.
//!
//! Computes derived views from a session list: volume by period, muscle-group
//! balance, PR progression, period comparison, overview counters, calendar
//! grids and markdown reports. Nothing here mutates its input.

pub mod aggregations;
pub mod calendar;
pub mod comparison;
pub mod filters;
pub mod overview;
pub mod records;
pub mod reports;
pub mod view;

pub use aggregations::{
    aggregate_volume_by_period, calculate_muscle_group_balance, CategoryStat, ExerciseVolume,
    LibraryCoverage, MuscleGroupStat, VolumeBucket,
};
pub use calendar::{month_view, weekly_minutes, MonthView};
pub use comparison::{compare_periods, DateRange, PeriodComparison};
pub use filters::StatsFilter;
pub use overview::{overview_stats, Achievement, Goal, OverviewStats};
pub use records::{get_pr_progression, PrProgression};
pub use reports::ReportGenerator;
pub use view::StatsView;
