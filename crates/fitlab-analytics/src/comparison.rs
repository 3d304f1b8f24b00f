//! Side-by-side comparison of two date ranges.

use chrono::NaiveDate;
use fitlab_core::error::{FitError, Result};
use fitlab_core::WorkoutSession;
use serde::Serialize;
use std::fmt;

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(FitError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| FitError::InvalidDate(format!("'{}': {}", value, e)))
}

/// Aggregate metrics for one range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodMetrics {
    pub workouts: u32,
    pub volume: f64,
    pub avg_sets: f64,
}

/// Percentage change per metric, period 1 → period 2.
///
/// `None` means the change is undefined: the first period was zero and
/// the second was not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricChanges {
    pub workouts: Option<f64>,
    pub volume: Option<f64>,
    pub avg_sets: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub period1_range: DateRange,
    pub period2_range: DateRange,
    pub period1: PeriodMetrics,
    pub period2: PeriodMetrics,
    pub comparison: MetricChanges,
}

/// Compute metrics for the completed sessions inside `range`.
pub fn period_metrics(sessions: &[WorkoutSession], range: DateRange) -> PeriodMetrics {
    let mut workouts = 0u32;
    let mut volume = 0.0;
    let mut sets = 0u32;
    for session in sessions
        .iter()
        .filter(|s| s.is_completed() && range.contains(s.date))
    {
        workouts += 1;
        volume += session.volume();
        sets = sets.saturating_add(session.total_sets());
    }
    PeriodMetrics {
        workouts,
        volume,
        avg_sets: if workouts == 0 {
            0.0
        } else {
            sets as f64 / workouts as f64
        },
    }
}

/// Percentage change from `before` to `after`.
///
/// Both zero is no change (`Some(0.0)`); a zero baseline with a non-zero
/// result has no defined percentage (`None`).
pub fn percent_change(before: f64, after: f64) -> Option<f64> {
    if before == 0.0 {
        if after == 0.0 {
            Some(0.0)
        } else {
            None
        }
    } else {
        Some((after - before) / before * 100.0)
    }
}

/// Compare two ranges. Overlapping ranges are allowed but logged.
pub fn compare_periods(
    sessions: &[WorkoutSession],
    period1: DateRange,
    period2: DateRange,
) -> PeriodComparison {
    if period1.overlaps(&period2) {
        tracing::warn!("Comparing overlapping periods {} and {}", period1, period2);
    }
    let p1 = period_metrics(sessions, period1);
    let p2 = period_metrics(sessions, period2);

    PeriodComparison {
        period1_range: period1,
        period2_range: period2,
        period1: p1,
        period2: p2,
        comparison: MetricChanges {
            workouts: percent_change(p1.workouts as f64, p2.workouts as f64),
            volume: percent_change(p1.volume, p2.volume),
            avg_sets: percent_change(p1.avg_sets, p2.avg_sets),
        },
    }
}

/// Signed percentage for display ("+12.5%", "-3.0%", "n/a").
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(c) => {
            let rounded = (c * 10.0).round() / 10.0;
            if rounded >= 0.0 {
                format!("+{:.1}%", rounded.abs())
            } else {
                format!("{:.1}%", rounded)
            }
        }
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlab_core::Exercise;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn session(date: NaiveDate, sets: u32, weight: f64) -> WorkoutSession {
        let mut s = WorkoutSession::new("u1", "test", date);
        s.exercises = vec![Exercise::strength("Squat", sets, 5, weight)];
        s
    }

    fn range(a: NaiveDate, b: NaiveDate) -> DateRange {
        DateRange::new(a, b).unwrap()
    }

    #[test]
    fn test_date_range_validation() {
        assert!(DateRange::new(day(1, 10), day(1, 1)).is_err());
        let r = DateRange::parse("2026-01-01", "2026-01-31").unwrap();
        assert_eq!(r.days(), 31);
        assert!(r.contains(day(1, 31)));
        assert!(!r.contains(day(2, 1)));
        assert!(DateRange::parse("2026-13-01", "2026-01-31").is_err());
    }

    #[test]
    fn test_overlaps() {
        let jan = range(day(1, 1), day(1, 31));
        let feb = range(day(2, 1), day(2, 28));
        let mid = range(day(1, 20), day(2, 10));
        assert!(!jan.overlaps(&feb));
        assert!(jan.overlaps(&mid));
        assert!(feb.overlaps(&mid));
    }

    #[test]
    fn test_compare_periods() {
        let sessions = vec![
            session(day(1, 5), 4, 100.0),
            session(day(1, 12), 2, 100.0),
            session(day(2, 3), 3, 100.0),
            session(day(2, 10), 3, 100.0),
            session(day(2, 17), 3, 100.0),
        ];
        let result = compare_periods(
            &sessions,
            range(day(1, 1), day(1, 31)),
            range(day(2, 1), day(2, 28)),
        );
        assert_eq!(result.period1.workouts, 2);
        assert_eq!(result.period2.workouts, 3);
        assert_eq!(result.period1.volume, 3000.0);
        assert_eq!(result.period2.volume, 4500.0);
        assert_eq!(result.period1.avg_sets, 3.0);
        assert_eq!(result.comparison.workouts, Some(50.0));
        assert_eq!(result.comparison.volume, Some(50.0));
        assert_eq!(result.comparison.avg_sets, Some(0.0));
    }

    #[test]
    fn test_empty_first_period_is_defined() {
        let sessions = vec![session(day(2, 3), 3, 100.0)];
        let result = compare_periods(
            &sessions,
            range(day(1, 1), day(1, 31)),
            range(day(2, 1), day(2, 28)),
        );
        assert_eq!(result.period1.workouts, 0);
        assert_eq!(result.period1.avg_sets, 0.0);
        assert_eq!(result.comparison.workouts, None);
        assert_eq!(format_change(result.comparison.volume), "n/a");
    }

    #[test]
    fn test_both_periods_empty() {
        let result = compare_periods(
            &[],
            range(day(1, 1), day(1, 31)),
            range(day(2, 1), day(2, 28)),
        );
        assert_eq!(result.comparison.workouts, Some(0.0));
        assert_eq!(result.comparison.volume, Some(0.0));
    }

    #[test]
    fn test_planned_sessions_excluded() {
        let mut planned = session(day(1, 5), 4, 100.0);
        planned.is_planned = true;
        let metrics = period_metrics(&[planned], range(day(1, 1), day(1, 31)));
        assert_eq!(metrics.workouts, 0);
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(12.54)), "+12.5%");
        assert_eq!(format_change(Some(0.0)), "+0.0%");
        assert_eq!(format_change(Some(-3.0)), "-3.0%");
        assert_eq!(format_change(Some(-0.04)), "+0.0%");
        assert_eq!(format_change(Some(-0.05)), "-0.1%");
    }
}
