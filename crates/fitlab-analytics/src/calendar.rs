//! Calendar grid and weekly training time for the planner and dashboard.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use fitlab_core::error::{FitError, Result};
use fitlab_core::WorkoutSession;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub completed: u32,
    pub planned: u32,
}

/// One month laid out as a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    /// "January 2026".
    pub title: String,
    /// Empty cells before day 1 in the first row.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Session counts for each day of `year`/`month`.
pub fn month_view(
    sessions: &[WorkoutSession],
    year: i32,
    month: u32,
    week_start: Weekday,
) -> Result<MonthView> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| FitError::InvalidDate(format!("{}-{:02}", year, month)))?;
    let length = days_in_month(first);

    let mut days: Vec<CalendarDay> = (1..=length)
        .map(|day| CalendarDay {
            day,
            completed: 0,
            planned: 0,
        })
        .collect();
    for session in sessions
        .iter()
        .filter(|s| s.date.year() == year && s.date.month() == month)
    {
        let cell = &mut days[session.date.day0() as usize];
        if session.is_planned {
            cell.planned += 1;
        } else {
            cell.completed += 1;
        }
    }

    let leading_blanks =
        (first.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;

    Ok(MonthView {
        title: first.format("%B %Y").to_string(),
        leading_blanks,
        days,
    })
}

/// Number of days in the month starting at `first`.
pub fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.map(|n| (n - first).num_days() as u32).unwrap_or(31)
}

/// Parse a `YYYY-MM` month argument.
pub fn parse_month(value: &str) -> Result<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|e| FitError::InvalidDate(format!("'{}': {}", value, e)))?;
    Ok((date.year(), date.month()))
}

/// Training minutes for each of the seven days starting at `week_start_date`.
pub fn weekly_minutes(sessions: &[WorkoutSession], week_start_date: NaiveDate) -> [f64; 7] {
    let mut minutes = [0.0; 7];
    let week_end = week_start_date + Duration::days(6);
    for session in sessions
        .iter()
        .filter(|s| s.is_completed() && s.date >= week_start_date && s.date <= week_end)
    {
        let idx = (session.date - week_start_date).num_days() as usize;
        minutes[idx] += session.minutes();
    }
    minutes
}

/// Planned sessions from `today` through the next `days` days, soonest first.
pub fn upcoming(sessions: &[WorkoutSession], today: NaiveDate, days: i64) -> Vec<&WorkoutSession> {
    let horizon = today + Duration::days(days);
    let mut planned: Vec<&WorkoutSession> = sessions
        .iter()
        .filter(|s| s.is_planned && s.date >= today && s.date <= horizon)
        .collect();
    planned.sort_by_key(|s| (s.date, s.start_time));
    planned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn session(date: NaiveDate, minutes: f64, planned: bool) -> WorkoutSession {
        let mut s = WorkoutSession::new("u1", "test", date);
        s.duration_minutes = Some(minutes);
        s.is_planned = planned;
        s
    }

    #[test]
    fn test_month_view_layout() {
        // 2026-01-01 is a Thursday.
        let view = month_view(&[], 2026, 1, Weekday::Mon).unwrap();
        assert_eq!(view.title, "January 2026");
        assert_eq!(view.leading_blanks, 3);
        assert_eq!(view.days.len(), 31);

        let sunday_first = month_view(&[], 2026, 1, Weekday::Sun).unwrap();
        assert_eq!(sunday_first.leading_blanks, 4);

        assert_eq!(month_view(&[], 2026, 2, Weekday::Mon).unwrap().days.len(), 28);
        assert!(month_view(&[], 2026, 13, Weekday::Mon).is_err());
    }

    #[test]
    fn test_month_view_counts() {
        let sessions = vec![
            session(day(1, 5), 45.0, false),
            session(day(1, 5), 30.0, false),
            session(day(1, 8), 60.0, true),
            session(day(2, 8), 60.0, false),
        ];
        let view = month_view(&sessions, 2026, 1, Weekday::Mon).unwrap();
        assert_eq!(view.days[4].completed, 2);
        assert_eq!(view.days[7].planned, 1);
        let total: u32 = view.days.iter().map(|d| d.completed + d.planned).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(day(12, 1)), 31);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2028, 2, 1).unwrap()), 29);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2026-03").unwrap(), (2026, 3));
        assert!(parse_month("2026-3x").is_err());
    }

    #[test]
    fn test_weekly_minutes() {
        let sessions = vec![
            session(day(1, 5), 45.0, false),
            session(day(1, 5), 15.0, false),
            session(day(1, 11), 30.0, false),
            session(day(1, 7), 60.0, true),
            session(day(1, 12), 90.0, false),
        ];
        let minutes = weekly_minutes(&sessions, day(1, 5));
        assert_eq!(minutes, [60.0, 0.0, 0.0, 0.0, 0.0, 0.0, 30.0]);
    }

    #[test]
    fn test_upcoming() {
        let sessions = vec![
            session(day(1, 9), 45.0, true),
            session(day(1, 6), 45.0, true),
            session(day(1, 20), 45.0, true),
            session(day(1, 7), 45.0, false),
        ];
        let next = upcoming(&sessions, day(1, 5), 7);
        let dates: Vec<_> = next.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(1, 6), day(1, 9)]);
    }
}
