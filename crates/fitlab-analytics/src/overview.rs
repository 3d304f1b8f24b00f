//! Headline counters, goals and achievements.

use chrono::{Datelike, Duration, NaiveDate};
use fitlab_core::config::GoalsConfig;
use fitlab_core::WorkoutSession;
use serde::Serialize;
use std::collections::BTreeSet;

/// Counters shown at the top of the statistics screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_workouts: u32,
    pub total_hours: f64,
    /// Completed workouts in the calendar month of `today`.
    pub this_month: u32,
    /// Consecutive training days ending today or yesterday.
    pub streak: u32,
}

pub fn overview_stats(sessions: &[WorkoutSession], today: NaiveDate) -> OverviewStats {
    let completed: Vec<&WorkoutSession> = sessions.iter().filter(|s| s.is_completed()).collect();
    let minutes: f64 = completed.iter().map(|s| s.minutes()).sum();
    let this_month = completed
        .iter()
        .filter(|s| s.date.year() == today.year() && s.date.month() == today.month())
        .count() as u32;

    OverviewStats {
        total_workouts: completed.len() as u32,
        total_hours: minutes / 60.0,
        this_month,
        streak: current_streak(sessions, today),
    }
}

/// Length of the run of distinct completed days that ends today or
/// yesterday. Anything older breaks the streak.
pub fn current_streak(sessions: &[WorkoutSession], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = sessions
        .iter()
        .filter(|s| s.is_completed() && s.date <= today)
        .map(|s| s.date)
        .collect();

    let mut cursor = match days.last() {
        Some(&latest) if latest >= today - Duration::days(1) => latest,
        _ => return 0,
    };
    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

/// Progress towards a numeric target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Goal {
    pub name: String,
    pub current: u32,
    pub target: u32,
    /// `current / target`, clamped to 0..=1.
    pub progress: f64,
}

impl Goal {
    pub fn new(name: impl Into<String>, current: u32, target: u32) -> Self {
        let progress = if target == 0 {
            1.0
        } else {
            (current as f64 / target as f64).min(1.0)
        };
        Self {
            name: name.into(),
            current,
            target,
            progress,
        }
    }

    pub fn is_met(&self) -> bool {
        self.current >= self.target
    }
}

/// The streak goal and the monthly workout goal.
pub fn goals(stats: &OverviewStats, config: &GoalsConfig) -> Vec<Goal> {
    vec![
        Goal::new(
            format!("{}-Day Streak", config.streak_days),
            stats.streak.min(config.streak_days),
            config.streak_days,
        ),
        Goal::new(
            format!("Monthly Goal ({} workouts)", config.monthly_workouts),
            stats.this_month,
            config.monthly_workouts,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Achievement {
    TenWorkouts,
    FiftyWorkouts,
    WeekStreak,
    FivePrs,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::TenWorkouts,
        Achievement::FiftyWorkouts,
        Achievement::WeekStreak,
        Achievement::FivePrs,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Achievement::TenWorkouts => "10 Workouts",
            Achievement::FiftyWorkouts => "50 Workouts",
            Achievement::WeekStreak => "7-Day Streak",
            Achievement::FivePrs => "5 PRs",
        }
    }

    fn unlocked(&self, stats: &OverviewStats, pr_count: usize) -> bool {
        match self {
            Achievement::TenWorkouts => stats.total_workouts >= 10,
            Achievement::FiftyWorkouts => stats.total_workouts >= 50,
            Achievement::WeekStreak => stats.streak >= 7,
            Achievement::FivePrs => pr_count >= 5,
        }
    }
}

/// Achievements unlocked so far, in display order.
pub fn achievements(stats: &OverviewStats, pr_count: usize) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| a.unlocked(stats, pr_count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn session(date: NaiveDate, minutes: f64) -> WorkoutSession {
        let mut s = WorkoutSession::new("u1", "test", date);
        s.duration_minutes = Some(minutes);
        s
    }

    #[test]
    fn test_overview_counts_completed_only() {
        let mut planned = session(day(1, 20), 60.0);
        planned.is_planned = true;
        let sessions = vec![
            session(day(1, 10), 60.0),
            session(day(1, 12), 30.0),
            session(day(12, 30), 90.0),
            planned,
        ];
        let stats = overview_stats(&sessions, day(1, 15));
        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.total_hours, 3.0);
        assert_eq!(stats.this_month, 2);
    }

    #[test]
    fn test_streak_from_today() {
        let sessions = vec![
            session(day(1, 15), 30.0),
            session(day(1, 14), 30.0),
            session(day(1, 14), 30.0),
            session(day(1, 13), 30.0),
            session(day(1, 11), 30.0),
        ];
        assert_eq!(current_streak(&sessions, day(1, 15)), 3);
    }

    #[test]
    fn test_streak_from_yesterday() {
        let sessions = vec![session(day(1, 14), 30.0), session(day(1, 13), 30.0)];
        assert_eq!(current_streak(&sessions, day(1, 15)), 2);
    }

    #[test]
    fn test_streak_broken() {
        let sessions = vec![session(day(1, 12), 30.0)];
        assert_eq!(current_streak(&sessions, day(1, 15)), 0);
        assert_eq!(current_streak(&[], day(1, 15)), 0);
    }

    #[test]
    fn test_streak_ignores_planned_days() {
        let mut planned = session(day(1, 15), 30.0);
        planned.is_planned = true;
        let sessions = vec![planned, session(day(1, 14), 30.0)];
        assert_eq!(current_streak(&sessions, day(1, 15)), 1);
    }

    #[test]
    fn test_goals_clamped() {
        let stats = OverviewStats {
            total_workouts: 20,
            total_hours: 10.0,
            this_month: 6,
            streak: 9,
        };
        let goals = goals(&stats, &GoalsConfig::default());
        assert_eq!(goals[0].current, 7);
        assert_eq!(goals[0].progress, 1.0);
        assert!(goals[0].is_met());
        assert_eq!(goals[1].progress, 0.5);
        assert!(!goals[1].is_met());
    }

    #[test]
    fn test_achievements() {
        let stats = OverviewStats {
            total_workouts: 12,
            total_hours: 10.0,
            this_month: 6,
            streak: 2,
        };
        assert_eq!(achievements(&stats, 5), vec![Achievement::TenWorkouts, Achievement::FivePrs]);
        let none = OverviewStats {
            total_workouts: 0,
            total_hours: 0.0,
            this_month: 0,
            streak: 0,
        };
        assert!(achievements(&none, 0).is_empty());
    }
}
