//! Markdown report generation from workout data.
//!
//! Generates weekly and monthly training reports plus a compact text summary
//! for the shell.

use crate::aggregations::{
    calculate_muscle_group_balance, format_duration_minutes, format_tonnes,
    get_best_exercises_by_volume, total_completed_sets, total_volume,
};
use crate::calendar::days_in_month;
use crate::comparison::{period_metrics, DateRange};
use crate::overview::overview_stats;
use crate::records::{format_pr_value, recent_prs};
use chrono::{Datelike, Duration, NaiveDate};
use fitlab_core::error::{FitError, Result};
use fitlab_core::{PersonalRecord, WorkoutSession};

/// Report generator for creating markdown summaries.
pub struct ReportGenerator;

fn in_range(sessions: &[WorkoutSession], start: NaiveDate, end: NaiveDate) -> Vec<WorkoutSession> {
    sessions
        .iter()
        .filter(|s| s.is_completed() && s.date >= start && s.date <= end)
        .cloned()
        .collect()
}

fn minutes_of(sessions: &[WorkoutSession]) -> f64 {
    sessions.iter().map(WorkoutSession::minutes).sum()
}

fn push_top_exercises(report: &mut String, sessions: &[WorkoutSession], limit: usize) {
    let top = get_best_exercises_by_volume(sessions, limit);
    if top.is_empty() {
        return;
    }
    report.push_str("## Top Exercises\n\n");
    for (i, ex) in top.iter().enumerate() {
        report.push_str(&format!(
            "{}. **{}** - {} over {} sets\n",
            i + 1,
            ex.name,
            format_tonnes(ex.total_volume),
            ex.total_sets
        ));
    }
    report.push('\n');
}

fn push_muscle_balance(report: &mut String, sessions: &[WorkoutSession]) {
    let balance = calculate_muscle_group_balance(sessions);
    if balance.is_empty() {
        return;
    }
    report.push_str("## Muscle Group Balance\n\n");
    report.push_str("| Group | Sets | Share |\n");
    report.push_str("|-------|------|-------|\n");
    for stat in &balance {
        report.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            stat.group, stat.total_sets, stat.percentage
        ));
    }
    report.push('\n');
}

impl ReportGenerator {
    /// Generate a weekly report for the seven days starting at `week_start`.
    pub fn weekly_report(
        sessions: &[WorkoutSession],
        records: &[PersonalRecord],
        week_start: NaiveDate,
    ) -> String {
        let week_end = week_start + Duration::days(6);
        let week = in_range(sessions, week_start, week_end);

        let mut report = String::new();

        report.push_str(&format!(
            "# Weekly Report\n\n**{} - {}**\n\n",
            week_start.format("%B %d, %Y"),
            week_end.format("%B %d, %Y")
        ));

        report.push_str("## Overview\n\n");
        report.push_str(&format!("- **Workouts:** {}\n", week.len()));
        report.push_str(&format!(
            "- **Training Time:** {}\n",
            format_duration_minutes(minutes_of(&week))
        ));
        report.push_str(&format!("- **Volume:** {}\n", format_tonnes(total_volume(&week))));
        report.push_str(&format!("- **Sets:** {}\n", total_completed_sets(&week)));
        let new_prs = records
            .iter()
            .filter(|r| r.date >= week_start && r.date <= week_end)
            .count();
        report.push_str(&format!("- **New PRs:** {}\n\n", new_prs));

        // Daily breakdown table.
        report.push_str("## Daily Breakdown\n\n");
        report.push_str("| Day | Workouts | Time | Volume |\n");
        report.push_str("|-----|----------|------|--------|\n");

        let mut current_date = week_start;
        while current_date <= week_end {
            let day_name = current_date.format("%A");
            let day: Vec<WorkoutSession> = week
                .iter()
                .filter(|s| s.date == current_date)
                .cloned()
                .collect();
            if day.is_empty() {
                report.push_str(&format!("| {} | 0 | - | - |\n", day_name));
            } else {
                report.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    day_name,
                    day.len(),
                    format_duration_minutes(minutes_of(&day)),
                    format_tonnes(total_volume(&day)),
                ));
            }
            current_date += Duration::days(1);
        }
        report.push('\n');

        push_top_exercises(&mut report, &week, 5);
        push_muscle_balance(&mut report, &week);

        report
    }

    /// Generate a monthly report.
    pub fn monthly_report(sessions: &[WorkoutSession], year: i32, month: u32) -> Result<String> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| FitError::InvalidDate(format!("{}-{:02}", year, month)))?;
        let last_day = first_day + Duration::days(days_in_month(first_day) as i64 - 1);
        let month_sessions = in_range(sessions, first_day, last_day);

        let mut report = String::new();

        report.push_str(&format!(
            "# Monthly Report\n\n**{}**\n\n",
            first_day.format("%B %Y")
        ));

        let mut active_days: Vec<NaiveDate> = month_sessions.iter().map(|s| s.date).collect();
        active_days.sort();
        active_days.dedup();
        let total_minutes = minutes_of(&month_sessions);

        report.push_str("## Overview\n\n");
        report.push_str(&format!("- **Workouts:** {}\n", month_sessions.len()));
        report.push_str(&format!(
            "- **Active Days:** {} / {}\n",
            active_days.len(),
            last_day.day()
        ));
        report.push_str(&format!(
            "- **Training Time:** {}\n",
            format_duration_minutes(total_minutes)
        ));
        report.push_str(&format!(
            "- **Volume:** {}\n",
            format_tonnes(total_volume(&month_sessions))
        ));
        report.push_str(&format!(
            "- **Avg Workout:** {}\n\n",
            if month_sessions.is_empty() {
                "0m".to_string()
            } else {
                format_duration_minutes(total_minutes / month_sessions.len() as f64)
            }
        ));

        // Weekly breakdown table.
        report.push_str("## Weekly Breakdown\n\n");
        report.push_str("| Week | Workouts | Volume | Avg Sets |\n");
        report.push_str("|------|----------|--------|----------|\n");

        let mut week_num = 1;
        let mut current_date = first_day;
        while current_date <= last_day {
            let week_end = std::cmp::min(current_date + Duration::days(6), last_day);
            let metrics = period_metrics(
                &month_sessions,
                DateRange {
                    start: current_date,
                    end: week_end,
                },
            );
            report.push_str(&format!(
                "| Week {} | {} | {} | {:.1} |\n",
                week_num,
                metrics.workouts,
                format_tonnes(metrics.volume),
                metrics.avg_sets,
            ));

            current_date = week_end + Duration::days(1);
            week_num += 1;
        }
        report.push('\n');

        push_top_exercises(&mut report, &month_sessions, 10);
        push_muscle_balance(&mut report, &month_sessions);

        Ok(report)
    }

    /// Generate a compact summary suitable for display in the shell.
    pub fn text_summary(
        sessions: &[WorkoutSession],
        records: &[PersonalRecord],
        today: NaiveDate,
    ) -> String {
        let mut output = String::new();
        let stats = overview_stats(sessions, today);

        // Today.
        let today_sessions = in_range(sessions, today, today);
        if today_sessions.is_empty() {
            output.push_str("  Today: rest day\n");
        } else {
            output.push_str(&format!(
                "  Today: {} workout(s), {}\n",
                today_sessions.len(),
                format_duration_minutes(minutes_of(&today_sessions))
            ));
        }

        // This week.
        let week = in_range(sessions, today - Duration::days(6), today);
        output.push_str(&format!(
            "  Last 7 days: {} workouts, {}, {}\n",
            week.len(),
            format_duration_minutes(minutes_of(&week)),
            format_tonnes(total_volume(&week))
        ));

        // All time.
        output.push_str(&format!(
            "  All time: {} workouts, {:.1} hours, {} this month\n",
            stats.total_workouts, stats.total_hours, stats.this_month
        ));
        if stats.streak > 0 {
            output.push_str(&format!("  Streak: {} day(s)\n", stats.streak));
        }

        let recent = recent_prs(records, 3);
        if !recent.is_empty() {
            output.push_str("  Recent PRs:");
            for pr in &recent {
                output.push_str(&format!(" {} {};", pr.exercise_name, format_pr_value(pr)));
            }
            output.pop();
            output.push('\n');
        }

        output
    }
}
