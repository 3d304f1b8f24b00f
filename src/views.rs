//! Terminal rendering of the dashboard, workout, calendar and stats screens.

use chrono::{Duration, NaiveDate, Weekday};
use clap::ValueEnum;
use fitlab_analytics::aggregations::{format_duration_minutes, format_tonnes};
use fitlab_analytics::calendar::{upcoming, weekly_minutes, MonthView};
use fitlab_analytics::comparison::{format_change, PeriodComparison};
use fitlab_analytics::overview::{achievements, current_streak, goals, overview_stats};
use fitlab_analytics::records::{format_pr_time, format_pr_value};
use fitlab_analytics::StatsView;
use fitlab_core::config::{AppConfig, DisplayConfig};
use fitlab_core::theme::ansi_fg;
use fitlab_core::{PersonalRecord, ThemeConfig, ThemeVariant, WorkoutSession, WorkoutType};
use std::fmt::Write as _;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Tabs of the statistics screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatsTab {
    #[default]
    Overview,
    Charts,
    Records,
    Goals,
}

/// Applies the active theme to terminal output.
pub struct Painter {
    theme: ThemeConfig,
    color: bool,
    width: usize,
}

impl Painter {
    pub fn new(variant: ThemeVariant, display: &DisplayConfig) -> Self {
        Self {
            theme: variant.config(),
            color: display.color,
            width: display.chart_width.max(4),
        }
    }

    /// Colourless painter with the default chart width.
    pub fn plain(variant: ThemeVariant) -> Self {
        Self::new(
            variant,
            &DisplayConfig {
                color: false,
                ..DisplayConfig::default()
            },
        )
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color && !code.is_empty() {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(&format!("{}{}", BOLD, self.theme.accent_ansi()), text)
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(&self.theme.accent_ansi(), text)
    }

    pub fn secondary(&self, text: &str) -> String {
        self.paint(&self.theme.secondary_ansi(), text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    /// Horizontal bar scaled so `max` fills the chart width.
    pub fn bar(&self, value: f64, max: f64) -> String {
        let cells = if max > 0.0 && value > 0.0 {
            ((value / max) * self.width as f64).round().max(1.0) as usize
        } else {
            0
        };
        self.accent(&"█".repeat(cells.min(self.width)))
    }

    fn colored_bar(&self, hex: &str, value: f64, max: f64) -> String {
        let cells = if max > 0.0 {
            ((value / max) * self.width as f64).round() as usize
        } else {
            0
        };
        self.paint(&ansi_fg(hex), &"█".repeat(cells.min(self.width)))
    }

    /// `[#####-----]` style progress meter for a 0..=1 fraction.
    pub fn progress(&self, fraction: f64) -> String {
        let filled = (fraction.clamp(0.0, 1.0) * self.width as f64).round() as usize;
        format!(
            "[{}{}]",
            self.secondary(&"#".repeat(filled)),
            "-".repeat(self.width - filled)
        )
    }

    fn heading(&self, out: &mut String, text: &str) {
        let _ = writeln!(out, "\n{}", self.title(text));
    }
}

fn type_label(kind: WorkoutType) -> &'static str {
    match kind {
        WorkoutType::Gym => "Gym",
        WorkoutType::Running => "Run",
        WorkoutType::Sprint => "Sprint",
        WorkoutType::Other => "Other",
    }
}

fn weekday_labels(week_start: Weekday) -> Vec<String> {
    let mut day = week_start;
    (0..7)
        .map(|_| {
            let label = format!("{:?}", day);
            day = day.succ();
            label
        })
        .collect()
}

/// Home screen: weekly training chart, today's session and quick counters.
pub fn render_dashboard(
    painter: &Painter,
    sessions: &[WorkoutSession],
    records: &[PersonalRecord],
    config: &AppConfig,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let week_start = config.stats.week_start.weekday();
    let first_day = fitlab_analytics::aggregations::week_start_of(today, week_start);
    let stats = overview_stats(sessions, today);

    let _ = writeln!(
        out,
        "{}  {}",
        painter.title("fitlab"),
        painter.dim(&today.format("%A, %B %-d").to_string())
    );
    let _ = writeln!(
        out,
        "  {} workouts  {:.1}h trained  {} this month  {} day streak",
        stats.total_workouts, stats.total_hours, stats.this_month, stats.streak
    );

    painter.heading(&mut out, "This Week");
    let minutes = weekly_minutes(sessions, first_day);
    let max = minutes.iter().cloned().fold(0.0, f64::max);
    for (label, value) in weekday_labels(week_start).iter().zip(minutes.iter()) {
        let _ = writeln!(
            out,
            "  {} {} {}",
            label,
            painter.bar(*value, max),
            painter.dim(&format_duration_minutes(*value))
        );
    }

    painter.heading(&mut out, "Today");
    let todays: Vec<&WorkoutSession> = sessions.iter().filter(|s| s.date == today).collect();
    if todays.is_empty() {
        let _ = writeln!(out, "  Rest day");
    }
    for session in todays {
        let _ = writeln!(
            out,
            "  {} {} - {} exercises, {} sets{}",
            painter.accent(&session.title),
            painter.dim(&format!("[{}]", session.id)),
            session.exercises.len(),
            session.total_sets(),
            if session.is_planned { " (planned)" } else { "" }
        );
    }

    let next = upcoming(sessions, today + Duration::days(1), 6);
    if !next.is_empty() {
        painter.heading(&mut out, "Upcoming");
        for session in next {
            let _ = writeln!(out, "  {}  {}", session.date.format("%a %d"), session.title);
        }
    }

    let latest = fitlab_analytics::records::recent_prs(records, config.stats.recent_pr_limit);
    if !latest.is_empty() {
        painter.heading(&mut out, "Recent PRs");
        for pr in &latest {
            let _ = writeln!(
                out,
                "  {} {}  {}",
                pr.exercise_name,
                painter.secondary(&format_pr_value(pr)),
                painter.dim(&pr.date.to_string())
            );
        }
    }
    out
}

/// One line per session, newest first.
pub fn render_workout_list(painter: &Painter, sessions: &[&WorkoutSession]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.title("Workouts"));
    if sessions.is_empty() {
        let _ = writeln!(out, "  No workouts.");
        return out;
    }
    for session in sessions {
        let detail = match session.workout_type {
            WorkoutType::Gym => format!(
                "{} exercises, {}",
                session.exercises.len(),
                format_tonnes(session.volume())
            ),
            _ => match session.distance_km {
                Some(km) => format!("{:.1} km", km),
                None => format!("{} exercises", session.exercises.len()),
            },
        };
        let _ = writeln!(
            out,
            "  {:<4} {}  {:<6} {:<24} {:>7}  {}{}",
            session.id,
            session.date,
            type_label(session.workout_type),
            session.title,
            format_duration_minutes(session.minutes()),
            detail,
            if session.is_planned {
                painter.dim(" (planned)")
            } else {
                String::new()
            }
        );
    }
    out
}

/// Full detail of a single session.
pub fn render_workout_detail(painter: &Painter, session: &WorkoutSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.title(&session.title));
    let when = match session.start_time {
        Some(t) => format!("{} {}", session.date.format("%A, %B %-d %Y"), t.format("%H:%M")),
        None => session.date.format("%A, %B %-d %Y").to_string(),
    };
    let _ = writeln!(out, "  {}  {}", painter.dim(&when), type_label(session.workout_type));
    let _ = writeln!(
        out,
        "  Duration {}  Sets {}  Volume {}",
        format_duration_minutes(session.minutes()),
        session.total_sets(),
        format_tonnes(session.volume())
    );
    if let Some(km) = session.distance_km {
        let _ = writeln!(out, "  Distance {:.1} km", km);
    }

    if !session.exercises.is_empty() {
        painter.heading(&mut out, "Exercises");
        for (i, ex) in session.exercises.iter().enumerate() {
            let prescription = match (ex.sets, ex.reps, ex.weight) {
                (Some(s), Some(r), Some(w)) if w > 0.0 => format!("{} × {} @ {}kg", s, r, w),
                (Some(s), Some(r), _) => format!("{} × {}", s, r),
                (Some(s), None, _) => format!("{} sets", s),
                _ => "-".to_string(),
            };
            let _ = writeln!(
                out,
                "  {:>2}. {:<24} {:<16} {}",
                i + 1,
                ex.name,
                prescription,
                painter.dim(ex.category.as_deref().unwrap_or(""))
            );
        }
    }
    if let Some(notes) = session.notes.as_deref().filter(|n| !n.is_empty()) {
        painter.heading(&mut out, "Notes");
        let _ = writeln!(out, "  {}", notes);
    }
    out
}

/// Month grid with per-day markers: `*` completed, `+` planned.
pub fn render_calendar(
    painter: &Painter,
    view: &MonthView,
    planned: &[&WorkoutSession],
    week_start: Weekday,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.title(&view.title));
    let header: Vec<String> = weekday_labels(week_start)
        .into_iter()
        .map(|d| format!("{:>4}", &d[..2]))
        .collect();
    let _ = writeln!(out, "{}", painter.dim(&header.concat()));

    let mut line = "    ".repeat(view.leading_blanks as usize);
    let mut column = view.leading_blanks;
    for day in &view.days {
        let marker = if day.completed > 0 {
            painter.accent("*")
        } else if day.planned > 0 {
            painter.secondary("+")
        } else {
            " ".to_string()
        };
        let _ = write!(line, "{:>3}{}", day.day, marker);
        column += 1;
        if column % 7 == 0 {
            let _ = writeln!(out, "{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        let _ = writeln!(out, "{}", line.trim_end());
    }
    let _ = writeln!(out, "{}", painter.dim("  * completed   + planned"));

    painter.heading(&mut out, "Upcoming This Week");
    if planned.is_empty() {
        let _ = writeln!(out, "  Nothing planned.");
    }
    for session in planned {
        let time = session
            .start_time
            .map(|t| t.format(" %H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {}{}  {} ({})",
            session.date.format("%a %b %-d"),
            time,
            session.title,
            type_label(session.workout_type)
        );
    }
    out
}

/// One tab of the statistics screen.
pub fn render_stats(painter: &Painter, view: &StatsView, tab: StatsTab) -> String {
    let mut out = String::new();
    let tabs: Vec<String> = StatsTab::value_variants()
        .iter()
        .map(|t| {
            let name = format!("{:?}", t);
            if *t == tab {
                painter.title(&format!("[{}]", name))
            } else {
                painter.dim(&name)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));
    if view.filter.has_active() {
        let _ = writeln!(
            out,
            "{}",
            painter.dim(&format!("{} filter(s) active", view.filter.active_count()))
        );
    }

    match tab {
        StatsTab::Overview => stats_overview(painter, view, &mut out),
        StatsTab::Charts => stats_charts(painter, view, &mut out),
        StatsTab::Records => stats_records(painter, view, &mut out),
        StatsTab::Goals => stats_goals(painter, view, &mut out),
    }
    out
}

fn stats_overview(painter: &Painter, view: &StatsView, out: &mut String) {
    let o = &view.overview;
    let _ = writeln!(
        out,
        "\n  {:>6}  {:>6}  {:>6}  {:>7}",
        o.streak,
        o.total_workouts,
        o.this_month,
        format!("{:.1}h", o.total_hours)
    );
    let _ = writeln!(
        out,
        "{}",
        painter.dim("  Streak   Total   Month    Hours")
    );

    painter.heading(out, "Quick Stats");
    let _ = writeln!(out, "  Avg Volume/Workout  {}", format_tonnes(view.avg_volume));
    let _ = writeln!(out, "  Workouts/Week       {:.1}", view.workouts_per_week);
    let _ = writeln!(out, "  Recent PRs          {}", view.recent_prs.len());

    if !view.recent_prs.is_empty() {
        painter.heading(out, "Recent Personal Records");
        for pr in &view.recent_prs {
            let _ = writeln!(
                out,
                "  {:<20} {:<14} {}",
                pr.exercise_name,
                painter.secondary(&format_pr_value(pr)),
                painter.dim(&pr.date.to_string())
            );
        }
    }

    if !view.best_exercises.is_empty() {
        painter.heading(out, "Top Exercises by Volume");
        for (i, ex) in view.best_exercises.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {:<20} {:>7}  {} sets, avg {:.1}kg",
                i + 1,
                ex.name,
                format_tonnes(ex.total_volume),
                ex.total_sets,
                ex.avg_weight
            );
        }
    }
}

fn stats_charts(painter: &Painter, view: &StatsView, out: &mut String) {
    painter.heading(out, &format!("{} Volume", view.period.label()));
    if view.volume.is_empty() {
        let _ = writeln!(out, "  No completed workouts.");
    }
    let max = view.volume.iter().map(|b| b.volume).fold(0.0, f64::max);
    for bucket in &view.volume {
        let _ = writeln!(
            out,
            "  {:<10} {} {}",
            bucket.label,
            painter.bar(bucket.volume, max),
            painter.dim(&format_tonnes(bucket.volume))
        );
    }

    painter.heading(out, "Muscle Group Balance");
    let max = view
        .muscle_groups
        .iter()
        .map(|g| g.total_sets as f64)
        .fold(0.0, f64::max);
    for group in &view.muscle_groups {
        let _ = writeln!(
            out,
            "  {:<10} {} {} sets ({:.0}%)",
            group.group.name(),
            painter.colored_bar(group.color, group.total_sets as f64, max),
            group.total_sets,
            group.percentage
        );
    }

    if !view.categories.is_empty() {
        painter.heading(out, "Categories");
        for cat in &view.categories {
            let _ = writeln!(
                out,
                "  {:<14} {:>4} sets  {:>3} exercises  {}",
                cat.category,
                cat.total_sets,
                cat.exercise_count,
                format_tonnes(cat.total_volume)
            );
        }
        let _ = writeln!(
            out,
            "  Library Coverage {}/{} ({:.0}%)",
            view.library.linked, view.library.total, view.library.percentage
        );
    }

    let trends: Vec<_> = view.progression.iter().filter(|p| p.points.len() > 1).collect();
    if !trends.is_empty() {
        painter.heading(out, "PR Progression");
        for progression in trends {
            let timed = progression
                .points
                .iter()
                .any(|p| p.workout_type != WorkoutType::Gym);
            let values: Vec<String> = progression
                .points
                .iter()
                .map(|p| {
                    if timed {
                        format_pr_time(p.value)
                    } else {
                        format!("{}", p.value)
                    }
                })
                .collect();
            let change = match progression.improvement() {
                Some(delta) if timed => format!(" ({:+.2}s)", delta),
                Some(delta) => format!(" ({:+}kg)", delta),
                None => String::new(),
            };
            let _ = writeln!(
                out,
                "  {:<20} {}{}",
                progression.exercise_name,
                painter.secondary(&values.join(" → ")),
                painter.dim(&change)
            );
        }
    }
}

fn pr_board(painter: &Painter, out: &mut String, title: &str, board: &[PersonalRecord]) {
    if board.is_empty() {
        return;
    }
    painter.heading(out, title);
    let max = board
        .iter()
        .map(|r| r.weight.unwrap_or(r.reps.unwrap_or(0) as f64))
        .fold(0.0, f64::max);
    for pr in board {
        let value = pr.weight.unwrap_or(pr.reps.unwrap_or(0) as f64);
        let _ = writeln!(
            out,
            "  {:<20} {:<12} {}",
            pr.exercise_name,
            format_pr_value(pr),
            painter.bar(value, max)
        );
    }
}

fn stats_records(painter: &Painter, view: &StatsView, out: &mut String) {
    pr_board(painter, out, "One Rep Max", &view.one_rep_max);
    pr_board(painter, out, "Set Max (6+ reps)", &view.set_max);
    pr_board(painter, out, "Bodyweight", &view.bodyweight);
    if view.one_rep_max.is_empty() && view.set_max.is_empty() && view.bodyweight.is_empty() {
        let suffix = if view.filter.has_active() {
            " for selected filters"
        } else {
            ""
        };
        let _ = writeln!(out, "\n  No personal records found{}", suffix);
    }
}

fn stats_goals(painter: &Painter, view: &StatsView, out: &mut String) {
    painter.heading(out, "Active Goals");
    for goal in &view.goals {
        let _ = writeln!(
            out,
            "  {:<28} {}/{}\n  {}",
            goal.name,
            goal.current,
            goal.target,
            painter.progress(goal.progress)
        );
    }

    painter.heading(out, "Achievements Unlocked");
    if view.achievements.is_empty() {
        let _ = writeln!(out, "  Keep training to unlock achievements!");
    }
    for achievement in &view.achievements {
        let _ = writeln!(out, "  {}", painter.accent(achievement.label()));
    }
}

/// Side-by-side table for a period comparison.
pub fn render_comparison(painter: &Painter, cmp: &PeriodComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.title("Period Comparison"));
    let _ = writeln!(out, "  Period 1: {}", cmp.period1_range);
    let _ = writeln!(out, "  Period 2: {}", cmp.period2_range);
    let rows = [
        (
            "Workouts",
            cmp.period1.workouts.to_string(),
            cmp.period2.workouts.to_string(),
            cmp.comparison.workouts,
        ),
        (
            "Volume",
            format_tonnes(cmp.period1.volume),
            format_tonnes(cmp.period2.volume),
            cmp.comparison.volume,
        ),
        (
            "Avg Sets",
            format!("{:.1}", cmp.period1.avg_sets),
            format!("{:.1}", cmp.period2.avg_sets),
            cmp.comparison.avg_sets,
        ),
    ];
    for (label, p1, p2, change) in rows {
        let delta = format_change(change);
        let delta = match change {
            Some(c) if c > 0.0 => painter.accent(&delta),
            Some(c) if c < 0.0 => painter.secondary(&delta),
            _ => painter.dim(&delta),
        };
        let _ = writeln!(out, "  {:<10} {:>8} → {:<8} {}", label, p1, p2, delta);
    }
    out
}

/// All theme variants, marking the active one.
pub fn render_theme_list(painter: &Painter, active: ThemeVariant) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.title("Themes"));
    for variant in ThemeVariant::ALL {
        let marker = if variant == active { "◀" } else { "" };
        let swatch = painter.paint(&ansi_fg(variant.config().bar_color), "■■");
        let _ = writeln!(
            out,
            "  {} {:<14} {:<8} {}",
            swatch,
            variant.id(),
            variant.display_name(),
            marker
        );
    }
    out
}

/// Style tokens of one variant.
pub fn render_theme(painter: &Painter, variant: ThemeVariant) -> String {
    let mut out = String::new();
    let config = variant.config();
    let _ = writeln!(
        out,
        "{} {}",
        painter.title(variant.display_name()),
        painter.dim(if config.is_dark() { "(dark)" } else { "(light)" })
    );
    for (key, value) in config.tokens() {
        let _ = writeln!(out, "  {:<14} {}", key, value);
    }
    out
}

/// Values accepted by `stats --exercise` and `stats --category`.
pub fn render_filter_choices(painter: &Painter, exercises: &[String], categories: &[String]) -> String {
    let mut out = String::new();
    for (title, values) in [("Exercises", exercises), ("Categories", categories)] {
        let _ = writeln!(out, "{}", painter.title(title));
        if values.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for value in values {
            let _ = writeln!(out, "  {}", value);
        }
    }
    out
}

/// Streak summary line used by the shell prompt.
pub fn streak_badge(sessions: &[WorkoutSession], today: NaiveDate) -> String {
    match current_streak(sessions, today) {
        0 => String::new(),
        n => format!("{}d", n),
    }
}

/// Goals and achievements without the rest of the stats screen.
pub fn render_goals_summary(
    painter: &Painter,
    sessions: &[WorkoutSession],
    records: &[PersonalRecord],
    config: &AppConfig,
    today: NaiveDate,
) -> String {
    let stats = overview_stats(sessions, today);
    let mut out = String::new();
    for goal in goals(&stats, &config.goals) {
        let _ = writeln!(
            out,
            "  {:<28} {} {}/{}",
            goal.name,
            painter.progress(goal.progress),
            goal.current,
            goal.target
        );
    }
    let unlocked: Vec<&str> = achievements(&stats, records.len())
        .iter()
        .map(|a| a.label())
        .collect();
    if !unlocked.is_empty() {
        let _ = writeln!(out, "  Unlocked: {}", unlocked.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlab_analytics::calendar::month_view;
    use fitlab_analytics::comparison::{compare_periods, DateRange};
    use fitlab_analytics::StatsFilter;
    use fitlab_core::config::Period;
    use fitlab_core::demo::demo_dataset;
    use fitlab_core::Exercise;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn painter() -> Painter {
        Painter::plain(ThemeVariant::Material)
    }

    #[test]
    fn test_plain_painter_emits_no_escapes() {
        let data = demo_dataset(today());
        let out = render_dashboard(
            &painter(),
            &data.sessions,
            &data.personal_records,
            &AppConfig::default(),
            today(),
        );
        assert!(!out.contains('\x1b'));
        assert!(out.contains("This Week"));
        assert!(out.contains("Upper Body Strength"));
    }

    #[test]
    fn test_colored_painter_uses_theme_accent() {
        let painter = Painter::new(ThemeVariant::Dark, &DisplayConfig::default());
        let accent = painter.accent("x");
        assert!(accent.starts_with(&painter.theme().accent_ansi()));
        assert!(accent.ends_with(RESET));
    }

    #[test]
    fn test_bar_scaling() {
        let p = painter();
        assert_eq!(p.bar(0.0, 10.0), "");
        assert_eq!(p.bar(10.0, 10.0).chars().count(), 32);
        assert_eq!(p.bar(5.0, 10.0).chars().count(), 16);
        assert_eq!(p.bar(0.01, 10.0).chars().count(), 1);
    }

    #[test]
    fn test_progress_meter() {
        let p = painter();
        let meter = p.progress(0.5);
        assert_eq!(meter.len(), 34);
        assert_eq!(meter.matches('#').count(), 16);
        assert_eq!(p.progress(2.0).matches('#').count(), 32);
    }

    #[test]
    fn test_workout_detail() {
        let data = demo_dataset(today());
        let session = data.find_session("1").unwrap();
        let out = render_workout_detail(&painter(), session);
        assert!(out.contains("Upper Body Strength"));
        assert!(out.contains("Exercises"));
        assert!(out.contains("Bench Press"));
    }

    #[test]
    fn test_workout_list_marks_planned() {
        let mut planned = WorkoutSession::new("u1", "Push Day", today());
        planned.is_planned = true;
        planned.exercises = vec![Exercise::strength("Bench Press", 3, 8, 80.0)];
        let out = render_workout_list(&painter(), &[&planned]);
        assert!(out.contains("Push Day"));
        assert!(out.contains("(planned)"));
        assert!(render_workout_list(&painter(), &[]).contains("No workouts."));
    }

    #[test]
    fn test_calendar_grid() {
        let data = demo_dataset(today());
        let view = month_view(&data.sessions, 2026, 1, Weekday::Mon).unwrap();
        let out = render_calendar(&painter(), &view, &[], Weekday::Mon);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "January 2026");
        assert!(lines[1].trim_start().starts_with("Mo"));
        // Thursday start: three blank cells then day 1.
        assert!(lines[2].starts_with("              1"));
        assert!(out.contains("Nothing planned."));
    }

    #[test]
    fn test_stats_tabs() {
        let data = demo_dataset(today());
        let view = StatsView::build(
            &data.sessions,
            &data.personal_records,
            StatsFilter::default(),
            Period::Month,
            &AppConfig::default(),
            today(),
        );
        let p = painter();
        assert!(render_stats(&p, &view, StatsTab::Overview).contains("Quick Stats"));
        assert!(render_stats(&p, &view, StatsTab::Charts).contains("Muscle Group Balance"));
        assert!(render_stats(&p, &view, StatsTab::Records).contains("One Rep Max"));
        assert!(render_stats(&p, &view, StatsTab::Goals).contains("Active Goals"));
    }

    #[test]
    fn test_charts_show_pr_improvement() {
        let records = vec![
            PersonalRecord::lift("Squat", NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(), 140.0, 1),
            PersonalRecord::lift("Squat", NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(), 150.0, 1),
            PersonalRecord::sprint("100m", NaiveDate::from_ymd_opt(2025, 12, 5).unwrap(), 12.8),
            PersonalRecord::sprint("100m", NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 12.4),
        ];
        let view = StatsView::build(
            &[],
            &records,
            StatsFilter::default(),
            Period::Month,
            &AppConfig::default(),
            today(),
        );
        let out = render_stats(&painter(), &view, StatsTab::Charts);
        assert!(out.contains("PR Progression"));
        assert!(out.contains("140 → 150 (+10kg)"));
        assert!(out.contains("12.80s → 12.40s (-0.40s)"));
    }

    #[test]
    fn test_comparison_table() {
        let cmp = compare_periods(
            &[],
            DateRange::parse("2026-01-01", "2026-01-31").unwrap(),
            DateRange::parse("2026-02-01", "2026-02-28").unwrap(),
        );
        let out = render_comparison(&painter(), &cmp);
        assert!(out.contains("Workouts"));
        assert!(out.contains("+0.0%"));
    }

    #[test]
    fn test_theme_views() {
        let p = painter();
        let list = render_theme_list(&p, ThemeVariant::Neo);
        assert_eq!(list.matches('◀').count(), 1);
        let show = render_theme(&p, ThemeVariant::Glassmorphism);
        assert!(show.starts_with("Glass"));
        assert!(show.contains("bar_color"));
    }

    #[test]
    fn test_filter_choices() {
        let out = render_filter_choices(&painter(), &["Squat".to_string()], &[]);
        assert_eq!(out, "Exercises\n  Squat\nCategories\n  (none)\n");
    }

    #[test]
    fn test_small_helpers() {
        assert_eq!(weekday_labels(Weekday::Sun)[0], "Sun");
        assert_eq!(streak_badge(&[], today()), "");
    }
}
