use crate::views::{self, Painter, StatsTab};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use fitlab_analytics::aggregations::week_start_of;
use fitlab_analytics::calendar::{month_view, parse_month, upcoming};
use fitlab_analytics::comparison::{compare_periods, parse_date, DateRange};
use fitlab_analytics::{ReportGenerator, StatsFilter, StatsView};
use fitlab_core::{AppConfig, Dataset, ThemeVariant, WorkoutSession, WorkoutStore, WorkoutType};
use rustyline::error::ReadlineError;
use rustyline::{Config as RlConfig, DefaultEditor};

const BANNER: &str = r#"
  ╔═══════════════════════════════════════════╗
  ║               fitlab v0.1.0               ║
  ║     Workout statistics in the terminal    ║
  ╚═══════════════════════════════════════════╝

  Type a command and press Enter. /help lists them all.
"#;

const HELP: &str = "  /dashboard             Weekly chart, today and recent PRs
  /workouts [type]       List workouts
  /workout <id>          Show one workout
  /plan <date> <title>   Plan a workout and save it
  /remove <id>           Delete a workout and save
  /calendar [YYYY-MM]    Month calendar
  /stats [tab]           overview | charts | records | goals
  /compare a b c d       Compare two date ranges
  /report weekly|monthly Markdown report
  /summary               Compact text summary
  /goals                 Goal progress and achievements
  /theme [variant]       Switch theme (no argument cycles)
  /themes                List themes
  /help                  Show this help
  /exit                  Quit";

/// Shell state carried between commands.
struct Shell {
    config: AppConfig,
    store: WorkoutStore,
    data: Dataset,
    today: NaiveDate,
}

impl Shell {
    fn painter(&self) -> Painter {
        Painter::new(self.config.display.theme, &self.config.display)
    }
}

/// Run the interactive shell.
pub fn run(config: AppConfig, store: WorkoutStore, today: NaiveDate) -> Result<()> {
    println!("{}", BANNER);
    println!(
        "  Theme: {}  |  Data: {} ({:?})",
        config.display.theme.display_name(),
        store.path().display(),
        store.source()
    );
    println!();

    let data = store.user_dataset();
    let mut shell = Shell {
        config,
        store,
        data,
        today,
    };
    print!("{}", ReportGenerator::text_summary(&shell.data.sessions, &shell.data.personal_records, today));

    // Set up rustyline.
    let rl_config = RlConfig::builder().auto_add_history(true).build();
    let history_path = AppConfig::data_dir().join("repl_history.txt");
    let mut rl = DefaultEditor::with_config(rl_config)?;
    let _ = rl.load_history(&history_path);

    loop {
        let badge = views::streak_badge(&shell.data.sessions, shell.today);
        let painter = shell.painter();
        let prompt = format!(
            "{} {}{} ",
            painter.title("fitlab"),
            painter.dim(&format!("[{}]", shell.config.display.theme.id())),
            if badge.is_empty() {
                " ❯".to_string()
            } else {
                format!(" {} ❯", painter.secondary(&badge))
            }
        );

        match rl.readline(&prompt) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                match handle_command(input, &mut shell) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => eprintln!("\x1b[0;31mError: {}\x1b[0m", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    // Save history.
    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}

/// Handle one command line. Returns `true` to continue the loop, `false` to exit.
fn handle_command(input: &str, shell: &mut Shell) -> Result<bool> {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("");
    let cmd = cmd.strip_prefix('/').unwrap_or(cmd);
    let args: Vec<&str> = parts.collect();
    let painter = shell.painter();
    let week_start = shell.config.stats.week_start.weekday();
    let data = &shell.data;

    match cmd {
        "exit" | "quit" | "q" => {
            println!("Goodbye!");
            return Ok(false);
        }
        "dashboard" | "d" => {
            print!(
                "{}",
                views::render_dashboard(
                    &painter,
                    &data.sessions,
                    &data.personal_records,
                    &shell.config,
                    shell.today
                )
            );
        }
        "workouts" | "ls" => {
            let kind = args.first().and_then(|k| WorkoutType::parse(k));
            if let (Some(arg), None) = (args.first(), kind) {
                println!("Unknown workout type: {}", arg);
                return Ok(true);
            }
            let sessions: Vec<_> = shell
                .store
                .sessions()
                .into_iter()
                .filter(|s| kind.map_or(true, |k| s.workout_type == k))
                .collect();
            print!("{}", views::render_workout_list(&painter, &sessions));
        }
        "workout" | "show" => match args.first() {
            Some(id) => {
                let session = shell.store.get_session(id)?;
                print!("{}", views::render_workout_detail(&painter, session));
            }
            None => println!("Usage: /workout <id>"),
        },
        "plan" => {
            if args.len() < 2 {
                println!("Usage: /plan <YYYY-MM-DD> <title>");
                return Ok(true);
            }
            let date = parse_date(args[0])?;
            let mut session = WorkoutSession::new(shell.store.user_id(), args[1..].join(" "), date);
            session.is_planned = true;
            let id = session.id.clone();
            shell.store.add_session(session)?;
            shell.store.save()?;
            shell.data = shell.store.user_dataset();
            println!("Planned workout {}", id);
        }
        "remove" | "rm" => match args.first() {
            Some(id) => {
                let removed = shell.store.remove_session(id)?;
                shell.store.save()?;
                shell.data = shell.store.user_dataset();
                println!("Removed {} ({})", removed.title, removed.date);
            }
            None => println!("Usage: /remove <id>"),
        },
        "calendar" | "cal" => {
            let (year, month) = match args.first() {
                Some(m) => parse_month(m)?,
                None => (shell.today.year(), shell.today.month()),
            };
            let view = month_view(&data.sessions, year, month, week_start)?;
            let planned = upcoming(&data.sessions, shell.today, 6);
            print!("{}", views::render_calendar(&painter, &view, &planned, week_start));
        }
        "stats" => {
            let tab = match args.first() {
                Some(t) => match StatsTab::from_str(t, true) {
                    Ok(tab) => tab,
                    Err(_) => {
                        println!("Unknown tab: {} (overview, charts, records, goals)", t);
                        return Ok(true);
                    }
                },
                None => StatsTab::Overview,
            };
            let view = StatsView::build(
                &data.sessions,
                &data.personal_records,
                StatsFilter::default(),
                shell.config.stats.default_period,
                &shell.config,
                shell.today,
            );
            print!("{}", views::render_stats(&painter, &view, tab));
        }
        "compare" => {
            if args.len() != 4 {
                println!("Usage: /compare <p1_start> <p1_end> <p2_start> <p2_end>");
                return Ok(true);
            }
            let p1 = DateRange::parse(args[0], args[1])?;
            let p2 = DateRange::parse(args[2], args[3])?;
            let cmp = compare_periods(&data.sessions, p1, p2);
            print!("{}", views::render_comparison(&painter, &cmp));
        }
        "report" => match args.first().copied() {
            Some("weekly") | Some("week") => {
                print!(
                    "{}",
                    ReportGenerator::weekly_report(
                        &data.sessions,
                        &data.personal_records,
                        week_start_of(shell.today, week_start)
                    )
                );
            }
            Some("monthly") | Some("month") => {
                print!(
                    "{}",
                    ReportGenerator::monthly_report(
                        &data.sessions,
                        shell.today.year(),
                        shell.today.month()
                    )?
                );
            }
            _ => println!("Usage: /report weekly|monthly"),
        },
        "summary" => {
            print!(
                "{}",
                ReportGenerator::text_summary(&data.sessions, &data.personal_records, shell.today)
            );
        }
        "goals" => {
            print!(
                "{}",
                views::render_goals_summary(
                    &painter,
                    &data.sessions,
                    &data.personal_records,
                    &shell.config,
                    shell.today
                )
            );
        }
        "theme" => {
            let next: ThemeVariant = match args.first() {
                Some(v) => v.parse()?,
                None => shell.config.display.theme.next(),
            };
            shell.config.display.theme = next;
            tracing::debug!("Switched theme to {}", next.id());
            println!("Theme: {}", next.display_name());
        }
        "themes" => {
            print!(
                "{}",
                views::render_theme_list(&painter, shell.config.display.theme)
            );
        }
        "help" | "?" => {
            println!("{}", HELP);
        }
        _ => {
            println!(
                "Unknown command: {}. Type /help for available commands.",
                cmd
            );
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlab_core::demo::demo_dataset;
    use fitlab_core::DataSource;
    use std::path::PathBuf;

    fn shell() -> Shell {
        shell_at(PathBuf::from("unused.json"))
    }

    fn shell_at(path: PathBuf) -> Shell {
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let store = WorkoutStore::from_parts(
            path,
            "demo-user",
            demo_dataset(today),
            DataSource::Demo,
        );
        let data = store.user_dataset();
        Shell {
            config: AppConfig::default(),
            store,
            data,
            today,
        }
    }

    #[test]
    fn test_exit_stops_loop() {
        let mut shell = shell();
        assert!(!handle_command("/exit", &mut shell).unwrap());
        assert!(!handle_command("quit", &mut shell).unwrap());
    }

    #[test]
    fn test_theme_cycles_and_parses() {
        let mut shell = shell();
        assert_eq!(shell.config.display.theme, ThemeVariant::Material);
        handle_command("/theme", &mut shell).unwrap();
        assert_eq!(shell.config.display.theme, ThemeVariant::Glassmorphism);
        handle_command("/theme neo", &mut shell).unwrap();
        assert_eq!(shell.config.display.theme, ThemeVariant::Neo);
        assert!(handle_command("/theme plaid", &mut shell).is_err());
    }

    #[test]
    fn test_screens_continue_loop() {
        let mut shell = shell();
        for cmd in [
            "/dashboard",
            "/workouts gym",
            "/workout 1",
            "/calendar 2026-01",
            "/stats records",
            "/compare 2026-01-01 2026-01-07 2026-01-08 2026-01-14",
            "/report weekly",
            "/report monthly",
            "/summary",
            "/goals",
            "/themes",
            "/nonsense",
        ] {
            assert!(handle_command(cmd, &mut shell).unwrap(), "{}", cmd);
        }
    }

    #[test]
    fn test_plan_and_remove_save_dataset() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("workouts.json");
        let mut shell = shell_at(path.clone());
        let before = shell.data.sessions.len();

        assert!(handle_command("/plan 2026-01-22 Heavy Legs", &mut shell).unwrap());
        assert_eq!(shell.data.sessions.len(), before + 1);
        let saved = WorkoutStore::read_dataset(&path).unwrap();
        let planned = saved
            .sessions
            .iter()
            .find(|s| s.title == "Heavy Legs")
            .unwrap();
        assert!(planned.is_planned);

        let cmd = format!("/remove {}", planned.id);
        assert!(handle_command(&cmd, &mut shell).unwrap());
        assert_eq!(shell.data.sessions.len(), before);
        assert_eq!(WorkoutStore::read_dataset(&path).unwrap().sessions.len(), before);

        assert!(handle_command("/plan someday Legs", &mut shell).is_err());
    }

    #[test]
    fn test_errors_are_reported() {
        let mut shell = shell();
        assert!(handle_command("/workout missing", &mut shell).is_err());
        assert!(handle_command("/compare 2026-02-01 2026-01-01 2026-01-01 2026-01-02", &mut shell).is_err());
    }
}
