mod repl;
mod views;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fitlab_analytics::aggregations::week_start_of;
use fitlab_analytics::calendar::{month_view, parse_month, upcoming};
use fitlab_analytics::comparison::{compare_periods, parse_date, DateRange};
use fitlab_analytics::filters::{unique_categories, unique_exercises};
use fitlab_analytics::{ReportGenerator, StatsFilter, StatsView};
use fitlab_core::config::Period;
use fitlab_core::demo::demo_dataset;
use fitlab_core::{
    AppConfig, DataSource, Exercise, ThemeVariant, WorkoutSession, WorkoutStore, WorkoutType,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use views::{Painter, StatsTab};

#[derive(Parser)]
#[command(
    name = "fitlab",
    about = "Workout statistics and training dashboards in the terminal",
    version,
    author
)]
struct Cli {
    /// Path to config file (default: ~/.config/fitlab/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the dataset JSON file
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Override the theme (material, glass, dark, neo, vibrant)
    #[arg(short, long, global = true)]
    theme: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Screen(Screen),

    /// List or inspect themes
    Themes {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Plan a workout, or log a finished one with --done
    Plan(PlanArgs),

    /// Delete a workout from the dataset file
    Remove { id: String },

    /// Write the demo dataset to the dataset file
    Seed {
        /// Overwrite an existing dataset
        #[arg(long)]
        force: bool,
    },

    /// Start the interactive shell (default)
    Shell,
}

/// Commands that render a view of the loaded dataset.
#[derive(Subcommand)]
enum Screen {
    /// Weekly chart, today's workout and recent PRs
    Dashboard,

    /// List workouts, newest first
    Workouts {
        /// Only show one workout type (gym, running, sprint, other)
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Show a single workout
    Workout { id: String },

    /// Month calendar with completed and planned sessions
    Calendar {
        /// Month to show as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Statistics screen
    Stats {
        #[arg(long, value_enum, default_value_t = StatsTab::Overview)]
        tab: StatsTab,
        /// Volume bucket: week, month or year
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        exercise: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Print the full statistics as JSON
        #[arg(long)]
        json: bool,
        /// List the exercise and category filter choices
        #[arg(long)]
        choices: bool,
    },

    /// Compare two date ranges
    Compare {
        p1_start: String,
        p1_end: String,
        p2_start: String,
        p2_end: String,
        #[arg(long)]
        json: bool,
    },

    /// Generate a markdown report
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        /// Any date inside the week or month to report on
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Args)]
struct PlanArgs {
    /// Workout date (YYYY-MM-DD)
    date: String,
    /// Workout title
    title: String,
    /// Workout type (gym, running, sprint, other)
    #[arg(long = "type", default_value = "gym")]
    kind: String,
    /// Exercise as NAME[:SETSxREPS[@KG]], repeatable
    #[arg(short, long = "exercise")]
    exercises: Vec<String>,
    /// Duration in minutes
    #[arg(long)]
    minutes: Option<f64>,
    /// Distance in kilometres
    #[arg(long)]
    km: Option<f64>,
    /// Log as completed instead of planned
    #[arg(long)]
    done: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    Weekly,
    Monthly,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// List all themes
    List,
    /// Show the style tokens of a theme (default: active theme)
    Show { variant: Option<String> },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Initialize default configuration file
    Init,
    /// Print config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "fitlab=info,warn".into()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config.
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Apply CLI overrides.
    if let Some(data) = &cli.data {
        config.data.dataset = Some(data.clone());
    }
    if let Some(theme) = &cli.theme {
        config.display.theme = theme.parse()?;
    }

    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Config { action }) => {
            handle_config_command(action, &config, cli.config.as_deref())
        }
        Some(Commands::Themes { action }) => handle_theme_command(action, &config),
        Some(Commands::Seed { force }) => seed(&config, today, force).await,
        Some(Commands::Plan(args)) => {
            let session = build_session(&config.data.user_id, args)?;
            add_workout(&config, today, session).await
        }
        Some(Commands::Remove { id }) => remove_workout(&config, today, &id).await,
        Some(Commands::Screen(screen)) => {
            let store = WorkoutStore::open_async(&config, today).await?;
            run_screen(screen, &config, &store, today)
        }
        Some(Commands::Shell) | None => {
            let store = WorkoutStore::open_async(&config, today).await?;
            repl::run(config, store, today)
        }
    }
}

fn run_screen(
    screen: Screen,
    config: &AppConfig,
    store: &WorkoutStore,
    today: NaiveDate,
) -> Result<()> {
    let painter = Painter::new(config.display.theme, &config.display);
    let data = store.user_dataset();
    let week_start = config.stats.week_start.weekday();

    match screen {
        Screen::Dashboard => {
            print!(
                "{}",
                views::render_dashboard(&painter, &data.sessions, &data.personal_records, config, today)
            );
        }
        Screen::Workouts { kind } => {
            let kind = kind
                .as_deref()
                .map(|k| WorkoutType::parse(k).with_context(|| format!("Unknown workout type: {}", k)))
                .transpose()?;
            let sessions: Vec<_> = store
                .sessions()
                .into_iter()
                .filter(|s| kind.map_or(true, |k| s.workout_type == k))
                .collect();
            print!("{}", views::render_workout_list(&painter, &sessions));
        }
        Screen::Workout { id } => {
            let session = store.get_session(&id)?;
            print!("{}", views::render_workout_detail(&painter, session));
        }
        Screen::Calendar { month } => {
            let (year, month) = match month {
                Some(m) => parse_month(&m)?,
                None => (today.year(), today.month()),
            };
            let view = month_view(&data.sessions, year, month, week_start)?;
            let planned = upcoming(&data.sessions, today, 6);
            print!("{}", views::render_calendar(&painter, &view, &planned, week_start));
        }
        Screen::Stats {
            tab,
            period,
            exercise,
            category,
            from,
            to,
            json,
            choices,
        } => {
            if choices {
                let exercises = unique_exercises(&data.sessions, &data.personal_records);
                let categories = unique_categories(&data.sessions);
                print!("{}", views::render_filter_choices(&painter, &exercises, &categories));
                return Ok(());
            }
            let period = match period.as_deref() {
                Some(p) => Period::parse(p).with_context(|| format!("Unknown period: {}", p))?,
                None => config.stats.default_period,
            };
            let filter = StatsFilter {
                exercise,
                category,
                start: from.as_deref().map(parse_date).transpose()?,
                end: to.as_deref().map(parse_date).transpose()?,
            };
            if let (Some(start), Some(end)) = (filter.start, filter.end) {
                DateRange::new(start, end)?;
            }
            let view = StatsView::build(
                &data.sessions,
                &data.personal_records,
                filter,
                period,
                config,
                today,
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", views::render_stats(&painter, &view, tab));
            }
        }
        Screen::Compare {
            p1_start,
            p1_end,
            p2_start,
            p2_end,
            json,
        } => {
            let p1 = DateRange::parse(&p1_start, &p1_end)?;
            let p2 = DateRange::parse(&p2_start, &p2_end)?;
            let cmp = compare_periods(&data.sessions, p1, p2);
            if json {
                println!("{}", serde_json::to_string_pretty(&cmp)?);
            } else {
                print!("{}", views::render_comparison(&painter, &cmp));
            }
        }
        Screen::Report { kind, date } => {
            let anchor = match date {
                Some(d) => parse_date(&d)?,
                None => today,
            };
            let report = match kind {
                ReportKind::Weekly => ReportGenerator::weekly_report(
                    &data.sessions,
                    &data.personal_records,
                    week_start_of(anchor, week_start),
                ),
                ReportKind::Monthly => {
                    ReportGenerator::monthly_report(&data.sessions, anchor.year(), anchor.month())?
                }
            };
            print!("{}", report);
        }
    }
    Ok(())
}

fn handle_config_command(
    action: Option<ConfigAction>,
    config: &AppConfig,
    explicit_path: Option<&Path>,
) -> Result<()> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::default_path);
    match action {
        Some(ConfigAction::Show) | None => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
        }
        Some(ConfigAction::Init) => {
            if path.exists() {
                println!("Config already exists at: {}", path.display());
            } else {
                match explicit_path {
                    Some(p) => config.save_to(p)?,
                    None => config.save()?,
                }
                println!("Created default config at: {}", path.display());
            }
        }
        Some(ConfigAction::Path) => {
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn handle_theme_command(action: Option<ThemeAction>, config: &AppConfig) -> Result<()> {
    let painter = Painter::new(config.display.theme, &config.display);
    match action {
        Some(ThemeAction::List) | None => {
            print!("{}", views::render_theme_list(&painter, config.display.theme));
        }
        Some(ThemeAction::Show { variant }) => {
            let variant: ThemeVariant = match variant {
                Some(v) => v.parse()?,
                None => config.display.theme,
            };
            print!("{}", views::render_theme(&Painter::new(variant, &config.display), variant));
        }
    }
    Ok(())
}

/// Turn `plan` arguments into a session for `user_id`.
fn build_session(user_id: &str, args: PlanArgs) -> Result<WorkoutSession> {
    let date = parse_date(&args.date)?;
    let kind = WorkoutType::parse(&args.kind)
        .with_context(|| format!("Unknown workout type: {}", args.kind))?;
    let mut session = WorkoutSession::new(user_id, args.title.trim(), date);
    session.workout_type = kind;
    session.is_planned = !args.done;
    session.duration_minutes = args.minutes.filter(|m| m.is_finite() && *m > 0.0);
    session.distance_km = args.km.filter(|k| k.is_finite() && *k > 0.0);
    session.exercises = args
        .exercises
        .iter()
        .map(|text| Exercise::parse_shorthand(text))
        .collect::<fitlab_core::error::Result<_>>()?;
    Ok(session)
}

async fn add_workout(config: &AppConfig, today: NaiveDate, session: WorkoutSession) -> Result<()> {
    let mut store = WorkoutStore::open_async(config, today).await?;
    if store.source() == DataSource::Demo {
        tracing::warn!("No dataset yet, starting {} from the demo data", store.path().display());
    }
    let id = session.id.clone();
    let status = if session.is_planned { "Planned" } else { "Logged" };
    store.add_session(session)?;
    store.save_async().await?;
    println!("{} workout {}", status, id);
    Ok(())
}

async fn remove_workout(config: &AppConfig, today: NaiveDate, id: &str) -> Result<()> {
    let mut store = WorkoutStore::open_async(config, today).await?;
    if store.source() != DataSource::File {
        anyhow::bail!("No dataset file at {}", store.path().display());
    }
    let removed = store.remove_session(id)?;
    store.save_async().await?;
    println!("Removed {} ({})", removed.title, removed.date);
    Ok(())
}

async fn seed(config: &AppConfig, today: NaiveDate, force: bool) -> Result<()> {
    let path = config.dataset_path();
    if path.exists() && !force {
        println!("Dataset already exists at: {} (use --force to overwrite)", path.display());
        return Ok(());
    }
    let store = WorkoutStore::from_parts(
        path.clone(),
        config.data.user_id.clone(),
        demo_dataset(today),
        DataSource::File,
    );
    store.save_async().await?;
    println!("Wrote demo dataset to: {}", path.display());
    Ok(())
}
