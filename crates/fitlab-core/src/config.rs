use crate::error::Result;
use crate::theme::ThemeVariant;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub stats: StatsConfig,
    pub goals: GoalsConfig,
    pub data: DataConfig,
}

impl AppConfig {
    /// Load configuration from default path (~/.config/fitlab/config.toml),
    /// falling back to defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write current configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Write current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitlab")
            .join("config.toml")
    }

    /// Data directory for datasets and REPL history.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitlab")
    }

    /// Resolved dataset path: the configured one or `data_dir/workouts.json`.
    pub fn dataset_path(&self) -> PathBuf {
        self.data
            .dataset
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("workouts.json"))
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Active theme variant.
    pub theme: ThemeVariant,
    /// Emit ANSI colours.
    pub color: bool,
    /// Width of bar charts in characters.
    pub chart_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::Material,
            color: true,
            chart_width: 32,
        }
    }
}

/// Granularity used when bucketing volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Year,
}

impl Period {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" | "weekly" => Some(Self::Week),
            "month" | "monthly" => Some(Self::Month),
            "year" | "yearly" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "Weekly",
            Self::Month => "Monthly",
            Self::Year => "Yearly",
        }
    }
}

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Default volume bucket granularity.
    pub default_period: Period,
    /// First day of the week for weekly buckets and the calendar grid.
    pub week_start: WeekStart,
    /// Number of exercises listed under "Top Exercises".
    pub top_exercises: usize,
    /// Recent PRs shown without filters.
    pub recent_pr_limit: usize,
    /// Recent PRs shown when any filter is active.
    pub filtered_pr_limit: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            default_period: Period::Month,
            week_start: WeekStart::Monday,
            top_exercises: 5,
            recent_pr_limit: 3,
            filtered_pr_limit: 10,
        }
    }
}

/// Goal targets shown on the goals tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalsConfig {
    /// Consecutive training days to aim for.
    pub streak_days: u32,
    /// Completed workouts per calendar month.
    pub monthly_workouts: u32,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            streak_days: 7,
            monthly_workouts: 12,
        }
    }
}

/// Dataset location and owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Dataset JSON file (None = data_dir/workouts.json).
    pub dataset: Option<PathBuf>,
    /// Only sessions belonging to this user are aggregated.
    pub user_id: String,
    /// Use the built-in demo dataset when no dataset file exists.
    pub demo_fallback: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            user_id: "demo-user".into(),
            demo_fallback: true,
        }
    }
}
