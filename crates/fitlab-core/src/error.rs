use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Invalid exercise '{0}': expected NAME[:SETSxREPS[@KG]]")]
    InvalidExercise(String),

    #[error("Workout not found: {0}")]
    WorkoutNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, FitError>;
