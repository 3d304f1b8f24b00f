//! Domain types, configuration, themes and the workout dataset store for fitlab.

pub mod categories;
pub mod config;
pub mod demo;
pub mod error;
pub mod store;
pub mod theme;
pub mod types;

pub use categories::MuscleGroup;
pub use config::AppConfig;
pub use error::FitError;
pub use store::{DataSource, WorkoutStore};
pub use theme::{ThemeConfig, ThemeVariant};
pub use types::{Dataset, Exercise, PersonalRecord, PrType, WorkoutSession, WorkoutType};
