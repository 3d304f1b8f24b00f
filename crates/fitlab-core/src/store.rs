use crate::config::AppConfig;
use crate::demo::demo_dataset;
use crate::error::{FitError, Result};
use crate::types::{Dataset, PersonalRecord, WorkoutSession};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;

/// Where the loaded dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    File,
    Demo,
    /// No file on disk and demo data disabled.
    Empty,
}

/// Holds the dataset handed to the aggregator, backed by a JSON file.
pub struct WorkoutStore {
    path: PathBuf,
    user_id: String,
    dataset: Dataset,
    source: DataSource,
}

impl WorkoutStore {
    /// Open the store described by `config`. A missing file falls back to the
    /// demo dataset when `demo_fallback` is set, otherwise to an empty one.
    pub fn open(config: &AppConfig, today: NaiveDate) -> Result<Self> {
        let path = config.dataset_path();
        let (dataset, source) = if path.exists() {
            (Self::read_dataset(&path)?, DataSource::File)
        } else {
            Self::fallback(config, today, &path)
        };
        let store = Self::from_parts(path, config.data.user_id.clone(), dataset, source);
        store.log_loaded();
        Ok(store)
    }

    /// Same as [`WorkoutStore::open`] but reads the file without blocking.
    pub async fn open_async(config: &AppConfig, today: NaiveDate) -> Result<Self> {
        let path = config.dataset_path();
        let (dataset, source) = if async_fs::try_exists(&path).await.unwrap_or(false) {
            (Self::read_dataset_async(&path).await?, DataSource::File)
        } else {
            Self::fallback(config, today, &path)
        };
        let store = Self::from_parts(path, config.data.user_id.clone(), dataset, source);
        store.log_loaded();
        Ok(store)
    }

    pub fn from_parts(
        path: PathBuf,
        user_id: impl Into<String>,
        dataset: Dataset,
        source: DataSource,
    ) -> Self {
        Self {
            path,
            user_id: user_id.into(),
            dataset,
            source,
        }
    }

    fn log_loaded(&self) {
        tracing::info!(
            "Loaded {} sessions and {} personal records ({:?})",
            self.dataset.sessions.len(),
            self.dataset.personal_records.len(),
            self.source,
        );
    }

    fn fallback(config: &AppConfig, today: NaiveDate, path: &Path) -> (Dataset, DataSource) {
        if config.data.demo_fallback {
            tracing::debug!("No dataset at {:?}, using demo data", path);
            (demo_dataset(today), DataSource::Demo)
        } else {
            tracing::warn!("No dataset at {:?}, starting empty", path);
            (Dataset::default(), DataSource::Empty)
        }
    }

    /// Read and validate a dataset file.
    pub fn read_dataset(path: &Path) -> Result<Dataset> {
        let json = std::fs::read_to_string(path)?;
        Self::parse_dataset(&json)
    }

    /// Read and validate a dataset file (async / non-blocking).
    pub async fn read_dataset_async(path: &Path) -> Result<Dataset> {
        let json = async_fs::read_to_string(path).await?;
        Self::parse_dataset(&json)
    }

    fn parse_dataset(json: &str) -> Result<Dataset> {
        let dataset: Dataset = serde_json::from_str(json)?;
        if let Some(dup) = first_duplicate(dataset.sessions.iter().map(|s| s.id.as_str())) {
            return Err(FitError::Dataset(format!("duplicate session id: {}", dup)));
        }
        Ok(dataset)
    }

    /// Persist the dataset as pretty JSON.
    pub fn save(&self) -> Result<()> {
        Self::write_dataset(&self.path, &self.dataset)
    }

    /// Persist the dataset as pretty JSON (async / non-blocking).
    pub async fn save_async(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.dataset)?;
        async_fs::write(&self.path, json).await?;
        tracing::info!(
            "Wrote {} sessions to {}",
            self.dataset.sessions.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(dataset)?;
        std::fs::write(path, json)?;
        tracing::info!("Wrote {} sessions to {}", dataset.sessions.len(), path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The whole dataset, every user included.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Dataset restricted to the configured user.
    pub fn user_dataset(&self) -> Dataset {
        self.dataset.for_user(&self.user_id)
    }

    /// The configured user's sessions, newest first.
    pub fn sessions(&self) -> Vec<&WorkoutSession> {
        let mut sessions: Vec<_> = self
            .dataset
            .sessions
            .iter()
            .filter(|s| s.user_id == self.user_id)
            .collect();
        sessions.sort_by(|a, b| (b.date, b.start_time).cmp(&(a.date, a.start_time)));
        sessions
    }

    pub fn personal_records(&self) -> Vec<&PersonalRecord> {
        self.dataset
            .personal_records
            .iter()
            .filter(|r| r.user_id.is_empty() || r.user_id == self.user_id)
            .collect()
    }

    pub fn get_session(&self, id: &str) -> Result<&WorkoutSession> {
        self.dataset
            .find_session(id)
            .filter(|s| s.user_id == self.user_id)
            .ok_or_else(|| FitError::WorkoutNotFound(id.to_string()))
    }

    /// Add a logged or planned session, keeping ids unique.
    pub fn add_session(&mut self, session: WorkoutSession) -> Result<()> {
        if self.dataset.find_session(&session.id).is_some() {
            return Err(FitError::Dataset(format!(
                "duplicate session id: {}",
                session.id
            )));
        }
        self.dataset.sessions.push(session);
        Ok(())
    }

    pub fn remove_session(&mut self, id: &str) -> Result<WorkoutSession> {
        let idx = self
            .dataset
            .sessions
            .iter()
            .position(|s| s.id == id && s.user_id == self.user_id)
            .ok_or_else(|| FitError::WorkoutNotFound(id.to_string()))?;
        Ok(self.dataset.sessions.remove(idx))
    }
}

fn first_duplicate<'a>(ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}
