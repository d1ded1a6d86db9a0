//! Seed datasets.
//!
//! A seed is a JSON array of entity objects, read once when a store is
//! built. Nothing is ever written back.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{CalrestError, CalrestResult};
use crate::record::Record;

/// Calendars shipped with the binary.
pub const DEFAULT_CALENDARS: &str = include_str!("../resources/calendars.json");

/// Calendar events shipped with the binary.
pub const DEFAULT_EVENTS: &str = include_str!("../resources/events.json");

/// Where a seed dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    Embedded(&'static str),
    File(PathBuf),
}

impl SeedSource {
    /// Use `path` when configured, otherwise the embedded dataset.
    pub fn file_or(path: Option<PathBuf>, embedded: &'static str) -> Self {
        match path {
            Some(path) => SeedSource::File(path),
            None => SeedSource::Embedded(embedded),
        }
    }

    pub fn load<R: Record>(&self) -> CalrestResult<Vec<R>> {
        let records = match self {
            SeedSource::Embedded(json) => parse::<R>(json, "embedded dataset")?,
            SeedSource::File(path) => read::<R>(path)?,
        };

        info!(
            target: "calrest::seed",
            kind = R::KIND,
            source = %self,
            records = records.len(),
            "Seed loaded"
        );
        Ok(records)
    }
}

impl std::fmt::Display for SeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedSource::Embedded(_) => write!(f, "embedded"),
            SeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn read<R: Record>(path: &Path) -> CalrestResult<Vec<R>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CalrestError::Seed(format!("Could not read {}: {e}", path.display()))
    })?;
    parse(&content, &path.display().to_string())
}

fn parse<R: Record>(json: &str, origin: &str) -> CalrestResult<Vec<R>> {
    serde_json::from_str(json).map_err(|e| {
        CalrestError::Seed(format!("Invalid {} seed in {origin}: {e}", R::KIND))
    })
}
