use std::path::PathBuf;

use crate::{model::Coordinates, report::DEFAULT_REPORT_FILE};

/// Everything a single report run needs, gathered up front by the caller.
#[derive(Clone)]
pub struct RunConfig {
    pub api_key: String,
    pub coordinates: Coordinates,
    /// Unit selection exactly as entered; validated by the pipeline before any fetch.
    pub unit: String,
    pub output_path: PathBuf,
}

impl RunConfig {
    pub fn new(api_key: impl Into<String>, coordinates: Coordinates, unit: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            coordinates,
            unit: unit.into(),
            output_path: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("api_key", &"<redacted>")
            .field("coordinates", &self.coordinates)
            .field("unit", &self.unit)
            .field("output_path", &self.output_path)
            .finish()
    }
}
