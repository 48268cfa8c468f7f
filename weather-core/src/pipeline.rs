//! One report run: validate the unit, fetch, check the provider status, write.
//!
//! Every failure ends the run before the next stage starts, so a bad unit never
//! reaches the network and a provider error never reaches the report file.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    config::RunConfig,
    model::WeatherRequest,
    provider::{FetchError, WeatherProvider},
    report::{FORECAST_DAYS, ReportError, write_report},
    units::{ParseUnitError, TemperatureUnit},
};

const UNKNOWN_PROVIDER_ERROR: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid temperature unit: {0}")]
    InvalidUnit(#[from] ParseUnitError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{message}")]
    Provider { code: Option<i64>, message: String },
    #[error(transparent)]
    Report(#[from] ReportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
}

#[instrument(skip_all, fields(output = %config.output_path.display()))]
pub async fn run(provider: &dyn WeatherProvider, config: &RunConfig) -> Result<RunSummary, RunError> {
    let unit: TemperatureUnit = config.unit.parse()?;

    let request = WeatherRequest {
        api_key: config.api_key.clone(),
        coordinates: config.coordinates.clone(),
    };
    let payload = provider.fetch_weather(&request).await?;

    if let Some(failure) = payload.provider_failure() {
        let message = failure.message.unwrap_or_else(|| UNKNOWN_PROVIDER_ERROR.to_string());
        warn!(code = ?failure.code, %message, "provider rejected the request");
        return Err(RunError::Provider { code: failure.code, message });
    }

    write_report(&config.output_path, &payload, unit)?;

    let forecast_days = payload.daily.len().min(FORECAST_DAYS);
    info!(forecast_days, "run complete");

    Ok(RunSummary { output_path: config.output_path.clone() })
}
