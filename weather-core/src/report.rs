use std::{
    fs::File,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{error, info};

use crate::{
    model::{CurrentConditions, DailyForecast, WeatherPayload, first_description},
    units::{
        TemperatureUnit, convert_temperature, local_timestamp, unix_timestamp_to_local_time,
        wind_degree_to_direction,
    },
};

pub const DEFAULT_REPORT_FILE: &str = "weatherinfo.txt";

/// Number of daily entries rendered, even when the provider sends more.
pub const FORECAST_DAYS: usize = 7;

const BANNER: &str = "-------------------------------------------------------------";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Render and persist the report, truncating anything already at `path`.
///
/// The write is not atomic: a crash part-way through leaves a partial file.
pub fn write_report(
    path: &Path,
    payload: &WeatherPayload,
    unit: TemperatureUnit,
) -> Result<(), ReportError> {
    let text = render_report(payload, unit, Local::now());

    persist(path, &text).map_err(|source| {
        error!(path = %path.display(), error = %source, "Error writing to file");
        ReportError::Io { path: path.to_path_buf(), source }
    })?;

    info!(path = %path.display(), "weather report written");
    Ok(())
}

fn persist(path: &Path, text: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()
}

pub fn render_report(
    payload: &WeatherPayload,
    unit: TemperatureUnit,
    generated_at: DateTime<Local>,
) -> String {
    let mut out = format!(
        "{BANNER}\nWeather Stats for Latitude: {}, Longitude: {} | {}\n{BANNER}\n",
        display_or_na(payload.lat),
        display_or_na(payload.lon),
        local_timestamp(generated_at),
    );

    if let Some(current) = payload.current.as_ref().filter(|c| !c.is_empty()) {
        out.push_str(&render_current(current, unit));
    }

    if !payload.daily.is_empty() {
        out.push_str("\nDaily Forecast:\n");
        for day in payload.daily.iter().take(FORECAST_DAYS) {
            out.push_str(&render_day(day, unit));
        }
    }

    out
}

fn render_current(current: &CurrentConditions, unit: TemperatureUnit) -> String {
    let temp = convert_temperature(current.temp.unwrap_or(0.0), unit);
    let mut out = format!("\tCurrent temperature is : {temp}\n");

    if let Some(desc) = first_description(&current.weather) {
        out.push_str(&format!("\tCurrent weather desc   : {desc}\n"));
    }

    out.push_str(&format!("\tCurrent Humidity       : {} %\n", display_or_na(current.humidity)));
    // Label is "km/h" whatever unit the provider actually used.
    out.push_str(&format!("\tCurrent wind speed     : {} km/h\n", display_or_na(current.wind_speed)));

    if let Some(deg) = current.wind_deg {
        out.push_str(&format!("\tCurrent wind direction : {} \n", wind_degree_to_direction(deg)));
    }

    out
}

fn render_day(day: &DailyForecast, unit: TemperatureUnit) -> String {
    let mut out = format!(
        "{}:\n\tDay Temp: {}\n\tNight Temp: {}\n",
        unix_timestamp_to_local_time(day.dt),
        convert_temperature(day.temp.day, unit),
        convert_temperature(day.temp.night, unit),
    );

    if let Some(desc) = first_description(&day.weather) {
        out.push_str(&format!("\tDescription: {desc}\n"));
    }

    out
}

fn display_or_na<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
