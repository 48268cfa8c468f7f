//! Core library for the `weatherinfo` report tool.
//!
//! This crate defines:
//! - Unit and wind-direction helpers
//! - The OpenWeather One Call fetcher behind the `WeatherProvider` trait
//! - Plain-text report rendering and persistence
//! - The single-run pipeline tying those together
//!
//! It is used by `weatherinfo-cli`, but the pipeline takes an explicit `RunConfig`
//! so it can be driven without a terminal.

pub mod config;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod units;

pub use config::RunConfig;
pub use model::{Coordinates, WeatherPayload, WeatherRequest};
pub use pipeline::{RunError, RunSummary, run};
pub use provider::{FetchError, OpenWeatherProvider, WeatherProvider};
pub use report::{DEFAULT_REPORT_FILE, ReportError, write_report};
pub use units::TemperatureUnit;
