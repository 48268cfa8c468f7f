use crate::model::{WeatherPayload, WeatherRequest};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Failure to obtain a payload at all. Provider-side rejections that arrive as
/// well-formed JSON are not errors at this level.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("weather provider returned an unreadable body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, request: &WeatherRequest) -> Result<WeatherPayload, FetchError>;
}
