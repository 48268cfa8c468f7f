use serde::Deserialize;
use serde_json::{Map, Value};

const SUCCESS_CODE: i64 = 200;

/// Latitude/longitude as typed by the user; sent to the provider verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self { latitude: latitude.into(), longitude: longitude.into() }
    }
}

#[derive(Clone)]
pub struct WeatherRequest {
    pub api_key: String,
    pub coordinates: Coordinates,
}

impl std::fmt::Debug for WeatherRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherRequest")
            .field("api_key", &"<redacted>")
            .field("coordinates", &self.coordinates)
            .finish()
    }
}

/// Parsed One Call response. Error payloads share this shape and carry `cod`/`message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
    #[serde(default)]
    pub cod: Option<StatusCode>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConditions {
    /// Kelvin; rendered as 0 K when the provider leaves it out.
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_deg: Option<f64>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    /// Fields the report does not read (`dt`, `pressure`, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl CurrentConditions {
    /// True for `"current": {}`, which carries nothing to report.
    pub fn is_empty(&self) -> bool {
        self.temp.is_none()
            && self.humidity.is_none()
            && self.wind_speed.is_none()
            && self.wind_deg.is_none()
            && self.weather.is_empty()
            && self.other.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    pub dt: i64,
    pub temp: DailyTemperature,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DailyTemperature {
    pub day: f64,
    pub night: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: Option<String>,
}

/// OpenWeather sends `cod` as a number on some endpoints and as a string on others.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StatusCode {
    Number(f64),
    Text(String),
}

impl StatusCode {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StatusCode::Number(code) if code.fract() == 0.0 => Some(*code as i64),
            StatusCode::Number(_) => None,
            StatusCode::Text(text) => text.trim().parse().ok(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.as_i64() == Some(SUCCESS_CODE)
    }
}

/// A provider-side rejection carried inside an otherwise well-formed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub code: Option<i64>,
    pub message: Option<String>,
}

/// First condition's description, if the provider sent one.
pub fn first_description(conditions: &[Condition]) -> Option<&str> {
    conditions.first().and_then(|c| c.description.as_deref())
}

impl WeatherPayload {
    pub fn provider_failure(&self) -> Option<ProviderFailure> {
        match &self.cod {
            Some(cod) if !cod.is_success() => Some(ProviderFailure {
                code: cod.as_i64(),
                message: self.message.clone(),
            }),
            _ => None,
        }
    }
}
