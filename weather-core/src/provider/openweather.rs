use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::model::{WeatherPayload, WeatherRequest};

use super::{FetchError, WeatherProvider};

pub const ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Sections the report never reads.
const EXCLUDE: &str = "minutely,hourly,alerts";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(ONECALL_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { base_url: base_url.into(), http })
    }

    async fn fetch_body(&self, request: &WeatherRequest) -> Result<String, reqwest::Error> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", request.coordinates.latitude.as_str()),
                ("lon", request.coordinates.longitude.as_str()),
                ("exclude", EXCLUDE),
                ("appid", request.api_key.as_str()),
            ])
            .send()
            .await?;

        debug!(status = %res.status(), "OpenWeather responded");
        res.text().await
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(&self, request: &WeatherRequest) -> Result<WeatherPayload, FetchError> {
        debug!(
            lat = %request.coordinates.latitude,
            lon = %request.coordinates.longitude,
            "requesting OpenWeather One Call data"
        );

        // Error responses (bad key, bad coordinates, quota) still carry a JSON body,
        // so the status code is not checked here.
        let body = self.fetch_body(request).await.map_err(|err| {
            error!(error = %err, "Error fetching weather data");
            FetchError::Transport(err)
        })?;

        serde_json::from_str(&body).map_err(|err| {
            error!(error = %err, body = %truncate_body(&body), "Error decoding weather data");
            FetchError::InvalidBody(err)
        })
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> WeatherRequest {
        WeatherRequest {
            api_key: "test_key".to_string(),
            coordinates: Coordinates::new("51.5074", "-0.1278"),
        }
    }

    #[tokio::test]
    async fn sends_onecall_query_and_parses_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/onecall"))
            .and(query_param("lat", "51.5074"))
            .and(query_param("lon", "-0.1278"))
            .and(query_param("exclude", "minutely,hourly,alerts"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "lat": 51.5074,
                "lon": -0.1278,
                "current": {"temp": 283.15, "humidity": 70, "wind_speed": 3.5, "weather": []},
                "daily": [{"dt": 1700000000, "temp": {"day": 285.0, "night": 280.0}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url(format!("{}/onecall", mock_server.uri()))
            .expect("client should build");
        let payload = provider.fetch_weather(&request()).await.expect("fetch should succeed");

        assert_eq!(payload.lon, Some(-0.1278));
        assert_eq!(payload.daily.len(), 1);
        assert!(payload.provider_failure().is_none());
    }

    #[tokio::test]
    async fn error_status_with_json_body_is_returned_as_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/onecall"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "cod": 401,
                "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
            })))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url(format!("{}/onecall", mock_server.uri()))
            .expect("client should build");
        let payload = provider.fetch_weather(&request()).await.expect("body is valid JSON");

        let failure = payload.provider_failure().expect("cod 401 is a failure");
        assert_eq!(failure.code, Some(401));
        assert!(failure.message.unwrap_or_default().starts_with("Invalid API key"));
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url(mock_server.uri()).expect("client should build");
        let result = provider.fetch_weather(&request()).await;

        assert!(matches!(result, Err(FetchError::InvalidBody(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let provider = OpenWeatherProvider::with_base_url(uri).expect("client should build");
        let result = provider.fetch_weather(&request()).await;

        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(truncate_body(&long).chars().count(), 200);
        assert_eq!(truncate_body("short"), "short");
    }
}
