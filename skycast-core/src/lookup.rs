use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{Coordinates, WeatherRecord},
};

const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the OpenWeather current-weather endpoint.
///
/// Each operation issues exactly one outbound request; there is no retry
/// and no timeout beyond the one configured on the underlying client.
#[derive(Debug, Clone)]
pub struct LookupService {
    base_url: String,
    api_key: String,
    http: Client,
}

impl LookupService {
    pub fn new(api_key: String) -> Result<Self, LookupError> {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        })
    }

    /// Look up current weather by city name.
    ///
    /// A blank name (after trimming) fails with [`LookupError::InvalidInput`]
    /// before any network access.
    pub async fn by_name(&self, city: &str) -> Result<WeatherRecord, LookupError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(LookupError::InvalidInput);
        }

        self.fetch(&[
            ("q", city.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ])
        .await
    }

    /// Look up current weather by coordinate pair.
    ///
    /// Coordinates are passed through as-is; the provider performs any
    /// validation.
    pub async fn by_coordinate(&self, coords: Coordinates) -> Result<WeatherRecord, LookupError> {
        self.fetch(&[
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ])
        .await
    }

    async fn fetch(&self, query: &[(&str, String)]) -> Result<WeatherRecord, LookupError> {
        let url = format!("{}/weather", self.base_url);

        let res = self.http.get(&url).query(query).send().await?;

        let status = res.status();
        if !status.is_success() {
            // Unknown city and any other provider rejection look the same
            // to the caller. The key never appears in logs.
            tracing::debug!(%status, "provider returned an error status");
            return Err(LookupError::NotFound);
        }

        let parsed: OwCurrentResponse = res.json().await?;
        Ok(normalize(parsed))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    dt: Option<i64>,
    sys: Option<OwSys>,
    main: Option<OwMain>,
    weather: Option<Vec<OwWeather>>,
    wind: Option<OwWind>,
}

/// Flatten the provider's nested payload into a [`WeatherRecord`].
fn normalize(parsed: OwCurrentResponse) -> WeatherRecord {
    let condition = parsed.weather.as_ref().and_then(|w| w.first());

    WeatherRecord {
        city: parsed.name,
        country: parsed.sys.and_then(|s| s.country),
        description: condition.and_then(|w| w.description.clone()),
        icon: condition.and_then(|w| w.icon.clone()),
        temperature_c: parsed.main.as_ref().and_then(|m| m.temp),
        humidity_pct: parsed.main.as_ref().and_then(|m| m.humidity),
        wind_speed_mps: parsed.wind.and_then(|w| w.speed),
        observed_at: parsed.dt.and_then(unix_to_utc),
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn paris_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Paris",
            "sys": { "country": "FR" },
            "weather": [{ "description": "clear sky", "icon": "01d" }],
            "main": { "temp": 21.3, "humidity": 40 },
            "wind": { "speed": 3.6 },
            "dt": 1_756_000_000
        })
    }

    #[tokio::test]
    async fn by_name_returns_normalized_record() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("appid", "KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
            .mount(&server)
            .await;

        let service = LookupService::with_base_url("KEY".into(), &server.uri()).unwrap();
        let record = service.by_name("Paris").await.unwrap();

        assert_eq!(record.city, "Paris");
        assert_eq!(record.country.as_deref(), Some("FR"));
        assert_eq!(record.description.as_deref(), Some("clear sky"));
        assert_eq!(record.temperature_c, Some(21.3));
        assert_eq!(record.humidity_pct, Some(40));
        assert_eq!(record.wind_speed_mps, Some(3.6));
        assert!(record.observed_at.is_some());
    }

    #[tokio::test]
    async fn by_name_trims_whitespace() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
            .expect(1)
            .mount(&server)
            .await;

        let service = LookupService::with_base_url("KEY".into(), &server.uri()).unwrap();
        let record = service.by_name("  Paris  ").await.unwrap();
        assert_eq!(record.city, "Paris");
    }

    #[tokio::test]
    async fn blank_name_fails_without_network_access() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
            .expect(0)
            .mount(&server)
            .await;

        let service = LookupService::with_base_url("KEY".into(), &server.uri()).unwrap();

        for input in ["", "   ", "\t\n"] {
            let err = service.by_name(input).await.unwrap_err();
            assert!(matches!(err, LookupError::InvalidInput), "input {input:?}");
        }
    }

    #[tokio::test]
    async fn provider_error_status_maps_to_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let service = LookupService::with_base_url("KEY".into(), &server.uri()).unwrap();
        let err = service.by_name("InvalidXYZ123").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound));
    }

    #[tokio::test]
    async fn by_coordinate_passes_lat_lon_through() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "48.5"))
            .and(query_param("lon", "-2.25"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
            .expect(1)
            .mount(&server)
            .await;

        let service = LookupService::with_base_url("KEY".into(), &server.uri()).unwrap();
        let coords = Coordinates {
            latitude: 48.5,
            longitude: -2.25,
        };
        let record = service.by_coordinate(coords).await.unwrap();
        assert_eq!(record.city, "Paris");
    }

    #[tokio::test]
    async fn missing_provider_fields_are_tolerated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "Giza" })),
            )
            .mount(&server)
            .await;

        let service = LookupService::with_base_url("KEY".into(), &server.uri()).unwrap();
        let record = service.by_name("Giza").await.unwrap();

        assert_eq!(record.city, "Giza");
        assert_eq!(record.country, None);
        assert_eq!(record.description, None);
        assert_eq!(record.temperature_c, None);
        assert_eq!(record.humidity_pct, None);
        assert_eq!(record.wind_speed_mps, None);
        assert_eq!(record.observed_at, None);
        assert_eq!(record.icon_url(), None);
    }
}
