use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic coordinate pair, passed through to the provider unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Normalized current-weather data.
///
/// The provider may omit any field, so everything except the city name is
/// optional; the city name itself defaults to the empty string. Consumers
/// must tolerate absence rather than fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    pub country: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<u8>,
    pub wind_speed_mps: Option<f64>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherRecord {
    /// URL of the provider-hosted condition icon, if an icon id was supplied.
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|icon| format!("https://openweathermap.org/img/wn/{icon}@2x.png"))
    }
}
