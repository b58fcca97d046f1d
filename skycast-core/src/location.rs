use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::LookupError, model::Coordinates};

/// Source of the device's current coordinates.
///
/// Resolution may suspend for a long time before reaching one of its
/// terminal outcomes: coordinates, [`LookupError::PermissionDenied`], or
/// [`LookupError::LocationUnavailable`]. No timeout is imposed here beyond
/// whatever the underlying source applies.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LookupError>;
}

const IP_API_BASE_URL: &str = "http://ip-api.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Approximate geolocation from the caller's public IP, via ip-api.com.
/// No API key required.
#[derive(Debug, Clone)]
pub struct IpLocationSource {
    base_url: String,
    http: Client,
}

impl IpLocationSource {
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(IP_API_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl LocationSource for IpLocationSource {
    async fn locate(&self) -> Result<Coordinates, LookupError> {
        let url = format!("{}/json", self.base_url);

        let res = match self.http.get(&url).send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::debug!("ip geolocation request failed: {e}");
                return Err(LookupError::LocationUnavailable);
            }
        };

        if !res.status().is_success() {
            tracing::debug!(status = %res.status(), "ip geolocation returned an error status");
            return Err(LookupError::LocationUnavailable);
        }

        let body: IpApiResponse = match res.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("ip geolocation parse error: {e}");
                return Err(LookupError::LocationUnavailable);
            }
        };

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(LookupError::LocationUnavailable),
        }
    }
}
