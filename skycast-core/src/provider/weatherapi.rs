use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{error::LookupError, model::FetchOptions, payload::RawPayload};

use super::WeatherProvider;

const FORECAST_URL: &str = "https://api.weatherapi.com/v1/forecast.json";

/// weatherapi.com `forecast.json` client. One GET per lookup, no retry,
/// no timeout beyond what the transport enforces.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn fetch(
        &self,
        query: &str,
        options: &FetchOptions,
    ) -> Result<RawPayload, LookupError> {
        let days = options.clamped_days().to_string();
        debug!(%query, %days, "requesting forecast from weatherapi.com");

        let res = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("days", days.as_str()),
                ("aqi", yes_no(options.include_air_quality)),
                ("alerts", yes_no(options.include_alerts)),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Upstream { status, body: truncate_body(&body) });
        }

        let payload: RawPayload = serde_json::from_str(&body)?;
        Ok(payload)
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let truncated: String = body.chars().take(MAX).collect();
        format!("{truncated}...")
    } else {
        body.to_string()
    }
}
