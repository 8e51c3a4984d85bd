use crate::{Config, error::LookupError, model::FetchOptions, payload::RawPayload};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// The one external collaborator: fetch the raw forecast payload for a
/// free-text location query. Transport, endpoint and credentials live
/// behind this trait.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(
        &self,
        query: &str,
        options: &FetchOptions,
    ) -> Result<RawPayload, LookupError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skycast configure` and enter your weatherapi.com key, \
             or set the {} environment variable.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(Box::new(weatherapi::WeatherApiProvider::new(api_key)))
}
