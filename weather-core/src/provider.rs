use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, error::FetchFailed, model::WeatherRecord, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// Unit system requested from the provider. Only metric is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
}

impl Units {
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for a city. One request, no retries.
    async fn current(&self, city: &str) -> Result<WeatherRecord, FetchFailed>;
}

/// Build the OpenWeather provider from config.
///
/// A missing key is not rejected here: it surfaces later as a failed fetch.
pub fn provider_from_config(config: &Config) -> OpenWeatherProvider {
    let api_key = config.api_key().unwrap_or_default().to_owned();
    OpenWeatherProvider::with_base_url(api_key, config.base_url())
}
