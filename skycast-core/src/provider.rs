use crate::error::ProviderError;
use crate::model::{City, WeatherReport};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// External collaborator supplying the selectable city list and current
/// weather conditions.
///
/// Both calls are fire-and-forget from the caller's point of view: no retry,
/// no deduplication, no cancellation of an in-flight request.
#[async_trait]
pub trait WeatherInfoProvider: Send + Sync + Debug {
    /// Return the full list of selectable cities.
    async fn city_list(&self) -> Result<Vec<City>, ProviderError>;

    /// Return current weather for the city identified by `city_id`.
    async fn current_weather(&self, city_id: i64) -> Result<WeatherReport, ProviderError>;
}
