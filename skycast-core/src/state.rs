//! Unidirectional state flow between the weather provider and the screens.
//!
//! Each request cycle publishes a single tagged value, so a screen can never
//! observe a success and a failure from the same cycle: the channel holds
//! exactly one of `Loading`, `Ready` or `Failed` at a time.

use tokio::sync::watch;

use crate::model::{City, WeatherReport};
use crate::provider::WeatherInfoProvider;

/// Lifecycle of one request flow, published atomically as one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    /// No request has been made yet on this channel.
    #[default]
    Idle,
    /// A request is in flight; the loading indicator should be visible.
    Loading,
    /// The request completed; `T` replaces any previous value wholesale.
    Ready(T),
    /// The request failed with a display-ready message.
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// A request cycle is finished once the channel holds a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Ready(_) | FetchState::Failed(_))
    }
}

/// Mediates between a [`WeatherInfoProvider`] and the screens.
///
/// Screens subscribe to the channels they care about and stay purely
/// reactive; dropping a receiver ends the subscription. The view-model does
/// not deduplicate, queue or cancel requests: each fetch call runs to
/// completion against whatever the provider returns.
#[derive(Debug)]
pub struct WeatherViewModel {
    cities: watch::Sender<FetchState<Vec<City>>>,
    weather: watch::Sender<FetchState<WeatherReport>>,
}

impl WeatherViewModel {
    pub fn new() -> Self {
        let (cities, _) = watch::channel(FetchState::Idle);
        let (weather, _) = watch::channel(FetchState::Idle);
        Self { cities, weather }
    }

    /// Subscribe to the city-list channel for the lifetime of a screen.
    pub fn subscribe_cities(&self) -> watch::Receiver<FetchState<Vec<City>>> {
        self.cities.subscribe()
    }

    /// Subscribe to the weather channel for the lifetime of a screen.
    pub fn subscribe_weather(&self) -> watch::Receiver<FetchState<WeatherReport>> {
        self.weather.subscribe()
    }

    /// Fetch the full city list and publish the outcome.
    ///
    /// Publishes `Loading`, then exactly one terminal state. A failed attempt
    /// surfaces directly; there is no automatic re-attempt.
    pub async fn fetch_cities(&self, provider: &dyn WeatherInfoProvider) {
        self.cities.send_replace(FetchState::Loading);

        match provider.city_list().await {
            Ok(cities) => {
                tracing::debug!(count = cities.len(), "city list fetched");
                self.cities.send_replace(FetchState::Ready(cities));
            }
            Err(e) => {
                tracing::warn!(error = %e, "city list fetch failed");
                self.cities.send_replace(FetchState::Failed(e.to_string()));
            }
        }
    }

    /// Fetch current weather for `city_id` and publish the outcome.
    pub async fn fetch_weather(&self, city_id: i64, provider: &dyn WeatherInfoProvider) {
        self.weather.send_replace(FetchState::Loading);

        match provider.current_weather(city_id).await {
            Ok(report) => {
                tracing::debug!(city_id, "weather fetched");
                self.weather.send_replace(FetchState::Ready(report));
            }
            Err(e) => {
                tracing::warn!(city_id, error = %e, "weather fetch failed");
                self.weather.send_replace(FetchState::Failed(e.to_string()));
            }
        }
    }
}

impl Default for WeatherViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted provider: canned outcomes, records requested city ids.
    #[derive(Debug, Default)]
    struct StubProvider {
        cities: Option<Vec<City>>,
        city_error: Option<String>,
        report: Option<WeatherReport>,
        weather_error: Option<String>,
        requested_ids: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl WeatherInfoProvider for StubProvider {
        async fn city_list(&self) -> Result<Vec<City>, ProviderError> {
            match (&self.cities, &self.city_error) {
                (Some(cities), _) => Ok(cities.clone()),
                (None, Some(msg)) => Err(ProviderError::CityList(msg.clone())),
                (None, None) => Ok(vec![]),
            }
        }

        async fn current_weather(&self, city_id: i64) -> Result<WeatherReport, ProviderError> {
            self.requested_ids.lock().unwrap().push(city_id);
            match (&self.report, &self.weather_error) {
                (Some(report), _) => Ok(report.clone()),
                (None, Some(msg)) => Err(ProviderError::Weather(msg.clone())),
                (None, None) => Err(ProviderError::Weather("no script".to_string())),
            }
        }
    }

    fn sample_report() -> WeatherReport {
        WeatherReport {
            city_and_country: "Paris, FR".to_string(),
            date_time: "Tuesday, 10:13 PM".to_string(),
            temperature: "18°C".to_string(),
            condition: "clear sky".to_string(),
            condition_icon_url: "https://openweathermap.org/img/wn/01d@2x.png".to_string(),
            humidity: "60%".to_string(),
            pressure: "1015 hPa".to_string(),
            visibility: "10.0 km".to_string(),
            sunrise: "7:02 AM".to_string(),
            sunset: "5:30 PM".to_string(),
        }
    }

    #[tokio::test]
    async fn city_list_success_preserves_order() {
        let provider = StubProvider {
            cities: Some(vec![
                City { id: 1, name: "London".to_string() },
                City { id: 2, name: "Paris".to_string() },
            ]),
            ..Default::default()
        };

        let vm = WeatherViewModel::new();
        let rx = vm.subscribe_cities();
        vm.fetch_cities(&provider).await;

        match &*rx.borrow() {
            FetchState::Ready(cities) => {
                let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, vec!["London", "Paris"]);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn city_list_failure_publishes_message() {
        let provider = StubProvider {
            city_error: Some("connection refused".to_string()),
            ..Default::default()
        };

        let vm = WeatherViewModel::new();
        let rx = vm.subscribe_cities();
        vm.fetch_cities(&provider).await;

        assert_eq!(
            *rx.borrow(),
            FetchState::Failed("connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn selecting_a_city_requests_its_id() {
        let provider = StubProvider {
            report: Some(sample_report()),
            ..Default::default()
        };

        let vm = WeatherViewModel::new();
        vm.fetch_weather(2, &provider).await;

        assert_eq!(*provider.requested_ids.lock().unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn weather_success_replaces_state_wholesale() {
        let provider = StubProvider {
            report: Some(sample_report()),
            ..Default::default()
        };

        let vm = WeatherViewModel::new();
        let rx = vm.subscribe_weather();
        vm.fetch_weather(2988507, &provider).await;

        assert_eq!(*rx.borrow(), FetchState::Ready(sample_report()));
    }

    #[tokio::test]
    async fn weather_failure_is_terminal_and_not_loading() {
        let provider = StubProvider {
            weather_error: Some("timeout".to_string()),
            ..Default::default()
        };

        let vm = WeatherViewModel::new();
        let rx = vm.subscribe_weather();
        vm.fetch_weather(1, &provider).await;

        let state = rx.borrow().clone();
        assert_eq!(state, FetchState::Failed("timeout".to_string()));
        assert!(state.is_terminal());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn every_fetch_ends_in_a_terminal_state() {
        // Success and failure scripts alike must never leave the channel
        // stuck in Loading once the call returns.
        let scripts = vec![
            StubProvider { report: Some(sample_report()), ..Default::default() },
            StubProvider { weather_error: Some("boom".to_string()), ..Default::default() },
        ];

        for provider in scripts {
            let vm = WeatherViewModel::new();
            let rx = vm.subscribe_weather();
            vm.fetch_weather(42, &provider).await;
            assert!(rx.borrow().is_terminal());
        }
    }

    /// Provider that blocks until released, so a test can look at the
    /// channel while a request is still in flight.
    #[derive(Debug)]
    struct GatedProvider {
        gate: tokio::sync::Notify,
    }

    #[async_trait]
    impl WeatherInfoProvider for GatedProvider {
        async fn city_list(&self) -> Result<Vec<City>, ProviderError> {
            self.gate.notified().await;
            Ok(vec![City { id: 1, name: "London".to_string() }])
        }

        async fn current_weather(&self, _city_id: i64) -> Result<WeatherReport, ProviderError> {
            self.gate.notified().await;
            Err(ProviderError::Weather("unused".to_string()))
        }
    }

    #[tokio::test]
    async fn loading_is_observable_mid_flight() {
        let provider = GatedProvider { gate: tokio::sync::Notify::new() };

        let vm = WeatherViewModel::new();
        let mut rx = vm.subscribe_cities();

        let fetch = vm.fetch_cities(&provider);
        tokio::pin!(fetch);

        // Drive the fetch until it parks on the provider; the first value
        // published in the cycle is Loading.
        tokio::select! {
            biased;
            _ = &mut fetch => panic!("fetch completed before the gate opened"),
            _ = rx.changed() => {}
        }
        assert!(rx.borrow_and_update().is_loading());

        provider.gate.notify_one();
        fetch.await;
        assert!(rx.borrow().is_terminal());
    }
}
