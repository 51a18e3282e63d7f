use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Deserialize;
use url::Url;

use crate::error::ProviderError;
use crate::http::AugmentedClient;
use crate::model::{City, WeatherReport};

use super::WeatherInfoProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Bundled city list, same shape the OpenWeather bulk export uses.
const CITY_LIST_JSON: &str = include_str!("../../assets/cities.json");

/// Weather info provider backed by the OpenWeather current-weather API.
///
/// The city list ships with the application as a small JSON asset; only the
/// per-city weather lookup hits the network. Every request goes through the
/// [`AugmentedClient`], which appends the application id.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    http: AugmentedClient,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(app_id: String) -> Self {
        Self::with_base_url(app_id, DEFAULT_BASE_URL)
    }

    /// Same as [`Self::new`] but against a custom endpoint. Used by tests.
    pub fn with_base_url(app_id: String, base_url: impl Into<String>) -> Self {
        Self {
            http: AugmentedClient::new(app_id),
            base_url: base_url.into(),
        }
    }

    fn weather_url(&self, city_id: i64) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&format!("{}/data/2.5/weather", self.base_url))
            .map_err(|e| ProviderError::Weather(format!("Invalid weather endpoint URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("id", &city_id.to_string())
            .append_pair("units", "metric");
        Ok(url)
    }
}

#[async_trait]
impl WeatherInfoProvider for OpenWeatherProvider {
    async fn city_list(&self) -> Result<Vec<City>, ProviderError> {
        serde_json::from_str(CITY_LIST_JSON)
            .map_err(|e| ProviderError::CityList(format!("Failed to parse city list: {e}")))
    }

    async fn current_weather(&self, city_id: i64) -> Result<WeatherReport, ProviderError> {
        let url = self.weather_url(city_id)?;

        let res = self
            .http
            .get(url)
            .await
            .map_err(|e| ProviderError::Weather(format!("Failed to send weather request: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ProviderError::Weather(format!("Failed to read weather response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ProviderError::Weather(format!(
                "Weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Weather(format!("Failed to parse weather JSON: {e}")))?;

        Ok(parsed.into_report())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    /// UTC offset of the city, in seconds.
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    sys: OwSys,
    visibility: Option<u32>,
}

impl OwCurrentResponse {
    /// Flatten the raw API response into pre-formatted display strings.
    fn into_report(self) -> WeatherReport {
        let offset = utc_offset(self.timezone);

        let (condition, icon) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), "01d".to_string()));

        WeatherReport {
            city_and_country: format!("{}, {}", self.name, self.sys.country),
            date_time: format_local(self.dt, offset, "%A, %-I:%M %p"),
            temperature: format!("{}°C", self.main.temp.round() as i64),
            condition,
            condition_icon_url: format!("{ICON_BASE_URL}/{icon}@2x.png"),
            humidity: format!("{}%", self.main.humidity),
            pressure: format!("{} hPa", self.main.pressure),
            visibility: self
                .visibility
                .map(|m| format!("{:.1} km", f64::from(m) / 1000.0))
                .unwrap_or_else(|| "N/A".to_string()),
            sunrise: format_local(self.sys.sunrise, offset, "%-I:%M %p"),
            sunset: format_local(self.sys.sunset, offset, "%-I:%M %p"),
        }
    }
}

fn utc_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

fn format_local(ts: i64, offset: FixedOffset, fmt: &str) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_else(Utc::now)
        .with_timezone(&offset)
        .format(fmt)
        .to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Back off to a character boundary so multibyte bodies can't panic.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
