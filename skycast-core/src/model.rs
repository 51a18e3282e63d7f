use serde::{Deserialize, Serialize};

/// A selectable city. The `id` is the opaque key used to query weather.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
}

/// Current weather conditions for one city, ready for display.
///
/// Every field is a pre-formatted string. A report is replaced wholesale on
/// each successful fetch, never merged or partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city_and_country: String,
    pub date_time: String,
    pub temperature: String,
    pub condition: String,
    pub condition_icon_url: String,
    pub humidity: String,
    pub pressure: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
}
