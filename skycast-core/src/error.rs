use thiserror::Error;

/// Failures surfaced by a [`crate::WeatherInfoProvider`].
///
/// Only two kinds are distinguished, one per request flow. Both carry a
/// free-text message; the message is what the user sees, verbatim.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The city-list fetch failed.
    #[error("{0}")]
    CityList(String),

    /// The weather fetch for a single city failed.
    #[error("{0}")]
    Weather(String),
}

/// Local login-form validation failures. These never leave the login screen.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("enter a valid email address")]
    Email,

    #[error("password must be at least 6 characters")]
    Password,
}
