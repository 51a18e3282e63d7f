//! Core library for the `skycast` weather app.
//!
//! This crate defines:
//! - Configuration & session persistence
//! - Abstraction over the weather info provider, plus the OpenWeather backend
//! - The view-model state flow consumed by the screens
//! - Login validation and the federated sign-in boundary
//!
//! It is used by `skycast-cli`, but can also be reused by other frontends.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod provider;
pub mod session;
pub mod state;

pub use auth::{Account, IdentityGateway};
pub use config::Config;
pub use error::{ProviderError, ValidationError};
pub use http::AugmentedClient;
pub use model::{City, WeatherReport};
pub use provider::{WeatherInfoProvider, openweather::OpenWeatherProvider};
pub use session::{FileSessionStore, SessionStore};
pub use state::{FetchState, WeatherViewModel};
