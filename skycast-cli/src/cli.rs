use clap::{Parser, Subcommand};
use skycast_core::{Config, FileSessionStore, OpenWeatherProvider, SessionStore};

use crate::gateway::GoogleDeviceGateway;
use crate::screens;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in (federated) and remember the session.
    Login,

    /// Sign out and forget the session.
    Logout,

    /// Pick a city and show its current weather.
    Show,

    /// Store the OpenWeather application id.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Login => {
                let store = FileSessionStore::open_default()?;
                let gateway = GoogleDeviceGateway::from_env()?;
                screens::login::run(&store, &gateway).await?;

                // A successful login lands on the main screen, as the app does.
                if store.is_signed_in() {
                    let provider = weather_provider()?;
                    screens::weather::run(&store, &provider).await?;
                }
                Ok(())
            }
            Command::Logout => {
                let store = FileSessionStore::open_default()?;
                let gateway = GoogleDeviceGateway::from_env()?;
                screens::login::logout(&store, &gateway).await
            }
            Command::Show => {
                let store = FileSessionStore::open_default()?;
                let provider = weather_provider()?;
                screens::weather::run(&store, &provider).await
            }
            Command::Configure => screens::configure(),
        }
    }
}

fn weather_provider() -> anyhow::Result<OpenWeatherProvider> {
    let config = Config::load()?;
    let app_id = config.resolved_app_id()?;
    Ok(OpenWeatherProvider::new(app_id))
}
