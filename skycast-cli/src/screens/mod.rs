pub mod login;
pub mod weather;

use anyhow::Result;
use skycast_core::Config;

/// Prompt for and store the OpenWeather application id.
pub fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let app_id = inquire::Text::new("OpenWeather API key:").prompt()?;
    config.set_app_id(app_id.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}
