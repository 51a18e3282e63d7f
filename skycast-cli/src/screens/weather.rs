//! Main screen: pick a city, show its current weather.
//!
//! Purely reactive over the view-model channels: the screen renders whatever
//! state the view-model publishes and forwards selections back to it. The
//! only state it keeps is the last-seen city list, to resolve a selected
//! index into a city id.

use anyhow::{Result, bail};
use skycast_core::{
    City, FetchState, SessionStore, WeatherInfoProvider, WeatherReport, WeatherViewModel,
};

pub async fn run(store: &dyn SessionStore, provider: &dyn WeatherInfoProvider) -> Result<()> {
    if !store.is_signed_in() {
        bail!("Not signed in. Run `skycast login` first.");
    }

    let vm = WeatherViewModel::new();
    let mut cities_rx = vm.subscribe_cities();
    let mut weather_rx = vm.subscribe_weather();

    println!("Loading city list...");
    vm.fetch_cities(provider).await;

    let cities: Vec<City> = match cities_outcome(cities_rx.borrow_and_update().clone()) {
        Ok(cities) => cities,
        Err(message) => {
            println!("{message}");
            return Ok(());
        }
    };

    if cities.is_empty() {
        println!("No cities available.");
        return Ok(());
    }

    loop {
        let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        let selection = inquire::Select::new("City:", names).raw_prompt()?;
        let city = &cities[selection.index];

        println!("Fetching current weather for {}...", city.name);
        vm.fetch_weather(city.id, provider).await;

        match &*weather_rx.borrow_and_update() {
            FetchState::Ready(report) => render_report(report),
            // On failure the output region stays hidden; only the message
            // from the provider is shown.
            FetchState::Failed(message) => println!("{message}"),
            FetchState::Idle | FetchState::Loading => {}
        }

        let again = inquire::Confirm::new("Look up another city?")
            .with_default(true)
            .prompt()?;
        if !again {
            return Ok(());
        }
    }
}

/// Resolve the published city-list state into the list or the message to
/// display. `fetch_cities` always leaves a terminal state behind; should a
/// non-terminal value ever slip through, it reads as an error, never as a
/// silent exit.
fn cities_outcome(state: FetchState<Vec<City>>) -> Result<Vec<City>, String> {
    match state {
        FetchState::Ready(cities) => Ok(cities),
        FetchState::Failed(message) => Err(message),
        FetchState::Idle | FetchState::Loading => Err("City list is unavailable.".to_string()),
    }
}

fn render_report(report: &WeatherReport) {
    println!();
    println!("  {}", report.city_and_country);
    println!("  {}", report.date_time);
    println!();
    println!("  {}  {}", report.temperature, report.condition);
    println!("  {}", report.condition_icon_url);
    println!();
    println!("  Humidity    {}", report.humidity);
    println!("  Pressure    {}", report.pressure);
    println!("  Visibility  {}", report.visibility);
    println!("  Sunrise     {}", report.sunrise);
    println!("  Sunset      {}", report.sunset);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_state_yields_the_list() {
        let cities = vec![
            City { id: 1, name: "London".to_string() },
            City { id: 2, name: "Paris".to_string() },
        ];
        assert_eq!(cities_outcome(FetchState::Ready(cities.clone())), Ok(cities));
    }

    #[test]
    fn failed_state_yields_its_message() {
        let outcome = cities_outcome(FetchState::Failed("connection refused".to_string()));
        assert_eq!(outcome, Err("connection refused".to_string()));
    }

    #[test]
    fn non_terminal_states_yield_a_message_not_silence() {
        for state in [FetchState::Idle, FetchState::Loading] {
            let outcome = cities_outcome(state);
            assert!(outcome.is_err());
            assert!(!outcome.unwrap_err().is_empty());
        }
    }
}
