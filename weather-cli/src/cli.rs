use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Select, Text};
use std::fmt;
use tracing::{info, warn};
use weather_core::{
    AppState, AppView, CardId, Config, OpenWeatherProvider, SearchForm, config::API_KEY_ENV,
    provider::provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-cards", version, about = "Current weather as a stack of cards")]
pub struct Cli {
    /// Override the provider base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Search one or more cities and print the resulting cards.
    Search {
        /// City names, searched in order.
        #[arg(required = true)]
        cities: Vec<String>,
    },

    /// Search and remove cards interactively (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Search { cities }) => {
                let provider = build_provider(self.base_url)?;
                search_once(&provider, &cities).await;
                Ok(())
            }
            Some(Command::Interactive) | None => {
                let provider = build_provider(self.base_url)?;
                interactive(&provider).await
            }
        }
    }
}

fn build_provider(base_url: Option<String>) -> anyhow::Result<OpenWeatherProvider> {
    let mut config = Config::load()?.with_env();
    if base_url.is_some() {
        config.base_url = base_url;
    }

    if config.api_key().is_none() {
        warn!("No API key configured; set {API_KEY_ENV} or run `weather-cards configure`.");
    }

    Ok(provider_from_config(&config))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key.trim().to_string());
    let path = config.save()?;
    info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn search_once(provider: &OpenWeatherProvider, cities: &[String]) {
    let mut state = AppState::new();
    let mut form = SearchForm::new();

    for city in cities {
        form.set_input(city.as_str());
        form.submit(provider, &mut state).await;
    }

    println!("{}", AppView::from_state(&state));
}

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Search,
    Remove,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Search => "Search city",
            MenuItem::Remove => "Remove card",
            MenuItem::Quit => "Quit",
        })
    }
}

/// Remove menu entry; carries the id the card was rendered with.
#[derive(Debug)]
struct RemoveChoice {
    id: CardId,
    label: String,
}

impl fmt::Display for RemoveChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

/// One entry per current card, in display order.
fn remove_choices(state: &AppState) -> Vec<RemoveChoice> {
    state
        .cards()
        .iter()
        .map(|r| RemoveChoice { id: r.id(), label: format!("{}, {}", r.name(), r.country()) })
        .collect()
}

async fn interactive(provider: &OpenWeatherProvider) -> anyhow::Result<()> {
    let mut state = AppState::new();
    let mut form = SearchForm::new();

    loop {
        let mut items = vec![MenuItem::Search];
        if !state.cards().is_empty() {
            items.push(MenuItem::Remove);
        }
        items.push(MenuItem::Quit);

        let choice = match Select::new("What next?", items).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read menu choice"),
        };

        match choice {
            MenuItem::Search => {
                let city = match Text::new("City:")
                    .with_placeholder("Enter city name...")
                    .prompt_skippable()
                {
                    Ok(city) => city.unwrap_or_default(),
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err).context("Failed to read city"),
                };
                form.set_input(city);
                form.submit(provider, &mut state).await;
            }
            MenuItem::Remove => {
                let choices = remove_choices(&state);
                match Select::new("Remove which card?", choices).prompt_skippable() {
                    Ok(Some(picked)) => {
                        state.remove_card(picked.id);
                    }
                    Ok(None) => {}
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err).context("Failed to read card choice"),
                }
            }
            MenuItem::Quit => break,
        }

        println!("\n{}\n", AppView::from_state(&state));
    }

    Ok(())
}
