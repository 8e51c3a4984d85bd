use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use tracing::warn;

use skycast_core::{
    Config, DisplayState, FetchOptions, ForecastMode, LOOKUP_FAILED_MESSAGE, LookupError,
    QueryController, WeatherProvider, lookup, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key and default lookup settings.
    Configure,

    /// Show weather for a city; prompts interactively when CITY is omitted.
    Show {
        /// City or location name.
        city: Option<String>,

        /// Forecast granularity: "daily" or "hourly".
        #[arg(long)]
        mode: Option<String>,

        /// Forecast window in days (1-7).
        #[arg(long)]
        days: Option<u8>,

        /// Print the normalized snapshot as JSON instead of the card.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, mode, days, json } => show(city, mode, days, json).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mode = Select::new("Default forecast granularity:", ForecastMode::all().to_vec())
        .prompt()
        .context("Failed to read forecast granularity")?;

    config.set_api_key(api_key);
    config.set_forecast_mode(mode);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: Option<String>,
    mode: Option<String>,
    days: Option<u8>,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mode = match mode {
        Some(s) => ForecastMode::try_from(s.as_str())?,
        None => config.forecast_mode_id()?,
    };
    let options = FetchOptions {
        days: days.or(config.days).unwrap_or_else(|| FetchOptions::default().days),
        ..FetchOptions::default()
    };

    match city {
        Some(city) => one_shot(provider.as_ref(), &city, mode, &options, json).await,
        None => interactive(provider, mode, options, json).await,
    }
}

/// Non-interactive path: render once, exit non-zero on failure.
async fn one_shot(
    provider: &dyn WeatherProvider,
    city: &str,
    mode: ForecastMode,
    options: &FetchOptions,
    json: bool,
) -> Result<()> {
    match lookup(provider, city, mode, options).await {
        Ok(snapshot) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render::render_snapshot(&snapshot));
            }
            Ok(())
        }
        Err(LookupError::EmptyQuery) => Err(anyhow!("city name must not be empty")),
        Err(err) => {
            warn!(%city, error = ?err, "lookup failed");
            Err(anyhow!(LOOKUP_FAILED_MESSAGE))
        }
    }
}

/// Prompt loop: type a city, press Enter, see the card. An empty line
/// (or Esc) leaves the loop.
async fn interactive(
    provider: Box<dyn WeatherProvider>,
    mode: ForecastMode,
    options: FetchOptions,
    json: bool,
) -> Result<()> {
    let mut controller = QueryController::new(provider, mode, options);

    loop {
        let input = Text::new("City:")
            .with_help_message("press Enter on an empty line to quit")
            .prompt();

        let Ok(city) = input else { break };
        if city.trim().is_empty() {
            break;
        }

        controller.set_query_text(city);
        controller.submit().await;

        match controller.state() {
            DisplayState::Loaded(snapshot) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(snapshot)?);
                } else {
                    print!("{}", render::render_snapshot(snapshot));
                }
            }
            DisplayState::Failed(message) => println!("{}", render::render_error(message)),
            DisplayState::Idle | DisplayState::Loading => {}
        }
    }

    Ok(())
}
