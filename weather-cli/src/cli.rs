use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Text};
use std::sync::Arc;

use weather_core::{
    App, Config, Coordinates, FixedLocation, NewFavorite, ProviderId, SuggestionFetcher, Unit,
    provider::default_provider_from_config,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Temperature unit for this run: metric or imperial. Defaults to the configured unit.
    #[arg(long, global = true, value_parser = parse_unit)]
    pub unit: Option<Unit>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure a provider: "backend" (cities proxy) or "openweather" (API key).
    Configure {
        provider: String,
    },

    /// Show current weather and the next hours for a city.
    Show {
        /// City name.
        city: String,
    },

    /// Show weather for the current location.
    Here {
        /// Latitude; overrides the configured location.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude; overrides the configured location.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// List city suggestions for a name fragment.
    Suggest {
        text: String,
    },

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Search, switch units and manage favorites in one session.
    Interactive,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List favorite cities.
    List,

    /// Add a favorite city.
    Add {
        name: String,
        /// Two-letter country code, e.g. "FR".
        country: String,
    },

    /// Remove a favorite by id.
    Remove {
        id: String,
    },
}

fn parse_unit(value: &str) -> Result<Unit, String> {
    Unit::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure { provider } => configure(config, &provider),
            Command::Show { city } => {
                let app = build_app(&config, self.unit)?;
                app.load_favorites().await;
                app.submit(&city).await;
                print!("{}", render::render(&app.state()));
                Ok(())
            }
            Command::Here { lat, lon } => {
                let mut app = build_app(&config, self.unit)?;
                if let (Some(latitude), Some(longitude)) = (lat, lon) {
                    app = app.with_location(Arc::new(FixedLocation(Coordinates {
                        latitude,
                        longitude,
                    })));
                }
                app.load_favorites().await;
                app.use_current_location().await;
                print!("{}", render::render(&app.state()));
                Ok(())
            }
            Command::Suggest { text } => {
                let provider = default_provider_from_config(&config)?;
                let fetcher = SuggestionFetcher::new(provider.into());
                let suggestions = fetcher
                    .suggest(&text)
                    .await
                    .context("Failed to fetch city suggestions")?;

                if suggestions.is_empty() {
                    println!("No matching cities.");
                }
                for suggestion in suggestions {
                    match suggestion.state.as_deref() {
                        Some(state) => println!("{suggestion} ({state})"),
                        None => println!("{suggestion}"),
                    }
                }
                Ok(())
            }
            Command::Favorites { action } => {
                let app = build_app(&config, self.unit)?;
                favorites(&app, action).await
            }
            Command::Interactive => {
                let app = Arc::new(build_app(&config, self.unit)?);
                interactive::run(app).await
            }
        }
    }
}

fn build_app(config: &Config, unit: Option<Unit>) -> anyhow::Result<App> {
    let app = App::from_config(config)?;
    if let Some(unit) = unit {
        app.set_unit(unit);
    }
    Ok(app)
}

async fn favorites(app: &App, action: FavoritesCommand) -> anyhow::Result<()> {
    let store = app.favorites();

    match action {
        FavoritesCommand::List => {
            let favorites = store.load().await?;
            print!("{}", render::render_favorites(&favorites));
        }
        FavoritesCommand::Add { name, country } => {
            let record = store
                .add(NewFavorite {
                    name,
                    country: country.to_uppercase(),
                })
                .await?;
            println!("Added {record} (id {}).", record.id);
        }
        FavoritesCommand::Remove { id } => {
            store.remove(&id).await?;
            println!("Removed favorite {id}.");
        }
    }

    Ok(())
}

fn configure(mut config: Config, provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;

    match id {
        ProviderId::OpenWeather => {
            let api_key = Password::new("OpenWeather API key:")
                .without_confirmation()
                .prompt()?;
            config.upsert_provider_api_key(id, api_key.trim().to_string());
        }
        ProviderId::Backend => {
            let backend_url = Text::new("Cities service URL:")
                .with_default(config.backend_url())
                .prompt()?;
            let favorites_url = Text::new("Favorites service URL:")
                .with_default(config.favorites_url())
                .prompt()?;
            config.backend_url = Some(backend_url.trim().to_string());
            config.favorites_url = Some(favorites_url.trim().to_string());
        }
    }

    if config.default_provider_id()? != id {
        let make_default = Confirm::new(&format!("Use {id} as the default provider?"))
            .with_default(true)
            .prompt()?;
        if make_default {
            config.set_default_provider(id);
        }
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
