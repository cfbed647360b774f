//! Menu-driven session over a single [`App`].

use inquire::{
    CustomUserError, Select, Text,
    autocompletion::{Autocomplete, Replacement},
};
use std::{fmt, sync::Arc};

use weather_core::{App, FavoriteCity};

use crate::render::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    UseLocation,
    ToggleUnit,
    ToggleFavorite,
    OpenFavorite,
    RemoveFavorite,
    Quit,
}

impl Action {
    const ALL: [Action; 7] = [
        Action::Search,
        Action::UseLocation,
        Action::ToggleUnit,
        Action::ToggleFavorite,
        Action::OpenFavorite,
        Action::RemoveFavorite,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search for a city",
            Action::UseLocation => "Use my location",
            Action::ToggleUnit => "Toggle °C / °F",
            Action::ToggleFavorite => "Add / remove current city from favorites",
            Action::OpenFavorite => "Open a favorite city",
            Action::RemoveFavorite => "Remove a favorite city",
            Action::Quit => "Quit",
        })
    }
}

/// Forwards every keystroke to the debounced autocomplete and offers whatever
/// suggestions the last settled lookup produced.
#[derive(Clone)]
struct CityCompleter {
    app: Arc<App>,
}

impl Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        self.app.input_changed(input);
        Ok(self
            .app
            .suggestions()
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

pub async fn run(app: Arc<App>) -> anyhow::Result<()> {
    app.load_favorites().await;
    println!("{}", render(&app.state()));

    loop {
        let Some(action) =
            Select::new("What would you like to do?", Action::ALL.to_vec()).prompt_skippable()?
        else {
            break;
        };

        match action {
            Action::Search => search(&app).await?,
            Action::UseLocation => {
                app.use_current_location().await;
            }
            Action::ToggleUnit => {
                app.toggle_unit().await;
                println!("Units: {}", app.unit());
            }
            Action::ToggleFavorite => {
                if app.state().snapshot.is_none() {
                    println!("Look up a city first.");
                    continue;
                }
                app.toggle_favorite().await;
            }
            Action::OpenFavorite => {
                if let Some(favorite) = pick_favorite(&app, "Open which city?")? {
                    app.open_favorite(&favorite).await;
                }
            }
            Action::RemoveFavorite => {
                if let Some(favorite) = pick_favorite(&app, "Remove which city?")? {
                    app.remove_favorite(&favorite.id).await;
                }
            }
            Action::Quit => break,
        }

        println!("{}", render(&app.state()));
    }

    app.shutdown();
    Ok(())
}

async fn search(app: &Arc<App>) -> anyhow::Result<()> {
    let input = Text::new("City:")
        .with_autocomplete(CityCompleter { app: app.clone() })
        .with_help_message("Type to get suggestions, Enter to search")
        .prompt_skippable()?;

    let Some(input) = input else {
        app.shutdown();
        return Ok(());
    };

    let picked = app
        .suggestions()
        .into_iter()
        .find(|s| s.to_string() == input);

    match picked {
        Some(suggestion) => {
            app.select_suggestion(&suggestion).await;
        }
        None => {
            app.submit(&input).await;
        }
    }
    Ok(())
}

fn pick_favorite(app: &App, prompt: &str) -> anyhow::Result<Option<FavoriteCity>> {
    let favorites = app.state().favorites;
    if favorites.is_empty() {
        println!("No favorite cities yet.");
        return Ok(None);
    }
    Ok(Select::new(prompt, favorites).prompt_skippable()?)
}
