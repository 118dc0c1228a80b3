//! Pokédex CLI - browse Pokémon from PokéAPI
//!
//! Fetches the catalog and Pokémon details through a 24-hour local cache,
//! tracks favorites, and downloads cry sounds.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use pokedex::app::App;
use pokedex::cache::{CacheManager, FileStorage};
use pokedex::cli::{cry_output_path, Cli, Command, Settings};
use pokedex::data::{
    CatalogClient, PokeApiClient, Pokemon, ReqwestTransport, SoundClient, Transport,
};
use pokedex::logging;

/// Upper bound for a single request, including reading the body
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Prints one Pokémon's details
fn print_pokemon(pokemon: &Pokemon, favorite: bool) {
    let star = if favorite { " ★" } else { "" };
    match pokemon.id {
        Some(id) => println!("#{:03} {}{}", id, pokemon.name, star),
        None => println!("{}{}", pokemon.name, star),
    }

    let types = pokemon.type_names();
    if !types.is_empty() {
        println!("  types:   {}", types.join(", "));
    }
    // Heights are in decimetres and weights in hectograms
    if let Some(height) = pokemon.height {
        println!("  height:  {:.1} m", f64::from(height) / 10.0);
    }
    if let Some(weight) = pokemon.weight {
        println!("  weight:  {:.1} kg", f64::from(weight) / 10.0);
    }
    if let Some(artwork) = pokemon.artwork_url() {
        println!("  artwork: {}", artwork);
    }
    if let Some(cry) = pokemon.cries.as_ref().and_then(|c| c.latest.as_deref()) {
        println!("  cry:     {}", cry);
    }
}

async fn run<C: CatalogClient>(
    app: &mut App<C>,
    sounds: &SoundClient,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::List { limit } => {
            app.load_pokemons().await?;
            let limit = limit.unwrap_or(usize::MAX);
            for pokemon in app.pokemons.iter().take(limit) {
                let star = if app.is_favorite(&pokemon.name) { " ★" } else { "" };
                println!("{}{}", pokemon.name, star);
            }
        }
        Command::Show { name } => {
            let pokemon = app.catalog().get_pokemon_by_name(&name).await?;
            print_pokemon(&pokemon, app.is_favorite(&pokemon.name));
        }
        Command::Details { url } => {
            app.load_pokemons().await?;
            app.update_pokemon_details(&url).await?;
            match app.pokemons.iter().find(|p| p.url.as_deref() == Some(url.as_str())) {
                Some(pokemon) => print_pokemon(pokemon, app.is_favorite(&pokemon.name)),
                None => println!("{} is not part of the catalog", url),
            }
        }
        Command::Favorite { name } => {
            if app.toggle_favorite(&name)? {
                println!("Added {} to favorites", name.trim());
            } else {
                println!("Removed {} from favorites", name.trim());
            }
        }
        Command::Favorites => {
            let favorites = app.get_favorite_pokemons_with_details().await;
            if favorites.is_empty() {
                println!("No favorites yet");
            }
            for pokemon in &favorites {
                print_pokemon(pokemon, true);
            }
        }
        Command::ClearCache => {
            let removed = app.clear_cache()?;
            println!("Removed {} cached entries", removed);
        }
        Command::Cry { id, output } => {
            let bytes = sounds.fetch_cry(id).await?;
            let path = cry_output_path(id, output);
            tokio::fs::write(&path, &bytes).await?;
            println!("Saved cry of #{} to {}", id, path.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;
    logging::init(settings.verbosity);
    info!(cache_dir = %settings.cache_dir.display(), "starting");

    let cache = CacheManager::new(Arc::new(FileStorage::with_dir(settings.cache_dir.clone())));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::with_client(client));
    let catalog = PokeApiClient::new(transport.clone(), cache.clone())
        .with_base_url(settings.api_url.as_str());
    let sounds = SoundClient::new(transport).with_base_url(settings.sound_url.as_str());

    let mut app = App::new(catalog, cache);
    run(&mut app, &sounds, cli.command).await
}
