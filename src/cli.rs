//! Command-line interface parsing for the Pokédex CLI
//!
//! This module handles parsing of CLI arguments using clap and resolves them,
//! together with their environment variable fallbacks, into `Settings`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use thiserror::Error;

use crate::cache::FileStorage;
use crate::data::pokeapi::POKEAPI_BASE_URL;
use crate::data::sounds::SOUNDS_BASE_URL;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// A Pokémon name argument was empty
    #[error("Invalid Pokémon name: '{0}'. Names must not be blank")]
    InvalidName(String),

    /// A base URL argument is not an http(s) URL
    #[error("Invalid URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidUrl(String),

    /// No cache directory was given and none could be determined
    #[error("Could not determine a cache directory; pass --cache-dir or set POKEDEX_CACHE_DIR")]
    NoCacheDir,
}

/// Pokédex CLI - browse the Pokémon catalog with a local cache and favorites
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the Pokémon catalog with a local cache and favorites")]
#[command(version)]
pub struct Cli {
    /// Directory for cached responses (default: the user cache directory)
    #[arg(long, env = "POKEDEX_CACHE_DIR", global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Base URL of the Pokémon API
    #[arg(
        long,
        env = "POKEDEX_API_URL",
        global = true,
        default_value = POKEAPI_BASE_URL,
        value_parser = parse_url_arg
    )]
    pub api_url: String,

    /// Base URL of the cry sound service
    #[arg(
        long,
        env = "POKEDEX_SOUND_URL",
        global = true,
        default_value = SOUNDS_BASE_URL,
        value_parser = parse_url_arg
    )]
    pub sound_url: String,

    /// Increase log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the Pokédex CLI
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every Pokémon in the catalog (favorites are starred)
    List {
        /// Print at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the details of one Pokémon
    Show {
        #[arg(value_parser = parse_name_arg)]
        name: String,
    },
    /// Fetch a Pokémon detail URL and merge it into the catalog entry
    Details { url: String },
    /// Mark or unmark a Pokémon as favorite
    Favorite {
        #[arg(value_parser = parse_name_arg)]
        name: String,
    },
    /// Show every favorite with its details
    Favorites,
    /// Remove cached responses (favorites are kept)
    ClearCache,
    /// Download a Pokémon's cry sound
    Cry {
        /// Pokémon id
        id: u32,
        /// Output file (default: <id>.ogg)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Parses a Pokémon name argument, rejecting blank names
pub fn parse_name_arg(s: &str) -> Result<String, CliError> {
    if s.trim().is_empty() {
        return Err(CliError::InvalidName(s.to_string()));
    }
    Ok(s.to_string())
}

/// Parses a base URL argument, dropping trailing slashes
pub fn parse_url_arg(s: &str) -> Result<String, CliError> {
    let trimmed = s.trim().trim_end_matches('/');
    let has_host = ["http://", "https://"]
        .iter()
        .any(|scheme| trimmed.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
    if !has_host {
        return Err(CliError::InvalidUrl(s.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Configuration resolved from CLI arguments and the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding cache entries
    pub cache_dir: PathBuf,
    /// Base URL of the Pokémon API
    pub api_url: String,
    /// Base URL of the cry sound service
    pub sound_url: String,
    /// Number of `-v` flags
    pub verbosity: u8,
}

impl Settings {
    /// Resolves settings from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Settings)` with the cache directory defaulted to the XDG cache path
    /// * `Err(CliError::NoCacheDir)` if no cache directory could be determined
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let cache_dir = match &cli.cache_dir {
            Some(dir) => dir.clone(),
            None => FileStorage::new()
                .map(|storage| storage.dir().to_path_buf())
                .ok_or(CliError::NoCacheDir)?,
        };
        Ok(Settings {
            cache_dir,
            api_url: cli.api_url.clone(),
            sound_url: cli.sound_url.clone(),
            verbosity: cli.verbose,
        })
    }
}

/// Output path for a downloaded cry
pub fn cry_output_path(id: u32, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from(format!("{}.ogg", id)))
}
