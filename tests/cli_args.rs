//! Integration tests for CLI argument handling
//!
//! Runs the binary for commands that never touch the network (favorites and
//! cache clearing) and checks argument parsing through the library.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args against a private cache directory
fn run_cli(cache_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pokedex"))
        .arg("--cache-dir")
        .arg(cache_dir)
        .args(args)
        .env_remove("POKEDEX_API_URL")
        .env_remove("POKEDEX_SOUND_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute pokedex")
}

#[test]
fn test_help_flag_exits_successfully() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pokedex"), "Help should mention pokedex");
    assert!(stdout.contains("favorite"), "Help should mention the favorite command");
    assert!(stdout.contains("clear-cache"), "Help should mention clear-cache");
}

#[test]
fn test_missing_subcommand_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &[]);
    assert!(!output.status.success());
}

#[test]
fn test_blank_favorite_name_prints_error_and_exits() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["favorite", "  "]);
    assert!(!output.status.success(), "Expected blank name to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid Pokémon name"),
        "Should print error message about the name: {}",
        stderr
    );
}

#[test]
fn test_favorite_toggle_persists_across_runs() {
    let temp_dir = TempDir::new().unwrap();

    let added = run_cli(temp_dir.path(), &["favorite", "Pikachu"]);
    assert!(added.status.success());
    assert!(String::from_utf8_lossy(&added.stdout).contains("Added Pikachu"));
    assert!(temp_dir.path().join("pokemon_favorites.json").exists());

    let removed = run_cli(temp_dir.path(), &["favorite", "pikachu"]);
    assert!(removed.status.success());
    assert!(String::from_utf8_lossy(&removed.stdout).contains("Removed pikachu"));
}

#[test]
fn test_clear_cache_keeps_favorites() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("pokemon_pikachu.json"),
        r#"{"data":{"name":"pikachu"},"timestamp":0}"#,
    )
    .unwrap();
    assert!(run_cli(temp_dir.path(), &["favorite", "eevee"]).status.success());

    let output = run_cli(temp_dir.path(), &["clear-cache"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Removed 1 cached entries"));
    assert!(!temp_dir.path().join("pokemon_pikachu.json").exists());
    assert!(temp_dir.path().join("pokemon_favorites.json").exists());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use pokedex::cli::{parse_name_arg, parse_url_arg, Cli, Command, Settings};
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_favorite() {
        let cli = Cli::parse_from(["pokedex", "favorite", "mew"]);
        assert_eq!(
            cli.command,
            Command::Favorite {
                name: "mew".to_string()
            }
        );
    }

    #[test]
    fn test_cli_parse_details() {
        let cli = Cli::parse_from(["pokedex", "details", "https://pokeapi.co/api/v2/pokemon/1/"]);
        assert_eq!(
            cli.command,
            Command::Details {
                url: "https://pokeapi.co/api/v2/pokemon/1/".to_string()
            }
        );
    }

    #[test]
    fn test_cli_parse_cry_without_output() {
        let cli = Cli::parse_from(["pokedex", "cry", "7"]);
        assert_eq!(cli.command, Command::Cry { id: 7, output: None });
    }

    #[test]
    fn test_cli_rejects_non_numeric_cry_id() {
        assert!(Cli::try_parse_from(["pokedex", "cry", "pikachu"]).is_err());
    }

    #[test]
    fn test_parse_name_arg_invalid_returns_error() {
        assert!(parse_name_arg("").is_err());
    }

    #[test]
    fn test_parse_url_arg_trims_trailing_slash() {
        assert_eq!(parse_url_arg("https://example.com/").unwrap(), "https://example.com");
    }

    #[test]
    fn test_settings_keep_sound_url() {
        let cli = Cli::parse_from([
            "pokedex",
            "--cache-dir",
            "/tmp/dex",
            "--sound-url",
            "http://sounds.local",
            "favorites",
        ]);
        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.sound_url, "http://sounds.local");
        assert_eq!(settings.cache_dir, PathBuf::from("/tmp/dex"));
    }
}
