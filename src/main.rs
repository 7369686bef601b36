mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use nav2contacts::config::Config;
use nav2contacts::errors::Error;
use nav2contacts::logging::init_logging;

use commands::Commands;
use output::{ErrorResponse, print_json};

/// nav2contacts - navigate to the postal addresses of your contacts
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to the SQLite contact store (overrides config)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug or trace (overrides config)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let mut config = Config::load()?;
    if let Some(path) = &cli.database {
        config.database_path = path.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;

    init_logging(&config.log_level)?;
    commands::execute(&cli.command, &config, cli.json)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            debug!("event=command status=error error={e}");
            if cli.json {
                print_json(&ErrorResponse {
                    error: e.to_string(),
                });
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_search() {
        let cli = Cli::parse_from(["nav2contacts", "--json", "search", "Pizza"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Search { ref text } if text == "Pizza"));
    }

    #[test]
    fn test_cli_blank_search() {
        let cli = Cli::parse_from(["nav2contacts", "search"]);
        assert!(!cli.json);
        assert!(matches!(cli.command, Commands::Search { ref text } if text.is_empty()));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "nav2contacts",
            "read",
            "--database",
            "/tmp/contacts.db",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/contacts.db")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Commands::Read));
    }

    #[test]
    fn test_cli_show_from() {
        let cli = Cli::parse_from(["nav2contacts", "show", "Acme", "--from", "37.4,-122.1"]);
        match cli.command {
            Commands::Show { name, from } => {
                assert_eq!(name, "Acme");
                let from = from.unwrap();
                assert!((from.latitude - 37.4).abs() < 1e-9);
                assert!((from.longitude + 122.1).abs() < 1e-9);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_cli_show_rejects_bad_from() {
        assert!(Cli::try_parse_from(["nav2contacts", "show", "Acme", "--from", "x"]).is_err());
    }

    #[test]
    fn test_cli_navigate_default_index() {
        let cli = Cli::parse_from(["nav2contacts", "navigate", "Acme"]);
        assert!(matches!(cli.command, Commands::Navigate { index: 1, .. }));
    }

    #[test]
    fn test_cli_settings_flag() {
        let cli = Cli::parse_from(["nav2contacts", "settings", "--starred-only", "true"]);
        assert!(matches!(
            cli.command,
            Commands::Settings {
                starred_only: Some(true)
            }
        ));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["nav2contacts"]).is_err());
    }
}
