use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use farewheel_core::{AppConfig, GeoPoint, VehicleKind};

mod commands;

#[derive(Parser)]
#[command(name = "farewheel")]
#[command(author, version, about = "A terminal fare calculator for auto-rickshaws, buses and taxis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Print a fare receipt
    Fare {
        /// Vehicle kind (auto, bus, taxi)
        #[arg(short, long, value_parser = parse_kind)]
        kind: VehicleKind,
        /// Trip distance in km
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        distance: Option<f64>,
        /// Start place (used with --to)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End place (used with --from)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Departure time, HH:MM (defaults to now)
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,
        /// Waiting time in minutes
        #[arg(short, long, default_value_t = 0)]
        waiting: u32,
    },
    /// List known places, or look one up
    Places {
        /// Place name to search for
        query: Option<String>,
        /// Find the place nearest to LAT,LNG
        #[arg(long, value_parser = parse_point, conflicts_with = "query")]
        near: Option<GeoPoint>,
    },
    /// First-run hint state
    Tutorial {
        #[command(subcommand)]
        action: TutorialAction,
    },
    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum TutorialAction {
    /// Show the hint again on next launch
    Reset,
    /// Check whether the hint has been shown
    Status,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // The TUI owns the terminal, so it logs to a file
    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config),
        Some(Commands::Fare {
            kind,
            distance,
            from,
            to,
            at,
            waiting,
        }) => {
            let route = from.zip(to);
            commands::fare::run(&config, kind, distance, route, at, waiting)
        }
        Some(Commands::Places { query, near }) => commands::places::run(query.as_deref(), near),
        Some(Commands::Tutorial { action }) => match action {
            TutorialAction::Reset => commands::tutorial::reset(&config),
            TutorialAction::Status => commands::tutorial::status(&config),
        },
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<VehicleKind, String> {
    s.parse().map_err(|e: farewheel_core::Error| e.to_string())
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| format!("expected HH:MM, got {}", s))
}

fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {}", s))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let lng = lng.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(GeoPoint::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_fare_route() {
        let cli = Cli::try_parse_from([
            "farewheel", "fare", "--kind", "taxi", "--from", "Kochi", "--to", "Thrissur", "--at",
            "23:15",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Fare {
                kind, from, to, at, ..
            }) => {
                assert_eq!(kind, VehicleKind::Taxi);
                assert_eq!(from.as_deref(), Some("Kochi"));
                assert_eq!(to.as_deref(), Some("Thrissur"));
                assert_eq!(at, NaiveTime::from_hms_opt(23, 15, 0));
            }
            _ => panic!("expected fare command"),
        }
    }

    #[test]
    fn test_cli_rejects_distance_with_route() {
        assert!(Cli::try_parse_from([
            "farewheel", "fare", "-k", "auto", "-d", "3", "--from", "Kochi", "--to", "Aluva"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["farewheel", "fare", "-k", "auto", "--from", "Kochi"]).is_err());
    }

    #[test]
    fn test_parsers() {
        assert!(parse_kind("tram").is_err());
        assert!(parse_time("25:00").is_err());
        assert_eq!(parse_point("10.0, 76.3").unwrap(), GeoPoint::new(10.0, 76.3));
        assert!(parse_point("10.0").is_err());
    }

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["farewheel"]).unwrap();
        assert!(cli.command.is_none());
    }
}
