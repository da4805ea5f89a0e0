//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use villages_core::{Category, DateRange, Location, OutputFormat};

/// villages-events - Entertainment events from The Villages, formatted for
/// radios, spreadsheets and terminals
#[derive(Debug, Parser)]
#[command(name = "villages-events")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "VILLAGES_EVENTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    // --- Output flags ---
    /// Output format [default: from config, else meshtastic]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output raw API response without processing
    #[arg(long)]
    pub raw: bool,

    /// Comma-separated list of field names to include in output
    /// (e.g. "location.title,title,start.date")
    #[arg(long)]
    pub fields: Option<String>,

    // --- Filter flags ---
    /// Date range for events [default: from config, else today]
    #[arg(long, value_enum)]
    pub date_range: Option<DateRange>,

    /// Event category [default: from config, else entertainment]
    #[arg(long, value_enum)]
    pub category: Option<Category>,

    /// Event location [default: from config, else town-squares]
    #[arg(long, value_enum)]
    pub location: Option<Location>,

    // --- Connection flags ---
    /// Request timeout in seconds [default: from config, else 10]
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective file configuration as YAML
    Dump,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "villages-events",
            "--format",
            "csv",
            "--date-range",
            "next-week",
            "--category",
            "arts-and-crafts",
            "--location",
            "Brownwood+Paddock+Square",
            "--fields",
            "title,start.date",
            "--timeout",
            "3",
            "--raw",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Csv));
        assert_eq!(cli.date_range, Some(DateRange::NextWeek));
        assert_eq!(cli.category, Some(Category::ArtsAndCrafts));
        assert_eq!(cli.location, Some(Location::Brownwood));
        assert_eq!(cli.fields.as_deref(), Some("title,start.date"));
        assert_eq!(cli.timeout, Some(3));
        assert!(cli.raw);
        assert!(cli.debug);
    }

    #[test]
    fn defaults_are_unset() {
        let cli = Cli::try_parse_from(["villages-events"]).unwrap();
        assert!(cli.format.is_none());
        assert!(cli.date_range.is_none());
        assert!(!cli.raw);
        assert!(cli.command.is_none());
    }

    #[test]
    fn rejects_unknown_format() {
        let err = Cli::try_parse_from(["villages-events", "--format", "xml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn rejects_unknown_location() {
        let err = Cli::try_parse_from(["villages-events", "--location", "moon"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::try_parse_from(["villages-events", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
    }
}
