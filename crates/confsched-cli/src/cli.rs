//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use confsched_core::ScheduleFilter;
use confsched_export::ExportFormat;

/// confsched - Conference schedule extraction and export
#[derive(Debug, Parser)]
#[command(name = "confsched")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CONFSCHED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Read a saved schedule page (or its JSON data block) instead of fetching
    #[arg(long, short, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Schedule page URL
    #[arg(long)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Schedule(ScheduleCommand),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that work on a loaded schedule.
#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// Show event and presenter counts and the distinct filter values
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter and export the event table
    Events {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Export the presenter table
    Presenters {
        /// Only presenters of this company (can be repeated)
        #[arg(long = "company", value_name = "COMPANY", action = clap::ArgAction::Append)]
        companies: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Export the company table
    Companies {
        /// Only this company (can be repeated)
        #[arg(long = "company", value_name = "COMPANY", action = clap::ArgAction::Append)]
        companies: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write all three tables into one XLSX workbook
    Dump {
        /// Output file
        #[arg(long, short, default_value = "schedule.xlsx")]
        output: PathBuf,

        /// Size columns to their content
        #[arg(long)]
        adjust_width: bool,
    },
}

/// Event filter flags.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only events of this track (can be repeated)
    #[arg(long = "track", value_name = "TRACK", action = clap::ArgAction::Append)]
    pub tracks: Vec<String>,

    /// Only events on this date, YYYY-MM-DD (can be repeated)
    #[arg(long = "date", value_name = "DATE", value_parser = parse_date, action = clap::ArgAction::Append)]
    pub dates: Vec<NaiveDate>,

    /// Only events in this room (can be repeated)
    #[arg(long = "room", value_name = "ROOM", action = clap::ArgAction::Append)]
    pub rooms: Vec<String>,

    /// Only events with a presenter from this company (can be repeated)
    #[arg(long = "company", value_name = "COMPANY", action = clap::ArgAction::Append)]
    pub companies: Vec<String>,
}

impl FilterArgs {
    /// Builds the schedule filter for these flags.
    pub fn to_filter(&self) -> ScheduleFilter {
        ScheduleFilter::new()
            .with_tracks(self.tracks.iter().cloned())
            .with_dates(self.dates.iter().copied())
            .with_rooms(self.rooms.iter().cloned())
            .with_companies(self.companies.iter().cloned())
    }
}

/// Export destination flags.
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Write a file in this format instead of printing CSV
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Directory for exported files
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Include a row index column
    #[arg(long)]
    pub index: bool,
}

/// File formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {value:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("confsched").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn events_with_filters() {
        let cli = parse(&[
            "events", "--track", "AI", "--track", "Infra", "--date", "2024-06-25", "--company",
            "Acme", "--format", "xlsx",
        ]);
        let Command::Schedule(ScheduleCommand::Events { filter, output }) = cli.command else {
            panic!("expected events command");
        };
        assert_eq!(filter.tracks, ["AI", "Infra"]);
        assert_eq!(output.format, Some(FormatArg::Xlsx));

        let filter = filter.to_filter();
        assert_eq!(filter.export_name("events"), "events_AI-Infra_25_Acme");
    }

    #[test]
    fn rejects_bad_date() {
        let result = Cli::try_parse_from(["confsched", "events", "--date", "25/06/2024"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags() {
        let cli = parse(&["--input", "page.html", "-v", "summary", "--json"]);
        assert!(cli.debug);
        assert_eq!(cli.input, Some(PathBuf::from("page.html")));
        assert!(matches!(
            cli.command,
            Command::Schedule(ScheduleCommand::Summary { json: true })
        ));
    }

    #[test]
    fn dump_defaults() {
        let cli = parse(&["dump"]);
        let Command::Schedule(ScheduleCommand::Dump {
            output,
            adjust_width,
        }) = cli.command
        else {
            panic!("expected dump command");
        };
        assert_eq!(output, PathBuf::from("schedule.xlsx"));
        assert!(!adjust_width);
    }

    #[test]
    fn config_is_not_a_schedule_command() {
        let cli = parse(&["config", "path"]);
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Path
            }
        ));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
