//! Command-line interface for airfoil-advisor.
//!
//! This module provides the CLI structure and output rendering for the
//! `foilrec` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AccountCommand, AddAirfoilCommand, AirfoilCommand, CompareCommand, ConfigCommand,
    Credentials, HistoryCommand, OutputFormat, RecommendCommand, StatusCommand,
};

/// foilrec - Find the right airfoil for your flight envelope
///
/// Keeps a catalog of airfoil profiles, ranks them for a set of flight
/// parameters, and compares any two side by side.
#[derive(Debug, Parser)]
#[command(name = "foilrec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register or check user accounts
    #[command(subcommand)]
    Account(AccountCommand),

    /// Manage the airfoil catalog
    #[command(subcommand)]
    Airfoil(AirfoilCommand),

    /// Rank the catalog for a set of flight parameters
    Recommend(RecommendCommand),

    /// Compare two airfoils side by side
    Compare(CompareCommand),

    /// Show your recent searches
    History(HistoryCommand),

    /// Explain the airfoil terms used in the output
    Guide,

    /// Show database status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "foilrec");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["foilrec", "status"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["foilrec", "-v", "status"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["foilrec", "-vv", "status"]).verbosity(), Verbosity::Debug);
        assert_eq!(parse(&["foilrec", "-q", "status"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["foilrec", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_airfoil_add() {
        let cli = parse(&[
            "foilrec", "airfoil", "add", "NACA 2412", "--max-cl", "1.6", "--min-cd", "0.0065",
            "--re-min", "1e5", "--re-max", "3e6", "--type", "General Purpose", "--thickness", "12%",
        ]);
        let Command::Airfoil(AirfoilCommand::Add(add)) = cli.command else {
            panic!("expected airfoil add");
        };
        assert_eq!(add.name, "NACA 2412");
        assert_eq!(add.max_cl, 1.6);
        assert_eq!(add.re_max, 3e6);
        assert_eq!(add.thickness, "12%");
    }

    #[test]
    fn test_parse_airfoil_list_default_format() {
        let cli = parse(&["foilrec", "airfoil", "list"]);
        assert!(matches!(
            cli.command,
            Command::Airfoil(AirfoilCommand::List {
                format: OutputFormat::Table
            })
        ));
    }

    #[test]
    fn test_parse_recommend_with_mass() {
        let cli = parse(&[
            "foilrec", "recommend", "-u", "pilot", "--password", "Secret#123", "--speed", "12",
            "--wing-area", "0.6", "--mass", "2.5", "--format", "json",
        ]);
        let Command::Recommend(cmd) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(cmd.credentials.username, "pilot");
        assert_eq!(cmd.altitude, 0.0);
        assert!((cmd.required_lift() - 24.5).abs() < 1e-12);
        assert_eq!(cmd.format, OutputFormat::Json);
    }

    #[test]
    fn test_recommend_requires_load() {
        let result = Cli::try_parse_from([
            "foilrec", "recommend", "-u", "pilot", "--password", "x", "--speed", "12",
            "--wing-area", "0.6",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_recommend_lift_and_mass_conflict() {
        let result = Cli::try_parse_from([
            "foilrec", "recommend", "-u", "pilot", "--password", "x", "--speed", "12",
            "--wing-area", "0.6", "--lift", "20", "--mass", "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_compare_by_index() {
        let cli = parse(&["foilrec", "compare", "1", "3", "--index"]);
        let Command::Compare(cmd) = cli.command else {
            panic!("expected compare");
        };
        assert!(cmd.index);
        assert_eq!(cmd.first, "1");
        assert_eq!(cmd.second, "3");
    }

    #[test]
    fn test_zero_counts_rejected() {
        let result = Cli::try_parse_from([
            "foilrec", "recommend", "-u", "pilot", "--password", "x", "--speed", "12",
            "--wing-area", "0.6", "--lift", "20", "--top", "0",
        ]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "foilrec", "history", "-u", "pilot", "--password", "x", "--limit", "0",
        ]);
        assert!(result.is_err());

        let cli = parse(&[
            "foilrec", "recommend", "-u", "pilot", "--password", "x", "--speed", "12",
            "--wing-area", "0.6", "--lift", "20", "-k", "1",
        ]);
        let Command::Recommend(cmd) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(cmd.top, Some(1));
    }

    #[test]
    fn test_parse_guide() {
        assert!(matches!(parse(&["foilrec", "guide"]).command, Command::Guide));
    }

    #[test]
    fn test_parse_history() {
        let cli = parse(&["foilrec", "history", "-u", "pilot", "--password", "x", "-l", "3"]);
        let Command::History(cmd) = cli.command else {
            panic!("expected history");
        };
        assert_eq!(cmd.limit, Some(3));
        assert!(!cmd.all);
    }

    #[test]
    fn test_parse_account_register() {
        let cli = parse(&[
            "foilrec", "account", "register", "-u", "pilot", "-e", "p@example.com", "--password",
            "Secret#123",
        ]);
        assert!(matches!(
            cli.command,
            Command::Account(AccountCommand::Register { .. })
        ));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["foilrec", "config", "validate", "--file", "/tmp/c.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
