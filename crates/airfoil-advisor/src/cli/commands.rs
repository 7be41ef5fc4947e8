//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand, ValueEnum};

use crate::error::Result;
use crate::flight::FlightParameters;

/// Parse a result count; zero is rejected like `top_k = 0` in config.
fn parse_count(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Account management commands.
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Create a new account
    Register {
        /// Username (letters, digits, underscores)
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (or set FOILREC_PASSWORD)
        #[arg(long, env = "FOILREC_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Check a username/password pair
    Login {
        /// Account credentials
        #[command(flatten)]
        credentials: Credentials,
    },
}

/// Username and password of the invoking user.
#[derive(Debug, Clone, Args)]
pub struct Credentials {
    /// Username
    #[arg(short, long = "user")]
    pub username: String,

    /// Password (or set FOILREC_PASSWORD)
    #[arg(long, env = "FOILREC_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Catalog commands.
#[derive(Debug, Subcommand)]
pub enum AirfoilCommand {
    /// Add an airfoil to the catalog
    Add(AddAirfoilCommand),

    /// List cataloged airfoils
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one airfoil in detail
    Show {
        /// Airfoil name (case-insensitive)
        name: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },
}

/// Arguments for adding an airfoil.
#[derive(Debug, Args)]
pub struct AddAirfoilCommand {
    /// Airfoil name, unique ignoring case
    pub name: String,

    /// Maximum lift coefficient
    #[arg(long)]
    pub max_cl: f64,

    /// Minimum drag coefficient
    #[arg(long)]
    pub min_cd: f64,

    /// Lower bound of the operating Reynolds range
    #[arg(long)]
    pub re_min: f64,

    /// Upper bound of the operating Reynolds range
    #[arg(long)]
    pub re_max: f64,

    /// Application category (e.g. "High Lift", "Low Drag")
    #[arg(short = 't', long = "type", default_value = "General Purpose")]
    pub application_type: String,

    /// Thickness as a fraction (0.12), percent (12) or with a sign (12%)
    #[arg(long)]
    pub thickness: String,
}

/// Recommendation command arguments.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("load").required(true).args(["lift", "mass"])))]
pub struct RecommendCommand {
    /// Account the search is recorded under
    #[command(flatten)]
    pub credentials: Credentials,

    /// Airspeed in m/s
    #[arg(long)]
    pub speed: f64,

    /// Altitude in meters
    #[arg(long, default_value = "0")]
    pub altitude: f64,

    /// Wing area in m²
    #[arg(long)]
    pub wing_area: f64,

    /// Required lift in newtons
    #[arg(long)]
    pub lift: Option<f64>,

    /// Aircraft mass in kg (lift = mass × g)
    #[arg(long)]
    pub mass: Option<f64>,

    /// Number of results to show (defaults to recommend.top_k)
    #[arg(short = 'k', long, value_parser = parse_count)]
    pub top: Option<usize>,

    /// Show every ranked airfoil
    #[arg(short, long, conflicts_with = "top")]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl RecommendCommand {
    /// Required lift from `--lift` or `--mass`.
    #[must_use]
    pub fn required_lift(&self) -> f64 {
        self.lift
            .or_else(|| self.mass.map(FlightParameters::lift_for_mass))
            .unwrap_or_default()
    }

    /// Build the flight-parameter query.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range values.
    pub fn flight_parameters(&self) -> Result<FlightParameters> {
        FlightParameters::new(self.speed, self.altitude, self.wing_area, self.required_lift())
    }
}

/// Comparison command arguments.
#[derive(Debug, Args)]
pub struct CompareCommand {
    /// First airfoil (name, or 1-based position with --index)
    pub first: String,

    /// Second airfoil (name, or 1-based position with --index)
    pub second: String,

    /// Select airfoils by position in `airfoil list`
    #[arg(short, long)]
    pub index: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// History command arguments.
#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Account whose searches are shown
    #[command(flatten)]
    pub credentials: Credentials,

    /// Maximum entries (defaults to history.recent_limit)
    #[arg(short, long, value_parser = parse_count)]
    pub limit: Option<usize>,

    /// Show the full history
    #[arg(short, long, conflicts_with = "limit")]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
