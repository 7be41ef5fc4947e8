//! Configuration management for airfoil-advisor.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::compare::ComparisonThresholds;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "airfoil-advisor";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "airfoils.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `AIRFOIL_`)
/// 2. TOML config file at `~/.config/airfoil-advisor/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Recommendation configuration.
    pub recommend: RecommendConfig,
    /// Comparison configuration.
    pub compare: CompareConfig,
    /// Account configuration.
    pub accounts: AccountConfig,
    /// Search history configuration.
    pub history: HistoryConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/airfoil-advisor/airfoils.db`
    pub database_path: Option<PathBuf>,
}

/// How recommendation scores are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Rank purely by lift-to-drag ratio.
    #[default]
    LiftToDrag,
    /// Weight L/D by Reynolds-band coverage and lift margin.
    FlightEnvelope,
}

impl std::fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LiftToDrag => write!(f, "lift_to_drag"),
            Self::FlightEnvelope => write!(f, "flight_envelope"),
        }
    }
}

/// Recommendation-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Number of ranked results shown.
    pub top_k: usize,
    /// Scoring strategy.
    pub strategy: ScoringStrategy,
}

/// Comparison-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Relative max Cl margin before a "better for high lift" verdict.
    pub high_lift_margin: f64,
    /// Relative min Cd margin before a "better for low drag" verdict.
    pub low_drag_margin: f64,
    /// Thickness gap in percentage points before a structural verdict.
    pub thickness_margin_points: f64,
}

/// Account-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Minimum username length.
    pub min_username_length: usize,
    /// Minimum password length.
    pub min_password_length: usize,
}

/// Search-history configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Entries shown by default when listing recent searches.
    pub recent_limit: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            strategy: ScoringStrategy::default(),
        }
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        let thresholds = ComparisonThresholds::default();
        Self {
            high_lift_margin: thresholds.high_lift_margin,
            low_drag_margin: thresholds.low_drag_margin,
            thickness_margin_points: thresholds.thickness_margin_points,
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            min_username_length: 4,
            min_password_length: 8,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { recent_limit: 10 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("AIRFOIL_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.recommend.top_k == 0 {
            return Err(Error::ConfigValidation {
                message: "recommend.top_k must be greater than 0".to_string(),
            });
        }

        for (name, margin) in [
            ("compare.high_lift_margin", self.compare.high_lift_margin),
            ("compare.low_drag_margin", self.compare.low_drag_margin),
            (
                "compare.thickness_margin_points",
                self.compare.thickness_margin_points,
            ),
        ] {
            if !margin.is_finite() || margin <= 0.0 {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must be a positive number, got {margin}"),
                });
            }
        }
        if self.compare.low_drag_margin >= 1.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "compare.low_drag_margin ({}) must be below 1.0",
                    self.compare.low_drag_margin
                ),
            });
        }

        if self.accounts.min_username_length == 0 || self.accounts.min_password_length == 0 {
            return Err(Error::ConfigValidation {
                message: "account minimum lengths must be greater than 0".to_string(),
            });
        }

        if self.history.recent_limit == 0 {
            return Err(Error::ConfigValidation {
                message: "history.recent_limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Comparison thresholds from the `compare` section.
    #[must_use]
    pub fn comparison_thresholds(&self) -> ComparisonThresholds {
        ComparisonThresholds {
            high_lift_margin: self.compare.high_lift_margin,
            low_drag_margin: self.compare.low_drag_margin,
            thickness_margin_points: self.compare.thickness_margin_points,
        }
    }
}
