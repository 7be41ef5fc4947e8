//! `airfoil-advisor` - An airfoil catalog with recommendation and comparison
//!
//! This library keeps a catalog of airfoil profiles, ranks them for a set of
//! flight parameters, compares pairs parameter by parameter, and records each
//! user's search history. Stores are traits; SQLite and in-memory backends are
//! provided.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod account;
pub mod advisor;
pub mod airfoil;
pub mod catalog;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod flight;
pub mod history;
pub mod logging;
pub mod recommend;
pub mod storage;

pub use account::{AccountRules, AccountStore, User};
pub use advisor::{Advisor, MemoryStore};
pub use airfoil::Airfoil;
pub use catalog::{CatalogStore, MemoryCatalog};
pub use compare::{compare, Comparison, ComparisonThresholds};
pub use config::Config;
pub use error::{Error, Result};
pub use flight::FlightParameters;
pub use history::{HistoryStore, MemoryHistory};
pub use logging::init_logging;
pub use recommend::{recommend, RecommendationResult, Scorer};
pub use storage::{Storage, StorageStats};
