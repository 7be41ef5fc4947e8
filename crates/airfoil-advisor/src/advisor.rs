//! The advisor façade.
//!
//! [`Advisor`] ties a store to the recommendation and comparison engines. It
//! owns the side effects: recording searches in the history log and looking
//! up comparison candidates in the catalog.

use tracing::{debug, info};

use crate::airfoil::Airfoil;
use crate::catalog::{lookup_key, CatalogStore, MemoryCatalog};
use crate::compare::{compare, Comparison, ComparisonThresholds};
use crate::config::{Config, ScoringStrategy};
use crate::error::{Error, Result};
use crate::flight::FlightParameters;
use crate::history::{recent_first, HistoryStore, MemoryHistory};
use crate::recommend::{recommend, scorer_for, RecommendationResult};

/// Catalog and history kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    catalog: MemoryCatalog,
    history: MemoryHistory,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<Airfoil>> {
        self.catalog.list_all()
    }

    fn add(&mut self, airfoil: &Airfoil) -> Result<()> {
        self.catalog.add(airfoil)
    }

    fn exists(&self, name: &str) -> Result<bool> {
        self.catalog.exists(name)
    }
}

impl HistoryStore for MemoryStore {
    fn append(&mut self, username: &str, params: &FlightParameters) -> Result<()> {
        self.history.append(username, params)
    }

    fn list(&self, username: &str) -> Result<Vec<FlightParameters>> {
        self.history.list(username)
    }
}

/// Recommendation and comparison over a catalog/history store.
#[derive(Debug)]
pub struct Advisor<S> {
    store: S,
    strategy: ScoringStrategy,
    thresholds: ComparisonThresholds,
}

impl<S: CatalogStore + HistoryStore> Advisor<S> {
    /// Create an advisor with default scoring and thresholds.
    pub fn new(store: S) -> Self {
        Self {
            store,
            strategy: ScoringStrategy::default(),
            thresholds: ComparisonThresholds::default(),
        }
    }

    /// Create an advisor using the scoring strategy and thresholds from `config`.
    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            strategy: config.recommend.strategy,
            thresholds: config.comparison_thresholds(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Add an airfoil to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAirfoil`] for a case-insensitive name clash,
    /// or a store error.
    pub fn add_airfoil(&mut self, airfoil: &Airfoil) -> Result<()> {
        self.store.add(airfoil)
    }

    /// All cataloged airfoils in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read.
    pub fn list_airfoils(&self) -> Result<Vec<Airfoil>> {
        self.store.list_all()
    }

    /// Look up one airfoil by case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AirfoilNotFound`] if no entry matches, or a store error.
    pub fn airfoil(&self, name: &str) -> Result<Airfoil> {
        self.store
            .find(name)?
            .ok_or_else(|| Error::AirfoilNotFound(name.trim().to_string()))
    }

    /// Record the query in `username`'s history, then rank the catalog.
    ///
    /// An empty catalog yields an empty ranking; a store failure is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written or the catalog read.
    pub fn recommend(
        &mut self,
        username: &str,
        params: &FlightParameters,
    ) -> Result<Vec<RecommendationResult>> {
        self.store.append(username, params)?;
        let airfoils = self.store.list_all()?;
        debug!(
            "Scoring {} airfoils with {} for Re {:.3e}",
            airfoils.len(),
            self.strategy,
            params.reynolds_number()
        );
        let scorer = scorer_for(self.strategy);
        Ok(recommend(&airfoils, params, scorer.as_ref()))
    }

    /// Compare two airfoils selected by case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientAirfoils`] if the catalog has fewer than
    /// two entries, [`Error::Validation`] if both names select the same entry,
    /// [`Error::AirfoilNotFound`] for an unknown name, or a store error.
    pub fn compare_by_name(&self, first: &str, second: &str) -> Result<Comparison> {
        let airfoils = self.comparable()?;
        let pick = |name: &str| {
            let key = lookup_key(name);
            airfoils
                .iter()
                .position(|a| a.key() == key)
                .ok_or_else(|| Error::AirfoilNotFound(name.trim().to_string()))
        };
        let (a, b) = (pick(first)?, pick(second)?);
        self.compare_positions(&airfoils, a, b)
    }

    /// Compare two airfoils selected by zero-based catalog position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientAirfoils`] if the catalog has fewer than
    /// two entries, [`Error::Validation`] if both indices are equal,
    /// [`Error::AirfoilNotFound`] for an out-of-range index, or a store error.
    pub fn compare_by_index(&self, first: usize, second: usize) -> Result<Comparison> {
        let airfoils = self.comparable()?;
        for index in [first, second] {
            if index >= airfoils.len() {
                return Err(Error::AirfoilNotFound(format!(
                    "index {index} (catalog has {} entries)",
                    airfoils.len()
                )));
            }
        }
        self.compare_positions(&airfoils, first, second)
    }

    /// Recent searches by `username`, newest first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read.
    pub fn history(&self, username: &str, limit: Option<usize>) -> Result<Vec<FlightParameters>> {
        Ok(recent_first(self.store.list(username)?, limit))
    }

    fn comparable(&self) -> Result<Vec<Airfoil>> {
        let airfoils = self.store.list_all()?;
        if airfoils.len() < 2 {
            return Err(Error::InsufficientAirfoils {
                available: airfoils.len(),
            });
        }
        Ok(airfoils)
    }

    fn compare_positions(&self, airfoils: &[Airfoil], first: usize, second: usize) -> Result<Comparison> {
        if first == second {
            return Err(Error::validation(
                "selection",
                format!("cannot compare '{}' with itself", airfoils[first].name()),
            ));
        }
        let (a, b) = (&airfoils[first], &airfoils[second]);
        info!("Comparing {} against {}", a.name(), b.name());
        Ok(compare(a, b, &self.thresholds))
    }
}
