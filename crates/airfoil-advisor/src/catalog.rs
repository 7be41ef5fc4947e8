//! Airfoil catalog abstraction.
//!
//! The catalog is an ordered, append-only collection of [`Airfoil`]s keyed
//! by case-insensitive name. Thickness enters the catalog as a fraction of
//! chord; [`normalize_thickness`] and [`parse_thickness`] convert user input
//! at this boundary so no other code has to guess the unit.

use tracing::{debug, info};

use crate::airfoil::Airfoil;
use crate::error::{Error, Result};

/// Case-insensitive lookup key for names, usernames and emails.
#[must_use]
pub fn lookup_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Storage for cataloged airfoils.
pub trait CatalogStore {
    /// All airfoils in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list_all(&self) -> Result<Vec<Airfoil>>;

    /// Append an airfoil.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAirfoil`] if an entry with the same
    /// case-insensitive name exists, or a store error.
    fn add(&mut self, airfoil: &Airfoil) -> Result<()>;

    /// Whether an entry with this case-insensitive name exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Look up an airfoil by case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn find(&self, name: &str) -> Result<Option<Airfoil>> {
        let key = lookup_key(name);
        Ok(self.list_all()?.into_iter().find(|a| a.key() == key))
    }
}

/// Convert a thickness value to a fraction of chord.
///
/// Values above 1.0 are read as percent (12 becomes 0.12); values in
/// `[0, 1]` are already fractions.
///
/// # Errors
///
/// Returns [`Error::Validation`] for negative, non-finite, or >= 100% values.
pub fn normalize_thickness(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::validation(
            "thickness",
            format!("{value} is not a valid thickness"),
        ));
    }
    let fraction = if value > 1.0 { value / 100.0 } else { value };
    check_fraction(value, fraction)
}

/// Parse user-entered thickness text such as `0.12`, `12` or `12%`.
///
/// A trailing `%` always means percent, so `0.5%` is 0.005.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the text is not a number or the value is
/// out of range.
pub fn parse_thickness(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let (number, percent) = match trimmed.strip_suffix('%') {
        Some(stripped) => (stripped.trim(), true),
        None => (trimmed, false),
    };
    let value: f64 = number
        .parse()
        .map_err(|_| Error::validation("thickness", format!("'{text}' is not a number")))?;

    if percent {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::validation(
                "thickness",
                format!("{text} is not a valid thickness"),
            ));
        }
        check_fraction(value, value / 100.0)
    } else {
        normalize_thickness(value)
    }
}

fn check_fraction(input: f64, fraction: f64) -> Result<f64> {
    if fraction >= 1.0 {
        return Err(Error::validation(
            "thickness",
            format!("{input} is not below 100% of chord"),
        ));
    }
    Ok(fraction)
}

/// In-memory catalog backed by a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    airfoils: Vec<Airfoil>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cataloged airfoils.
    #[must_use]
    pub fn len(&self) -> usize {
        self.airfoils.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.airfoils.is_empty()
    }
}

impl CatalogStore for MemoryCatalog {
    fn list_all(&self) -> Result<Vec<Airfoil>> {
        Ok(self.airfoils.clone())
    }

    fn add(&mut self, airfoil: &Airfoil) -> Result<()> {
        if self.exists(airfoil.name())? {
            debug!("Rejecting duplicate airfoil {}", airfoil.name());
            return Err(Error::DuplicateAirfoil {
                name: airfoil.name().to_string(),
            });
        }
        self.airfoils.push(airfoil.clone());
        info!("Cataloged airfoil {}", airfoil.name());
        Ok(())
    }

    fn exists(&self, name: &str) -> Result<bool> {
        let key = lookup_key(name);
        Ok(self.airfoils.iter().any(|a| a.key() == key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airfoil(name: &str) -> Airfoil {
        Airfoil::new(name, 1.2, 0.01, 1e5, 1e6, "General", 0.12).unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let mut catalog = MemoryCatalog::new();
        catalog.add(&airfoil("NACA 0012")).unwrap();
        catalog.add(&airfoil("Clark-Y")).unwrap();

        let all = catalog.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name(), "NACA 0012");
        assert_eq!(all[1].name(), "Clark-Y");
    }

    #[test]
    fn test_duplicate_is_case_insensitive() {
        let mut catalog = MemoryCatalog::new();
        catalog.add(&airfoil("clark-y")).unwrap();

        let err = catalog.add(&airfoil("Clark-Y")).unwrap_err();
        assert!(matches!(err, Error::DuplicateAirfoil { .. }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_exists() {
        let mut catalog = MemoryCatalog::new();
        assert!(!catalog.exists("E387").unwrap());
        catalog.add(&airfoil("E387")).unwrap();
        assert!(catalog.exists("e387").unwrap());
        assert!(catalog.exists(" E387 ").unwrap());
    }

    #[test]
    fn test_find() {
        let mut catalog = MemoryCatalog::new();
        catalog.add(&airfoil("S1223")).unwrap();
        assert_eq!(catalog.find("s1223").unwrap().unwrap().name(), "S1223");
        assert!(catalog.find("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_all_is_idempotent() {
        let mut catalog = MemoryCatalog::new();
        catalog.add(&airfoil("A")).unwrap();
        catalog.add(&airfoil("B")).unwrap();
        assert_eq!(catalog.list_all().unwrap(), catalog.list_all().unwrap());
    }

    #[test]
    fn test_normalize_thickness() {
        assert!((normalize_thickness(0.12).unwrap() - 0.12).abs() < 1e-12);
        assert!((normalize_thickness(12.0).unwrap() - 0.12).abs() < 1e-12);
        assert!(normalize_thickness(-0.1).is_err());
        assert!(normalize_thickness(100.0).is_err());
        assert!(normalize_thickness(f64::NAN).is_err());
    }

    #[test]
    fn test_normalize_thickness_one_is_full_chord() {
        // 1.0 is read as a fraction and rejected as 100% of chord
        assert!(normalize_thickness(1.0).is_err());
    }

    #[test]
    fn test_parse_thickness() {
        assert!((parse_thickness("0.12").unwrap() - 0.12).abs() < 1e-12);
        assert!((parse_thickness("12").unwrap() - 0.12).abs() < 1e-12);
        assert!((parse_thickness(" 12 % ").unwrap() - 0.12).abs() < 1e-12);
        assert!((parse_thickness("0.5%").unwrap() - 0.005).abs() < 1e-12);
        assert!(parse_thickness("thick").is_err());
        assert!(parse_thickness("150%").is_err());
    }
}
