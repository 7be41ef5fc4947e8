//! Airfoil profiles.
//!
//! An [`Airfoil`] is an immutable value describing one aerodynamic profile.
//! Thickness is stored as a fraction of chord; see
//! [`crate::catalog::normalize_thickness`] for converting user input.

use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};

/// Drag coefficient substituted for a zero `min_cd` when computing L/D.
pub const MIN_DRAG_EPSILON: f64 = 0.001;

/// An aerodynamic profile in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airfoil {
    name: String,
    max_cl: f64,
    min_cd: f64,
    reynolds_min: f64,
    reynolds_max: f64,
    application_type: String,
    thickness: f64,
}

impl Airfoil {
    /// Create a validated airfoil.
    ///
    /// `thickness` is a fraction of chord (0.12 for a 12% profile).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name is blank, any number is not
    /// finite, `max_cl` is not positive, `min_cd` or a Reynolds bound is
    /// negative, or `thickness` is outside `[0, 1)`.
    pub fn new(
        name: impl Into<String>,
        max_cl: f64,
        min_cd: f64,
        reynolds_min: f64,
        reynolds_max: f64,
        application_type: impl Into<String>,
        thickness: f64,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("name", "cannot be empty"));
        }

        require_finite("max_cl", max_cl)?;
        require_finite("min_cd", min_cd)?;
        require_finite("reynolds_min", reynolds_min)?;
        require_finite("reynolds_max", reynolds_max)?;
        require_finite("thickness", thickness)?;

        if max_cl <= 0.0 {
            return Err(Error::validation("max_cl", "must be positive"));
        }
        if min_cd < 0.0 {
            return Err(Error::validation("min_cd", "cannot be negative"));
        }
        if reynolds_min < 0.0 || reynolds_max < 0.0 {
            return Err(Error::validation(
                "reynolds range",
                "bounds cannot be negative",
            ));
        }
        if !(0.0..1.0).contains(&thickness) {
            return Err(Error::validation(
                "thickness",
                format!("{thickness} is not a fraction of chord in [0, 1)"),
            ));
        }
        if reynolds_min > reynolds_max {
            warn!(
                "Airfoil {} has inverted Reynolds band {:e} > {:e}",
                name, reynolds_min, reynolds_max
            );
        }

        Ok(Self {
            name,
            max_cl,
            min_cd,
            reynolds_min,
            reynolds_max,
            application_type: application_type.into().trim().to_string(),
            thickness,
        })
    }

    /// Catalog name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum lift coefficient.
    #[must_use]
    pub fn max_cl(&self) -> f64 {
        self.max_cl
    }

    /// Minimum drag coefficient.
    #[must_use]
    pub fn min_cd(&self) -> f64 {
        self.min_cd
    }

    /// Lower bound of the operating Reynolds band.
    #[must_use]
    pub fn reynolds_min(&self) -> f64 {
        self.reynolds_min
    }

    /// Upper bound of the operating Reynolds band.
    #[must_use]
    pub fn reynolds_max(&self) -> f64 {
        self.reynolds_max
    }

    /// Width of the operating Reynolds band.
    #[must_use]
    pub fn reynolds_span(&self) -> f64 {
        self.reynolds_max - self.reynolds_min
    }

    /// Whether `reynolds` lies inside the operating band (inclusive).
    #[must_use]
    pub fn covers_reynolds(&self, reynolds: f64) -> bool {
        reynolds >= self.reynolds_min && reynolds <= self.reynolds_max
    }

    /// Free-text application category.
    #[must_use]
    pub fn application_type(&self) -> &str {
        &self.application_type
    }

    /// Thickness as a fraction of chord.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Thickness in percent of chord.
    #[must_use]
    pub fn thickness_percent(&self) -> f64 {
        self.thickness * 100.0
    }

    /// Lift-to-drag ratio, `max_cl / min_cd`.
    ///
    /// A zero drag coefficient is replaced by [`MIN_DRAG_EPSILON`], so the
    /// result is a large finite sentinel rather than infinity.
    #[must_use]
    pub fn lift_to_drag_ratio(&self) -> f64 {
        let drag = if self.min_cd == 0.0 {
            MIN_DRAG_EPSILON
        } else {
            self.min_cd
        };
        self.max_cl / drag
    }

    /// Case-insensitive catalog key.
    #[must_use]
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// One-line technical summary.
    #[must_use]
    pub fn details(&self) -> String {
        format!(
            "Type: {} | Max Cl: {:.3} | Min Cd: {:.4} | L/D: {:.2} | Thickness: {:.1}% | Re Range: {:.1e}-{:.1e}",
            self.application_type,
            self.max_cl,
            self.min_cd,
            self.lift_to_drag_ratio(),
            self.thickness_percent(),
            self.reynolds_min,
            self.reynolds_max,
        )
    }
}

impl std::fmt::Display for Airfoil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.application_type)
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::validation(field, format!("{value} is not a finite number")))
    }
}
