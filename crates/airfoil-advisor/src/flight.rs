//! Flight-parameter queries.
//!
//! A [`FlightParameters`] value is what a user submits to get airfoil
//! recommendations. Atmospheric properties are fixed sea-level constants;
//! altitude is recorded but does not alter them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kinematic viscosity of air used for Reynolds numbers (m²/s).
pub const KINEMATIC_VISCOSITY: f64 = 1.5e-5;

/// Air density used for dynamic pressure (kg/m³).
pub const AIR_DENSITY: f64 = 1.225;

/// Standard gravity, used to convert a mass into required lift (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.8;

/// An immutable flight-parameter query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightParameters {
    speed: f64,
    altitude: f64,
    wing_area: f64,
    required_lift: f64,
}

impl FlightParameters {
    /// Create a validated query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a value is not finite, when speed,
    /// wing area or required lift is not positive, or when altitude is negative.
    pub fn new(speed: f64, altitude: f64, wing_area: f64, required_lift: f64) -> Result<Self> {
        for (field, value) in [
            ("speed", speed),
            ("altitude", altitude),
            ("wing_area", wing_area),
            ("required_lift", required_lift),
        ] {
            if !value.is_finite() {
                return Err(Error::validation(
                    field,
                    format!("{value} is not a finite number"),
                ));
            }
        }
        if speed <= 0.0 {
            return Err(Error::validation("speed", "must be positive (m/s)"));
        }
        if altitude < 0.0 {
            return Err(Error::validation("altitude", "cannot be negative (m)"));
        }
        if wing_area <= 0.0 {
            return Err(Error::validation("wing_area", "must be positive (m²)"));
        }
        if required_lift <= 0.0 {
            return Err(Error::validation("required_lift", "must be positive (N)"));
        }

        Ok(Self {
            speed,
            altitude,
            wing_area,
            required_lift,
        })
    }

    /// Lift needed to hold up `mass_kg` in level flight.
    #[must_use]
    pub fn lift_for_mass(mass_kg: f64) -> f64 {
        mass_kg * STANDARD_GRAVITY
    }

    /// Airspeed in m/s.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Altitude in meters.
    #[must_use]
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Wing area in m².
    #[must_use]
    pub fn wing_area(&self) -> f64 {
        self.wing_area
    }

    /// Required lift in newtons.
    #[must_use]
    pub fn required_lift(&self) -> f64 {
        self.required_lift
    }

    /// Reference chord, approximated as the square root of wing area.
    #[must_use]
    pub fn chord(&self) -> f64 {
        self.wing_area.sqrt()
    }

    /// Reynolds number at the reference chord.
    #[must_use]
    pub fn reynolds_number(&self) -> f64 {
        self.speed * self.chord() / KINEMATIC_VISCOSITY
    }

    /// Dynamic pressure `½ρv²` in pascals.
    #[must_use]
    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * AIR_DENSITY * self.speed * self.speed
    }

    /// Lift coefficient needed to generate the required lift.
    #[must_use]
    pub fn required_cl(&self) -> f64 {
        self.required_lift / (self.dynamic_pressure() * self.wing_area)
    }

    /// Multi-field summary including derived metrics.
    #[must_use]
    pub fn details(&self) -> String {
        format!(
            "{self} | Chord: {:.3} m | Required Cl: {:.3}",
            self.chord(),
            self.required_cl()
        )
    }
}

impl std::fmt::Display for FlightParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Speed: {:.1} m/s, Alt: {:.0} m, Wing Area: {:.2} m², Lift: {:.0} N, Re: {:.2e}",
            self.speed,
            self.altitude,
            self.wing_area,
            self.required_lift,
            self.reynolds_number()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reynolds_number() {
        let params = FlightParameters::new(10.0, 0.0, 1.0, 50.0).unwrap();
        assert_eq!(params.chord(), 1.0);
        let expected = 10.0 / 1.5e-5;
        assert!((params.reynolds_number() - expected).abs() < 1e-6);
        assert!((params.reynolds_number() - 666_666.67).abs() < 1.0);
    }

    #[test]
    fn test_chord_is_sqrt_of_area() {
        let params = FlightParameters::new(20.0, 100.0, 4.0, 500.0).unwrap();
        assert_eq!(params.chord(), 2.0);
        assert!((params.reynolds_number() - 20.0 * 2.0 / KINEMATIC_VISCOSITY).abs() < 1e-6);
    }

    #[test]
    fn test_required_cl() {
        let params = FlightParameters::new(20.0, 0.0, 2.0, 490.0).unwrap();
        let q = 0.5 * 1.225 * 400.0;
        assert!((params.dynamic_pressure() - q).abs() < 1e-9);
        assert!((params.required_cl() - 490.0 / (q * 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_lift_for_mass() {
        assert!((FlightParameters::lift_for_mass(5.0) - 49.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_altitude_allowed() {
        assert!(FlightParameters::new(10.0, 0.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_invalid_speed() {
        let err = FlightParameters::new(0.0, 0.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "speed", .. }));
        assert!(FlightParameters::new(-5.0, 0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_invalid_altitude() {
        let err = FlightParameters::new(10.0, -1.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "altitude", .. }));
    }

    #[test]
    fn test_invalid_wing_area_and_lift() {
        assert!(matches!(
            FlightParameters::new(10.0, 0.0, 0.0, 1.0).unwrap_err(),
            Error::Validation { field: "wing_area", .. }
        ));
        assert!(matches!(
            FlightParameters::new(10.0, 0.0, 1.0, 0.0).unwrap_err(),
            Error::Validation { field: "required_lift", .. }
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let err = FlightParameters::new(f64::NAN, 0.0, 1.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("not a finite number"));
    }

    #[test]
    fn test_display() {
        let params = FlightParameters::new(10.0, 150.0, 1.0, 49.0).unwrap();
        let text = params.to_string();
        assert!(text.starts_with("Speed: 10.0 m/s, Alt: 150 m, Wing Area: 1.00 m², Lift: 49 N"));
        assert!(text.contains("Re: 6.67e5"));
    }

    #[test]
    fn test_details_includes_required_cl() {
        let params = FlightParameters::new(10.0, 0.0, 1.0, 49.0).unwrap();
        assert!(params.details().contains("Required Cl:"));
    }

    #[test]
    fn test_json_round_trip_preserves_derived_metrics() {
        let params = FlightParameters::new(17.3, 420.0, 0.61, 88.2).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        let back: FlightParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back.reynolds_number(), params.reynolds_number());
        assert_eq!(back.required_cl(), params.required_cl());
    }
}
