//! Recommendation engine.
//!
//! Every airfoil in the catalog gets a score from a [`Scorer`]; results come
//! back best first. Ranking never drops entries and never fails: degenerate
//! drag values score a large finite sentinel through
//! [`Airfoil::lift_to_drag_ratio`].

use serde::Serialize;

use crate::airfoil::Airfoil;
use crate::config::ScoringStrategy;
use crate::flight::FlightParameters;

/// Reason attached by the [`LiftToDrag`] scorer.
pub const LIFT_TO_DRAG_REASON: &str = "High L/D ratio";

/// One ranked airfoil.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    /// The scored airfoil.
    pub airfoil: Airfoil,
    /// Score; higher is better.
    pub score: f64,
    /// Why the airfoil scored the way it did.
    pub reason: String,
}

impl std::fmt::Display for RecommendationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - Score: {:.2} ({})", self.airfoil, self.score, self.reason)
    }
}

/// Scores one airfoil against a flight-parameter query.
pub trait Scorer {
    /// Score `airfoil` for `params`, returning the score and a reason.
    fn score(&self, airfoil: &Airfoil, params: &FlightParameters) -> (f64, String);
}

/// Pure lift-to-drag ranking; ignores the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiftToDrag;

impl Scorer for LiftToDrag {
    fn score(&self, airfoil: &Airfoil, _params: &FlightParameters) -> (f64, String) {
        (airfoil.lift_to_drag_ratio(), LIFT_TO_DRAG_REASON.to_string())
    }
}

/// L/D weighted by how well the airfoil fits the query's flight envelope.
///
/// The Reynolds factor is 1 inside the airfoil's band and decays with the
/// decade distance to the nearest edge outside it. The lift factor is 1 when
/// max Cl meets the required lift coefficient and the ratio otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlightEnvelope;

impl FlightEnvelope {
    fn reynolds_factor(airfoil: &Airfoil, reynolds: f64) -> f64 {
        if airfoil.covers_reynolds(reynolds) {
            return 1.0;
        }
        let decades = [airfoil.reynolds_min(), airfoil.reynolds_max()]
            .iter()
            .map(|&edge| (reynolds / edge).log10().abs())
            .fold(f64::INFINITY, f64::min);
        1.0 / (1.0 + decades)
    }

    fn lift_factor(airfoil: &Airfoil, required_cl: f64) -> f64 {
        if airfoil.max_cl() >= required_cl {
            1.0
        } else {
            airfoil.max_cl() / required_cl
        }
    }
}

impl Scorer for FlightEnvelope {
    fn score(&self, airfoil: &Airfoil, params: &FlightParameters) -> (f64, String) {
        let reynolds = params.reynolds_number();
        let required_cl = params.required_cl();
        let coverage = Self::reynolds_factor(airfoil, reynolds);
        let lift = Self::lift_factor(airfoil, required_cl);

        let mut reasons = vec![LIFT_TO_DRAG_REASON.to_string()];
        if coverage < 1.0 {
            reasons.push(format!("Re {reynolds:.2e} outside operating range"));
        } else {
            reasons.push("Re within operating range".to_string());
        }
        if lift < 1.0 {
            reasons.push(format!("max Cl below required {required_cl:.3}"));
        } else {
            reasons.push("meets required Cl".to_string());
        }

        (airfoil.lift_to_drag_ratio() * coverage * lift, reasons.join(", "))
    }
}

/// The scorer for a configured strategy.
#[must_use]
pub fn scorer_for(strategy: ScoringStrategy) -> Box<dyn Scorer> {
    match strategy {
        ScoringStrategy::LiftToDrag => Box::new(LiftToDrag),
        ScoringStrategy::FlightEnvelope => Box::new(FlightEnvelope),
    }
}

/// Score and rank every airfoil, best first.
///
/// The sort is stable, so equal scores keep catalog order.
#[must_use]
pub fn recommend(
    airfoils: &[Airfoil],
    params: &FlightParameters,
    scorer: &dyn Scorer,
) -> Vec<RecommendationResult> {
    let mut results: Vec<RecommendationResult> = airfoils
        .iter()
        .map(|airfoil| {
            let (score, reason) = scorer.score(airfoil, params);
            RecommendationResult {
                airfoil: airfoil.clone(),
                score,
                reason,
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

/// The first `k` entries of a ranked list.
#[must_use]
pub fn top(mut ranked: Vec<RecommendationResult>, k: usize) -> Vec<RecommendationResult> {
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foil(name: &str, max_cl: f64, min_cd: f64) -> Airfoil {
        Airfoil::new(name, max_cl, min_cd, 1e5, 1e6, "General", 0.12).unwrap()
    }

    fn params() -> FlightParameters {
        FlightParameters::new(15.0, 100.0, 0.5, 40.0).unwrap()
    }

    #[test]
    fn test_single_airfoil_score() {
        let ranked = recommend(&[foil("A", 1.2, 0.01)], &params(), &LiftToDrag);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 120.0);
        assert_eq!(ranked[0].reason, "High L/D ratio");
    }

    #[test]
    fn test_ranked_descending_and_complete() {
        let catalog = vec![
            foil("low", 0.8, 0.02),
            foil("high", 1.6, 0.008),
            foil("mid", 1.2, 0.012),
        ];
        let ranked = recommend(&catalog, &params(), &LiftToDrag);

        assert_eq!(ranked.len(), catalog.len());
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        let names: Vec<_> = ranked.iter().map(|r| r.airfoil.name()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_baseline_score_is_exact_ratio() {
        let airfoil = foil("A", 1.37, 0.0093);
        let ranked = recommend(std::slice::from_ref(&airfoil), &params(), &LiftToDrag);
        assert_eq!(ranked[0].score, 1.37 / 0.0093);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = vec![
            foil("first", 1.0, 0.01),
            foil("better", 2.0, 0.01),
            foil("second", 1.0, 0.01),
            foil("third", 1.0, 0.01),
        ];
        let ranked = recommend(&catalog, &params(), &LiftToDrag);
        let names: Vec<_> = ranked.iter().map(|r| r.airfoil.name()).collect();
        assert_eq!(names, vec!["better", "first", "second", "third"]);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(recommend(&[], &params(), &LiftToDrag).is_empty());
    }

    #[test]
    fn test_zero_drag_scores_sentinel() {
        let catalog = vec![foil("normal", 1.2, 0.01), foil("ideal", 1.0, 0.0)];
        let ranked = recommend(&catalog, &params(), &LiftToDrag);
        assert_eq!(ranked[0].airfoil.name(), "ideal");
        assert!(ranked[0].score.is_finite());
        assert_eq!(ranked[0].score, 1000.0);
    }

    #[test]
    fn test_top_truncates() {
        let catalog = vec![foil("a", 1.0, 0.01), foil("b", 1.1, 0.01), foil("c", 1.2, 0.01)];
        let ranked = recommend(&catalog, &params(), &LiftToDrag);
        let best = top(ranked, 2);
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].airfoil.name(), "c");
        assert_eq!(top(best, 10).len(), 2);
    }

    #[test]
    fn test_envelope_matches_baseline_inside_envelope() {
        // Re ~7.07e5 sits inside [1e5, 1e6]; required Cl ~0.58
        let airfoil = foil("A", 1.2, 0.01);
        let (score, reason) = FlightEnvelope.score(&airfoil, &params());
        assert_eq!(score, airfoil.lift_to_drag_ratio());
        assert!(reason.contains("within operating range"));
        assert!(reason.contains("meets required Cl"));
    }

    #[test]
    fn test_envelope_penalizes_reynolds_mismatch() {
        let inside = foil("inside", 1.2, 0.01);
        let outside = Airfoil::new("outside", 1.2, 0.01, 1e7, 1e8, "General", 0.12).unwrap();
        let ranked = recommend(&[outside, inside], &params(), &FlightEnvelope);

        assert_eq!(ranked[0].airfoil.name(), "inside");
        assert!(ranked[1].score < ranked[0].score);
        assert!(ranked[1].reason.contains("outside operating range"));
    }

    #[test]
    fn test_envelope_reynolds_factor_decays_by_decade() {
        let airfoil = Airfoil::new("A", 1.0, 0.01, 1e6, 1e7, "General", 0.1).unwrap();
        assert_eq!(FlightEnvelope::reynolds_factor(&airfoil, 5e6), 1.0);
        assert!((FlightEnvelope::reynolds_factor(&airfoil, 1e5) - 0.5).abs() < 1e-12);
        assert!((FlightEnvelope::reynolds_factor(&airfoil, 1e8) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_envelope_penalizes_insufficient_lift() {
        // q = 0.5 * 1.225 * 100 = 61.25; required Cl = 122.5 / 61.25 = 2.0
        let params = FlightParameters::new(10.0, 0.0, 1.0, 122.5).unwrap();
        let airfoil = Airfoil::new("A", 1.0, 0.01, 1e5, 1e6, "General", 0.1).unwrap();
        let (score, reason) = FlightEnvelope.score(&airfoil, &params);
        assert!((score - 50.0).abs() < 1e-9);
        assert!(reason.contains("below required"));
    }

    #[test]
    fn test_scorer_for_strategy() {
        let airfoil = Airfoil::new("A", 1.2, 0.01, 1e7, 1e8, "General", 0.1).unwrap();
        let baseline = scorer_for(ScoringStrategy::LiftToDrag).score(&airfoil, &params());
        let envelope = scorer_for(ScoringStrategy::FlightEnvelope).score(&airfoil, &params());
        assert_eq!(baseline.0, 120.0);
        assert!(envelope.0 < baseline.0);
    }

    #[test]
    fn test_result_display() {
        let ranked = recommend(&[foil("NACA 2412", 1.2, 0.01)], &params(), &LiftToDrag);
        assert_eq!(
            ranked[0].to_string(),
            "NACA 2412 (General) - Score: 120.00 (High L/D ratio)"
        );
    }
}
