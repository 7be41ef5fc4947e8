//! Text rendering for command output.

use std::fmt::Write as _;

use serde::Serialize;

use crate::airfoil::Airfoil;
use crate::compare::{Comparison, Parameter};
use crate::error::Result;
use crate::flight::{FlightParameters, KINEMATIC_VISCOSITY, STANDARD_GRAVITY};
use crate::recommend::RecommendationResult;

/// Pretty-printed JSON for `--format json`.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

/// Numbered one-line-per-airfoil listing.
#[must_use]
pub fn airfoil_lines(airfoils: &[Airfoil]) -> String {
    let mut out = String::new();
    for (i, airfoil) in airfoils.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, airfoil);
    }
    out
}

/// Catalog table.
#[must_use]
pub fn airfoil_table(airfoils: &[Airfoil]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<20} {:<18} {:>7} {:>8} {:>8} {:>6}  {:<17}",
        "#", "Name", "Type", "Max Cl", "Min Cd", "L/D", "Thick", "Re Range"
    );
    let _ = writeln!(out, "{}", rule(98));
    for (i, a) in airfoils.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<20} {:<18} {:>7.3} {:>8.4} {:>8.2} {:>5.1}%  {:.1e}-{:.1e}",
            i + 1,
            a.name(),
            a.application_type(),
            a.max_cl(),
            a.min_cd(),
            a.lift_to_drag_ratio(),
            a.thickness_percent(),
            a.reynolds_min(),
            a.reynolds_max()
        );
    }
    out
}

/// Full description of one airfoil.
#[must_use]
pub fn airfoil_detail(airfoil: &Airfoil) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", airfoil.name());
    let _ = writeln!(out, "  Application:     {}", airfoil.application_type());
    let _ = writeln!(out, "  Max Cl:          {:.3}", airfoil.max_cl());
    let _ = writeln!(out, "  Min Cd:          {:.4}", airfoil.min_cd());
    let _ = writeln!(out, "  L/D:             {:.2}", airfoil.lift_to_drag_ratio());
    let _ = writeln!(out, "  Thickness:       {:.1}%", airfoil.thickness_percent());
    let _ = writeln!(
        out,
        "  Reynolds range:  {:.2e} - {:.2e} (width {:.2e})",
        airfoil.reynolds_min(),
        airfoil.reynolds_max(),
        airfoil.reynolds_span()
    );
    out
}

/// Ranked recommendations, one line each.
#[must_use]
pub fn recommendation_lines(params: &FlightParameters, ranked: &[RecommendationResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Query: {}", params.details());
    if ranked.is_empty() {
        let _ = writeln!(out, "No airfoils in the catalog.");
    }
    for (i, result) in ranked.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, result);
    }
    out
}

/// Ranked recommendations as a table.
#[must_use]
pub fn recommendation_table(params: &FlightParameters, ranked: &[RecommendationResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Query: {}", params.details());
    if ranked.is_empty() {
        let _ = writeln!(out, "No airfoils in the catalog.");
        return out;
    }
    let _ = writeln!(
        out,
        "{:>4}  {:<20} {:<18} {:>10}  {}",
        "Rank", "Airfoil", "Type", "Score", "Reason"
    );
    let _ = writeln!(out, "{}", rule(80));
    for (i, result) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<20} {:<18} {:>10.2}  {}",
            i + 1,
            result.airfoil.name(),
            result.airfoil.application_type(),
            result.score,
            result.reason
        );
    }
    out
}

fn format_value(parameter: Parameter, value: f64) -> String {
    match parameter {
        Parameter::MaxCl => format!("{value:.3}"),
        Parameter::MinCd => format!("{value:.4}"),
        Parameter::Thickness => format!("{value:.1}%"),
        Parameter::ReynoldsMin | Parameter::ReynoldsMax => format!("{value:.2e}"),
    }
}

/// Side-by-side comparison report.
#[must_use]
pub fn comparison_report(comparison: &Comparison) -> String {
    let first = &comparison.first;
    let second = &comparison.second;
    let mut out = String::new();

    let _ = writeln!(out, "{} vs {}", first.name, second.name);
    let _ = writeln!(out, "{}", rule(84));
    let _ = writeln!(
        out,
        "{:<22} {:>12} {:>12}  {}",
        "Parameter", first.name, second.name, "Difference"
    );
    let _ = writeln!(out, "{}", rule(84));
    for delta in &comparison.deltas {
        let _ = writeln!(
            out,
            "{:<22} {:>12} {:>12}  {}",
            delta.parameter.label(),
            format_value(delta.parameter, delta.first),
            format_value(delta.parameter, delta.second),
            delta.describe()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Performance Analysis");
    let _ = writeln!(out, "  {} L/D: {:.2}", first.name, comparison.efficiency.first_ratio);
    let _ = writeln!(out, "  {} L/D: {:.2}", second.name, comparison.efficiency.second_ratio);
    let _ = writeln!(out, "  {}", comparison.efficiency);
    let _ = writeln!(
        out,
        "  Operating range: {} spans {:.2e} Re, {} spans {:.2e} Re",
        first.name, first.reynolds_span, second.name, second.reynolds_span
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendations");
    if comparison.insights.is_empty() {
        let _ = writeln!(out, "  No decisive differences at the configured margins");
    }
    for insight in &comparison.insights {
        let _ = writeln!(out, "  ✓ {insight}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Application Suitability");
    let _ = writeln!(out, "  {}: {}", first.name, first.application_type);
    let _ = writeln!(out, "  {}: {}", second.name, second.application_type);
    out
}

/// Search history, newest first.
#[must_use]
pub fn history_lines(history: &[FlightParameters]) -> String {
    let mut out = String::new();
    if history.is_empty() {
        let _ = writeln!(out, "No searches recorded.");
    }
    for (i, params) in history.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, params);
    }
    out
}

/// Search history as a table, newest first.
#[must_use]
pub fn history_table(history: &[FlightParameters]) -> String {
    let mut out = String::new();
    if history.is_empty() {
        let _ = writeln!(out, "No searches recorded.");
        return out;
    }
    let _ = writeln!(
        out,
        "{:>3}  {:>9} {:>9} {:>9} {:>9} {:>10} {:>8}",
        "#", "Speed", "Altitude", "Wing m²", "Lift N", "Re", "Req Cl"
    );
    let _ = writeln!(out, "{}", rule(64));
    for (i, p) in history.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:>9.1} {:>9.0} {:>9.2} {:>9.0} {:>10.2e} {:>8.3}",
            i + 1,
            p.speed(),
            p.altitude(),
            p.wing_area(),
            p.required_lift(),
            p.reynolds_number(),
            p.required_cl()
        );
    }
    out
}

/// Short reference for the quantities shown by the other commands.
#[must_use]
pub fn guide() -> String {
    let sections: [(&str, &[String]); 6] = [
        (
            "Lift coefficient (Cl)",
            &[
                "How much lift the profile makes for a given speed and area.".to_string(),
                "A higher max Cl lifts more at low speed; it matters for takeoff.".to_string(),
            ],
        ),
        (
            "Drag coefficient (Cd)",
            &[
                "Resistance to motion through the air.".to_string(),
                "A lower min Cd means a more efficient cruise.".to_string(),
            ],
        ),
        (
            "Lift-to-drag ratio (L/D)",
            &[
                "max Cl / min Cd, the default recommendation score.".to_string(),
                "Gliders want L/D above 30; aerobatic types trade it for Cl.".to_string(),
            ],
        ),
        (
            "Reynolds number (Re)",
            &[
                format!("Re = speed × chord / ν, with ν = {KINEMATIC_VISCOSITY:e} m²/s."),
                "Each profile has a Re range where its polar is valid.".to_string(),
            ],
        ),
        (
            "Thickness",
            &[
                "Maximum thickness as a percent of chord.".to_string(),
                "Thicker sections are stiffer and hold more spar.".to_string(),
            ],
        ),
        (
            "Required lift",
            &[
                format!("Weight to carry: mass × {STANDARD_GRAVITY} m/s²."),
                format!(
                    "A 5 kg drone needs {:.0} N; pass --mass to have it computed.",
                    5.0 * STANDARD_GRAVITY
                ),
            ],
        ),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "Airfoil basics");
    let _ = writeln!(out, "{}", rule(60));
    for (i, (title, lines)) in sections.iter().enumerate() {
        let _ = writeln!(out, "{}. {title}", i + 1);
        for line in *lines {
            let _ = writeln!(out, "   - {line}");
        }
    }
    out
}
