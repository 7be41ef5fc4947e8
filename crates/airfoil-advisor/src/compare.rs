//! Pairwise airfoil comparison.
//!
//! [`compare`] lines two airfoils up parameter by parameter and derives an
//! efficiency verdict plus threshold-gated insights. Thresholds keep
//! near-equal values from producing verdicts; they are configurable but must
//! stay positive (see [`crate::config::Config::validate`]).

use serde::Serialize;

use crate::airfoil::Airfoil;

/// Margins that gate the comparison insights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonThresholds {
    /// Relative margin by which max Cl must exceed the other's.
    pub high_lift_margin: f64,
    /// Relative margin by which min Cd must undercut the other's.
    pub low_drag_margin: f64,
    /// Absolute gap in thickness percentage points.
    pub thickness_margin_points: f64,
}

impl Default for ComparisonThresholds {
    fn default() -> Self {
        Self {
            high_lift_margin: 0.05,
            low_drag_margin: 0.05,
            thickness_margin_points: 2.0,
        }
    }
}

/// Whether a larger value of a parameter is an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Larger is better.
    HigherIsBetter,
    /// Smaller is better.
    LowerIsBetter,
    /// No better/worse judgement.
    Descriptive,
}

/// A tracked airfoil parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    /// Maximum lift coefficient.
    MaxCl,
    /// Minimum drag coefficient.
    MinCd,
    /// Thickness in percent of chord.
    Thickness,
    /// Lower Reynolds bound.
    ReynoldsMin,
    /// Upper Reynolds bound.
    ReynoldsMax,
}

impl Parameter {
    /// All tracked parameters in display order.
    pub const ALL: [Parameter; 5] = [
        Parameter::MaxCl,
        Parameter::MinCd,
        Parameter::Thickness,
        Parameter::ReynoldsMin,
        Parameter::ReynoldsMax,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MaxCl => "Max Lift Coefficient",
            Self::MinCd => "Min Drag Coefficient",
            Self::Thickness => "Thickness (%)",
            Self::ReynoldsMin => "Reynolds Min",
            Self::ReynoldsMax => "Reynolds Max",
        }
    }

    /// Direction of improvement.
    #[must_use]
    pub fn polarity(self) -> Polarity {
        match self {
            Self::MaxCl => Polarity::HigherIsBetter,
            Self::MinCd => Polarity::LowerIsBetter,
            Self::Thickness | Self::ReynoldsMin | Self::ReynoldsMax => Polarity::Descriptive,
        }
    }

    /// Value of this parameter for `airfoil`. Thickness is in percent.
    #[must_use]
    pub fn value(self, airfoil: &Airfoil) -> f64 {
        match self {
            Self::MaxCl => airfoil.max_cl(),
            Self::MinCd => airfoil.min_cd(),
            Self::Thickness => airfoil.thickness_percent(),
            Self::ReynoldsMin => airfoil.reynolds_min(),
            Self::ReynoldsMax => airfoil.reynolds_max(),
        }
    }
}

/// Direction of the first airfoil relative to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Improvement on a higher- or lower-is-better parameter.
    Better,
    /// Regression on a higher- or lower-is-better parameter.
    Worse,
    /// Larger descriptive value.
    Higher,
    /// Smaller descriptive value.
    Lower,
    /// Larger thickness.
    Thicker,
    /// Smaller thickness.
    Thinner,
    /// Identical values.
    Equal,
}

impl Verdict {
    fn for_difference(parameter: Parameter, difference: f64) -> Self {
        if difference == 0.0 {
            return Self::Equal;
        }
        let larger = difference > 0.0;
        match (parameter.polarity(), parameter) {
            (Polarity::HigherIsBetter, _) => {
                if larger {
                    Self::Better
                } else {
                    Self::Worse
                }
            }
            (Polarity::LowerIsBetter, _) => {
                if larger {
                    Self::Worse
                } else {
                    Self::Better
                }
            }
            (Polarity::Descriptive, Parameter::Thickness) => {
                if larger {
                    Self::Thicker
                } else {
                    Self::Thinner
                }
            }
            (Polarity::Descriptive, _) => {
                if larger {
                    Self::Higher
                } else {
                    Self::Lower
                }
            }
        }
    }
}

/// One row of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDelta {
    /// Which parameter.
    pub parameter: Parameter,
    /// Value for the first airfoil.
    pub first: f64,
    /// Value for the second airfoil.
    pub second: f64,
    /// `first - second`.
    pub difference: f64,
    /// Difference relative to `second`, in percent; 0 when `second` is 0.
    pub percent_difference: f64,
    /// Direction of `first` relative to `second`.
    pub verdict: Verdict,
}

impl ParameterDelta {
    fn new(parameter: Parameter, first: &Airfoil, second: &Airfoil) -> Self {
        let a = parameter.value(first);
        let b = parameter.value(second);
        let difference = a - b;
        let percent_difference = if b == 0.0 {
            0.0
        } else {
            difference / b * 100.0
        };
        Self {
            parameter,
            first: a,
            second: b,
            difference,
            percent_difference,
            verdict: Verdict::for_difference(parameter, difference),
        }
    }

    /// Short description of the difference, e.g. `Better lift by 0.5000 (+50.0%)`.
    #[must_use]
    pub fn describe(&self) -> String {
        let magnitude = self.difference.abs();
        let pct = self.percent_difference;
        match (self.parameter, self.verdict) {
            (_, Verdict::Equal) => "Equal".to_string(),
            (Parameter::MaxCl, verdict) => format!(
                "{} lift by {magnitude:.4} ({pct:+.1}%)",
                if verdict == Verdict::Better { "Better" } else { "Lower" }
            ),
            (Parameter::MinCd, verdict) => format!(
                "{} drag by {magnitude:.4} ({pct:+.1}%)",
                if verdict == Verdict::Better { "Lower" } else { "Higher" }
            ),
            (Parameter::Thickness, verdict) => format!(
                "{} by {magnitude:.2}% absolute",
                if verdict == Verdict::Thicker { "Thicker" } else { "Thinner" }
            ),
            (Parameter::ReynoldsMin | Parameter::ReynoldsMax, verdict) => format!(
                "{} by {:.1}M Re ({pct:+.1}%)",
                if verdict == Verdict::Higher { "Higher" } else { "Lower" },
                magnitude / 1_000_000.0
            ),
        }
    }
}

/// Lift-to-drag efficiency of the pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Efficiency {
    /// L/D of the first airfoil.
    pub first_ratio: f64,
    /// L/D of the second airfoil.
    pub second_ratio: f64,
    /// Name of the strictly more efficient airfoil, if any.
    pub winner: Option<String>,
    /// How much better the winner's L/D is, in percent of the loser's.
    pub gap_percent: f64,
}

impl std::fmt::Display for Efficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.winner {
            Some(name) => write!(f, "{name} more efficient by {:.1}%", self.gap_percent),
            None => write!(f, "Both have similar L/D efficiency"),
        }
    }
}

/// A threshold-gated recommendation derived from the comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// One airfoil's max Cl beats the other's by more than the margin.
    HighLift {
        /// Winning airfoil.
        airfoil: String,
        /// Relative max Cl advantage in percent.
        percent: f64,
    },
    /// One airfoil's min Cd undercuts the other's by more than the margin.
    LowDrag {
        /// Winning airfoil.
        airfoil: String,
        /// Relative min Cd advantage in percent.
        percent: f64,
    },
    /// One airfoil is thicker by more than the margin.
    Structural {
        /// Thicker airfoil.
        airfoil: String,
        /// Its thickness in percent of chord.
        thickness_percent: f64,
    },
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighLift { airfoil, percent } => write!(
                f,
                "{airfoil} better for high lift ({percent:.1}% higher max Cl)"
            ),
            Self::LowDrag { airfoil, percent } => write!(
                f,
                "{airfoil} better for low drag ({percent:.1}% lower min Cd)"
            ),
            Self::Structural {
                airfoil,
                thickness_percent,
            } => write!(
                f,
                "{airfoil} thicker ({thickness_percent:.1}%), more structural strength"
            ),
        }
    }
}

/// The summary of one side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contender {
    /// Airfoil name.
    pub name: String,
    /// Application category.
    pub application_type: String,
    /// Width of the operating Reynolds band.
    pub reynolds_span: f64,
}

impl Contender {
    fn new(airfoil: &Airfoil) -> Self {
        Self {
            name: airfoil.name().to_string(),
            application_type: airfoil.application_type().to_string(),
            reynolds_span: airfoil.reynolds_span(),
        }
    }
}

/// Result of comparing two airfoils.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// First airfoil (the "A" side of every difference).
    pub first: Contender,
    /// Second airfoil (the baseline).
    pub second: Contender,
    /// One entry per [`Parameter::ALL`], in order.
    pub deltas: Vec<ParameterDelta>,
    /// Lift-to-drag verdict.
    pub efficiency: Efficiency,
    /// Threshold-gated insights.
    pub insights: Vec<Insight>,
}

impl Comparison {
    /// The delta row for `parameter`.
    #[must_use]
    pub fn delta(&self, parameter: Parameter) -> Option<&ParameterDelta> {
        self.deltas.iter().find(|d| d.parameter == parameter)
    }

    /// Efficiency verdict followed by every insight, as text.
    #[must_use]
    pub fn verdicts(&self) -> Vec<String> {
        std::iter::once(self.efficiency.to_string())
            .chain(self.insights.iter().map(ToString::to_string))
            .collect()
    }
}

/// Compare `first` against `second` (the baseline).
#[must_use]
pub fn compare(first: &Airfoil, second: &Airfoil, thresholds: &ComparisonThresholds) -> Comparison {
    let deltas = Parameter::ALL
        .iter()
        .map(|&p| ParameterDelta::new(p, first, second))
        .collect();

    Comparison {
        first: Contender::new(first),
        second: Contender::new(second),
        deltas,
        efficiency: efficiency(first, second),
        insights: insights(first, second, thresholds),
    }
}

fn efficiency(first: &Airfoil, second: &Airfoil) -> Efficiency {
    let first_ratio = first.lift_to_drag_ratio();
    let second_ratio = second.lift_to_drag_ratio();

    let (winner, gap_percent) = if first_ratio > second_ratio {
        (
            Some(first.name().to_string()),
            (first_ratio - second_ratio) / second_ratio * 100.0,
        )
    } else if second_ratio > first_ratio {
        (
            Some(second.name().to_string()),
            (second_ratio - first_ratio) / first_ratio * 100.0,
        )
    } else {
        (None, 0.0)
    };

    Efficiency {
        first_ratio,
        second_ratio,
        winner,
        gap_percent,
    }
}

fn insights(first: &Airfoil, second: &Airfoil, thresholds: &ComparisonThresholds) -> Vec<Insight> {
    let mut insights = Vec::new();

    let lift_factor = 1.0 + thresholds.high_lift_margin;
    for (hi, lo) in [(first, second), (second, first)] {
        if hi.max_cl() > lo.max_cl() * lift_factor {
            insights.push(Insight::HighLift {
                airfoil: hi.name().to_string(),
                percent: (hi.max_cl() - lo.max_cl()) / lo.max_cl() * 100.0,
            });
            break;
        }
    }

    let drag_factor = 1.0 - thresholds.low_drag_margin;
    for (lean, heavy) in [(first, second), (second, first)] {
        if lean.min_cd() < heavy.min_cd() * drag_factor {
            insights.push(Insight::LowDrag {
                airfoil: lean.name().to_string(),
                percent: (heavy.min_cd() - lean.min_cd()) / heavy.min_cd() * 100.0,
            });
            break;
        }
    }

    for (thick, thin) in [(first, second), (second, first)] {
        if thick.thickness_percent() > thin.thickness_percent() + thresholds.thickness_margin_points {
            insights.push(Insight::Structural {
                airfoil: thick.name().to_string(),
                thickness_percent: thick.thickness_percent(),
            });
            break;
        }
    }

    insights
}
