use std::collections::HashMap;

use crate::recharge::MIN_GROUNDWATER_DEPTH_M;
use crate::round_to;

// Factor caps used to normalise inputs onto 0..1
const RAINFALL_CAP_MM: f64 = 1500.0;
const SPACE_CAP_SQM: f64 = 100.0;

// Hydrogeology factor keyed by permeability class
#[derive(Debug, Clone)]
pub struct PermeabilityWeights {
    weights: HashMap<String, f64>,
    default_weight: f64,
}

impl PermeabilityWeights {
    pub fn new(weights: HashMap<String, f64>, default_weight: f64) -> Self {
        PermeabilityWeights {
            weights,
            default_weight,
        }
    }

    pub fn weight(&self, permeability: &str) -> f64 {
        self.weights
            .get(permeability)
            .copied()
            .unwrap_or(self.default_weight)
    }
}

/// Weights of the composite score.
///
/// `rainfall`, `space` and `hydrogeology` sum to 1 and form the weighted base.
/// `shallow_penalty` is not a fourth term of that sum: it only scales the
/// finished score by `1 - shallow_penalty` when the water table is shallower
/// than 5 m.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub rainfall: f64,
    pub space: f64,
    pub hydrogeology: f64,
    pub shallow_penalty: f64,
}

pub const SCORE_WEIGHTS: ScoreWeights = ScoreWeights {
    rainfall: 0.4,
    space: 0.2,
    hydrogeology: 0.4,
    shallow_penalty: 0.5,
};

/// Weighted score before the shallow-groundwater penalty, in 0..=100.
pub fn base_score(
    weights: &PermeabilityWeights,
    rainfall_mm: f64,
    open_space_sqm: f64,
    permeability: &str,
) -> f64 {
    let f_rainfall = (rainfall_mm / RAINFALL_CAP_MM).min(1.0);
    let f_space = (open_space_sqm / SPACE_CAP_SQM).min(1.0);
    let f_hydrogeology = weights.weight(permeability);

    let w = SCORE_WEIGHTS;
    (w.rainfall * f_rainfall + w.space * f_space + w.hydrogeology * f_hydrogeology) * 100.0
}

/// Suitability of the water-table depth for recharge (0 at 5 m, rising
/// towards 1 with depth). Reported alongside the score; it does not feed
/// into `feasibility_score`.
pub fn depth_suitability(groundwater_depth_mbgl: f64) -> f64 {
    (1.0 - MIN_GROUNDWATER_DEPTH_M / groundwater_depth_mbgl.max(5.1)).max(0.0)
}

/**
Composite site feasibility score on 0..=100, rounded to 2 decimals.

# Arguments
* `weights` - Hydrogeology factor table.
* `rainfall_mm` - Average annual rainfall [mm].
* `open_space_sqm` - Open space available for recharge [m²].
* `permeability` - Soil permeability class.
* `groundwater_depth_mbgl` - Depth to the water table [m bgl].
*/
pub fn feasibility_score(
    weights: &PermeabilityWeights,
    rainfall_mm: f64,
    open_space_sqm: f64,
    permeability: &str,
    groundwater_depth_mbgl: f64,
) -> f64 {
    let mut score = base_score(weights, rainfall_mm, open_space_sqm, permeability);
    if groundwater_depth_mbgl < MIN_GROUNDWATER_DEPTH_M {
        score *= 1.0 - SCORE_WEIGHTS.shallow_penalty;
    }
    round_to(score.clamp(0.0, 100.0), 2)
}

pub fn feasibility_insights(rainfall_mm: f64, permeability: &str, groundwater_depth_mbgl: f64) -> String {
    let rainfall = if rainfall_mm > 1000.0 { "high" } else { "moderate" };
    let soil = if permeability != "low" { "good" } else { "poor" };
    let depth = if groundwater_depth_mbgl > 10.0 {
        "ideal"
    } else {
        "adequate"
    };
    let level = format_depth(groundwater_depth_mbgl);
    format!(
        "Score is primarily driven by {rainfall} rainfall and {soil} soil permeability. \
         The groundwater level at {level}m is {depth} for recharge."
    )
}

// Whole-number depths keep one decimal ("12.0", not "12")
fn format_depth(depth: f64) -> String {
    if depth.is_finite() && depth.fract() == 0.0 {
        format!("{depth:.1}")
    } else {
        format!("{depth}")
    }
}
