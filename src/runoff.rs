/**
Module for rooftop runoff volume and storage tank sizing.

Runoff is estimated with the rational method (volume = C * i * A) using a
per-material runoff coefficient. Rainfall is taken in millimeters per year,
areas in square meters, and volumes are reported in liters.
*/
use std::collections::HashMap;

use serde::Serialize;

use crate::round_to;

const DAILY_DEMAND_LITERS_PER_PERSON: f64 = 50.0;
const STORAGE_DAYS: f64 = 15.0;
const SUPPLY_FRACTION: f64 = 0.20;
const TANK_INCREMENT_LITERS: f64 = 500.0;

const RWH_NOTE: &str = "Based on average rainfall and standard water demand for non-potable uses.";

// Runoff coefficients keyed by lower-case roof material
#[derive(Debug, Clone)]
pub struct RoofCoefficients {
    coefficients: HashMap<String, f64>,
    default_coefficient: f64,
}

impl RoofCoefficients {
    pub fn new(coefficients: HashMap<String, f64>, default_coefficient: f64) -> Self {
        let coefficients = coefficients
            .into_iter()
            .map(|(roof, c)| (roof.to_lowercase(), c))
            .collect();
        RoofCoefficients {
            coefficients,
            default_coefficient,
        }
    }

    /**
    Looks up the runoff coefficient for a roof material.

    Matching is case-insensitive but otherwise exact, so padded names such
    as " concrete" are unrecognized. Materials missing from the table get the
    default coefficient rather than an error.
    */
    pub fn coefficient(&self, roof_type: &str) -> f64 {
        self.coefficients
            .get(roof_type.to_lowercase().as_str())
            .copied()
            .unwrap_or(self.default_coefficient)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RwhAnalysis {
    pub potential_annual_runoff_liters: f64,
    pub recommended_tank_size_liters: u64,
    pub notes: String,
}

/**
Calculates the potential annual runoff collected from a roof.

# Arguments
* `coefficients` - Runoff coefficient table.
* `roof_area_sqm` - Catchment area in m².
* `rainfall_mm` - Average annual rainfall in mm.
* `roof_type` - Roof material (e.g. "concrete", "tiles").

# Returns
The runoff in liters, rounded to 2 decimals.
*/
pub fn potential_annual_runoff_liters(
    coefficients: &RoofCoefficients,
    roof_area_sqm: f64,
    rainfall_mm: f64,
    roof_type: &str,
) -> f64 {
    let c = coefficients.coefficient(roof_type);
    // Rainfall depth in meters
    let i = rainfall_mm / 1000.0;
    // m³ -> liters
    round_to(c * i * roof_area_sqm * 1000.0, 2)
}

/**
Recommends a storage tank size.

The tank holds the smaller of 15 days of household demand (50 L/person/day)
and 20% of the annual runoff, rounded up to the next 500 L so the tank is
never smaller than the computed need.
*/
pub fn recommended_tank_size_liters(annual_runoff_liters: f64, num_dwellers: u32) -> u64 {
    let daily_demand = f64::from(num_dwellers) * DAILY_DEMAND_LITERS_PER_PERSON;
    let demand_based = daily_demand * STORAGE_DAYS;
    let supply_based = annual_runoff_liters * SUPPLY_FRACTION;
    let recommended = demand_based.min(supply_based).max(0.0);

    (recommended / TANK_INCREMENT_LITERS).ceil() as u64 * TANK_INCREMENT_LITERS as u64
}

pub fn analyze_rwh(
    coefficients: &RoofCoefficients,
    roof_area_sqm: f64,
    rainfall_mm: f64,
    roof_type: &str,
    num_dwellers: u32,
) -> RwhAnalysis {
    let runoff = potential_annual_runoff_liters(coefficients, roof_area_sqm, rainfall_mm, roof_type);
    RwhAnalysis {
        potential_annual_runoff_liters: runoff,
        recommended_tank_size_liters: recommended_tank_size_liters(runoff, num_dwellers),
        notes: RWH_NOTE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn table() -> RoofCoefficients {
        RoofCoefficients::new(
            HashMap::from([("concrete".to_string(), 0.8), ("Tiles".to_string(), 0.9)]),
            0.75,
        )
    }

    #[test]
    fn coefficient_lookup_ignores_case() {
        let t = table();
        assert_eq!(t.coefficient("Concrete"), 0.8);
        assert_eq!(t.coefficient("TILES"), 0.9);
    }

    #[test]
    fn unknown_roof_types_use_default() {
        let t = table();
        for roof in ["thatch", "metal sheet", "", "asbestos"] {
            assert_eq!(t.coefficient(roof), 0.75);
        }
    }

    #[test]
    fn surrounding_whitespace_is_not_stripped() {
        let t = table();
        assert_eq!(t.coefficient(" concrete"), 0.75);
        assert_eq!(t.coefficient("concrete "), 0.75);
        assert_eq!(t.coefficient(" Tiles "), 0.75);
    }

    #[test]
    fn concrete_roof_in_delhi() {
        let runoff = potential_annual_runoff_liters(&table(), 150.0, 714.0, "concrete");
        assert_abs_diff_eq!(runoff, 85_680.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_rainfall_gives_zero_runoff() {
        assert_eq!(potential_annual_runoff_liters(&table(), 150.0, 0.0, "tiles"), 0.0);
    }

    #[test]
    fn demand_limited_tank() {
        // 4 people -> 3000 L demand, 17136 L supply
        assert_eq!(recommended_tank_size_liters(85_680.0, 4), 3000);
    }

    #[test]
    fn supply_limited_tank_rounds_up() {
        // 20% of 6000 = 1200 -> 1500
        assert_eq!(recommended_tank_size_liters(6000.0, 10), 1500);
        // 20% of 2501 = 500.2 -> 1000
        assert_eq!(recommended_tank_size_liters(2501.0, 10), 1000);
    }

    #[test]
    fn tank_is_multiple_of_500_and_covers_need() {
        for runoff in [0.0, 1.0, 499.0, 12_345.6, 85_680.0, 1e6] {
            for dwellers in 1..12 {
                let tank = recommended_tank_size_liters(runoff, dwellers);
                let need = (f64::from(dwellers) * 750.0).min(runoff * 0.2);
                assert_eq!(tank % 500, 0);
                assert!(tank as f64 >= need);
            }
        }
    }

    #[test]
    fn no_runoff_means_no_tank() {
        assert_eq!(recommended_tank_size_liters(0.0, 5), 0);
    }

    #[test]
    fn analysis_bundles_both_figures() {
        let rwh = analyze_rwh(&table(), 150.0, 714.0, "concrete", 4);
        assert_eq!(rwh.recommended_tank_size_liters, 3000);
        assert_abs_diff_eq!(rwh.potential_annual_runoff_liters, 85_680.0, epsilon = 1e-9);
        assert!(!rwh.notes.is_empty());
    }
}
