// Simplified life-cycle cost of the recommended system
use serde::{Serialize, Serializer};

use crate::recharge::{ArAnalysis, StructureType};
use crate::round_to;
use crate::runoff::RwhAnalysis;

// Mock unit costs [currency units]
const TANK_COST_PER_LITER: f64 = 8.0;
const RECHARGE_PIT_COST: f64 = 25_000.0;
const RECHARGE_TRENCH_COST: f64 = 40_000.0;
const OM_FRACTION: f64 = 0.02; // Annual O&M as share of investment
const MUNICIPAL_COST_PER_KL: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBenefitAnalysis {
    pub estimated_initial_investment: f64,
    pub annual_operating_maintenance_cost: f64,
    pub annual_water_savings_liters: f64,
    pub annual_monetary_savings: f64,
    /// Infinite when the system saves nothing; serialized as `null`.
    #[serde(serialize_with = "finite_or_null")]
    pub payback_period_years: f64,
}

fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

fn structure_cost(structure: StructureType) -> f64 {
    match structure {
        StructureType::RechargePit => RECHARGE_PIT_COST,
        StructureType::RechargeTrench => RECHARGE_TRENCH_COST,
    }
}

/**
Investment, running cost and payback of the RWH tank plus any recharge
structure.

Every harvested liter is assumed to displace a liter of municipal supply.
When that saves nothing the payback period is `f64::INFINITY`.
*/
pub fn analyze_costs_benefits(rwh: &RwhAnalysis, ar: &ArAnalysis) -> CostBenefitAnalysis {
    let mut investment = rwh.recommended_tank_size_liters as f64 * TANK_COST_PER_LITER;
    if ar.is_feasible {
        if let Some(structure) = ar.recommended_structure_type {
            investment += structure_cost(structure);
        }
    }

    let om_cost = investment * OM_FRACTION;
    let water_savings = rwh.potential_annual_runoff_liters;
    let monetary_savings = water_savings / 1000.0 * MUNICIPAL_COST_PER_KL;

    let payback = if monetary_savings > 0.0 {
        investment / monetary_savings
    } else {
        f64::INFINITY
    };

    CostBenefitAnalysis {
        estimated_initial_investment: round_to(investment, 2),
        annual_operating_maintenance_cost: round_to(om_cost, 2),
        annual_water_savings_liters: water_savings,
        annual_monetary_savings: round_to(monetary_savings, 2),
        payback_period_years: round_to(payback, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recharge::analyze_ar_feasibility;
    use approx::assert_abs_diff_eq;

    fn rwh(runoff: f64, tank: u64) -> RwhAnalysis {
        RwhAnalysis {
            potential_annual_runoff_liters: runoff,
            recommended_tank_size_liters: tank,
            notes: String::new(),
        }
    }

    #[test]
    fn tank_and_pit() {
        let ar = analyze_ar_feasibility(50.0, "moderate", 23.72);
        let cba = analyze_costs_benefits(&rwh(85_680.0, 3000), &ar);
        // 3000 * 8 + 25000
        assert_eq!(cba.estimated_initial_investment, 49_000.0);
        assert_eq!(cba.annual_operating_maintenance_cost, 980.0);
        assert_eq!(cba.annual_water_savings_liters, 85_680.0);
        assert_abs_diff_eq!(cba.annual_monetary_savings, 2570.4, epsilon = 1e-9);
        // 49000 / 2570.4 = 19.06
        assert_abs_diff_eq!(cba.payback_period_years, 19.1, epsilon = 1e-9);
    }

    #[test]
    fn trench_costs_more() {
        let ar = analyze_ar_feasibility(50.0, "high", 23.9);
        let cba = analyze_costs_benefits(&rwh(10_000.0, 1000), &ar);
        assert_eq!(cba.estimated_initial_investment, 48_000.0);
    }

    #[test]
    fn infeasible_recharge_adds_nothing() {
        let ar = analyze_ar_feasibility(5.0, "low", 2.0);
        let cba = analyze_costs_benefits(&rwh(10_000.0, 1000), &ar);
        assert_eq!(cba.estimated_initial_investment, 8000.0);
        assert_eq!(cba.annual_operating_maintenance_cost, 160.0);
    }

    #[test]
    fn zero_savings_gives_unbounded_payback() {
        let ar = analyze_ar_feasibility(50.0, "moderate", 10.0);
        let cba = analyze_costs_benefits(&rwh(0.0, 0), &ar);
        assert_eq!(cba.annual_monetary_savings, 0.0);
        assert!(cba.payback_period_years.is_infinite());

        let json = serde_json::to_value(&cba).unwrap();
        assert!(json["payback_period_years"].is_null());
    }
}
