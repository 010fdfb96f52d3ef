use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cost::{CostBenefitAnalysis, analyze_costs_benefits};
use crate::error::AssessError;
use crate::groundwater::GroundwaterEstimator;
use crate::knowledge::ChatAnswer;
use crate::location::LocationProfile;
use crate::recharge::{ArAnalysis, analyze_ar_feasibility};
use crate::runoff::{RwhAnalysis, analyze_rwh};
use crate::score::{depth_suitability, feasibility_insights, feasibility_score};
use crate::tables::Tables;

// Site description supplied by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub name: String, // Not used in any calculation
    pub latitude: f64,
    pub longitude: f64,
    pub num_dwellers: u32,
    pub roof_area_sqm: f64,
    pub open_space_sqm: f64,
    pub roof_type: String,
}

impl AssessmentInput {
    pub fn validate(&self) -> Result<(), AssessError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AssessError::invalid("latitude", "must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AssessError::invalid("longitude", "must be between -180 and 180"));
        }
        if self.num_dwellers == 0 {
            return Err(AssessError::invalid("num_dwellers", "must be greater than 0"));
        }
        if !self.roof_area_sqm.is_finite() || self.roof_area_sqm <= 0.0 {
            return Err(AssessError::invalid("roof_area_sqm", "must be greater than 0"));
        }
        if !self.open_space_sqm.is_finite() || self.open_space_sqm < 0.0 {
            return Err(AssessError::invalid("open_space_sqm", "must not be negative"));
        }
        Ok(())
    }
}

// Location profile plus the estimated water table, reported flat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationInfo {
    #[serde(flatten)]
    pub profile: LocationProfile,
    pub predicted_groundwater_depth_mbgl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub location_info: LocationInfo,
    pub feasibility_score: f64,
    pub feasibility_insights: String,
    pub rwh_analysis: RwhAnalysis,
    pub ar_analysis: ArAnalysis,
    pub cost_benefit_analysis: CostBenefitAnalysis,
}

fn ensure_finite(what: &str, value: f64) -> Result<f64, AssessError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AssessError::Computation(format!("{what} is not finite ({value})")))
    }
}

/// Runs the full assessment pipeline against shared read-only tables and
/// a groundwater estimator. Holds no per-request state.
pub struct Assessor {
    tables: Tables,
    estimator: Box<dyn GroundwaterEstimator>,
}

impl Assessor {
    pub fn new(tables: Tables, estimator: impl GroundwaterEstimator + 'static) -> Self {
        Assessor {
            tables,
            estimator: Box::new(estimator),
        }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn assess(&self, input: &AssessmentInput) -> Result<AssessmentResult, AssessError> {
        input.validate()?;

        let profile = self.tables.locations.lookup(input.latitude, input.longitude);
        let rainfall = profile.avg_annual_rainfall_mm;
        let permeability = profile.soil_permeability.as_str();

        let depth = ensure_finite(
            "groundwater depth",
            self.estimator
                .estimate(rainfall, permeability, &profile.principal_aquifer),
        )?;
        debug!(
            rainfall,
            permeability,
            aquifer = %profile.principal_aquifer,
            depth,
            "resolved site hydrogeology"
        );

        let rwh = analyze_rwh(
            &self.tables.roof,
            input.roof_area_sqm,
            rainfall,
            &input.roof_type,
            input.num_dwellers,
        );
        ensure_finite("annual runoff", rwh.potential_annual_runoff_liters)?;

        let ar = analyze_ar_feasibility(input.open_space_sqm, permeability, depth);

        let score = feasibility_score(
            &self.tables.permeability,
            rainfall,
            input.open_space_sqm,
            permeability,
            depth,
        );
        debug!(
            score,
            depth_suitability = depth_suitability(depth),
            "feasibility score"
        );
        let insights = feasibility_insights(rainfall, permeability, depth);

        let cost_benefit = analyze_costs_benefits(&rwh, &ar);
        ensure_finite("initial investment", cost_benefit.estimated_initial_investment)?;

        info!(
            runoff_liters = rwh.potential_annual_runoff_liters,
            tank_liters = rwh.recommended_tank_size_liters,
            recharge_feasible = ar.is_feasible,
            score,
            "assessment complete"
        );

        Ok(AssessmentResult {
            location_info: LocationInfo {
                profile: profile.clone(),
                predicted_groundwater_depth_mbgl: depth,
            },
            feasibility_score: score,
            feasibility_insights: insights,
            rwh_analysis: rwh,
            ar_analysis: ar,
            cost_benefit_analysis: cost_benefit,
        })
    }

    pub fn chat(&self, query: &str) -> ChatAnswer {
        self.tables.knowledge.ask(query)
    }
}
