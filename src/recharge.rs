// Artificial recharge feasibility and structure selection
use std::collections::BTreeMap;

use serde::Serialize;

// Below this depth [m bgl] recharge risks waterlogging
pub const MIN_GROUNDWATER_DEPTH_M: f64 = 5.0;
pub const MIN_OPEN_SPACE_SQM: f64 = 10.0;
const TRENCH_OPEN_SPACE_SQM: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    ShallowGroundwater,
    LowPermeability,
    InsufficientSpace,
}

impl RejectionReason {
    pub fn note(self) -> &'static str {
        match self {
            RejectionReason::ShallowGroundwater => {
                "Groundwater level is too shallow (< 5m), posing a risk of waterlogging."
            }
            RejectionReason::LowPermeability => {
                "Soil permeability is too low for effective recharge."
            }
            RejectionReason::InsufficientSpace => {
                "Insufficient open space (< 10 sqm) available for a standard recharge structure."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StructureType {
    #[serde(rename = "Recharge Pit")]
    RechargePit,
    #[serde(rename = "Recharge Trench")]
    RechargeTrench,
}

impl StructureType {
    pub fn as_str(self) -> &'static str {
        match self {
            StructureType::RechargePit => "Recharge Pit",
            StructureType::RechargeTrench => "Recharge Trench",
        }
    }

    fn dimensions(self) -> BTreeMap<String, String> {
        let dims: &[(&str, &str)] = match self {
            StructureType::RechargePit => &[("Diameter", "2m"), ("Depth", "3m")],
            StructureType::RechargeTrench => &[("Length", "5m"), ("Width", "2m"), ("Depth", "1.5m")],
        };
        dims.iter()
            .map(|(name, size)| (name.to_string(), size.to_string()))
            .collect()
    }
}

/// Outcome of the recharge check. The structure fields are populated only
/// when the site is feasible; `notes` is always set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArAnalysis {
    pub is_feasible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_structure_type: Option<StructureType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_dimensions: Option<BTreeMap<String, String>>,
    pub notes: String,
    #[serde(skip)]
    pub rejection: Option<RejectionReason>,
}

impl ArAnalysis {
    fn rejected(reason: RejectionReason) -> Self {
        ArAnalysis {
            is_feasible: false,
            recommended_structure_type: None,
            structure_dimensions: None,
            notes: reason.note().to_string(),
            rejection: Some(reason),
        }
    }

    fn feasible(structure: StructureType) -> Self {
        ArAnalysis {
            is_feasible: true,
            recommended_structure_type: Some(structure),
            structure_dimensions: Some(structure.dimensions()),
            notes: "Location is suitable for artificial recharge.".to_string(),
            rejection: None,
        }
    }
}

/**
Decides whether artificial recharge is viable and which structure to build.

Checks run in a fixed order and the first failure wins: groundwater depth,
then soil permeability, then open space. Depth and permeability are hard
physical limits so they are reported ahead of the space constraint.

# Arguments
* `open_space_sqm` - Open ground available for a structure [m²].
* `permeability` - Soil permeability class ("low", "moderate", "high").
* `groundwater_depth_mbgl` - Depth to the water table [m bgl].
*/
pub fn analyze_ar_feasibility(
    open_space_sqm: f64,
    permeability: &str,
    groundwater_depth_mbgl: f64,
) -> ArAnalysis {
    if groundwater_depth_mbgl < MIN_GROUNDWATER_DEPTH_M {
        return ArAnalysis::rejected(RejectionReason::ShallowGroundwater);
    }
    if permeability == "low" {
        return ArAnalysis::rejected(RejectionReason::LowPermeability);
    }
    if open_space_sqm < MIN_OPEN_SPACE_SQM {
        return ArAnalysis::rejected(RejectionReason::InsufficientSpace);
    }

    let structure = if open_space_sqm > TRENCH_OPEN_SPACE_SQM && permeability == "high" {
        StructureType::RechargeTrench
    } else {
        StructureType::RechargePit
    };
    ArAnalysis::feasible(structure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_water_wins_over_low_permeability() {
        let ar = analyze_ar_feasibility(5.0, "low", 3.0);
        assert!(!ar.is_feasible);
        assert_eq!(ar.rejection, Some(RejectionReason::ShallowGroundwater));
        assert!(ar.notes.contains("too shallow"));
    }

    #[test]
    fn low_permeability_wins_over_space() {
        let ar = analyze_ar_feasibility(5.0, "low", 12.0);
        assert_eq!(ar.rejection, Some(RejectionReason::LowPermeability));
    }

    #[test]
    fn small_plot_rejected_for_space() {
        let ar = analyze_ar_feasibility(5.0, "high", 8.0);
        assert!(!ar.is_feasible);
        assert_eq!(ar.rejection, Some(RejectionReason::InsufficientSpace));
        assert!(ar.notes.contains("Insufficient open space"));
        assert!(ar.recommended_structure_type.is_none());
        assert!(ar.structure_dimensions.is_none());
    }

    #[test]
    fn depth_of_exactly_five_passes() {
        let ar = analyze_ar_feasibility(50.0, "moderate", 5.0);
        assert!(ar.is_feasible);
    }

    #[test]
    fn large_permeable_plot_gets_trench() {
        let ar = analyze_ar_feasibility(25.0, "high", 12.0);
        assert!(ar.is_feasible);
        assert_eq!(ar.recommended_structure_type, Some(StructureType::RechargeTrench));
        let dims = ar.structure_dimensions.unwrap();
        assert_eq!(dims["Length"], "5m");
        assert_eq!(dims["Width"], "2m");
        assert_eq!(dims["Depth"], "1.5m");
    }

    #[test]
    fn moderate_soil_gets_pit_regardless_of_space() {
        let ar = analyze_ar_feasibility(500.0, "moderate", 12.0);
        assert_eq!(ar.recommended_structure_type, Some(StructureType::RechargePit));
        let dims = ar.structure_dimensions.unwrap();
        assert_eq!(dims["Diameter"], "2m");
        assert_eq!(dims["Depth"], "3m");
    }

    #[test]
    fn exactly_twenty_sqm_is_a_pit() {
        let ar = analyze_ar_feasibility(20.0, "high", 12.0);
        assert_eq!(ar.recommended_structure_type, Some(StructureType::RechargePit));
    }

    #[test]
    fn infeasible_result_omits_structure_fields_when_serialized() {
        let json = serde_json::to_value(analyze_ar_feasibility(5.0, "high", 8.0)).unwrap();
        assert_eq!(json["is_feasible"], false);
        assert!(json.get("recommended_structure_type").is_none());
        assert!(json.get("structure_dimensions").is_none());
    }

    #[test]
    fn structure_type_serializes_as_label() {
        let json = serde_json::to_value(StructureType::RechargeTrench).unwrap();
        assert_eq!(json, "Recharge Trench");
        assert_eq!(StructureType::RechargePit.as_str(), "Recharge Pit");
    }
}
