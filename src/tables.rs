use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::AssessError;
use crate::knowledge::KnowledgeBase;
use crate::location::{LatitudeBucket, LocationProfile, LocationTable};
use crate::runoff::RoofCoefficients;
use crate::score::PermeabilityWeights;

const BUILTIN_TABLES: &str = include_str!("../data/tables.toml");

#[derive(Deserialize)]
struct RoofSection {
    coefficients: HashMap<String, f64>,
    default_coefficient: f64,
}

#[derive(Deserialize)]
struct PermeabilitySection {
    weights: HashMap<String, f64>,
    default_weight: f64,
}

#[derive(Deserialize)]
struct LocationSection {
    default: String,
    #[serde(default)]
    buckets: Vec<LatitudeBucket>,
    profiles: HashMap<String, LocationProfile>,
}

#[derive(Deserialize)]
struct TablesFile {
    roof: RoofSection,
    permeability: PermeabilitySection,
    locations: LocationSection,
    knowledge: KnowledgeBase,
}

/// Read-only lookup tables shared by every assessment.
#[derive(Debug, Clone)]
pub struct Tables {
    pub roof: RoofCoefficients,
    pub permeability: PermeabilityWeights,
    pub locations: LocationTable,
    pub knowledge: KnowledgeBase,
}

impl Tables {
    /// Tables compiled into the binary.
    pub fn builtin() -> Result<Self, AssessError> {
        Self::from_toml_str(BUILTIN_TABLES)
    }

    pub fn from_path(path: &Path) -> Result<Self, AssessError> {
        let toml_str = fs::read_to_string(path)
            .map_err(|e| AssessError::Config(format!("failed to read {}: {e}", path.display())))?;
        let tables = Self::from_toml_str(&toml_str)?;
        info!(path = %path.display(), "loaded lookup tables");
        Ok(tables)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, AssessError> {
        let file: TablesFile = toml::from_str(toml_str)
            .map_err(|e| AssessError::Config(format!("failed to parse tables: {e}")))?;

        Ok(Tables {
            roof: RoofCoefficients::new(file.roof.coefficients, file.roof.default_coefficient),
            permeability: PermeabilityWeights::new(
                file.permeability.weights,
                file.permeability.default_weight,
            ),
            locations: LocationTable::new(
                file.locations.buckets,
                file.locations.profiles,
                file.locations.default,
            )?,
            knowledge: file.knowledge,
        })
    }
}
