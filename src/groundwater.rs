use nalgebra::{DMatrix, DVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::AssessError;
use crate::round_to;

// Columns of the design matrix: intercept, rainfall, permeability, aquifer
const N_FEATURES: usize = 4;

/// Estimates depth to the water table [m bgl] from site hydrogeology.
pub trait GroundwaterEstimator: Send + Sync {
    fn estimate(&self, rainfall_mm: f64, permeability: &str, aquifer: &str) -> f64;
}

// Ordinal code for a permeability class; unknown classes count as moderate
pub fn encode_permeability(permeability: &str) -> f64 {
    match permeability {
        "low" => 0.0,
        "moderate" => 1.0,
        "high" => 2.0,
        _ => 1.0,
    }
}

// Ordinal code for an aquifer; unknown aquifers count as alluvium
pub fn encode_aquifer(aquifer: &str) -> f64 {
    match aquifer {
        "Alluvium" => 0.0,
        "Basalt" => 1.0,
        "Alluvium & Hard Rock" => 2.0,
        _ => 0.0,
    }
}

// Relation the training set is drawn from
fn synthetic_depth(rainfall_mm: f64, permeability_code: f64) -> f64 {
    10.0 + (1500.0 - rainfall_mm) * 0.02 - 2.0 * permeability_code
}

/// Linear regression of water-table depth on rainfall, permeability and
/// aquifer type, fitted by least squares on a seeded synthetic data set.
#[derive(Debug, Clone)]
pub struct RegressionEstimator {
    coefficients: DVector<f64>,
}

impl RegressionEstimator {
    /// Draws `samples` synthetic observations and fits the model. Fails if
    /// the normal equations are singular (e.g. fewer samples than features).
    pub fn train(samples: usize, seed: u64) -> Result<Self, AssessError> {
        if samples < N_FEATURES {
            return Err(AssessError::Estimator(format!(
                "need at least {N_FEATURES} samples, got {samples}"
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut x = DMatrix::<f64>::zeros(samples, N_FEATURES);
        let mut y = DVector::<f64>::zeros(samples);

        for i in 0..samples {
            let rainfall: f64 = rng.gen_range(500.0..2500.0);
            let permeability = f64::from(rng.gen_range(0u8..3));
            let aquifer = f64::from(rng.gen_range(0u8..3));

            x[(i, 0)] = 1.0;
            x[(i, 1)] = rainfall;
            x[(i, 2)] = permeability;
            x[(i, 3)] = aquifer;
            y[i] = synthetic_depth(rainfall, permeability);
        }

        // Normal equations: (XᵀX) β = Xᵀy
        let xt = x.transpose();
        let normal = &xt * &x;
        let rhs = &xt * &y;
        let coefficients = normal
            .lu()
            .solve(&rhs)
            .ok_or_else(|| AssessError::Estimator("singular normal equations".to_string()))?;

        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AssessError::Estimator("non-finite regression coefficients".to_string()));
        }

        debug!(
            samples,
            seed,
            coefficients = ?coefficients.as_slice(),
            "groundwater regression trained"
        );
        Ok(RegressionEstimator { coefficients })
    }

    pub fn coefficients(&self) -> &[f64] {
        self.coefficients.as_slice()
    }
}

impl GroundwaterEstimator for RegressionEstimator {
    fn estimate(&self, rainfall_mm: f64, permeability: &str, aquifer: &str) -> f64 {
        let features = DVector::from_vec(vec![
            1.0,
            rainfall_mm,
            encode_permeability(permeability),
            encode_aquifer(aquifer),
        ]);
        round_to(self.coefficients.dot(&features), 2)
    }
}

/// Returns the same depth for every site.
#[derive(Debug, Clone, Copy)]
pub struct FixedDepthEstimator(pub f64);

impl GroundwaterEstimator for FixedDepthEstimator {
    fn estimate(&self, _rainfall_mm: f64, _permeability: &str, _aquifer: &str) -> f64 {
        self.0
    }
}
