pub mod api;
pub mod assessment;
pub mod config;
pub mod cost;
pub mod error;
pub mod groundwater;
pub mod knowledge;
pub mod location;
pub mod recharge;
pub mod runoff;
pub mod score;
pub mod tables;

pub use assessment::{AssessmentInput, AssessmentResult, Assessor};
pub use config::Settings;
pub use error::AssessError;
pub use groundwater::{FixedDepthEstimator, GroundwaterEstimator, RegressionEstimator};
pub use tables::Tables;

// Round half away from zero to `places` decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round_to(85_679.999_999_99, 2), 85_680.0);
        assert_eq!(round_to(19.063, 1), 19.1);
        assert_eq!(round_to(-8.444, 2), -8.44);
        assert!(round_to(f64::INFINITY, 1).is_infinite());
    }
}
