use thiserror::Error;

/// Everything that can go wrong between receiving a site description and
/// handing back an assessment.
#[derive(Debug, Error)]
pub enum AssessError {
    /// Input rejected before the pipeline runs.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("groundwater estimator failed: {0}")]
    Estimator(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// An intermediate value came out non-finite.
    #[error("computation failed: {0}")]
    Computation(String),
}

impl AssessError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AssessError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, AssessError::InvalidInput { .. })
    }
}
