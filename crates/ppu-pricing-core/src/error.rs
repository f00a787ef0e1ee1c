use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing required fields")]
    MissingRequiredFields,

    #[error("Degenerate annuity math in {function}: {reason}")]
    DegenerateMath { function: String, reason: String },

    #[error("Calculation failed: {0}")]
    Computation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PricingError {
    /// True for failures caused by the caller's input rather than the engine.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidInput { .. } | PricingError::MissingRequiredFields
        )
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::SerializationError(e.to_string())
    }
}
