pub mod config;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "pricing")]
pub mod pricing;

#[cfg(feature = "request")]
pub mod request;

pub use config::PricingConstants;
pub use error::PricingError;
pub use types::*;

#[cfg(feature = "pricing")]
pub use pricing::{
    calculate_pricing, compute, compute_detailed, compute_with, BillingMetric, CalculationResult,
    DetailedPricing, PricingInputs,
};

/// Standard result type for all pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
