//! Value objects representing immutable domain concepts.

pub mod delivery;
pub mod provider_status;

// Re-export commonly used types
pub use delivery::{CascadeOutcome, DeliveryAttempt, DeliveryReport};
pub use provider_status::{HealthReport, ProviderStatus};
