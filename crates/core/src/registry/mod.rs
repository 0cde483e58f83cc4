//! Registry operations for a single domain

pub mod availability;
pub mod registration;

pub use availability::AvailabilityProber;
pub use registration::RegistrationSubmitter;
