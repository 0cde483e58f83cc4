//! Infrastructure error handling
//!
//! Third-party errors are converted into the domain error on this side of the
//! boundary so the core never sees reqwest or scheduler types.

pub mod conversions;

pub use conversions::InfraError;
