//! Domain types and models

pub mod availability;
pub mod registration;
pub mod request;
pub mod schedule;

pub use availability::{AvailabilityResult, AvailabilityStatus};
pub use registration::{
    BatchReport, BatchSummary, DomainDisposition, DomainReport, RegistrationDetail,
    RegistrationOutcome,
};
pub use request::{Credentials, RequestDescriptor, RequestMethod, TransportResponse};
pub use schedule::{normalize_cron_expression, ScheduleBinding, ScheduleConfig};
