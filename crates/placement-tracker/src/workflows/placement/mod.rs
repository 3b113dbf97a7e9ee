//! Internship placement lifecycle: postings, applications, and withdrawal requests.
//!
//! [`PlacementService`] owns the entity graph and hands out short-lived lifecycle managers
//! that borrow it for a single operation.

pub mod accounts;
pub mod applications;
pub mod domain;
pub mod internships;
pub mod policy;
pub mod registry;
pub mod report;
pub mod service;
pub mod storage;
pub mod withdrawals;

#[cfg(test)]
mod tests;

pub use accounts::{Accounts, LoginOutcome};
pub use applications::{AcceptanceOutcome, ApplicationLifecycle};
pub use domain::{
    Account, Application, ApplicationId, ApplicationStatus, CareerCenterStaff,
    CompanyRepresentative, ErrorKind, Internship, InternshipDraft, InternshipId,
    InternshipLevel, InternshipStatus, PlacementError, Role, Student, UnknownVariant, User,
    UserId, WithdrawalId, WithdrawalRequest, WithdrawalStatus,
};
pub use internships::{InternshipLifecycle, RemovalSummary};
pub use policy::PlacementPolicy;
pub use registry::PlacementRegistry;
pub use report::{PlacementReport, ReportFilter};
pub use service::{Clock, PlacementService};
pub use storage::{CsvStore, PlacementSnapshot, StorageError};
pub use withdrawals::{WithdrawalLifecycle, WithdrawalOutcome};
