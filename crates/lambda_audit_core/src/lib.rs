//! Lambda execution-role policy auditing primitives.
//!
//! This crate owns the reporting pipeline: pagination, role policy
//! resolution, per-region enumeration and rendering. It intentionally
//! excludes AWS SDK concerns; remote calls go through the traits in
//! [`adapters`], implemented by `lambda_audit_aws`.

pub mod adapters;
pub mod arn;
pub mod credentials;
pub mod document;
pub mod enumerator;
pub mod log;
pub mod model;
pub mod pagination;
pub mod report;
pub mod resolver;
pub mod roles;

pub use credentials::CredentialSource;
pub use enumerator::{scan_regions, RegionFailure, ScanOptions, ScanOutcome};
pub use model::{FunctionRecord, PolicyRef, ReportRow, ResolvedPolicy, RoleInventoryRow};
pub use report::SortKey;
