//! AWS SDK adapters and the `lambda-audit` command line driver.
//!
//! Domain behavior lives in `lambda_audit_core`; this crate only turns SDK
//! calls into the core adapter traits and wires up the CLI.

pub mod adapters;
pub mod cli;
pub mod run;
