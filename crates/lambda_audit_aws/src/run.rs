//! The two report pipelines behind the CLI, written against the core traits.

use std::error::Error;
use std::io::Write;

use lambda_audit_core::adapters::{IamReader, RegionConnector};
use lambda_audit_core::log::log_info;
use lambda_audit_core::report::{
    export_roles_to_json, export_to_json, render_role_table, render_table, sort_rows,
};
use lambda_audit_core::roles::build_role_inventory;
use lambda_audit_core::{scan_regions, ScanOptions, ScanOutcome};
use serde_json::json;

use crate::cli::GlobalArgs;

/// Scans, sorts, prints the table and writes the optional JSON export.
///
/// Region failures are already logged by the scan; the run only fails when
/// no requested region could be scanned.
pub fn run_function_report<C: RegionConnector>(
    args: &GlobalArgs,
    connector: &C,
    out: &mut impl Write,
) -> Result<ScanOutcome, Box<dyn Error>> {
    let regions = args.regions();
    if regions.is_empty() {
        return Err("at least one region is required".into());
    }

    let options = ScanOptions {
        show_progress: !args.no_progress,
        verbose: args.verbose,
    };
    let mut outcome = scan_regions(&regions, connector, options);
    sort_rows(&mut outcome.rows, args.sort_by);

    out.write_all(render_table(&outcome.rows).as_bytes())?;
    out.flush()?;

    if let Some(path) = &args.json {
        export_to_json(&outcome.rows, path)?;
        log_info(
            "cli",
            "json_written",
            json!({ "path": path.display().to_string(), "rows": outcome.rows.len() }),
        );
    }

    if outcome.failures.len() == regions.len() {
        return Err(format!("all {} region(s) failed to scan", regions.len()).into());
    }
    Ok(outcome)
}

pub fn run_role_inventory(
    args: &GlobalArgs,
    iam: &impl IamReader,
    out: &mut impl Write,
) -> Result<usize, Box<dyn Error>> {
    let rows = build_role_inventory(iam)?;

    out.write_all(render_role_table(&rows).as_bytes())?;
    out.flush()?;

    if let Some(path) = &args.json {
        export_roles_to_json(&rows, path)?;
        log_info(
            "cli",
            "json_written",
            json!({ "path": path.display().to_string(), "rows": rows.len() }),
        );
    }
    Ok(rows.len())
}
