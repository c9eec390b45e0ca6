//! Walks regions one at a time and builds one report row per function.
//!
//! A region is the only recovery boundary: a connection, listing, or
//! resolution failure drops that region's rows, gets logged, and the scan
//! moves on to the next region.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::adapters::{FunctionLister, IamReader, RegionConnector};
use crate::arn::role_name_from_arn;
use crate::log::{log_with_progress, Level};
use crate::model::{FunctionRecord, ReportRow};
use crate::pagination::{paginate, Page};
use crate::resolver::resolve_role_policies;

const COMPONENT: &str = "enumerator";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub show_progress: bool,
    /// Emit one event per resolved function.
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFailure {
    pub region: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanOutcome {
    pub rows: Vec<ReportRow>,
    pub failures: Vec<RegionFailure>,
}

pub fn scan_regions<C: RegionConnector>(
    regions: &[String],
    connector: &C,
    options: ScanOptions,
) -> ScanOutcome {
    let progress = progress_bar(regions.len(), options.show_progress);
    let progress = progress.as_ref();
    let mut outcome = ScanOutcome::default();

    log_with_progress(
        progress,
        COMPONENT,
        Level::Info,
        "scan_started",
        json!({ "regions": regions }),
    );

    for region in regions {
        let started_at = Instant::now();
        if let Some(bar) = progress {
            bar.set_message(region.clone());
        }

        match scan_region(region, connector, options, progress) {
            Ok(rows) => {
                log_with_progress(
                    progress,
                    COMPONENT,
                    Level::Info,
                    "region_completed",
                    json!({
                        "region": region,
                        "functions": rows.len(),
                        "duration_ms": started_at.elapsed().as_millis(),
                    }),
                );
                outcome.rows.extend(rows);
            }
            Err(message) => {
                log_with_progress(
                    progress,
                    COMPONENT,
                    Level::Error,
                    "region_failed",
                    json!({
                        "region": region,
                        "duration_ms": started_at.elapsed().as_millis(),
                        "error": message.clone(),
                    }),
                );
                outcome.failures.push(RegionFailure {
                    region: region.clone(),
                    message,
                });
            }
        }

        if let Some(bar) = progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    log_with_progress(
        None,
        COMPONENT,
        Level::Info,
        "scan_completed",
        json!({
            "functions": outcome.rows.len(),
            "regions_succeeded": regions.len() - outcome.failures.len(),
            "regions_failed": outcome.failures.len(),
        }),
    );
    outcome
}

/// All rows for one region, or the first error encountered in it.
pub fn scan_region<C: RegionConnector>(
    region: &str,
    connector: &C,
    options: ScanOptions,
    progress: Option<&ProgressBar>,
) -> Result<Vec<ReportRow>, String> {
    let (functions, iam) = connector
        .connect(region)
        .map_err(|error| format!("failed to connect to {region}: {error}"))?;

    let mut rows = Vec::new();
    let listing = paginate(|marker| functions.list_functions(marker), Page::into_page);
    for function in listing {
        let function = function.map_err(|error| format!("list_functions failed in {region}: {error}"))?;
        let row = build_row(function, &iam)?;

        if options.verbose {
            log_with_progress(
                progress,
                COMPONENT,
                Level::Info,
                "function_resolved",
                json!({
                    "region": region,
                    "function_name": row.function_name.clone(),
                    "role_name": row.role_name.clone(),
                    "policies": row.policies.len(),
                }),
            );
        }
        rows.push(row);
    }

    Ok(rows)
}

fn build_row(function: FunctionRecord, iam: &impl IamReader) -> Result<ReportRow, String> {
    let role_name = role_name_from_arn(&function.role_arn).to_string();
    let policies = if role_name.is_empty() {
        Vec::new()
    } else {
        resolve_role_policies(iam, &role_name)
            .map_err(|error| format!("function {}: {error}", function.function_name))?
    };

    Ok(ReportRow {
        region: function.region,
        function_name: function.function_name,
        role_name,
        policies,
    })
}

fn progress_bar(total: usize, show_progress: bool) -> Option<ProgressBar> {
    if !show_progress || total == 0 {
        return None;
    }
    let bar = ProgressBar::new(total as u64);
    // The template is a literal; fall back to the default style if it ever stops parsing.
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} regions {msg}")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    Some(bar)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::BTreeMap;

    use super::*;
    use crate::resolver::testing::FakeIam;

    pub struct FakeFunctions {
        pub region: String,
        pub pages: Vec<Vec<(String, String)>>,
        pub fail: bool,
    }

    impl FunctionLister for FakeFunctions {
        fn list_functions(&self, marker: Option<&str>) -> Result<Page<FunctionRecord>, String> {
            if self.fail {
                return Err("UnrecognizedClientException: invalid token".to_string());
            }
            let index = marker.map(|m| m.parse::<usize>().unwrap()).unwrap_or(0);
            let items = self
                .pages
                .get(index)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(|(function_name, role_arn)| FunctionRecord {
                    function_name,
                    role_arn,
                    region: self.region.clone(),
                })
                .collect();
            let next = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());
            Ok(Page::new(items, next))
        }
    }

    /// Region name -> pages of (function name, role ARN). Regions listed in
    /// `failing` error on the first listing call; missing regions refuse to connect.
    #[derive(Default)]
    pub struct FakeConnector {
        pub regions: BTreeMap<String, Vec<Vec<(String, String)>>>,
        pub failing: Vec<String>,
        pub build_iam: Option<fn() -> FakeIam>,
    }

    impl FakeConnector {
        pub fn with_region(mut self, region: &str, pages: Vec<Vec<(&str, &str)>>) -> Self {
            let pages = pages
                .into_iter()
                .map(|page| {
                    page.into_iter()
                        .map(|(name, role)| (name.to_string(), role.to_string()))
                        .collect()
                })
                .collect();
            self.regions.insert(region.to_string(), pages);
            self
        }

        pub fn with_failing_region(mut self, region: &str) -> Self {
            self.regions.insert(region.to_string(), Vec::new());
            self.failing.push(region.to_string());
            self
        }
    }

    impl RegionConnector for FakeConnector {
        type Functions = FakeFunctions;
        type Iam = FakeIam;

        fn connect(&self, region: &str) -> Result<(FakeFunctions, FakeIam), String> {
            let pages = self
                .regions
                .get(region)
                .cloned()
                .ok_or_else(|| format!("unknown region {region}"))?;
            let iam = self.build_iam.map(|build| build()).unwrap_or_else(FakeIam::new);
            Ok((
                FakeFunctions {
                    region: region.to_string(),
                    pages,
                    fail: self.failing.iter().any(|failing| failing == region),
                },
                iam,
            ))
        }
    }
}
