use std::process::ExitCode;

use clap::Parser;
use lambda_audit_aws::adapters::connector::AwsRegionConnector;
use lambda_audit_aws::cli::{Cli, Command, DEFAULT_REGION};
use lambda_audit_aws::run::{run_function_report, run_role_inventory};
use lambda_audit_core::log::{log_error, log_info};
use serde_json::json;

// Adapters bridge into the SDK with `block_in_place`, which needs the multi-thread runtime.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let credentials = cli.global.credential_source();
    log_info(
        "cli",
        "started",
        json!({
            "command": format!("{:?}", cli.selected_command()).to_lowercase(),
            "credentials": credentials.describe(),
            "regions": cli.global.regions(),
        }),
    );

    let connector = AwsRegionConnector::new(credentials);
    let mut stdout = std::io::stdout().lock();

    let result = match cli.selected_command() {
        Command::Functions => {
            run_function_report(&cli.global, &connector, &mut stdout).map(|outcome| outcome.rows.len())
        }
        Command::Roles => {
            // IAM is global; any enabled region reaches it.
            let region = if cli.global.all_regions {
                DEFAULT_REGION.to_string()
            } else {
                cli.global
                    .regions()
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| DEFAULT_REGION.to_string())
            };
            let iam = connector.iam_reader(&region);
            run_role_inventory(&cli.global, &iam, &mut stdout)
        }
    };

    match result {
        Ok(rows) => {
            log_info("cli", "finished", json!({ "rows": rows }));
            ExitCode::SUCCESS
        }
        Err(error) => {
            log_error("cli", "failed", json!({ "error": error.to_string() }));
            ExitCode::FAILURE
        }
    }
}
