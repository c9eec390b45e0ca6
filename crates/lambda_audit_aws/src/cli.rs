use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lambda_audit_core::{CredentialSource, SortKey};

pub const DEFAULT_REGION: &str = "us-east-1";

/// Commercial-partition regions with a Lambda endpoint, scanned by `--all-regions`.
/// Opt-in regions the account has not enabled fail and are skipped like any other region.
pub const LAMBDA_REGIONS: [&str; 29] = [
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ca-central-1",
    "ca-west-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
];

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "lambda-audit",
    version,
    about = "Enumerates Lambda functions with their execution role and policies",
    long_about = "Lists every Lambda function in the selected regions, resolves its\n\
                  execution role and prints the managed and inline policies attached\n\
                  to that role. Policies owned by AWS are marked built-in."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Report Lambda functions with their role policies (default)
    Functions,
    /// Inventory every IAM role with its attached and inline policy names
    Roles,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// JSON filename to write the full report to
    #[arg(long, global = true, value_name = "OUTPUT_FILENAME")]
    pub json: Option<PathBuf>,

    /// AWS access key id; requires --token-secret as well
    #[arg(long, global = true, value_name = "TOKEN_KEY_ID")]
    pub token_key_id: Option<String>,

    /// AWS secret access key; requires --token-key-id as well
    #[arg(long, global = true, value_name = "TOKEN_SECRET")]
    pub token_secret: Option<String>,

    /// Named profile from the local AWS configuration
    #[arg(long, global = true, env = "AWS_PROFILE", value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Column to sort the function report by
    #[arg(long, global = true, value_enum, default_value_t = SortKey::Region)]
    pub sort_by: SortKey,

    /// Region to scan; repeat or comma-separate for several
    #[arg(
        long = "region",
        global = true,
        env = "LAMBDA_AUDIT_REGIONS",
        value_delimiter = ',',
        default_value = DEFAULT_REGION
    )]
    pub regions: Vec<String>,

    /// Scan every commercial region with a Lambda endpoint; overrides --region
    #[arg(long, global = true)]
    pub all_regions: bool,

    /// Hide the per-region progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Log one event per resolved function
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Functions)
    }
}

impl GlobalArgs {
    pub fn credential_source(&self) -> CredentialSource {
        CredentialSource::from_options(
            self.token_key_id.as_deref(),
            self.token_secret.as_deref(),
            self.profile.as_deref(),
        )
    }

    /// Requested regions in order, trimmed, blanks and repeats dropped.
    pub fn regions(&self) -> Vec<String> {
        if self.all_regions {
            return LAMBDA_REGIONS.iter().map(|region| region.to_string()).collect();
        }
        let mut regions: Vec<String> = Vec::with_capacity(self.regions.len());
        for region in self.regions.iter().map(|r| r.trim()) {
            if !region.is_empty() && !regions.iter().any(|seen| seen == region) {
                regions.push(region.to_string());
            }
        }
        regions
    }
}
