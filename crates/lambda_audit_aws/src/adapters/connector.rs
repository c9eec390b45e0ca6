use lambda_audit_core::adapters::RegionConnector;
use lambda_audit_core::CredentialSource;

use super::config::load_region_config;
use super::iam::AwsIamReader;
use super::lambda::AwsFunctionLister;
use super::block_on;

/// Builds Lambda and IAM clients for each scanned region from one credential source.
pub struct AwsRegionConnector {
    credentials: CredentialSource,
}

impl AwsRegionConnector {
    pub fn new(credentials: CredentialSource) -> Self {
        Self { credentials }
    }

    pub fn iam_reader(&self, region: &str) -> AwsIamReader {
        let config = block_on(load_region_config(region, &self.credentials));
        AwsIamReader::new(aws_sdk_iam::Client::new(&config))
    }
}

impl RegionConnector for AwsRegionConnector {
    type Functions = AwsFunctionLister;
    type Iam = AwsIamReader;

    fn connect(&self, region: &str) -> Result<(AwsFunctionLister, AwsIamReader), String> {
        if region.trim().is_empty() {
            return Err("region name cannot be empty".to_string());
        }
        let config = block_on(load_region_config(region, &self.credentials));
        Ok((
            AwsFunctionLister::new(aws_sdk_lambda::Client::new(&config), region),
            AwsIamReader::new(aws_sdk_iam::Client::new(&config)),
        ))
    }
}
