use aws_sdk_lambda::error::DisplayErrorContext;
use lambda_audit_core::adapters::FunctionLister;
use lambda_audit_core::pagination::Page;
use lambda_audit_core::FunctionRecord;

use super::block_on;

pub struct AwsFunctionLister {
    client: aws_sdk_lambda::Client,
    region: String,
}

impl AwsFunctionLister {
    pub fn new(client: aws_sdk_lambda::Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }
}

impl FunctionLister for AwsFunctionLister {
    fn list_functions(&self, marker: Option<&str>) -> Result<Page<FunctionRecord>, String> {
        let request = self
            .client
            .list_functions()
            .set_marker(marker.map(str::to_string));

        let output = block_on(request.send())
            .map_err(|error| DisplayErrorContext(&error).to_string())?;

        let items = output
            .functions()
            .iter()
            .map(|function| FunctionRecord {
                function_name: function.function_name().unwrap_or_default().to_string(),
                role_arn: function.role().unwrap_or_default().to_string(),
                region: self.region.clone(),
            })
            .collect();

        Ok(Page::new(items, output.next_marker().map(str::to_string)))
    }
}
