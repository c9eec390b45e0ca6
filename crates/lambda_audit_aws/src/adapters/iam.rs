use aws_sdk_iam::error::DisplayErrorContext;
use lambda_audit_core::adapters::IamReader;
use lambda_audit_core::pagination::Page;
use lambda_audit_core::PolicyRef;

use super::block_on;

pub struct AwsIamReader {
    client: aws_sdk_iam::Client,
}

impl AwsIamReader {
    pub fn new(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }
}

/// IAM signals more pages with `IsTruncated` and hands back a `Marker`.
fn next_marker(is_truncated: bool, marker: Option<&str>) -> Option<String> {
    if is_truncated {
        marker.map(str::to_string)
    } else {
        None
    }
}

fn describe<E: std::error::Error>(error: E) -> String {
    DisplayErrorContext(error).to_string()
}

impl IamReader for AwsIamReader {
    fn list_roles(&self, marker: Option<&str>) -> Result<Page<String>, String> {
        let request = self.client.list_roles().set_marker(marker.map(str::to_string));
        let output = block_on(request.send()).map_err(describe)?;

        let names = output
            .roles()
            .iter()
            .map(|role| role.role_name().to_string())
            .collect();
        Ok(Page::new(names, next_marker(output.is_truncated(), output.marker())))
    }

    fn list_attached_role_policies(
        &self,
        role_name: &str,
        marker: Option<&str>,
    ) -> Result<Page<PolicyRef>, String> {
        let request = self
            .client
            .list_attached_role_policies()
            .role_name(role_name)
            .set_marker(marker.map(str::to_string));
        let output = block_on(request.send()).map_err(describe)?;

        let policies = output
            .attached_policies()
            .iter()
            .filter_map(|policy| {
                Some(PolicyRef {
                    policy_name: policy.policy_name()?.to_string(),
                    policy_arn: policy.policy_arn()?.to_string(),
                })
            })
            .collect();
        Ok(Page::new(policies, next_marker(output.is_truncated(), output.marker())))
    }

    fn list_role_policies(
        &self,
        role_name: &str,
        marker: Option<&str>,
    ) -> Result<Page<String>, String> {
        let request = self
            .client
            .list_role_policies()
            .role_name(role_name)
            .set_marker(marker.map(str::to_string));
        let output = block_on(request.send()).map_err(describe)?;

        Ok(Page::new(
            output.policy_names().to_vec(),
            next_marker(output.is_truncated(), output.marker()),
        ))
    }

    fn get_policy_default_version(&self, policy_arn: &str) -> Result<String, String> {
        let output = block_on(self.client.get_policy().policy_arn(policy_arn).send())
            .map_err(describe)?;

        output
            .policy()
            .and_then(|policy| policy.default_version_id())
            .map(str::to_string)
            .ok_or_else(|| format!("managed policy {policy_arn} has no default version"))
    }

    fn get_policy_version_document(
        &self,
        policy_arn: &str,
        version_id: &str,
    ) -> Result<String, String> {
        let request = self
            .client
            .get_policy_version()
            .policy_arn(policy_arn)
            .version_id(version_id);
        let output = block_on(request.send()).map_err(describe)?;

        output
            .policy_version()
            .and_then(|version| version.document())
            .map(str::to_string)
            .ok_or_else(|| format!("policy version {version_id} of {policy_arn} has no document"))
    }

    fn get_role_policy_document(
        &self,
        role_name: &str,
        policy_name: &str,
    ) -> Result<String, String> {
        let request = self
            .client
            .get_role_policy()
            .role_name(role_name)
            .policy_name(policy_name);
        let output = block_on(request.send()).map_err(describe)?;

        Ok(output.policy_document().to_string())
    }
}
