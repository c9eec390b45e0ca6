use crate::model::PolicyRef;
use crate::pagination::Page;

/// Read-only view of the IAM calls the resolver needs.
///
/// Policy documents are returned exactly as IAM sends them (URL-encoded);
/// decoding happens in [`crate::document`].
pub trait IamReader {
    fn list_roles(&self, marker: Option<&str>) -> Result<Page<String>, String>;

    fn list_attached_role_policies(
        &self,
        role_name: &str,
        marker: Option<&str>,
    ) -> Result<Page<PolicyRef>, String>;

    fn list_role_policies(
        &self,
        role_name: &str,
        marker: Option<&str>,
    ) -> Result<Page<String>, String>;

    fn get_policy_default_version(&self, policy_arn: &str) -> Result<String, String>;

    fn get_policy_version_document(
        &self,
        policy_arn: &str,
        version_id: &str,
    ) -> Result<String, String>;

    fn get_role_policy_document(&self, role_name: &str, policy_name: &str)
        -> Result<String, String>;
}
