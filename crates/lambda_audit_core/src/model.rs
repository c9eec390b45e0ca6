use serde::{Deserialize, Serialize};

use crate::document::PolicyDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
    pub function_name: String,
    /// Execution role ARN; empty when the listing omitted it.
    pub role_arn: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRef {
    #[serde(rename = "PolicyName")]
    pub policy_name: String,
    #[serde(rename = "PolicyArn")]
    pub policy_arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPolicy {
    #[serde(rename = "PolicyName")]
    pub policy_name: String,
    /// `None` for inline policies, which have no ARN of their own.
    #[serde(rename = "PolicyArn")]
    pub policy_arn: Option<String>,
    #[serde(rename = "PolicyDocument")]
    pub policy_document: PolicyDocument,
}

impl ResolvedPolicy {
    pub fn is_inline(&self) -> bool {
        self.policy_arn.is_none()
    }

    pub fn kind_label(&self) -> &'static str {
        if self.is_inline() {
            "inline"
        } else if self.policy_document.is_built_in() {
            "built-in"
        } else {
            "managed"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "FunctionName")]
    pub function_name: String,
    #[serde(rename = "RoleName")]
    pub role_name: String,
    #[serde(rename = "Policies")]
    pub policies: Vec<ResolvedPolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInventoryRow {
    #[serde(rename = "RoleName")]
    pub role_name: String,
    #[serde(rename = "AttachedPolicies")]
    pub attached_policies: Vec<PolicyRef>,
    #[serde(rename = "InlinePolicies")]
    pub inline_policies: Vec<String>,
}
