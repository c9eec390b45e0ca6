//! Resolves everything a role is allowed to do: attached managed policies
//! and inline policies, each with its current document.

use crate::adapters::IamReader;
use crate::arn::{is_builtin_policy_arn, role_name_from_arn};
use crate::document::{decode_policy_document, PolicyDocument};
use crate::model::{PolicyRef, ResolvedPolicy};
use crate::pagination::{collect_all, Page};

/// Attached policies and inline policy names, without documents.
///
/// `role` may be a role name or a role ARN.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RolePolicyRefs {
    pub attached: Vec<PolicyRef>,
    pub inline: Vec<String>,
}

pub fn list_role_policy_refs(iam: &impl IamReader, role: &str) -> Result<RolePolicyRefs, String> {
    let role_name = role_name_from_arn(role);
    let attached = collect_all(
        |marker| iam.list_attached_role_policies(role_name, marker),
        Page::into_page,
    )
    .map_err(|error| format!("list_attached_role_policies failed for role {role_name}: {error}"))?;

    let inline = collect_all(
        |marker| iam.list_role_policies(role_name, marker),
        Page::into_page,
    )
    .map_err(|error| format!("list_role_policies failed for role {role_name}: {error}"))?;

    Ok(RolePolicyRefs { attached, inline })
}

/// Managed policies first (listing order), then inline policies.
///
/// AWS-owned managed policies get [`PolicyDocument::BuiltIn`] instead of a
/// fetched body. The first failing lookup aborts the whole role. `role` may
/// be a role name or a role ARN.
pub fn resolve_role_policies(
    iam: &impl IamReader,
    role: &str,
) -> Result<Vec<ResolvedPolicy>, String> {
    let role_name = role_name_from_arn(role);
    let refs = list_role_policy_refs(iam, role_name)?;
    let mut policies = Vec::with_capacity(refs.attached.len() + refs.inline.len());

    for policy in refs.attached {
        let policy_document = if is_builtin_policy_arn(&policy.policy_arn) {
            PolicyDocument::BuiltIn
        } else {
            PolicyDocument::Document(fetch_managed_policy_document(iam, &policy.policy_arn)?)
        };
        policies.push(ResolvedPolicy {
            policy_name: policy.policy_name,
            policy_arn: Some(policy.policy_arn),
            policy_document,
        });
    }

    for policy_name in refs.inline {
        let policy_document = fetch_inline_policy_document(iam, role_name, &policy_name)?;
        policies.push(ResolvedPolicy {
            policy_name,
            policy_arn: None,
            policy_document: PolicyDocument::Document(policy_document),
        });
    }

    Ok(policies)
}

/// Documents are versioned: resolve the default version, then read it.
pub fn fetch_managed_policy_document(
    iam: &impl IamReader,
    policy_arn: &str,
) -> Result<serde_json::Value, String> {
    let version_id = iam
        .get_policy_default_version(policy_arn)
        .map_err(|error| format!("get_policy failed for {policy_arn}: {error}"))?;

    let raw = iam
        .get_policy_version_document(policy_arn, &version_id)
        .map_err(|error| {
            format!("get_policy_version failed for {policy_arn} version {version_id}: {error}")
        })?;

    decode_policy_document(&raw)
        .map_err(|error| format!("{policy_arn} version {version_id}: {error}"))
}

pub fn fetch_inline_policy_document(
    iam: &impl IamReader,
    role_name: &str,
    policy_name: &str,
) -> Result<serde_json::Value, String> {
    let raw = iam
        .get_role_policy_document(role_name, policy_name)
        .map_err(|error| {
            format!("get_role_policy failed for role {role_name} policy {policy_name}: {error}")
        })?;

    decode_policy_document(&raw)
        .map_err(|error| format!("inline policy {policy_name} on role {role_name}: {error}"))
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::FakeIam;
    use super::*;

    const BASIC_EXECUTION: &str =
        "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";
    const CUSTOMER_POLICY: &str = "arn:aws:iam::123456789012:policy/InvokeOtherLambdaPolicy";
    const CUSTOMER_DOCUMENT: &str =
        "%7B%22Version%22%3A%222012-10-17%22%2C%22Statement%22%3A%5B%5D%7D";

    #[test]
    fn role_without_policies_resolves_to_empty() {
        let iam = FakeIam::new();
        let policies = resolve_role_policies(&iam, "lonely-role").expect("should resolve");
        assert!(policies.is_empty());
    }

    #[test]
    fn builtin_policy_is_never_fetched() {
        let iam = FakeIam::new()
            .with_attached("worker", "AWSLambdaBasicExecutionRole", BASIC_EXECUTION)
            .with_managed(BASIC_EXECUTION, "v9", "%7B%7D");

        let policies = resolve_role_policies(&iam, "worker").expect("should resolve");

        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].policy_document, PolicyDocument::BuiltIn);
        assert!(iam
            .calls()
            .iter()
            .all(|call| !call.starts_with("get_policy")));
    }

    #[test]
    fn managed_then_inline_in_listing_order() {
        let iam = FakeIam::new()
            .with_attached("worker", "InvokeOtherLambdaPolicy", CUSTOMER_POLICY)
            .with_attached("worker", "AWSLambdaBasicExecutionRole", BASIC_EXECUTION)
            .with_managed(CUSTOMER_POLICY, "v3", CUSTOMER_DOCUMENT)
            .with_inline("worker", "write-queue", r#"{"Statement":[{"Effect":"Allow"}]}"#)
            .with_inline("worker", "read-table", r#"{"Statement":[]}"#);

        let policies = resolve_role_policies(&iam, "worker").expect("should resolve");

        let names: Vec<&str> = policies.iter().map(|p| p.policy_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "InvokeOtherLambdaPolicy",
                "AWSLambdaBasicExecutionRole",
                "write-queue",
                "read-table"
            ]
        );
        assert_eq!(
            policies[0].policy_document,
            PolicyDocument::Document(json!({"Version": "2012-10-17", "Statement": []}))
        );
        assert_eq!(policies[2].policy_arn, None);
        assert_eq!(
            policies[2].policy_document,
            PolicyDocument::Document(json!({"Statement": [{"Effect": "Allow"}]}))
        );
    }

    #[test]
    fn managed_document_reads_default_version() {
        let iam = FakeIam::new()
            .with_attached("worker", "InvokeOtherLambdaPolicy", CUSTOMER_POLICY)
            .with_managed(CUSTOMER_POLICY, "v1", r#"{"Statement":"old"}"#)
            .with_managed(CUSTOMER_POLICY, "v2", r#"{"Statement":"new"}"#);

        let policies = resolve_role_policies(&iam, "worker").unwrap();

        assert_eq!(
            policies[0].policy_document,
            PolicyDocument::Document(json!({"Statement": "new"}))
        );
        assert!(iam
            .calls()
            .contains(&format!("get_policy_version:{CUSTOMER_POLICY}:v2")));
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let iam = FakeIam::new()
            .with_attached("worker", "InvokeOtherLambdaPolicy", CUSTOMER_POLICY)
            .with_managed(CUSTOMER_POLICY, "v3", CUSTOMER_DOCUMENT);

        let first = resolve_role_policies(&iam, "worker").unwrap();
        let second = resolve_role_policies(&iam, "worker").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn single_policy_failure_aborts_role() {
        let iam = FakeIam::new()
            .with_attached("worker", "Missing", "arn:aws:iam::123456789012:policy/Missing")
            .with_inline("worker", "fine", "{}");

        let error = resolve_role_policies(&iam, "worker").expect_err("should fail");

        assert!(error.contains("get_policy failed for arn:aws:iam::123456789012:policy/Missing"));
        assert!(!iam.calls().iter().any(|call| call.starts_with("get_role_policy")));
    }

    #[test]
    fn listing_failure_names_role() {
        let iam = FakeIam::new();
        let error = resolve_role_policies(&iam, "broken-role").expect_err("should fail");
        assert_eq!(
            error,
            "list_attached_role_policies failed for role broken-role: AccessDenied"
        );
    }

    #[test]
    fn role_arn_resolves_like_role_name() {
        let iam = FakeIam::new()
            .with_attached("worker", "InvokeOtherLambdaPolicy", CUSTOMER_POLICY)
            .with_managed(CUSTOMER_POLICY, "v3", CUSTOMER_DOCUMENT)
            .with_inline("worker", "write-queue", r#"{"Statement":[]}"#);

        let by_name = resolve_role_policies(&iam, "worker").unwrap();
        let by_arn =
            resolve_role_policies(&iam, "arn:aws:iam::123456789012:role/service-role/worker")
                .unwrap();

        assert_eq!(by_name.len(), 2);
        assert_eq!(by_arn, by_name);
        assert!(iam.calls().iter().all(|call| !call.contains("arn:aws:iam::123456789012:role")));
    }

    #[test]
    fn policy_refs_follow_every_page() {
        let iam = FakeIam::new()
            .with_attached("worker", "a", "arn:aws:iam::1:policy/a")
            .with_attached("worker", "b", "arn:aws:iam::1:policy/b")
            .with_attached("worker", "c", "arn:aws:iam::1:policy/c");

        let refs = list_role_policy_refs(&iam, "worker").unwrap();

        assert_eq!(refs.attached.len(), 3);
        assert_eq!(
            iam.calls()
                .iter()
                .filter(|call| call.starts_with("list_attached_role_policies"))
                .count(),
            3
        );
    }
}
