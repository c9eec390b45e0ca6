/// Account field IAM reserves for policies AWS owns and maintains.
pub const AWS_MANAGED_POLICY_ACCOUNT: &str = "aws";

/// Role name from a role ARN (`arn:aws:iam::123:role/path/name` -> `name`).
///
/// A bare name without `/` is returned unchanged.
pub fn role_name_from_arn(role: &str) -> &str {
    role.rsplit('/').next().unwrap_or(role)
}

/// Whether the policy lives in the AWS-owned namespace, in any partition.
///
/// Matches on the ARN fields (`arn:<partition>:iam::aws:policy/...`) rather
/// than a substring, since policy paths may themselves contain `:`.
pub fn is_builtin_policy_arn(policy_arn: &str) -> bool {
    let fields: Vec<&str> = policy_arn.splitn(6, ':').collect();
    match fields.as_slice() {
        ["arn", partition, "iam", "", account, resource] => {
            !partition.is_empty()
                && *account == AWS_MANAGED_POLICY_ACCOUNT
                && resource.starts_with("policy/")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_name_is_last_path_segment() {
        assert_eq!(role_name_from_arn("arn:aws:iam::123:role/my-role"), "my-role");
        assert_eq!(
            role_name_from_arn("arn:aws:iam::123:role/service-role/nested-role"),
            "nested-role"
        );
    }

    #[test]
    fn bare_role_name_is_unchanged() {
        assert_eq!(role_name_from_arn("my-role"), "my-role");
        assert_eq!(role_name_from_arn(""), "");
    }

    #[test]
    fn detects_aws_owned_policies() {
        assert!(is_builtin_policy_arn(
            "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole"
        ));
        assert!(is_builtin_policy_arn(
            "arn:aws-us-gov:iam::aws:policy/ReadOnlyAccess"
        ));
    }

    #[test]
    fn customer_policies_are_not_builtin() {
        assert!(!is_builtin_policy_arn(
            "arn:aws:iam::838635938245:policy/service-role/AWSLambdaBasicExecutionRole-52db32c5"
        ));
        assert!(!is_builtin_policy_arn("arn:aws:iam::123:policy/aws-policy"));
        assert!(!is_builtin_policy_arn("iam::aws:policy/ReadOnlyAccess"));
        assert!(!is_builtin_policy_arn("arn:aws:iam::aws:role/ReadOnlyAccess"));
    }

    #[test]
    fn aws_namespace_inside_customer_path_is_not_builtin() {
        assert!(!is_builtin_policy_arn(
            "arn:aws:iam::123456789012:policy/:iam::aws:policy/Custom"
        ));
        assert!(!is_builtin_policy_arn(
            "arn:aws-cn:iam::123456789012:policy/arn:aws:iam::aws:policy/Custom"
        ));
    }
}
