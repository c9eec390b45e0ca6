//! Account-wide role inventory: every role and the policies attached to it.

use crate::adapters::IamReader;
use crate::model::RoleInventoryRow;
use crate::pagination::{collect_all, Page};
use crate::resolver::list_role_policy_refs;

pub fn list_role_names(iam: &impl IamReader) -> Result<Vec<String>, String> {
    collect_all(|marker| iam.list_roles(marker), Page::into_page)
        .map_err(|error| format!("list_roles failed: {error}"))
}

/// One row per role in listing order. Documents are not fetched here.
pub fn build_role_inventory(iam: &impl IamReader) -> Result<Vec<RoleInventoryRow>, String> {
    let role_names = list_role_names(iam)?;
    let mut rows = Vec::with_capacity(role_names.len());
    for role_name in role_names {
        let refs = list_role_policy_refs(iam, &role_name)?;
        rows.push(RoleInventoryRow {
            role_name,
            attached_policies: refs.attached,
            inline_policies: refs.inline,
        });
    }
    Ok(rows)
}
