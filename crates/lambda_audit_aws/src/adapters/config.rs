use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use lambda_audit_core::CredentialSource;

const PROVIDER_NAME: &str = "lambda_audit_cli";

/// Shared SDK configuration for one region.
pub async fn load_region_config(region: &str, source: &CredentialSource) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

    match source {
        CredentialSource::Static {
            access_key_id,
            secret_access_key,
        } => {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                PROVIDER_NAME,
            ));
        }
        CredentialSource::Profile(name) => {
            loader = loader.profile_name(name);
        }
        CredentialSource::Default => {}
    }

    loader.load().await
}
