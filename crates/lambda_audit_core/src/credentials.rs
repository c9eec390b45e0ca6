use serde_json::json;

use crate::log::log_warn;

/// Where region clients get their credentials from.
///
/// Precedence: explicit key pair, then named profile, then the SDK's
/// default provider chain.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Static {
        access_key_id: String,
        secret_access_key: String,
    },
    Profile(String),
    Default,
}

impl CredentialSource {
    pub fn from_options(
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
        profile: Option<&str>,
    ) -> Self {
        let access_key_id = access_key_id.filter(|value| !value.is_empty());
        let secret_access_key = secret_access_key.filter(|value| !value.is_empty());
        let profile = profile.filter(|value| !value.is_empty());

        match (access_key_id, secret_access_key) {
            (Some(key), Some(secret)) => {
                return Self::Static {
                    access_key_id: key.to_string(),
                    secret_access_key: secret.to_string(),
                };
            }
            (Some(_), None) | (None, Some(_)) => log_warn(
                "credentials",
                "incomplete_key_pair",
                json!({
                    "message": "both --token-key-id and --token-secret are required; ignoring the one provided",
                }),
            ),
            (None, None) => {}
        }

        match profile {
            Some(name) => Self::Profile(name.to_string()),
            None => Self::Default,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Static { .. } => "static",
            Self::Profile(_) => "profile",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static { access_key_id, .. } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"<redacted>")
                .finish(),
            Self::Profile(name) => f.debug_tuple("Profile").field(name).finish(),
            Self::Default => f.write_str("Default"),
        }
    }
}
