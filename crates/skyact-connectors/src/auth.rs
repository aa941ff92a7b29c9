//! Credential resolution for Skytap requests
//!
//! Credentials come from build-scoped secrets and are handed to the request
//! builder as an opaque `Authorization` header value.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use skyact_core::Credentials;

use crate::error::{ConnectorError, ConnectorResult};

/// Ready-made header value, forwarded verbatim
pub const AUTH_TOKEN_SECRET: &str = "SKYTAP_AUTH_TOKEN";
/// Skytap login name used for basic auth
pub const USER_SECRET: &str = "SKYTAP_USER";
/// Skytap API security token used as the basic-auth password
pub const API_KEY_SECRET: &str = "SKYTAP_API_KEY";

/// Read access to secrets bound to the current build
pub trait SecretSource {
    fn secret(&self, name: &str) -> Option<String>;
}

/// Produces the authorization header value for one step execution
pub trait CredentialProvider: Send + Sync {
    fn get_auth_credentials(&self, secrets: &dyn SecretSource) -> ConnectorResult<Credentials>;
}

/// Default provider: a full token if the build has one, otherwise basic auth
/// built from user name and API key.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildSecretCredentials;

impl CredentialProvider for BuildSecretCredentials {
    fn get_auth_credentials(&self, secrets: &dyn SecretSource) -> ConnectorResult<Credentials> {
        if let Some(token) = non_empty(secrets.secret(AUTH_TOKEN_SECRET)) {
            tracing::debug!("Using pre-built authorization token from build secrets");
            return Ok(Credentials::new(token));
        }

        match (
            non_empty(secrets.secret(USER_SECRET)),
            non_empty(secrets.secret(API_KEY_SECRET)),
        ) {
            (Some(user), Some(key)) => {
                tracing::debug!(user = %user, "Using basic credentials from build secrets");
                Ok(basic_credentials(&user, &key))
            }
            (Some(_), None) => Err(ConnectorError::Authentication(format!(
                "{} is set but {} is missing",
                USER_SECRET, API_KEY_SECRET
            ))),
            _ => Err(ConnectorError::Authentication(format!(
                "no Skytap credentials bound to this build; set {}, or {} and {}",
                AUTH_TOKEN_SECRET, USER_SECRET, API_KEY_SECRET
            ))),
        }
    }
}

/// Provider returning fixed credentials, for embedding and tests
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

impl CredentialProvider for StaticCredentials {
    fn get_auth_credentials(&self, _secrets: &dyn SecretSource) -> ConnectorResult<Credentials> {
        Ok(self.0.clone())
    }
}

/// `Basic base64(user:key)`
pub fn basic_credentials(user: &str, api_key: &str) -> Credentials {
    let encoded = STANDARD.encode(format!("{}:{}", user, api_key));
    Credentials::new(format!("Basic {}", encoded))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Secrets(HashMap<&'static str, &'static str>);

    impl SecretSource for Secrets {
        fn secret(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_basic_credentials_encoding() {
        let creds = basic_credentials("user", "key");
        assert_eq!(creds.expose(), "Basic dXNlcjprZXk=");
    }

    #[test]
    fn test_token_takes_precedence() {
        let secrets = Secrets(HashMap::from([
            (AUTH_TOKEN_SECRET, "Bearer abc"),
            (USER_SECRET, "user"),
            (API_KEY_SECRET, "key"),
        ]));
        let creds = BuildSecretCredentials.get_auth_credentials(&secrets).unwrap();
        assert_eq!(creds.expose(), "Bearer abc");
    }

    #[test]
    fn test_user_and_key_build_basic_auth() {
        let secrets = Secrets(HashMap::from([(USER_SECRET, "user"), (API_KEY_SECRET, "key")]));
        let creds = BuildSecretCredentials.get_auth_credentials(&secrets).unwrap();
        assert_eq!(creds, basic_credentials("user", "key"));
    }

    #[test]
    fn test_missing_secrets_fail() {
        let err = BuildSecretCredentials
            .get_auth_credentials(&Secrets(HashMap::new()))
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Authentication(_)));

        let half = Secrets(HashMap::from([(USER_SECRET, "user"), (API_KEY_SECRET, "  ")]));
        let err = BuildSecretCredentials.get_auth_credentials(&half).unwrap_err();
        assert!(err.to_string().contains(API_KEY_SECRET));
    }
}
