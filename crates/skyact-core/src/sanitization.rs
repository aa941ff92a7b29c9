//! Utilities for keeping credentials out of logs and error messages

/// Sanitized placeholder for sensitive values
pub const SANITIZED_PLACEHOLDER: &str = "***REDACTED***";

/// Replace every occurrence of `secret` in `input` with the placeholder.
///
/// For scheme-prefixed values such as `Basic dXNlcjprZXk=` the bare token is
/// redacted as well, since it is what tends to get echoed back.
pub fn redact_secret(input: &str, secret: &str) -> String {
    let secret = secret.trim();
    if secret.is_empty() {
        return input.to_string();
    }

    let mut result = input.replace(secret, SANITIZED_PLACEHOLDER);
    if let Some((_, token)) = secret.split_once(' ') {
        let token = token.trim();
        // Very short tokens would mangle ordinary text
        if token.len() >= 8 {
            result = result.replace(token, SANITIZED_PLACEHOLDER);
        }
    }
    result
}
