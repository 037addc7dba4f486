//! Configuration for the `AuthN` resolver.

use secrecy::SecretString;
use serde::Deserialize;
use tollgate_security::constants::DEMO_SUBJECT;

/// Configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AuthNResolverConfig {
    /// Check claim-only administrators against the directory on every request.
    ///
    /// When false, a validly signed token carrying `ROLE_ADMIN` or
    /// `ROLE_SUPER_ADMIN` is trusted without a lookup, so a demoted or deleted
    /// administrator keeps access until the token expires.
    pub verify_privileged_against_directory: bool,

    /// Demo session settings.
    pub demo: DemoLoginConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoLoginConfig {
    pub enabled: bool,
    pub username: String,
    pub password: SecretString,
}

impl Default for DemoLoginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            username: DEMO_SUBJECT.to_owned(),
            password: SecretString::from(DEMO_SUBJECT.to_owned()),
        }
    }
}
