//! Configuration for the token codec.

use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

fn default_expiration_ms() -> u64 {
    3_600_000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenConfig {
    /// Base64-encoded HMAC secret. Must decode to at least 32 bytes.
    pub secret: Option<SecretString>,

    /// Lifetime of issued tokens in milliseconds.
    pub expiration_ms: u64,

    /// Clock skew tolerated when checking expiry, in seconds.
    pub leeway_secs: u64,

    /// Sign with a random per-process key when `secret` is absent.
    ///
    /// Every restart invalidates all tokens issued before it. Development only.
    pub unsafe_ephemeral_key: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: None,
            expiration_ms: default_expiration_ms(),
            leeway_secs: 0,
            unsafe_ephemeral_key: false,
        }
    }
}

impl TokenConfig {
    #[must_use]
    pub fn expiration(&self) -> Duration {
        Duration::from_millis(self.expiration_ms)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_to_one_hour_and_no_secret() {
        let cfg = TokenConfig::default();

        assert_eq!(cfg.expiration(), Duration::from_secs(3600));
        assert_eq!(cfg.leeway_secs, 0);
        assert!(cfg.secret.is_none());
        assert!(!cfg.unsafe_ephemeral_key);
    }

    #[test]
    fn deserializes_partial_config() {
        let cfg: TokenConfig = serde_json::from_value(serde_json::json!({
            "secret": "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=",
            "expiration_ms": 60000
        }))
        .unwrap();

        assert_eq!(cfg.expiration(), Duration::from_secs(60));
        assert_eq!(
            cfg.secret.as_ref().map(ExposeSecret::expose_secret),
            Some("MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=")
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<TokenConfig, _> =
            serde_json::from_value(serde_json::json!({ "algorithm": "RS256" }));
        assert!(result.is_err());
    }
}
