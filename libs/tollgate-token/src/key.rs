//! HMAC signing key material.
//!
//! The key is resolved once when the codec is built and is immutable
//! afterwards. The ephemeral fallback is shared by the whole process and is
//! created by a single atomic initialization.

use std::fmt;
use std::sync::OnceLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::{DecodingKey, EncodingKey};
use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use crate::config::TokenConfig;

/// Minimum decoded length of a configured secret.
pub const MIN_SECRET_BYTES: usize = 32;

static EPHEMERAL_KEY: OnceLock<[u8; MIN_SECRET_BYTES]> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("no signing secret configured and unsafe_ephemeral_key is disabled")]
    Missing,

    #[error("signing secret is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("signing secret must decode to at least {MIN_SECRET_BYTES} bytes, got {0}")]
    TooShort(usize),
}

/// Where the key material came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    Configured,
    /// Random per-process key; tokens do not survive a restart.
    Ephemeral,
}

#[derive(Clone)]
pub struct SigningKey {
    pub(crate) encoding: EncodingKey,
    pub(crate) decoding: DecodingKey,
    origin: KeyOrigin,
}

impl SigningKey {
    /// Resolve the key described by `config`.
    ///
    /// # Errors
    ///
    /// - [`KeyError::Missing`] when no secret is set and the ephemeral fallback is off
    /// - [`KeyError::Encoding`] / [`KeyError::TooShort`] for an unusable secret
    pub fn from_config(config: &TokenConfig) -> Result<Self, KeyError> {
        match &config.secret {
            Some(secret) => Self::from_base64(secret.expose_secret()),
            None if config.unsafe_ephemeral_key => Ok(Self::ephemeral()),
            None => Err(KeyError::Missing),
        }
    }

    /// Build a key from a base64-encoded secret.
    ///
    /// # Errors
    ///
    /// Fails if the value is not base64 or decodes to fewer than
    /// [`MIN_SECRET_BYTES`] bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = Zeroizing::new(STANDARD.decode(encoded.trim())?);
        if bytes.len() < MIN_SECRET_BYTES {
            return Err(KeyError::TooShort(bytes.len()));
        }
        Ok(Self::from_bytes(&bytes, KeyOrigin::Configured))
    }

    /// The process-wide ephemeral key. Warns on every call.
    #[must_use]
    pub fn ephemeral() -> Self {
        tracing::warn!(
            "no signing secret configured, using an ephemeral per-process key; \
             issued tokens become invalid on restart"
        );
        let bytes = EPHEMERAL_KEY.get_or_init(rand::random);
        Self::from_bytes(bytes, KeyOrigin::Ephemeral)
    }

    fn from_bytes(bytes: &[u8], origin: KeyOrigin) -> Self {
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            origin,
        }
    }

    #[must_use]
    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
