//! HS256 token issuing and verification.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation};
use serde::Deserialize;
use tollgate_security::constants::{DEMO_SUBJECT, ROLE_DEMO};
use tollgate_security::{Authority, PrincipalId};

use crate::claims::{ClaimSet, Claims, Impersonation};
use crate::config::TokenConfig;
use crate::error::{IssueError, TokenError};
use crate::key::{KeyError, SigningKey};

const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Signs and verifies self-contained session tokens.
///
/// Holds no mutable state; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    key: SigningKey,
    validation: Validation,
    leeway_secs: i64,
    default_ttl: Duration,
}

#[derive(Deserialize)]
struct ExpiryProbe {
    exp: i64,
}

impl TokenCodec {
    #[must_use]
    pub fn new(key: SigningKey) -> Self {
        Self {
            key,
            validation: build_validation(0),
            leeway_secs: 0,
            default_ttl: DEFAULT_TTL,
        }
    }

    /// Build a codec from configuration, resolving the signing key once.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if no usable key can be resolved.
    pub fn from_config(config: &TokenConfig) -> Result<Self, KeyError> {
        let key = SigningKey::from_config(config)?;
        Ok(Self::new(key)
            .with_default_ttl(config.expiration())
            .with_leeway(config.leeway_secs))
    }

    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_leeway(mut self, secs: u64) -> Self {
        self.validation = build_validation(secs);
        self.leeway_secs = i64::try_from(secs).unwrap_or(i64::MAX);
        self
    }

    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    #[must_use]
    pub fn signing_key(&self) -> &SigningKey {
        &self.key
    }

    /// Issue a token for `subject` valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Rejects an empty subject, an empty role set, a lifetime under one
    /// second and custom claims that shadow registered ones.
    pub fn generate(
        &self,
        subject: &str,
        claims: ClaimSet,
        ttl: Duration,
    ) -> Result<String, IssueError> {
        if subject.is_empty() {
            return Err(IssueError::EmptySubject);
        }
        if !claims.has_roles() {
            return Err(IssueError::NoRoles);
        }
        if let Some(name) = claims.reserved_custom_claim() {
            return Err(IssueError::ReservedClaim(name.to_owned()));
        }
        let ttl_secs = i64::try_from(ttl.as_secs()).map_err(|_| IssueError::InvalidTtl)?;
        if ttl_secs < 1 {
            return Err(IssueError::InvalidTtl);
        }

        let issued_at = now_epoch_seconds();
        let payload = Claims::assemble(subject, claims, issued_at, issued_at.saturating_add(ttl_secs));
        self.sign(&payload)
    }

    /// Standard token carrying the authorities of a persisted account.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub fn issue_standard(
        &self,
        subject: &str,
        authorities: &[Authority],
    ) -> Result<String, IssueError> {
        let claims = ClaimSet::new().roles(authorities.iter().map(Authority::as_str));
        self.generate(subject, claims, self.default_ttl)
    }

    /// Token for the shared demo identity. No account backs it.
    ///
    /// # Errors
    ///
    /// Only signing failures.
    pub fn issue_demo(&self) -> Result<String, IssueError> {
        self.generate(DEMO_SUBJECT, ClaimSet::new().role(ROLE_DEMO), self.default_ttl)
    }

    /// Token that lets an administrator act as another account.
    ///
    /// `subject` and `authorities` are those of the impersonated account.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub fn issue_impersonation(
        &self,
        subject: &str,
        authorities: &[Authority],
        impersonation: Impersonation,
    ) -> Result<String, IssueError> {
        let claims = ClaimSet::new()
            .roles(authorities.iter().map(Authority::as_str))
            .impersonation(impersonation);
        self.generate(subject, claims, self.default_ttl)
    }

    /// Verify a token and return its claims.
    ///
    /// Expiry is checked before the signature, so an expired token is
    /// reported as [`TokenError::Expired`] whoever signed it.
    ///
    /// # Errors
    ///
    /// Exactly one of [`TokenError::Expired`], [`TokenError::Malformed`] or
    /// [`TokenError::BadSignature`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode_header(token).map_err(|e| classify(&e))?;

        let expires_at = peek_expiry(token)?;
        if expires_at < now_epoch_seconds().saturating_sub(self.leeway_secs) {
            return Err(TokenError::Expired);
        }

        let data = jsonwebtoken::decode::<Claims>(token, &self.key.decoding, &self.validation)
            .map_err(|e| classify(&e))?;
        data.claims.validate()?;
        Ok(data.claims)
    }

    /// Verify `token` and project a value out of its claims.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::verify`] failures.
    pub fn extract_claim<T>(
        &self,
        token: &str,
        selector: impl FnOnce(&Claims) -> T,
    ) -> Result<T, TokenError> {
        self.verify(token).map(|claims| selector(&claims))
    }

    /// # Errors
    ///
    /// Propagates [`Self::verify`] failures.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.extract_claim(token, |c| c.subject().to_owned())
    }

    /// # Errors
    ///
    /// Propagates [`Self::verify`] failures.
    pub fn extract_roles(&self, token: &str) -> Result<Vec<String>, TokenError> {
        self.extract_claim(token, |c| c.roles().to_vec())
    }

    /// The impersonated account id, only for impersonation tokens.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::verify`] failures.
    pub fn extract_impersonated_id(&self, token: &str) -> Result<Option<PrincipalId>, TokenError> {
        self.extract_claim(token, |c| c.impersonation().map(|i| i.impersonated_id))
    }

    /// # Errors
    ///
    /// Propagates [`Self::verify`] failures.
    pub fn is_demo_token(&self, token: &str) -> Result<bool, TokenError> {
        self.extract_claim(token, Claims::is_demo)
    }

    fn sign(&self, claims: &Claims) -> Result<String, IssueError> {
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.key.encoding,
        )?)
    }
}

fn build_validation(leeway_secs: u64) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = leeway_secs;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

/// Read `exp` from the payload without trusting it.
fn peek_expiry(token: &str) -> Result<i64, TokenError> {
    let mut segments = token.split('.');
    let (Some(_), Some(payload), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::malformed("token must have three segments"));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| TokenError::malformed(format!("payload is not base64url: {e}")))?;
    let probe: ExpiryProbe = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::malformed(format!("payload has no usable exp: {e}")))?;
    Ok(probe.exp)
}

fn classify(err: &jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
        _ => TokenError::malformed(err.to_string()),
    }
}

fn now_epoch_seconds() -> i64 {
    // A clock before the epoch reads as zero.
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    i64::try_from(secs).unwrap_or(i64::MAX)
}
