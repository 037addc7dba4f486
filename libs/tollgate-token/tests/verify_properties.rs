#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Verification outcomes for tokens minted outside the codec.

use std::sync::Barrier;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;
use tollgate_token::{ClaimSet, KeyOrigin, SigningKey, TokenCodec, TokenError};

const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
const SECRET_B64: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

fn now() -> i64 {
    i64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs(),
    )
    .unwrap()
}

fn mint(payload: &serde_json::Value, secret: &[u8]) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        payload,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

fn codec() -> TokenCodec {
    TokenCodec::new(SigningKey::from_base64(SECRET_B64).unwrap())
}

#[test]
fn externally_minted_token_with_same_secret_verifies() {
    let token = mint(
        &json!({ "sub": "ops1", "roles": ["ROLE_ADMIN"], "iat": now(), "exp": now() + 60 }),
        SECRET,
    );

    let claims = codec().verify(&token).unwrap();

    assert_eq!(claims.subject(), "ops1");
    assert!(claims.has_role("ROLE_ADMIN"));
}

#[test]
fn expired_token_signed_with_unknown_key_is_expired() {
    let token = mint(
        &json!({ "sub": "ops1", "roles": ["ROLE_ADMIN"], "iat": now() - 7200, "exp": now() - 3600 }),
        b"some completely different secret value",
    );

    assert_eq!(codec().verify(&token), Err(TokenError::Expired));
}

#[test]
fn other_algorithm_is_rejected_as_bad_signature() {
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS512),
        &json!({ "sub": "ops1", "roles": ["ROLE_ADMIN"], "iat": now(), "exp": now() + 60 }),
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    assert_eq!(codec().verify(&token), Err(TokenError::BadSignature));
}

#[test]
fn non_numeric_expiry_is_malformed() {
    let token = mint(
        &json!({ "sub": "ops1", "roles": ["ROLE_ADMIN"], "iat": now(), "exp": "tomorrow" }),
        SECRET,
    );

    assert!(matches!(codec().verify(&token), Err(TokenError::Malformed(_))));
}

#[test]
fn ephemeral_key_is_shared_within_the_process() {
    let first = TokenCodec::new(SigningKey::ephemeral());
    let second = TokenCodec::new(SigningKey::ephemeral());
    assert_eq!(first.signing_key().origin(), KeyOrigin::Ephemeral);

    let token = first
        .generate("alice", ClaimSet::new().role("ROLE_USER"), Duration::from_secs(60))
        .unwrap();

    assert_eq!(second.extract_subject(&token).unwrap(), "alice");
    assert_eq!(codec().verify(&token), Err(TokenError::BadSignature));
}

#[test]
fn racing_first_users_share_one_ephemeral_key() {
    const THREADS: usize = 8;
    let start = Barrier::new(THREADS);

    let tokens: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let start = &start;
                scope.spawn(move || {
                    start.wait();
                    TokenCodec::new(SigningKey::ephemeral())
                        .generate(
                            &format!("user-{i}"),
                            ClaimSet::new().role("ROLE_USER"),
                            Duration::from_secs(60),
                        )
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let verifier = TokenCodec::new(SigningKey::ephemeral());
    for (i, token) in tokens.iter().enumerate() {
        assert_eq!(verifier.extract_subject(token).unwrap(), format!("user-{i}"));
    }
}
