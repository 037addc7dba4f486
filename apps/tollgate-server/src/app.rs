//! Wires the modules into one router.

use std::sync::Arc;

use anyhow::Context;
use authn_resolver::{AuthNResolverLocalClient, TokenIssuer, with_authn};
use authn_resolver_sdk::PrincipalDirectory;
use authz_resolver::AuthZResolverLocalClient;
use authz_resolver_sdk::PolicyEnforcer;
use axum::Router;
use field_areas::{DirectoryOwnerLookup, InMemoryFieldAreaRepository};
use tollgate_token::{KeyOrigin, TokenCodec};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

pub struct App {
    pub router: Router,
    pub issuer: Arc<TokenIssuer>,
    pub key_origin: KeyOrigin,
}

impl App {
    /// # Errors
    ///
    /// Fails when no signing key can be resolved or the seeded accounts are
    /// inconsistent.
    pub fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let codec = Arc::new(TokenCodec::from_config(&config.token)?);
        let key_origin = codec.signing_key().origin();
        let directory: Arc<dyn PrincipalDirectory> = Arc::new(
            static_directory_plugin::Service::from_config(&config.directory)?,
        );
        let enforcer = PolicyEnforcer::new(
            Arc::new(AuthZResolverLocalClient::new()),
            directory.clone(),
        );

        let authn = Arc::new(authn_resolver::Service::new(
            codec.clone(),
            directory.clone(),
            &config.authn,
        ));
        let issuer = Arc::new(TokenIssuer::new(
            codec,
            directory.clone(),
            enforcer.clone(),
            config.authn.demo.clone(),
        ));

        let repo = Arc::new(InMemoryFieldAreaRepository::new());
        let owners = Arc::new(DirectoryOwnerLookup::new(repo.clone(), directory));
        let areas = Arc::new(field_areas::Service::new(
            repo,
            owners,
            enforcer,
            config.field_areas.clone(),
        ));

        let routes = Router::new()
            .merge(authn_resolver::api::rest::router(issuer.clone()))
            .merge(field_areas::router(areas));
        let router = with_authn(routes, Arc::new(AuthNResolverLocalClient::new(authn)))
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router,
            issuer,
            key_origin,
        })
    }

    /// Standard token for a seeded account, for use against a running server.
    ///
    /// # Errors
    ///
    /// Fails with an ephemeral signing key, which no other process shares, or
    /// when the subject has no account.
    pub async fn issue_token(&self, subject: &str) -> anyhow::Result<String> {
        if self.key_origin == KeyOrigin::Ephemeral {
            anyhow::bail!(
                "refusing to issue a token with an ephemeral signing key; \
                 configure token.secret so the server can verify it"
            );
        }
        let issued = self
            .issuer
            .issue_for_subject(subject)
            .await
            .with_context(|| format!("cannot issue a token for '{subject}'"))?;
        Ok(issued.token)
    }
}
