//! Request authentication.

use std::sync::Arc;

use axum::Router;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use authn_resolver_sdk::AuthNResolverClient;
use secrecy::SecretString;
use tollgate_security::{Principal, SecurityContext};

use super::error::{authn_error_to_response, error_response};

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthNState {
    pub authn_client: Arc<dyn AuthNResolverClient>,
}

/// Wrap `router` so every request passes through [`authn_middleware`].
#[must_use]
pub fn with_authn(router: Router, authn_client: Arc<dyn AuthNResolverClient>) -> Router {
    router.layer(axum::middleware::from_fn_with_state(
        AuthNState { authn_client },
        authn_middleware,
    ))
}

/// Authentication middleware that uses the `AuthN` resolver to validate bearer tokens.
///
/// For each request:
/// 1. Skips CORS preflight requests
/// 2. Ensures a `SecurityContext` is present in the request extensions
/// 3. Leaves an already populated context untouched
/// 4. Without a `Bearer` token, continues unauthenticated
/// 5. Otherwise resolves the principal and installs it, or answers 401/503
pub async fn authn_middleware(
    State(state): State<AuthNState>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    let ctx = if let Some(existing) = req.extensions().get::<SecurityContext>() {
        existing.clone()
    } else {
        let ctx = SecurityContext::anonymous();
        req.extensions_mut().insert(ctx.clone());
        ctx
    };

    if ctx.is_authenticated() {
        tracing::debug!("security context already populated, skipping token resolution");
        return next.run(req).await;
    }

    let Some(token) = extract_bearer_token(req.headers()).map(str::to_owned) else {
        return next.run(req).await;
    };

    match state.authn_client.authenticate(&token).await {
        Ok(result) => {
            tracing::debug!(
                subject = result.principal.subject(),
                role = %result.principal.role(),
                "principal resolved"
            );
            if let Err(e) = ctx.install(result.principal, Some(SecretString::from(token))) {
                tracing::debug!(error = %e, "security context populated concurrently");
            }
            next.run(req).await
        }
        Err(err) => authn_error_to_response(&err),
    }
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Preflight requests are OPTIONS requests with `Origin` and
/// `Access-Control-Request-Method` headers.
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Extractor for `SecurityContext`; fails if the middleware has not run.
#[derive(Debug, Clone)]
pub struct Authz(pub SecurityContext);

impl<S> FromRequestParts<S> for Authz
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .map(Authz)
            .ok_or_else(|| {
                tracing::error!("SecurityContext not found - authn middleware not configured");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            })
    }
}

/// Extractor for the resolved principal; 401 when the request is anonymous.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Authz(ctx) = Authz::from_request_parts(parts, state).await?;
        ctx.principal()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "User is not authenticated"))
    }
}
