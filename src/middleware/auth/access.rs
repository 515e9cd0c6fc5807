//! Bearer access-token gate: `Authorization` header → RSA verification → claims in extensions.
//!
//! Flow per request:
//! - missing/empty header → 401 "Authorization token is missing"
//! - optional exact `"Bearer "` prefix stripped, otherwise the raw value is the token
//! - signature/parse/time-claim failure → 401 with the verifier message
//! - claims re-decode failure → 500 with the JSON error message
//! - success → `KeycloakClaims` inserted into request extensions, next handler runs
//!
//! Extensions are type-keyed, so the claims value itself plays the role of the `"user"`
//! slot. Handlers read it back with `CurrentUser`.

use std::{borrow::Cow, sync::Arc};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AuthError;
use crate::services::auth::{TokenVerifier, VerifyError};

const BEARER_PREFIX: &str = "Bearer ";

/// Install the gate on every route of `router`.
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.verifier.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply<S>(router: Router<S>, verifier: Arc<TokenVerifier>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // route_layer: unmatched paths keep returning 404 instead of 401
    router.route_layer(middleware::from_fn_with_state(verifier, access_middleware))
}

/// Pull the bearer token out of the request headers.
///
/// Header bytes that are not valid UTF-8 are replaced lossily and still handed to the
/// verifier, so the rejection message comes from the JWT parser.
pub fn extract_token(headers: &HeaderMap) -> Result<Cow<'_, str>, AuthError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AuthError::MissingToken),
    };

    Ok(match String::from_utf8_lossy(value.as_bytes()) {
        Cow::Borrowed(raw) => Cow::Borrowed(raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw)),
        Cow::Owned(raw) if raw.starts_with(BEARER_PREFIX) => {
            Cow::Owned(raw[BEARER_PREFIX.len()..].to_owned())
        }
        Cow::Owned(raw) => Cow::Owned(raw),
    })
}

async fn access_middleware(
    State(verifier): State<Arc<TokenVerifier>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    // token borrows the headers; keep it scoped so extensions can be mutated below
    let claims = {
        let token = match extract_token(req.headers()) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(path = %req.uri().path(), "{err}");
                return Err(err);
            }
        };

        match verifier.verify(&token) {
            Ok(claims) => claims,
            Err(err @ VerifyError::Decode(_)) => {
                tracing::error!(error = %err, "failed to decode verified access token claims");
                return Err(err.into());
            }
            Err(err) => {
                tracing::warn!(error = %err, "access token verification failed");
                return Err(err.into());
            }
        }
    };

    tracing::debug!(sub = %claims.sub, username = %claims.preferred_username, "authenticated");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
