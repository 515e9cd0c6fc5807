/// Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::verifier::{KeyError, TokenVerifier, VerifyOptions};

pub fn build_token_verifier(config: &Config) -> Result<Arc<TokenVerifier>, KeyError> {
    let options = VerifyOptions {
        issuer: config.auth_issuer.clone(),
        audience: config.auth_audience.clone(),
        leeway_seconds: config.access_token_leeway_seconds,
    };

    let verifier = TokenVerifier::from_rsa_pem(config.auth_public_key_pem.as_bytes(), options)?;
    tracing::debug!(?verifier, "access token verifier ready");

    Ok(Arc::new(verifier))
}
