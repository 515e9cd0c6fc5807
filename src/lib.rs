//! Request logging and Keycloak bearer-token authentication for axum services.
//!
//! - [`middleware::http`] logs one access line per request.
//! - [`middleware::auth`] verifies RSA-signed access tokens and exposes the decoded
//!   [`KeycloakClaims`] to handlers through [`CurrentUser`].

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;

pub use api::v1::extractors::CurrentUser;
pub use error::AuthError;
pub use services::auth::{KeycloakClaims, TokenVerifier, VerifyError, VerifyOptions};
