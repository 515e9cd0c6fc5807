pub mod claims;
pub mod factory;
pub mod verifier;

pub use claims::KeycloakClaims;
pub use factory::build_token_verifier;
pub use verifier::{TokenVerifier, VerifyError, VerifyOptions};
