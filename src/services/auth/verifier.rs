use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use super::claims::KeycloakClaims;

/// RSA PKCS#1 v1.5 signature algorithms accepted for access tokens.
pub const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

#[derive(Debug, Error)]
#[error("invalid RSA public key PEM: {0}")]
pub struct KeyError(#[source] jsonwebtoken::errors::Error);

/// Errors returned by access-token verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Signature, algorithm, structure or time-claim failure.
    #[error("{0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    /// The verified claim map could not be projected onto `KeycloakClaims`.
    #[error("{0}")]
    Decode(#[source] serde_json::Error),
}

/// Optional claim checks on top of signature and time validation.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

/// RSA access-token verifier.
///
/// Holds the parsed public key for the lifetime of the process; `verify` takes `&self`
/// and touches no mutable state, so one instance is shared across all requests.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn from_rsa_pem(public_key_pem: &[u8], options: VerifyOptions) -> Result<Self, KeyError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(KeyError)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        // exp/nbf are checked when present but not required.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = options.leeway_seconds;

        if let Some(issuer) = options.issuer.as_deref() {
            validation.set_issuer(&[issuer]);
        }
        match options.audience.as_deref() {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify the token signature and time claims, then decode its claim set.
    ///
    /// A payload that is not a JSON object never gets past `decode`: jsonwebtoken reads
    /// its own time-claim view first and reports the shape error as `Jwt`.
    pub fn verify(&self, token: &str) -> Result<KeycloakClaims, VerifyError> {
        let data = jsonwebtoken::decode::<serde_json::Value>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        KeycloakClaims::from_claim_map(data.claims).map_err(VerifyError::Decode)
    }
}
