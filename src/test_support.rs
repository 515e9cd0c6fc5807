//! Token minting helpers shared by unit tests.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

pub const RSA_PRIVATE_PEM: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/rsa_private.pem"));
pub const RSA_PUBLIC_PEM: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/rsa_public.pem"));
pub const OTHER_RSA_PRIVATE_PEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/testdata/other_rsa_private.pem"
));
pub const EC_PRIVATE_PEM: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/ec_private.pem"));

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// A Keycloak-shaped claim set valid for five minutes.
pub fn keycloak_claims(sub: &str, username: &str, realm_roles: &[&str]) -> Value {
    let iat = now();
    json!({
        "exp": iat + 300,
        "iat": iat,
        "jti": format!("jti-{sub}"),
        "iss": "https://sso.example.com/realms/demo",
        "aud": "account",
        "sub": sub,
        "typ": "Bearer",
        "azp": "web-app",
        "sid": "session-1",
        "session_state": "session-1",
        "acr": "1",
        "allowed-origins": ["https://app.example.com"],
        "realm_access": { "roles": realm_roles },
        "resource_access": { "account": { "roles": ["manage-account", "view-profile"] } },
        "scope": "openid profile email",
        "email_verified": true,
        "name": "Test User",
        "preferred_username": username,
        "given_name": "Test",
        "family_name": "User",
        "email": format!("{username}@example.com"),
    })
}

fn encode_with(alg: Algorithm, key: &EncodingKey, claims: &Value) -> String {
    let mut header = Header::new(alg);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, claims, key).expect("sign test token")
}

pub fn sign_rsa_with(alg: Algorithm, claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(RSA_PRIVATE_PEM.as_bytes()).expect("rsa private key");
    encode_with(alg, &key, claims)
}

pub fn sign_rsa(claims: &Value) -> String {
    sign_rsa_with(Algorithm::RS256, claims)
}

pub fn sign_other_rsa(claims: &Value) -> String {
    let key =
        EncodingKey::from_rsa_pem(OTHER_RSA_PRIVATE_PEM.as_bytes()).expect("other rsa private key");
    encode_with(Algorithm::RS256, &key, claims)
}

pub fn sign_ec(claims: &Value) -> String {
    let key = EncodingKey::from_ec_pem(EC_PRIVATE_PEM.as_bytes()).expect("ec private key");
    encode_with(Algorithm::ES256, &key, claims)
}

pub fn sign_hs256(secret: &[u8], claims: &Value) -> String {
    encode_with(Algorithm::HS256, &EncodingKey::from_secret(secret), claims)
}
