use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use keycloak_gate::{
    TokenVerifier, VerifyOptions,
    app::build_router,
    config::{AppEnv, Config},
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

const RSA_PRIVATE_PEM: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/rsa_private.pem"));
const RSA_PUBLIC_PEM: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/rsa_public.pem"));

pub fn sign(claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(RSA_PRIVATE_PEM.as_bytes()).expect("rsa private key");
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &key).expect("sign token")
}

pub fn test_app() -> Router {
    let config = Config {
        addr: ([127, 0, 0, 1], 0).into(),
        app_env: AppEnv::Development,
        auth_public_key_pem: RSA_PUBLIC_PEM.to_string(),
        auth_issuer: None,
        auth_audience: None,
        access_token_leeway_seconds: 0,
        proxy_header: None,
    };
    let verifier = TokenVerifier::from_rsa_pem(
        config.auth_public_key_pem.as_bytes(),
        VerifyOptions::default(),
    )
    .expect("rsa public key");

    build_router(AppState::new(Arc::new(verifier)), &config)
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
