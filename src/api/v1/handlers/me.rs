/*
 * Responsibility
 * - GET /me, GET /roles (gate 通過後の claims を返す)
 */
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::v1::extractors::CurrentUser;
use crate::services::auth::KeycloakClaims;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub claims: KeycloakClaims,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub realm: Vec<String>,
    pub account: Vec<String>,
}

pub async fn me(CurrentUser(claims): CurrentUser) -> Json<MeResponse> {
    let expires_at = claims.expires_at();
    Json(MeResponse { claims, expires_at })
}

pub async fn roles(CurrentUser(claims): CurrentUser) -> Json<RolesResponse> {
    Json(RolesResponse {
        realm: claims.realm_roles().to_vec(),
        account: claims.account_roles().to_vec(),
    })
}
