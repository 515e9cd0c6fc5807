use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AuthError;
use crate::services::auth::KeycloakClaims;

/// Handler で、 gate が検証済みの claims を受け取るための extractor
/// middleware が KeycloakClaims を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（ミドルウェア未設定）
#[derive(Debug, Clone)]
pub struct CurrentUser(pub KeycloakClaims);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<KeycloakClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AuthError::InvalidToken)
    }
}
