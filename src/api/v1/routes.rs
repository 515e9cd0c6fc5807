/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - ここの route は全て gate (middleware::auth::access) の内側に置かれる
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::me::{me, roles};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/roles", get(roles))
}
