/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer token gate
 * - http: access log / request id / body limit
 */
pub mod auth;
pub mod http;
