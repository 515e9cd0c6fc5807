/*
 * Responsibility
 * - HTTP に依存しないドメインロジック (token verification, claims)
 */
pub mod auth;
