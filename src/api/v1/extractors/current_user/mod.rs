/*!
 * Authenticated caller extractor
 *
 * Responsibility:
 * - gate が request extensions に入れた KeycloakClaims を handler に渡す
 *
 * Public API:
 * - CurrentUser
 */

mod core;

pub use core::CurrentUser;
