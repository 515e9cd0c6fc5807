//! Keycloak access-token claims.
//!
//! The typed view is a best-effort projection of whatever claim set the token carries:
//! unknown claims are dropped, missing (or `null`) claims fall back to zero values.
//! A claim that is present with the wrong JSON type is still a decode error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decoded payload of a Keycloak-issued access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeycloakClaims {
    #[serde(deserialize_with = "null_as_default")]
    pub acr: String,
    #[serde(rename = "allowed-origins", deserialize_with = "null_as_default")]
    pub allowed_origins: Vec<String>,
    // Keycloak emits `aud` either as a string or as an array of strings.
    #[serde(deserialize_with = "one_or_many")]
    pub aud: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub azp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_verified: bool,
    #[serde(deserialize_with = "numeric_date")]
    pub exp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub family_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub given_name: String,
    #[serde(deserialize_with = "numeric_date")]
    pub iat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub iss: String,
    #[serde(deserialize_with = "null_as_default")]
    pub jti: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub preferred_username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub realm_access: RoleList,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_access: ResourceAccess,
    #[serde(deserialize_with = "null_as_default")]
    pub scope: String,
    #[serde(deserialize_with = "null_as_default")]
    pub session_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub: String,
    #[serde(deserialize_with = "null_as_default")]
    pub typ: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleList {
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

/// `resource_access` block. Only the built-in `account` client is projected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceAccess {
    #[serde(deserialize_with = "null_as_default")]
    pub account: RoleList,
}

impl KeycloakClaims {
    /// Re-decode a verified claim map into the typed structure.
    pub fn from_claim_map(claims: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(claims)
    }

    pub fn realm_roles(&self) -> &[String] {
        &self.realm_access.roles
    }

    pub fn account_roles(&self) -> &[String] {
        &self.resource_access.account.roles
    }

    pub fn has_realm_role(&self, role: &str) -> bool {
        self.realm_roles().iter().any(|r| r == role)
    }

    pub fn has_account_role(&self, role: &str) -> bool {
        self.account_roles().iter().any(|r| r == role)
    }

    /// Space-separated `scope` claim split into individual scopes.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }

    /// `exp` as a timestamp. `None` when the token carried no expiry.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.exp <= 0 {
            return None;
        }
        DateTime::from_timestamp(self.exp, 0)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// NumericDate in whole seconds. Integral floats (`1792385279.0`) are accepted,
/// fractional seconds are not.
fn numeric_date<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Int(i64),
        Float(f64),
    }

    match Option::<Seconds>::deserialize(deserializer)? {
        Some(Seconds::Int(secs)) => Ok(secs),
        Some(Seconds::Float(secs))
            if secs.fract() == 0.0 && secs >= i64::MIN as f64 && secs < i64::MAX as f64 =>
        {
            Ok(secs as i64)
        }
        Some(Seconds::Float(secs)) => Err(serde::de::Error::custom(format!(
            "invalid NumericDate {secs}, expected whole seconds"
        ))),
        None => Ok(0),
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}
