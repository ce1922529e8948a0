//! Session claims.
//!
//! Bearer tokens are decoded without signature verification; trust is
//! delegated to the issuing server and to each request's own 401 handling.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{CustomerId, TenantId, UserId};

/// Kind of actor a session token was issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    /// Platform administrator.
    Platform,

    /// Tenant staff user.
    User,

    /// End client of a tenant storefront.
    Client,
}

impl Actor {
    /// Login route an unauthenticated actor of this kind is redirected to.
    #[must_use]
    pub const fn login_route(self) -> &'static str {
        match self {
            Self::Platform => "/login/platform",
            Self::User => "/login/tenant",
            Self::Client => "/login/client",
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::User => "user",
            Self::Client => "client",
        }
    }
}

impl Display for Actor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Actor {
    type Err = ClaimsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "platform" => Ok(Self::Platform),
            "user" => Ok(Self::User),
            "client" => Ok(Self::Client),
            _ => Err(ClaimsError::UnknownActor),
        }
    }
}

/// Decoded fields of a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Actor kind the token was issued to.
    #[serde(rename = "type")]
    pub actor: Actor,

    /// Tenant the session is scoped to, for tenant staff and clients.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,

    /// Staff identity, when the actor is a tenant user or platform admin.
    #[serde(default)]
    pub user_id: Option<UserId>,

    /// Client identity, when the actor is a storefront client.
    #[serde(default)]
    pub client_id: Option<CustomerId>,

    /// Granted role names.
    #[serde(default)]
    pub roles: Vec<String>,

    /// Expiry as unix seconds.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// Whether the claims are expired at `now`.
    ///
    /// Claims without an expiry are treated as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.exp.is_none_or(|exp| exp <= now.as_second())
    }
}

/// Errors produced while decoding a session token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimsError {
    /// The token does not have the three expected dot-separated segments.
    #[error("session token format is invalid")]
    InvalidFormat,

    /// The payload segment is not valid base64url.
    #[error("session token payload encoding is invalid")]
    InvalidPayloadEncoding,

    /// The payload JSON does not match the claims shape.
    #[error("session token payload is not a valid claims object")]
    InvalidPayloadJson,

    /// The actor kind is not one of the known wire names.
    #[error("unknown actor kind")]
    UnknownActor,
}

/// Decode the claims carried in a session token.
///
/// The signature segment is ignored; callers treat any error as "no
/// session".
///
/// # Errors
///
/// Returns a [`ClaimsError`] when the token is malformed.
pub fn decode_token(token: &str) -> Result<Claims, ClaimsError> {
    let mut segments = token.split('.');

    let _header = segments.next().ok_or(ClaimsError::InvalidFormat)?;
    let payload = segments.next().ok_or(ClaimsError::InvalidFormat)?;
    let _signature = segments.next().ok_or(ClaimsError::InvalidFormat)?;

    if segments.next().is_some() {
        return Err(ClaimsError::InvalidFormat);
    }

    let decoded = BASE64_URL
        .decode(payload.trim_end_matches('='))
        .map_err(|_| ClaimsError::InvalidPayloadEncoding)?;

    serde_json::from_slice(&decoded).map_err(|_| ClaimsError::InvalidPayloadJson)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn token_with_payload(payload: &serde_json::Value) -> String {
        let body = BASE64_URL.encode(payload.to_string());

        format!("eyJhbGciOiJIUzI1NiJ9.{body}.signature")
    }

    #[test]
    fn decode_reads_actor_and_ids() -> TestResult {
        let token = token_with_payload(&json!({
            "type": "user",
            "tenant_id": 4,
            "user_id": 12,
            "roles": ["SALES", "INVENTORY"],
            "exp": 4_102_444_800_i64,
        }));

        let claims = decode_token(&token)?;

        assert_eq!(claims.actor, Actor::User);
        assert_eq!(claims.tenant_id.map(TenantId::get), Some(4));
        assert_eq!(claims.user_id.map(UserId::get), Some(12));
        assert_eq!(claims.roles, vec!["SALES", "INVENTORY"]);

        Ok(())
    }

    #[test]
    fn decode_tolerates_base64_padding() -> TestResult {
        let payload = json!({ "type": "client", "tenant_id": 2, "exp": 4_102_444_800_i64 });
        let body = BASE64_URL.encode(payload.to_string());
        let token = format!("header.{body}==.signature");

        let claims = decode_token(&token)?;

        assert_eq!(claims.actor, Actor::Client);

        Ok(())
    }

    #[test]
    fn decode_rejects_missing_segments() {
        assert_eq!(decode_token("only.two"), Err(ClaimsError::InvalidFormat));
        assert_eq!(
            decode_token("one.two.three.four"),
            Err(ClaimsError::InvalidFormat)
        );
    }

    #[test]
    fn decode_rejects_payloads_that_are_not_claims() {
        let body = BASE64_URL.encode("not json");
        let token = format!("header.{body}.signature");

        assert_eq!(decode_token(&token), Err(ClaimsError::InvalidPayloadJson));
    }

    #[test]
    fn decode_rejects_invalid_encoding() {
        assert_eq!(
            decode_token("header.%%%.signature"),
            Err(ClaimsError::InvalidPayloadEncoding)
        );
    }

    #[test]
    fn claims_without_exp_are_expired() -> TestResult {
        let token = token_with_payload(&json!({ "type": "platform" }));
        let claims = decode_token(&token)?;

        assert!(claims.is_expired_at(Timestamp::UNIX_EPOCH));

        Ok(())
    }

    #[test]
    fn expiry_boundary_counts_as_expired() -> TestResult {
        let now = Timestamp::new(1_700_000_000, 0)?;
        let claims = Claims {
            actor: Actor::Platform,
            tenant_id: None,
            user_id: None,
            client_id: None,
            roles: Vec::new(),
            exp: Some(1_700_000_000),
        };

        assert!(claims.is_expired_at(now));

        Ok(())
    }

    #[test]
    fn future_expiry_is_not_expired() -> TestResult {
        let now = Timestamp::new(1_700_000_000, 0)?;
        let claims = Claims {
            actor: Actor::Client,
            tenant_id: Some(TenantId::new(1)),
            user_id: None,
            client_id: Some(CustomerId::new(9)),
            roles: Vec::new(),
            exp: Some(1_700_000_600),
        };

        assert!(!claims.is_expired_at(now));

        Ok(())
    }

    #[test]
    fn actors_map_to_their_login_routes() {
        assert_eq!(Actor::Platform.login_route(), "/login/platform");
        assert_eq!(Actor::User.login_route(), "/login/tenant");
        assert_eq!(Actor::Client.login_route(), "/login/client");
    }

    #[test]
    fn actor_parses_wire_names() -> TestResult {
        assert_eq!("platform".parse::<Actor>()?, Actor::Platform);
        assert_eq!("user".parse::<Actor>()?, Actor::User);
        assert_eq!("client".parse::<Actor>()?, Actor::Client);
        assert!("admin".parse::<Actor>().is_err());

        Ok(())
    }
}
