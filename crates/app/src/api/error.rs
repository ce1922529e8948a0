//! API error taxonomy.
//!
//! Errors are flat and string-coded: the server's JSON `error` field when
//! present, else a local fallback. There is no retry policy; callers
//! surface the code and the user re-triggers the action.

use thiserror::Error;

use crate::api::transport::TransportError;

/// Route callers should navigate to on a lapsed subscription.
pub const SUBSCRIPTION_ROUTE: &str = "/tenant/subscription";

/// Error raised by the uniform API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session was rejected; route to a login page.
    #[error("session expired or rejected")]
    SessionExpired {
        /// Login route appropriate for the actor the session belonged to.
        login_route: &'static str,
    },

    /// The tenant's subscription lapsed; route to the billing page.
    #[error("subscription required")]
    SubscriptionRequired,

    /// Non-success response, with the server's code when it sent one.
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status of the response.
        status: u16,
        /// Machine-readable code from the error body.
        code: Option<String>,
        /// Extra payload from the error body.
        data: Option<serde_json::Value>,
    },

    /// Transport-level failure before any response arrived.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body did not decode into the expected shape.
    #[error("invalid response body")]
    InvalidResponse,
}

impl ApiError {
    /// Short machine-readable code for banners and branching.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::SessionExpired { .. } => "session_expired",
            Self::SubscriptionRequired => "subscription_required",
            Self::Status {
                code: Some(code), ..
            } => code,
            Self::Status { code: None, .. } => "request_failed",
            Self::Transport(_) => "network_failed",
            Self::InvalidResponse => "invalid_response",
        }
    }

    /// Fill in a call-site fallback code when the server supplied none.
    #[must_use]
    pub fn or_code(self, fallback: &str) -> Self {
        match self {
            Self::Status {
                status,
                code: None,
                data,
            } => Self::Status {
                status,
                code: Some(fallback.to_string()),
                data,
            },
            other => other,
        }
    }

    /// Route the caller should navigate to, when the error implies one.
    #[must_use]
    pub fn redirect_route(&self) -> Option<&'static str> {
        match self {
            Self::SessionExpired { login_route } => Some(login_route),
            Self::SubscriptionRequired => Some(SUBSCRIPTION_ROUTE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_codes_win_over_fallbacks() {
        let error = ApiError::Status {
            status: 422,
            code: Some("tax_required".to_string()),
            data: None,
        };

        assert_eq!(error.code(), "tax_required");
        assert_eq!(error.or_code("create_failed").code(), "tax_required");
    }

    #[test]
    fn fallback_applies_when_the_server_sent_none() {
        let error = ApiError::Status {
            status: 500,
            code: None,
            data: None,
        };

        assert_eq!(error.code(), "request_failed");
        assert_eq!(error.or_code("load_failed").code(), "load_failed");
    }

    #[test]
    fn redirect_routes_cover_session_and_billing() {
        let expired = ApiError::SessionExpired {
            login_route: "/login/client",
        };

        assert_eq!(expired.redirect_route(), Some("/login/client"));
        assert_eq!(
            ApiError::SubscriptionRequired.redirect_route(),
            Some("/tenant/subscription")
        );
        assert_eq!(ApiError::InvalidResponse.redirect_route(), None);
    }
}
