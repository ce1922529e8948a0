//! Auth flows over the remote auth endpoints.

use std::sync::Arc;

use kiosk::{
    claims::{self, Actor, Claims},
    ids::TenantId,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    api::{ApiClient, ApiError, TENANT_HEADER},
    auth::{session::SessionStore, tokens::TokenStore},
};

/// Login credentials, with an optional pre-selected tenant for staff and
/// client logins.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account email.
    pub email: String,

    /// Account password.
    pub password: String,

    /// Tenant to sign into, when the account belongs to several.
    pub tenant_id: Option<TenantId>,
}

/// Tenant choice returned when a login matches several tenants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TenantChoice {
    /// Tenant to retry the login against.
    pub tenant_id: TenantId,

    /// Tenant display name.
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,

    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TenantChoices {
    #[serde(default)]
    tenants: Vec<TenantChoice>,
}

/// Errors surfaced by the auth facade.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login matched several tenants; pick one and retry.
    #[error("tenant selection required")]
    TenantSelectionRequired(Vec<TenantChoice>),

    /// The issued token could not be decoded.
    #[error("login token is invalid")]
    InvalidToken(#[from] claims::ClaimsError),

    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    /// Short machine-readable code for banners and branching.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::TenantSelectionRequired(_) => "tenant_required",
            Self::InvalidToken(_) => "login_failed",
            Self::Api(error) => error.code(),
        }
    }
}

/// Login, logout, and password maintenance.
#[derive(Clone)]
pub struct AuthFacade {
    api: ApiClient,
    session: Arc<SessionStore>,
    tokens: TokenStore,
}

impl AuthFacade {
    /// Create a facade over the shared session and token stores.
    pub fn new(api: ApiClient, session: Arc<SessionStore>, tokens: TokenStore) -> Self {
        Self {
            api,
            session,
            tokens,
        }
    }

    /// Log in as the given actor kind and install the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TenantSelectionRequired`] when the account
    /// belongs to several tenants and none was pre-selected; otherwise any
    /// login failure surfaces its server code (or `login_failed`).
    pub async fn login(&self, actor: Actor, credentials: &Credentials) -> Result<Claims, AuthError> {
        let path = match actor {
            Actor::Platform => "/auth/platform/login",
            Actor::User => "/auth/tenant/login",
            Actor::Client => "/auth/client/login",
        };

        let body = serde_json::json!({
            "email": credentials.email,
            "password": credentials.password,
        });

        let mut headers: Vec<(&str, String)> = Vec::new();

        if let Some(tenant_id) = credentials.tenant_id {
            headers.push((TENANT_HEADER, tenant_id.to_string()));
        }

        let response: LoginResponse = match self.api.post_with_headers(path, &body, &headers).await
        {
            Ok(response) => response,
            Err(ApiError::Status {
                code: Some(code),
                data,
                status: _,
            }) if code == "tenant_required" => {
                let choices = data
                    .and_then(|data| serde_json::from_value::<TenantChoices>(data).ok())
                    .map(|parsed| parsed.tenants)
                    .unwrap_or_default();

                return Err(AuthError::TenantSelectionRequired(choices));
            }
            Err(error) => return Err(AuthError::Api(error.or_code("login_failed"))),
        };

        let claims = claims::decode_token(&response.access_token)?;

        self.session.apply_login(&response.access_token, claims.clone());
        self.tokens.set_tokens(
            &response.access_token,
            response.refresh_token.as_deref().unwrap_or_default(),
        );

        Ok(claims)
    }

    /// Log out remotely (best-effort) and clear local state either way.
    pub async fn logout(&self) {
        let result: Result<serde_json::Value, ApiError> =
            self.api.post("/auth/logout", &serde_json::json!({})).await;

        if let Err(error) = result {
            debug!("logout call failed, clearing local session anyway: {}", error.code());
        }

        self.session.clear();
        self.tokens.clear();
    }

    /// Change the signed-in principal's password.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `password_change_failed`.
    pub async fn change_password(&self, new_password: &str) -> Result<(), AuthError> {
        let body = serde_json::json!({ "new_password": new_password });

        let _: serde_json::Value = self
            .api
            .put("/auth/me/password", &body)
            .await
            .map_err(|error| AuthError::Api(error.or_code("password_change_failed")))?;

        Ok(())
    }
}
