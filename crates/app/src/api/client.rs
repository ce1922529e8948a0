//! Uniform API client.
//!
//! Every request flows through one place that injects the bearer token and
//! tenant header, and folds session/billing rejections into typed errors,
//! the way response interceptors would in a UI shell.

use std::sync::Arc;

use kiosk::claims::Actor;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    api::{
        error::ApiError,
        transport::{ApiRequest, ApiResponse, HttpTransport, Method},
    },
    auth::session::SessionStore,
};

/// Header carrying the tenant scope for staff and storefront calls.
pub const TENANT_HEADER: &str = "X-Tenant-Id";

/// Storefront sub-paths that act on the signed-in client and therefore
/// keep the bearer token.
const PROTECTED_SHOP_SUBPATHS: [&str; 3] = ["/notifications", "/orders", "/checkout"];

/// Uniform JSON client for the remote commerce API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client over the given transport and session.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        session: Arc<SessionStore>,
    ) -> Self {
        let mut base_url = base_url.into();

        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            transport,
            session,
        }
    }

    /// GET a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-success status,
    /// or an undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(Method::Get, path, &[], None, &[]).await?;

        decode(&body)
    }

    /// GET a JSON resource with query parameters.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let body = self.send(Method::Get, path, query, None, &[]).await?;

        decode(&body)
    }

    /// GET a binary resource as raw bytes.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`], without the decode step.
    pub async fn get_blob(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        self.send(Method::Get, path, &[], None, &[]).await
    }

    /// POST a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.post_with_headers(path, body, &[]).await
    }

    /// POST with extra request headers (e.g. an explicit tenant selection).
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn post_with_headers<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        headers: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|_| ApiError::InvalidResponse)?;
        let response = self
            .send(Method::Post, path, &[], Some(body), headers)
            .await?;

        decode(&response)
    }

    /// PUT a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|_| ApiError::InvalidResponse)?;
        let response = self.send(Method::Put, path, &[], Some(body), &[]).await?;

        decode(&response)
    }

    /// PATCH a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|_| ApiError::InvalidResponse)?;
        let response = self.send(Method::Patch, path, &[], Some(body), &[]).await?;

        decode(&response)
    }

    /// DELETE a resource and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::Delete, path, &[], None, &[]).await?;

        decode(&response)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        extra_headers: &[(&str, String)],
    ) -> Result<Vec<u8>, ApiError> {
        let mut headers: Vec<(String, String)> = extra_headers
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect();

        if bearer_allowed(path) {
            if let Some(token) = self.session.token() {
                headers.push(("Authorization".to_string(), format!("Bearer {token}")));
            }
        }

        let has_tenant_header = headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(TENANT_HEADER));

        if !has_tenant_header {
            if let Some(tenant_id) = self.session.tenant_id() {
                headers.push((TENANT_HEADER.to_string(), tenant_id.to_string()));
            }
        }

        let request = ApiRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: query
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.clone()))
                .collect(),
            headers,
            body,
        };

        let response = self.transport.execute(request).await?;

        self.interpret(response)
    }

    fn interpret(&self, response: ApiResponse) -> Result<Vec<u8>, ApiError> {
        if (200..300).contains(&response.status) {
            return Ok(response.body);
        }

        let body: Option<serde_json::Value> = serde_json::from_slice(&response.body).ok();
        let code = body
            .as_ref()
            .and_then(|body| body.get("error"))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string);
        let data = body.as_ref().and_then(|body| body.get("data")).cloned();

        if response.status == 401 {
            let login_route = self
                .session
                .actor()
                .map_or(Actor::Platform.login_route(), Actor::login_route);

            self.session.clear();

            return Err(ApiError::SessionExpired { login_route });
        }

        if response.status == 402 && code.as_deref() == Some("subscription_required") {
            return Err(ApiError::SubscriptionRequired);
        }

        Err(ApiError::Status {
            status: response.status,
            code,
            data,
        })
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::InvalidResponse)
}

/// Whether the bearer token applies to `path`.
///
/// Public storefront paths go unauthenticated except for the sub-paths
/// that act on the signed-in client.
fn bearer_allowed(path: &str) -> bool {
    if !path.starts_with("/shop/") {
        return true;
    }

    PROTECTED_SHOP_SUBPATHS
        .iter()
        .any(|protected| path.contains(protected))
}
