//! Platform tenant administration.

use kiosk::ids::TenantId;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError};

/// Tenant account row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tenant {
    /// Remote tenant identifier.
    pub tenant_id: TenantId,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Registered tax id, when any.
    #[serde(default)]
    pub tax_id: Option<String>,

    /// Account status as the server reports it.
    #[serde(default)]
    pub status: String,

    /// Creation timestamp, as the server formatted it.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Initial administrator credentials for a new tenant.
#[derive(Debug, Clone, Serialize)]
pub struct AdminCredentials {
    /// Administrator email.
    pub email: String,

    /// Initial password.
    pub password: String,
}

/// New tenant payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewTenant {
    /// Display name.
    pub name: String,

    /// Registered tax id, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// First administrator account.
    pub admin: AdminCredentials,
}

/// Platform-admin tenant management.
#[derive(Clone)]
pub struct TenantsFacade {
    api: ApiClient,
}

impl TenantsFacade {
    /// Create a facade over the shared client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List every tenant account.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `tenants_failed`.
    pub async fn list(&self) -> Result<Vec<Tenant>, ApiError> {
        self.api
            .get("/platform/tenants")
            .await
            .map_err(|error| error.or_code("tenants_failed"))
    }

    /// Create a tenant with its first administrator.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `create_failed`.
    pub async fn create(&self, tenant: &NewTenant) -> Result<Tenant, ApiError> {
        self.api
            .post("/platform/tenants", tenant)
            .await
            .map_err(|error| error.or_code("create_failed"))
    }

    /// Remove a tenant account.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `delete_failed`.
    pub async fn remove(&self, tenant_id: TenantId) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .api
            .delete(&format!("/platform/tenants/{tenant_id}"))
            .await
            .map_err(|error| error.or_code("delete_failed"))?;

        Ok(())
    }
}
