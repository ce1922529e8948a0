//! Notification reads and acknowledgements.
//!
//! The same operations exist on three surfaces: tenant staff, platform
//! administrators, and storefront clients. Callers poll; there is no push
//! channel.

use kiosk::ids::{NotificationId, TenantId};
use serde::Deserialize;

use crate::api::{ApiClient, ApiError};

/// One notification row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Notification {
    /// Remote notification identifier.
    pub notification_id: NotificationId,

    /// Tenant the notification belongs to.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,

    /// Delivery channel name.
    #[serde(default)]
    pub channel: String,

    /// Short title.
    #[serde(default)]
    pub title: String,

    /// Body text.
    #[serde(default)]
    pub body: String,

    /// Creation timestamp, as the server formatted it.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Read acknowledgement timestamp, when read.
    #[serde(default)]
    pub read_at: Option<String>,
}

/// Which notification surface to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationScope {
    /// Signed-in tenant staff.
    Tenant,

    /// Platform administrators.
    Platform,

    /// Signed-in storefront client of the given tenant.
    Client(TenantId),
}

impl NotificationScope {
    fn base_path(self) -> String {
        match self {
            Self::Tenant => "/api/notifications".to_string(),
            Self::Platform => "/platform/api/notifications".to_string(),
            Self::Client(tenant_id) => format!("/shop/{tenant_id}/notifications"),
        }
    }
}

/// Paged list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationListQuery {
    /// Maximum rows to return.
    pub limit: i64,

    /// Rows to skip.
    pub offset: i64,

    /// Restrict to unread rows.
    pub unread_only: bool,
}

impl Default for NotificationListQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            unread_only: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct UnreadCount {
    unread: i64,
}

/// Notification facade over the three actor surfaces.
#[derive(Clone)]
pub struct NotificationsFacade {
    api: ApiClient,
}

impl NotificationsFacade {
    /// Create a facade over the shared client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Unread count for a surface.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `notifications_failed`.
    pub async fn unread_count(&self, scope: NotificationScope) -> Result<i64, ApiError> {
        let envelope: DataEnvelope<UnreadCount> = self
            .api
            .get(&format!("{}/unread-count", scope.base_path()))
            .await
            .map_err(|error| error.or_code("notifications_failed"))?;

        Ok(envelope.data.unread)
    }

    /// List notifications, newest first.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `notifications_failed`.
    pub async fn list(
        &self,
        scope: NotificationScope,
        query: NotificationListQuery,
    ) -> Result<Vec<Notification>, ApiError> {
        let pairs = [
            ("limit", query.limit.to_string()),
            ("offset", query.offset.to_string()),
            (
                "unread_only",
                if query.unread_only { "1" } else { "0" }.to_string(),
            ),
        ];

        let envelope: DataEnvelope<Vec<Notification>> = self
            .api
            .get_with_query(&scope.base_path(), &pairs)
            .await
            .map_err(|error| error.or_code("notifications_failed"))?;

        Ok(envelope.data)
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `notifications_failed`.
    pub async fn mark_read(
        &self,
        scope: NotificationScope,
        notification_id: NotificationId,
    ) -> Result<Notification, ApiError> {
        let envelope: DataEnvelope<Notification> = self
            .api
            .post(
                &format!("{}/{notification_id}/read", scope.base_path()),
                &serde_json::json!({}),
            )
            .await
            .map_err(|error| error.or_code("notifications_failed"))?;

        Ok(envelope.data)
    }
}
