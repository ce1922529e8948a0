//! Public market browsing: the cross-tenant storefront directory.

use kiosk::{ids::TenantId, products::Product};
use serde::Deserialize;

use crate::api::{ApiClient, ApiError};

/// Storefront directory row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketTenant {
    /// Tenant whose storefront this is.
    pub tenant_id: TenantId,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Logo image URL, when any.
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// One page of the storefront directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TenantPage {
    /// Storefronts on this page.
    #[serde(default)]
    pub items: Vec<MarketTenant>,

    /// Page number, starting at one.
    #[serde(default = "default_page")]
    pub page: i64,

    /// Page size the server applied.
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    /// Total matching storefronts.
    #[serde(default)]
    pub total: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    12
}

#[derive(Debug, Deserialize)]
struct ProductItems {
    #[serde(default)]
    items: Vec<Product>,
}

/// Public market facade; no session required.
#[derive(Clone)]
pub struct MarketFacade {
    api: ApiClient,
}

impl MarketFacade {
    /// Create a facade over the shared client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Browse the storefront directory.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `tenants_failed`.
    pub async fn list_tenants(
        &self,
        q: Option<&str>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<TenantPage, ApiError> {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if let Some(q) = q.map(str::trim).filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }

        if let Some(page) = page {
            pairs.push(("page", page.to_string()));
        }

        if let Some(page_size) = page_size {
            pairs.push(("page_size", page_size.to_string()));
        }

        self.api
            .get_with_query("/market/tenants", &pairs)
            .await
            .map_err(|error| error.or_code("tenants_failed"))
    }

    /// A random sample of products across storefronts, for the landing
    /// page.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `products_failed`.
    pub async fn random_products(&self, limit: i64) -> Result<Vec<Product>, ApiError> {
        let items: ProductItems = self
            .api
            .get_with_query("/market/products/random", &[("limit", limit.to_string())])
            .await
            .map_err(|error| error.or_code("products_failed"))?;

        Ok(items.items)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        api::transport::{ApiResponse, MockHttpTransport},
        auth::session::SessionStore,
        storage::MemoryStore,
    };

    use super::*;

    fn facade(transport: MockHttpTransport) -> MarketFacade {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStore::new())));

        MarketFacade::new(ApiClient::new(
            "http://api.example.test",
            Arc::new(transport),
            session,
        ))
    }

    #[tokio::test]
    async fn directory_pages_decode_leniently() -> TestResult {
        let mut transport = MockHttpTransport::new();

        transport
            .expect_execute()
            .once()
            .withf(|request| {
                request.url == "http://api.example.test/market/tenants"
                    && request.query == vec![("q".to_string(), "store".to_string())]
            })
            .return_once(|_| {
                Ok(ApiResponse {
                    status: 200,
                    body: json!({ "items": [{ "tenant_id": 4, "name": "North Store" }] })
                        .to_string()
                        .into_bytes(),
                })
            });

        let page = facade(transport).list_tenants(Some("store"), None, None).await?;

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 12);

        Ok(())
    }

    #[tokio::test]
    async fn random_products_unwrap_the_items_envelope() -> TestResult {
        let mut transport = MockHttpTransport::new();

        transport.expect_execute().once().return_once(|_| {
            Ok(ApiResponse {
                status: 200,
                body: json!({ "items": [{ "product_id": 7 }, { "product_id": 9 }] })
                    .to_string()
                    .into_bytes(),
            })
        });

        let products = facade(transport).random_products(12).await?;

        assert_eq!(products.len(), 2);

        Ok(())
    }
}
