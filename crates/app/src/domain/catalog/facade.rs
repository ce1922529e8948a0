//! Catalog facade.

use kiosk::ids::TenantId;

use crate::{
    api::{ApiClient, ApiError},
    domain::catalog::models::{CatalogQuery, Category, ProductPage},
};

/// Tenant-scoped catalog reads for the storefront and the point of sale.
#[derive(Clone)]
pub struct CatalogFacade {
    api: ApiClient,
}

impl CatalogFacade {
    /// Create a facade over the shared client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List a tenant's product categories.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `categories_failed`.
    pub async fn list_categories(&self, tenant_id: TenantId) -> Result<Vec<Category>, ApiError> {
        self.api
            .get(&format!("/shop/{tenant_id}/categories"))
            .await
            .map_err(|error| error.or_code("categories_failed"))
    }

    /// Search a tenant's products, paginated.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `products_failed`.
    pub async fn list_products(
        &self,
        tenant_id: TenantId,
        query: &CatalogQuery,
    ) -> Result<ProductPage, ApiError> {
        self.api
            .get_with_query(&format!("/shop/{tenant_id}/products"), &query.to_pairs())
            .await
            .map_err(|error| error.or_code("products_failed"))
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

    fn facade(transport: MockHttpTransport) -> CatalogFacade {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStore::new())));

        CatalogFacade::new(ApiClient::new(
            "http://api.example.test",
            Arc::new(transport),
            session,
        ))
    }

    #[tokio::test]
    async fn product_search_sends_only_set_parameters() -> TestResult {
        let mut transport = MockHttpTransport::new();

        transport
            .expect_execute()
            .once()
            .withf(|request| {
                request.url == "http://api.example.test/shop/4/products"
                    && request.query
                        == vec![
                            ("q".to_string(), "chair".to_string()),
                            ("page".to_string(), "2".to_string()),
                        ]
            })
            .return_once(|_| {
                Ok(ApiResponse {
                    status: 200,
                    body: json!({
                        "items": [{ "product_id": 7, "unit_price": 10.0, "stock_on_hand": 3 }],
                        "page": 2,
                        "page_size": 20,
                        "total": 21,
                    })
                    .to_string()
                    .into_bytes(),
                })
            });

        let page = facade(transport)
            .list_products(
                TenantId::new(4),
                &CatalogQuery {
                    q: Some("chair".to_string()),
                    page: Some(2),
                    ..CatalogQuery::default()
                },
            )
            .await?;

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.max_page(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn category_failures_fall_back_to_a_local_code() {
        let mut transport = MockHttpTransport::new();

        transport.expect_execute().once().return_once(|_| {
            Ok(ApiResponse {
                status: 503,
                body: Vec::new(),
            })
        });

        let result = facade(transport).list_categories(TenantId::new(4)).await;

        assert_eq!(
            result.map_err(|error| error.code().to_string()),
            Err("categories_failed".to_string())
        );
    }
}
