//! Catalog payloads.

use kiosk::{
    ids::{CategoryId, TenantId},
    products::Product,
};
use serde::Deserialize;

/// Product category row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    /// Remote category identifier.
    pub category_id: CategoryId,

    /// Owning tenant.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,

    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// One page of catalog products, decoded leniently.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductPage {
    /// Products on this page.
    #[serde(default)]
    pub items: Vec<Product>,

    /// Page number, starting at one.
    #[serde(default = "default_page")]
    pub page: i64,

    /// Page size the server applied.
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    /// Total matching products.
    #[serde(default)]
    pub total: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl ProductPage {
    /// Last page implied by the total; at least one.
    #[must_use]
    pub fn max_page(&self) -> i64 {
        if self.page_size <= 0 {
            return 1;
        }

        // Equivalent to `self.total.div_ceil(self.page_size)` (unstable for
        // signed ints); page_size is guaranteed > 0 above.
        let d = self.total / self.page_size;
        let r = self.total % self.page_size;
        let ceil = if r > 0 { d + 1 } else { d };
        ceil.max(1)
    }
}

/// Catalog search parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    /// Free-text search; blank text is not sent.
    pub q: Option<String>,

    /// Restrict to one category.
    pub category_id: Option<CategoryId>,

    /// Page to fetch.
    pub page: Option<i64>,

    /// Page size to request.
    pub page_size: Option<i64>,
}

impl CatalogQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }

        if let Some(category_id) = self.category_id {
            pairs.push(("category_id", category_id.to_string()));
        }

        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }

        if let Some(page_size) = self.page_size {
            pairs.push(("page_size", page_size.to_string()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn pages_decode_leniently() -> TestResult {
        let page: ProductPage = serde_json::from_str("{}")?;

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());

        Ok(())
    }

    #[test]
    fn max_page_rounds_up_and_floors_at_one() -> TestResult {
        let mut page: ProductPage = serde_json::from_str("{}")?;

        page.total = 41;
        assert_eq!(page.max_page(), 3);

        page.total = 0;
        assert_eq!(page.max_page(), 1);

        Ok(())
    }

    #[test]
    fn blank_search_text_is_not_sent() {
        let query = CatalogQuery {
            q: Some("   ".to_string()),
            page: Some(2),
            ..CatalogQuery::default()
        };

        assert_eq!(query.to_pairs(), vec![("page", "2".to_string())]);
    }
}
