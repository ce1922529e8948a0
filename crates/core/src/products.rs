//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ProductId};

/// Catalog product row as reported by the remote catalog.
///
/// Fields beyond the identity are decoded leniently; a missing price reads
/// as zero and missing stock reads as "not reported".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Remote product identifier.
    pub product_id: ProductId,

    /// Owning category, when assigned.
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Tenant-scoped product code.
    #[serde(default)]
    pub code: Option<String>,

    /// Display description.
    #[serde(default)]
    pub description: String,

    /// Unit price.
    #[serde(default)]
    pub unit_price: f64,

    /// Last reported stock on hand; `None` when the catalog did not report it.
    #[serde(default)]
    pub stock_on_hand: Option<i64>,

    /// Primary image URL, when any.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_a_sparse_catalog_row() -> TestResult {
        let product: Product = serde_json::from_str(r#"{"product_id": 7}"#)?;

        assert_eq!(product.product_id.get(), 7);
        assert_eq!(product.description, "");
        assert_eq!(product.unit_price, 0.0);
        assert_eq!(product.stock_on_hand, None);

        Ok(())
    }

    #[test]
    fn decodes_a_full_catalog_row() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{
                "product_id": 7,
                "category_id": 2,
                "code": "SKU-7",
                "description": "Folding chair",
                "unit_price": 129.5,
                "stock_on_hand": 12,
                "image_url": "/img/7.png"
            }"#,
        )?;

        assert_eq!(product.category_id.map(super::CategoryId::get), Some(2));
        assert_eq!(product.unit_price, 129.5);
        assert_eq!(product.stock_on_hand, Some(12));

        Ok(())
    }
}
