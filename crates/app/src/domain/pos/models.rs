//! Point-of-sale payloads.

use kiosk::ids::{CustomerId, ProductId, SaleId, TenantId};
use serde::{Deserialize, Serialize};

/// Storefront customer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Remote customer identifier.
    pub customer_id: CustomerId,

    /// Display name or business name.
    #[serde(default)]
    pub name: String,

    /// Tax id, when registered.
    #[serde(default)]
    pub tax_id: Option<String>,

    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,

    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Customer lookup result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerLookup {
    /// Whether a customer matched.
    #[serde(default)]
    pub found: bool,

    /// The matched customer.
    #[serde(default)]
    pub customer: Option<Customer>,
}

/// New customer payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewCustomer {
    /// Tax id, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Display name or business name; required.
    pub name: String,

    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Customer reference on a sale: an existing account or inline details.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SaleCustomer {
    /// Existing customer account.
    Existing {
        /// Remote customer identifier.
        customer_id: CustomerId,
    },

    /// Walk-in customer captured inline.
    Inline(NewCustomer),
}

/// One item on a sale payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleItem {
    /// Product sold.
    pub product_id: ProductId,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price charged.
    pub unit_price: f64,

    /// Per-line discount.
    pub discount: f64,
}

/// Payment section of a sale payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalePayment {
    /// Wire name of the method.
    pub method: String,

    /// Amount tendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// External transaction reference, for QR payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_reference: Option<String>,
}

/// Sale creation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSale {
    /// Customer the sale is billed to.
    pub customer: SaleCustomer,

    /// One entry per ticket line.
    pub items: Vec<SaleItem>,

    /// Ticket-wide discount.
    pub discount_total: f64,

    /// Payment taken.
    pub payment: SalePayment,
}

/// Confirmed sale header.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sale {
    /// Remote sale identifier.
    pub sale_id: SaleId,

    /// Issuing tenant.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,

    /// Billed customer.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,

    /// Issue timestamp, as the server formatted it.
    #[serde(default)]
    pub issued_at: Option<String>,

    /// Confirmed total.
    #[serde(default)]
    pub total: f64,

    /// Confirmed ticket-wide discount.
    #[serde(default)]
    pub discount_total: f64,

    /// Sale state as the server reports it.
    #[serde(default)]
    pub status: String,
}

/// Confirmed sale line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleLine {
    /// Product sold.
    pub product_id: ProductId,

    /// Description at sale time.
    #[serde(default)]
    pub description: String,

    /// Quantity sold.
    #[serde(default)]
    pub quantity: i64,

    /// Unit price charged.
    #[serde(default)]
    pub unit_price: f64,

    /// Per-line discount applied.
    #[serde(default)]
    pub discount: f64,

    /// Confirmed line subtotal.
    #[serde(default)]
    pub subtotal: f64,
}

/// Response to a sale creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleConfirmation {
    /// Sale header.
    pub sale: Sale,

    /// Billed customer, as stored.
    #[serde(default)]
    pub customer: Option<Customer>,

    /// Confirmed lines.
    #[serde(default)]
    pub lines: Vec<SaleLine>,
}
