//! Receipt construction for confirmed sales.

use jiff::Zoned;
use serde_json::json;

use crate::{
    ids::{ProductId, SaleId, TenantId},
    payment::{Payment, money},
    quantity::units,
};

/// One line of a printed receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Quantity sold.
    pub quantity: i64,

    /// Line description.
    pub concept: String,

    /// Unit price charged.
    pub unit_price: f64,

    /// Line amount (quantity times unit price).
    pub amount: f64,
}

impl ReceiptLine {
    /// Build a line, deriving the amount and falling back to the product id
    /// when the description is blank.
    #[must_use]
    pub fn new(product_id: ProductId, description: &str, quantity: i64, unit_price: f64) -> Self {
        let concept = description.trim();
        let concept = if concept.is_empty() {
            format!("ID {product_id}")
        } else {
            concept.to_string()
        };

        Self {
            quantity,
            concept,
            unit_price,
            amount: unit_price * units(quantity),
        }
    }
}

/// Printable receipt data for a confirmed sale.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Issuing tenant.
    pub tenant_id: TenantId,

    /// Confirmed sale identifier.
    pub sale_id: SaleId,

    /// Issue timestamp, formatted `dd/mm/yyyy HH:MM:SS`.
    pub issued_at: String,

    /// Customer display name; `"N/A"` when unknown.
    pub customer_name: String,

    /// Customer tax id; `"0"` when unknown.
    pub customer_tax_id: String,

    /// Receipt lines.
    pub lines: Vec<ReceiptLine>,

    /// Amount due after the discount.
    pub total: f64,

    /// Amount handed over by the customer.
    pub amount_paid: f64,

    /// Change returned; zero for non-cash payments.
    pub change_returned: f64,
}

impl Receipt {
    /// Assemble a receipt from confirmed sale lines and the payment taken.
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        sale_id: SaleId,
        issued_at: &Zoned,
        customer_name: &str,
        customer_tax_id: &str,
        lines: Vec<ReceiptLine>,
        payment: &Payment,
    ) -> Self {
        let subtotal: f64 = lines.iter().map(|line| line.amount).sum();

        let customer_name = match customer_name.trim() {
            "" => "N/A".to_string(),
            name => name.to_string(),
        };

        let customer_tax_id = match customer_tax_id.trim() {
            "" => "0".to_string(),
            tax_id => tax_id.to_string(),
        };

        Self {
            tenant_id,
            sale_id,
            issued_at: format_datetime(issued_at),
            customer_name,
            customer_tax_id,
            total: payment.total_due(subtotal),
            amount_paid: money(payment.amount_tendered),
            change_returned: payment.change_due(subtotal),
            lines,
        }
    }

    /// Spelled-out total line for the receipt footer.
    #[must_use]
    pub fn total_line(&self) -> String {
        format!("Total: {:.2}", self.total)
    }

    /// JSON payload encoded into the receipt QR code.
    #[must_use]
    pub fn qr_payload(&self) -> String {
        json!({
            "tenant_id": self.tenant_id.get(),
            "sale_id": self.sale_id.get(),
            "issued_at": self.issued_at,
            "customer_tax_id": self.customer_tax_id,
            "customer_name": self.customer_name,
            "total": format!("{:.2}", self.total),
        })
        .to_string()
    }
}

fn format_datetime(at: &Zoned) -> String {
    at.strftime("%d/%m/%Y %H:%M:%S").to_string()
}
