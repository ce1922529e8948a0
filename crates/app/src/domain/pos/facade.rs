//! Point-of-sale facade.

use std::sync::{Arc, RwLock};

use jiff::Zoned;
use kiosk::{
    basket::Line,
    ids::{ProductId, SaleId, TenantId},
    payment::{Payment, PaymentMethod, money},
    products::Product,
    receipt::{Receipt, ReceiptLine},
};

use crate::{
    api::ApiClient,
    domain::{
        carts::BasketStore,
        catalog::{
            CatalogFacade,
            models::{CatalogQuery, Category, ProductPage},
        },
        pos::{
            errors::PosError,
            models::{
                Customer, CustomerLookup, NewCustomer, NewSale, SaleConfirmation, SaleCustomer,
                SaleItem, SalePayment,
            },
        },
    },
};

/// Outcome of a successful sale: the server confirmation plus the payment
/// snapshot taken before the ticket was reset.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSale {
    /// Server confirmation.
    pub confirmation: SaleConfirmation,

    /// Payment as taken.
    pub payment: Payment,
}

#[derive(Debug, Default, Clone)]
struct PosState {
    customer: Option<Customer>,
    payment: Payment,
}

/// Point-of-sale workflow: ticket, customer, payment, sale.
pub struct PosFacade {
    api: ApiClient,
    catalog: CatalogFacade,
    ticket: Arc<BasketStore>,
    state: RwLock<PosState>,
}

impl PosFacade {
    /// Create a facade over the shared client and ticket store.
    pub fn new(api: ApiClient, catalog: CatalogFacade, ticket: Arc<BasketStore>) -> Self {
        Self {
            api,
            catalog,
            ticket,
            state: RwLock::new(PosState::default()),
        }
    }

    /// Switch the active tenant, rescoping the ticket and resetting the
    /// customer and payment state.
    pub fn set_tenant(&self, tenant_id: Option<TenantId>) {
        self.ticket.set_tenant(tenant_id);

        if let Ok(mut state) = self.state.write() {
            *state = PosState::default();
        }
    }

    fn tenant_id(&self) -> Result<TenantId, PosError> {
        self.ticket.tenant_id().ok_or(PosError::TenantRequired)
    }

    /// Add one unit of a catalog product to the ticket.
    pub fn add_to_ticket(&self, product: &Product) {
        self.ticket.add(product, 1);
    }

    /// Increase a ticket line by one.
    pub fn increment(&self, product_id: ProductId) {
        self.ticket.increment(product_id);
    }

    /// Decrease a ticket line by one, stopping at one.
    pub fn decrement(&self, product_id: ProductId) {
        self.ticket.decrement(product_id);
    }

    /// Set an absolute quantity for a ticket line.
    pub fn set_quantity(&self, product_id: ProductId, quantity: i64) {
        self.ticket.set_quantity(product_id, quantity);
    }

    /// Remove a ticket line.
    pub fn remove(&self, product_id: ProductId) {
        self.ticket.remove(product_id);
    }

    /// Empty the ticket.
    pub fn clear_ticket(&self) {
        self.ticket.clear();
    }

    /// Ticket lines in display order.
    pub fn ticket_lines(&self) -> Vec<Line> {
        self.ticket.lines()
    }

    /// Total quantity on the ticket.
    pub fn ticket_count(&self) -> i64 {
        self.ticket.count()
    }

    /// Ticket subtotal before the discount.
    pub fn subtotal(&self) -> f64 {
        self.ticket.subtotal()
    }

    /// Amount due after the discount.
    pub fn total(&self) -> f64 {
        self.payment().total_due(self.subtotal())
    }

    /// Change owed for a cash payment.
    pub fn change(&self) -> f64 {
        self.payment().change_due(self.subtotal())
    }

    /// Current payment state.
    pub fn payment(&self) -> Payment {
        self.state
            .read()
            .map(|state| state.payment.clone())
            .unwrap_or_default()
    }

    /// Currently selected customer.
    pub fn customer(&self) -> Option<Customer> {
        self.state.read().ok().and_then(|state| state.customer.clone())
    }

    /// Switch payment method, resetting fields that no longer apply.
    pub fn set_payment_method(&self, method: PaymentMethod) {
        if let Ok(mut state) = self.state.write() {
            state.payment.set_method(method);
        }
    }

    /// Set the amount the customer handed over.
    pub fn set_amount_tendered(&self, amount: f64) {
        if let Ok(mut state) = self.state.write() {
            state.payment.amount_tendered = money(amount);
        }
    }

    /// Set the ticket-wide discount.
    pub fn set_discount_total(&self, amount: f64) {
        if let Ok(mut state) = self.state.write() {
            state.payment.discount_total = money(amount);
        }
    }

    /// Set the QR transaction reference; blank clears it.
    pub fn set_qr_reference(&self, reference: &str) {
        if let Ok(mut state) = self.state.write() {
            let reference = reference.trim();

            state.payment.qr_reference = if reference.is_empty() {
                None
            } else {
                Some(reference.to_string())
            };
        }
    }

    /// Select the customer the sale is billed to.
    pub fn select_customer(&self, customer: Customer) {
        if let Ok(mut state) = self.state.write() {
            state.customer = Some(customer);
        }
    }

    /// Drop the customer selection.
    pub fn clear_customer(&self) {
        if let Ok(mut state) = self.state.write() {
            state.customer = None;
        }
    }

    /// Load one catalog page and re-clamp the ticket against its stock.
    ///
    /// # Errors
    ///
    /// Requires an active tenant; remote failures surface their code or
    /// `products_failed`.
    pub async fn load_products(&self, query: &CatalogQuery) -> Result<ProductPage, PosError> {
        let tenant_id = self.tenant_id()?;
        let page = self.catalog.list_products(tenant_id, query).await?;

        self.ticket.reconcile_stock(&page.items);

        Ok(page)
    }

    /// List the active tenant's categories.
    ///
    /// # Errors
    ///
    /// Requires an active tenant; remote failures surface their code or
    /// `categories_failed`.
    pub async fn load_categories(&self) -> Result<Vec<Category>, PosError> {
        let tenant_id = self.tenant_id()?;

        Ok(self.catalog.list_categories(tenant_id).await?)
    }

    /// Look up a customer by tax id; a match becomes the selection.
    ///
    /// # Errors
    ///
    /// Requires an active tenant and a non-blank tax id; remote failures
    /// surface their code or `lookup_failed`.
    pub async fn lookup_customer(&self, tax_id: &str) -> Result<CustomerLookup, PosError> {
        let tenant_id = self.tenant_id()?;
        let tax_id = tax_id.trim();

        if tax_id.is_empty() {
            return Err(PosError::TaxIdRequired);
        }

        let lookup: CustomerLookup = self
            .api
            .get_with_query(
                &format!("/tenant/pos/{tenant_id}/clients/lookup"),
                &[("tax_id", tax_id.to_string())],
            )
            .await
            .map_err(|error| PosError::Api(error.or_code("lookup_failed")))?;

        if let Some(customer) = lookup.customer.clone().filter(|_| lookup.found) {
            self.select_customer(customer);
        }

        Ok(lookup)
    }

    /// Create a customer; the created account becomes the selection.
    ///
    /// # Errors
    ///
    /// Requires an active tenant and a non-blank name; remote failures
    /// surface their code or `create_client_failed`.
    pub async fn create_customer(&self, new_customer: &NewCustomer) -> Result<Customer, PosError> {
        let tenant_id = self.tenant_id()?;

        if new_customer.name.trim().is_empty() {
            return Err(PosError::NameRequired);
        }

        let customer: Customer = self
            .api
            .post(&format!("/tenant/pos/{tenant_id}/clients"), new_customer)
            .await
            .map_err(|error| PosError::Api(error.or_code("create_client_failed")))?;

        self.select_customer(customer.clone());

        Ok(customer)
    }

    /// Validate and create the sale, clearing the ticket on success.
    ///
    /// The selected customer wins over `walk_in` details. On success the
    /// ticket empties and the tendered amount and QR reference reset; the
    /// discount is kept for the next ticket.
    ///
    /// # Errors
    ///
    /// `tenant_required`, `ticket_empty`, `customer_required`, and
    /// `insufficient_payment` are validated locally; remote failures
    /// surface their code or `sale_failed`.
    pub async fn create_sale(
        &self,
        walk_in: Option<NewCustomer>,
    ) -> Result<CompletedSale, PosError> {
        let tenant_id = self.tenant_id()?;

        let lines = self.ticket.lines();

        if lines.is_empty() {
            return Err(PosError::TicketEmpty);
        }

        let customer = match (self.customer(), walk_in) {
            (Some(existing), _) => SaleCustomer::Existing {
                customer_id: existing.customer_id,
            },
            (None, Some(inline)) if !inline.name.trim().is_empty() => SaleCustomer::Inline(inline),
            _ => return Err(PosError::CustomerRequired),
        };

        let payment = self.payment();

        if !payment.covers(self.ticket.subtotal()) {
            return Err(PosError::InsufficientPayment);
        }

        let sale = NewSale {
            customer,
            items: lines
                .iter()
                .map(|line| SaleItem {
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    discount: 0.0,
                })
                .collect(),
            discount_total: money(payment.discount_total),
            payment: SalePayment {
                method: payment.method.as_str().to_string(),
                amount: Some(money(payment.amount_tendered)),
                qr_reference: payment
                    .qr_reference
                    .clone()
                    .filter(|_| payment.method == PaymentMethod::Qr),
            },
        };

        let confirmation: SaleConfirmation = self
            .api
            .post(&format!("/tenant/pos/{tenant_id}/sales"), &sale)
            .await
            .map_err(|error| PosError::Api(error.or_code("sale_failed")))?;

        self.ticket.clear();

        if let Ok(mut state) = self.state.write() {
            state.payment.amount_tendered = 0.0;
            state.payment.qr_reference = None;
        }

        Ok(CompletedSale {
            confirmation,
            payment,
        })
    }

    /// Build the printable receipt for a completed sale.
    pub fn receipt_for(&self, completed: &CompletedSale, issued_at: &Zoned) -> Receipt {
        let confirmation = &completed.confirmation;

        let lines = confirmation
            .lines
            .iter()
            .map(|line| {
                ReceiptLine::new(
                    line.product_id,
                    &line.description,
                    line.quantity,
                    line.unit_price,
                )
            })
            .collect();

        let (name, tax_id) = confirmation.customer.as_ref().map_or_else(
            || (String::new(), String::new()),
            |customer| {
                (
                    customer.name.clone(),
                    customer.tax_id.clone().unwrap_or_default(),
                )
            },
        );

        let tenant_id = confirmation
            .sale
            .tenant_id
            .or_else(|| self.ticket.tenant_id())
            .unwrap_or_else(|| TenantId::new(0));

        Receipt::new(
            tenant_id,
            confirmation.sale.sale_id,
            issued_at,
            &name,
            &tax_id,
            lines,
            &completed.payment,
        )
    }

    /// Download the printable PDF for a confirmed sale.
    ///
    /// # Errors
    ///
    /// Surfaces the server code, or `receipt_failed`.
    pub async fn download_receipt_pdf(&self, sale_id: SaleId) -> Result<Vec<u8>, PosError> {
        self.api
            .get_blob(&format!("/tenant/pos/sales/{sale_id}/receipt.pdf"))
            .await
            .map_err(|error| PosError::Api(error.or_code("receipt_failed")))
    }
}
