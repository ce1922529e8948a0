//! POS facade errors.

use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by the POS facade.
#[derive(Debug, Error)]
pub enum PosError {
    /// No active tenant scope.
    #[error("an active tenant is required")]
    TenantRequired,

    /// The ticket has no lines.
    #[error("the ticket is empty")]
    TicketEmpty,

    /// Neither an existing customer nor inline details were provided.
    #[error("a customer is required")]
    CustomerRequired,

    /// A customer tax id is required for the lookup.
    #[error("a tax id is required")]
    TaxIdRequired,

    /// A customer name is required.
    #[error("a customer name is required")]
    NameRequired,

    /// A cash payment does not cover the amount due.
    #[error("the tendered amount does not cover the total")]
    InsufficientPayment,

    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PosError {
    /// Short machine-readable code for banners and branching.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::TenantRequired => "tenant_required",
            Self::TicketEmpty => "ticket_empty",
            Self::CustomerRequired => "customer_required",
            Self::TaxIdRequired => "tax_id_required",
            Self::NameRequired => "name_required",
            Self::InsufficientPayment => "insufficient_payment",
            Self::Api(error) => error.code(),
        }
    }
}
