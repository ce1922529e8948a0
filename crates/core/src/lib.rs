//! Core domain model for a multi-tenant commerce client: the basket/ticket
//! quantity model, session claims, payment arithmetic, and receipts.

pub mod basket;
pub mod claims;
pub mod ids;
pub mod payment;
pub mod products;
pub mod quantity;
pub mod receipt;
