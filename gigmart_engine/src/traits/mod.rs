//! Behaviour definitions for backends supporting the GigMart engine.
//!
//! Each trait covers one concern; [`MarketplaceDatabase`] ties together the two the order flow
//! needs. [`PaymentGateway`] abstracts the external payment processor so the reconciliation
//! flow can run against a deterministic gateway in tests.

mod auth_management;
mod chat_management;
mod gig_management;
mod marketplace_database;
mod order_management;
mod payment_gateway;

pub use auth_management::AuthManagement;
pub use chat_management::ChatManagement;
pub use gig_management::GigManagement;
pub use marketplace_database::MarketplaceDatabase;
pub use order_management::OrderManagement;
pub use payment_gateway::{GatewayOrder, PaymentGateway, PaymentGatewayError};
