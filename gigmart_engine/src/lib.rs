//! GigMart Engine
//!
//! The engine holds the core logic for the GigMart freelance marketplace: gig catalog
//! management, the order/payment reconciliation flow, buyer–seller messaging and account
//! management. It is HTTP-framework agnostic.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@db`]). Currently SQLite is the supported backend.
//!    You should never need to access the database directly; use the public APIs instead. The
//!    exception is the data types used in the database, defined in the `db_types` module.
//! 2. The engine public API ([`mod@gme_api`]). This provides the public-facing functionality:
//!    [`OrderFlowApi`] for checkout and payment reconciliation (the heart of the system),
//!    [`GigApi`] for the catalog, [`ChatApi`] for conversations, and [`AuthApi`] for accounts.
//!    Backends implement the traits in [`mod@traits`] to drive these APIs.
//!
//! Payment gateways are also kept behind a trait ([`traits::PaymentGateway`]) so the
//! reconciliation flow can be exercised against a deterministic gateway in tests, with the real
//! Razorpay adapter supplied by the server crate.
mod db;

pub mod db_types;
pub mod helpers;
pub mod locks;
pub mod test_utils;
pub mod traits;

mod gme_api;

#[cfg(feature = "sqlite")]
pub use db::sqlite::SqliteDatabase;
pub use gme_api::{
    auth_api::{AuthApi, RegisterUser},
    chat_api::ChatApi,
    errors::{AuthApiError, ChatApiError, GigApiError, OrderFlowError},
    gig_api::GigApi,
    order_flow_api::OrderFlowApi,
    order_objects,
};
