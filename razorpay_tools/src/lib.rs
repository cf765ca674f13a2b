//! A minimal Razorpay Orders API client.
//!
//! Covers the slice of the Razorpay surface the marketplace needs: creating a remote order
//! ahead of a client-side checkout, and computing/verifying the payment signature Razorpay
//! sends back after the buyer completes payment.

mod api;
mod config;
mod data_objects;
mod error;
mod signature;

pub use api::RazorpayApi;
pub use config::RazorpayConfig;
pub use data_objects::{NewRemoteOrderRequest, RemoteOrder};
pub use error::RazorpayApiError;
pub use signature::{payment_signature, verify_payment_signature};
