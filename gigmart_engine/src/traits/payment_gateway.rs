use gm_common::Rupee;
use thiserror::Error;

/// The slice of a remote payment-gateway order the reconciliation flow consumes.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    /// Gateway-assigned order id. Stored on the local order as its payment intent.
    pub id: String,
    /// Amount in minor currency units, echoed back by the gateway.
    pub amount: Rupee,
    pub currency: String,
}

/// An external payment processor.
///
/// The engine never talks HTTP itself; the server supplies a concrete adapter (Razorpay in
/// production, a deterministic gateway in tests).
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    /// Whether the gateway is configured and usable. The order flow checks this up front so a
    /// misconfiguration surfaces as [`crate::OrderFlowError::PaymentGatewayUnavailable`]
    /// instead of an error deep inside order creation.
    fn is_ready(&self) -> bool;

    /// Creates a remote order for the given amount in minor currency units.
    async fn create_remote_order(
        &self,
        amount: Rupee,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentGatewayError>;

    /// Verifies the signature the gateway attached to a completed payment. Implementations must
    /// compare in constant time and must not log the shared secret.
    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("The payment gateway is not configured. {0}")]
    NotConfigured(String),
    #[error("The payment gateway call failed. {0}")]
    UpstreamError(String),
}
