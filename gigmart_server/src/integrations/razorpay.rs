//! The production payment gateway: a thin adapter wrapping the Razorpay client in the engine's
//! [`PaymentGateway`] trait.

use gigmart_engine::traits::{GatewayOrder, PaymentGateway, PaymentGatewayError};
use gm_common::Rupee;
use log::{error, info, warn};
use razorpay_tools::{RazorpayApi, RazorpayConfig};

/// A construction failure (missing or malformed credentials) leaves the adapter in a not-ready
/// state instead of taking the server down: every checkout then fails fast with
/// `PaymentGatewayUnavailable` until the configuration is fixed.
#[derive(Clone)]
pub struct RazorpayGateway {
    api: Option<RazorpayApi>,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Self {
        let key_preview: String = config.key_id.chars().take(8).collect();
        match RazorpayApi::new(config) {
            Ok(api) => {
                info!("💳️ Razorpay gateway ready. key id: {key_preview}…");
                Self { api: Some(api) }
            },
            Err(e) => {
                error!("💳️ Razorpay gateway is not available: {e}");
                Self { api: None }
            },
        }
    }

    /// A startup connectivity check against the live API. Failures are logged, not fatal: a
    /// transient outage at boot must not disable an otherwise valid configuration.
    pub async fn preflight(&self) {
        let Some(api) = &self.api else { return };
        match api.ping().await {
            Ok(()) => info!("💳️ Razorpay connection test successful ✅️"),
            Err(e) => warn!("💳️ Razorpay connection test failed: {e}"),
        }
    }
}

impl PaymentGateway for RazorpayGateway {
    fn is_ready(&self) -> bool {
        self.api.is_some()
    }

    async fn create_remote_order(
        &self,
        amount: Rupee,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentGatewayError> {
        let api = self
            .api
            .as_ref()
            .ok_or_else(|| PaymentGatewayError::NotConfigured("Razorpay credentials missing or malformed".to_string()))?;
        let order = api
            .create_order(amount, currency, receipt)
            .await
            .map_err(|e| PaymentGatewayError::UpstreamError(e.to_string()))?;
        Ok(GatewayOrder { id: order.id, amount: Rupee::from(order.amount), currency: order.currency })
    }

    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        match &self.api {
            Some(api) => api.verify_payment_signature(order_id, payment_id, signature),
            None => false,
        }
    }
}
