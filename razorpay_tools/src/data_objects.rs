use gm_common::Rupee;
use serde::{Deserialize, Serialize};

/// The request body for `POST /v1/orders`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRemoteOrderRequest {
    /// Amount in the minor currency unit (paisa for INR).
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

impl NewRemoteOrderRequest {
    pub fn new(amount: Rupee, currency: &str, receipt: &str) -> Self {
        Self { amount: amount.value(), currency: currency.to_string(), receipt: receipt.to_string() }
    }
}

/// The slice of Razorpay's order entity the marketplace consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteOrder {
    /// The gateway-assigned order id, e.g. "order_9A33XWu170gUtm".
    pub id: String,
    /// Amount in minor currency units, echoed back by the gateway.
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
