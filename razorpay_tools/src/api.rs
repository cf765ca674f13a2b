use std::sync::Arc;

use gm_common::Rupee;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::RazorpayConfig,
    data_objects::{NewRemoteOrderRequest, RemoteOrder},
    signature,
    RazorpayApiError,
};

#[derive(Clone)]
pub struct RazorpayApi {
    config: RazorpayConfig,
    client: Arc<Client>,
}

impl RazorpayApi {
    /// Builds a client from the given configuration. Fails if the credentials are missing or the
    /// key id does not match Razorpay's format convention, so callers learn about a
    /// misconfiguration here rather than on the first checkout.
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        config.validate()?;
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RazorpayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, RazorpayApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self
            .client
            .request(method, url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.reveal()));
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| RazorpayApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| RazorpayApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| RazorpayApiError::RestResponseError(e.to_string()))?;
            Err(RazorpayApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/v1{path}", self.config.api_url)
    }

    /// Creates a remote order against which the buyer completes payment client-side.
    pub async fn create_order(
        &self,
        amount: Rupee,
        currency: &str,
        receipt: &str,
    ) -> Result<RemoteOrder, RazorpayApiError> {
        let body = NewRemoteOrderRequest::new(amount, currency, receipt);
        debug!("Creating remote order for {amount} ({currency}), receipt {receipt}");
        let order = self.rest_query::<RemoteOrder, _>(Method::POST, "/orders", Some(body)).await?;
        info!("Created remote order {}", order.id);
        Ok(order)
    }

    /// Lists remote orders. Used as a cheap connectivity check at startup.
    pub async fn ping(&self) -> Result<(), RazorpayApiError> {
        let _: serde_json::Value = self.rest_query::<serde_json::Value, ()>(Method::GET, "/orders?count=1", None).await?;
        Ok(())
    }

    /// Recomputes the expected payment signature for the given ids.
    pub fn payment_signature(&self, order_id: &str, payment_id: &str) -> String {
        signature::payment_signature(self.config.key_secret.reveal(), order_id, payment_id)
    }

    /// Constant-time verification of a supplied payment signature.
    pub fn verify_payment_signature(&self, order_id: &str, payment_id: &str, supplied: &str) -> bool {
        signature::verify_payment_signature(self.config.key_secret.reveal(), order_id, payment_id, supplied)
    }
}
