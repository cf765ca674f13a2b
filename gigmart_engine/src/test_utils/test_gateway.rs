use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use gm_common::Rupee;

use crate::traits::{GatewayOrder, PaymentGateway, PaymentGatewayError};

#[derive(Debug, Clone)]
pub struct RecordedOrder {
    pub amount: Rupee,
    pub currency: String,
    pub receipt: String,
}

/// A deterministic in-memory gateway for exercising the order flow. It records every
/// create-order call and signs payments with a shared test secret.
#[derive(Clone)]
pub struct TestGateway {
    secret: String,
    ready: bool,
    latency: Duration,
    calls: Arc<Mutex<Vec<RecordedOrder>>>,
}

impl TestGateway {
    pub fn new(secret: &str) -> Self {
        Self { secret: secret.to_string(), ready: true, latency: Duration::ZERO, calls: Arc::default() }
    }

    /// A gateway that reports itself unconfigured, for exercising the fail-fast path.
    pub fn unready() -> Self {
        Self { ready: false, ..Self::new("") }
    }

    /// Adds an artificial delay to each create-order call, so tests can hold one checkout
    /// in-flight while a second one races it.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The signature this gateway would attach to the given payment.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        format!("{order_id}|{payment_id}|signed:{}", self.secret)
    }

    pub fn recorded_orders(&self) -> Vec<RecordedOrder> {
        self.calls.lock().unwrap().clone()
    }
}

impl PaymentGateway for TestGateway {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn create_remote_order(
        &self,
        amount: Rupee,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentGatewayError> {
        if !self.ready {
            return Err(PaymentGatewayError::NotConfigured("test gateway disabled".to_string()));
        }
        if self.latency > Duration::ZERO {
            tokio::time::sleep(self.latency).await;
        }
        let id = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedOrder { amount, currency: currency.to_string(), receipt: receipt.to_string() });
            format!("order_test_{:04}", calls.len())
        };
        Ok(GatewayOrder { id, amount, currency: currency.to_string() })
    }

    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        // Plain equality is fine for a test double
        signature == self.sign(order_id, payment_id)
    }
}
