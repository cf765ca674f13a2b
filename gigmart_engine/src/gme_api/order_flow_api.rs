use std::{fmt::Debug, time::Duration};

use log::*;

use crate::{
    db_types::{NewOrder, Order, PaymentIntentId, INR_CURRENCY_CODE},
    gme_api::{
        errors::OrderFlowError,
        order_objects::{CheckoutIntent, PaymentConfirmation},
    },
    helpers::{receipt_label, truncated},
    locks::ProcessingLocks,
    traits::{GigManagement, OrderManagement, PaymentGateway},
};

/// How long we wait for the gateway to create a remote order before giving up and reporting the
/// payment system unavailable.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

/// `OrderFlowApi` is the primary API for the checkout and payment-reconciliation flow: creating
/// a gateway order for a gig, de-duplicating concurrent checkouts, and confirming signed
/// payment results.
pub struct OrderFlowApi<B, G> {
    db: B,
    gateway: G,
    locks: ProcessingLocks,
    gateway_timeout: Duration,
}

impl<B, G> Debug for OrderFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, G> OrderFlowApi<B, G> {
    /// The lock table must be shared between every `OrderFlowApi` instance in the process
    /// (actix constructs one per worker), so it is injected rather than created here.
    pub fn new(db: B, gateway: G, locks: ProcessingLocks) -> Self {
        Self { db, gateway, locks, gateway_timeout: DEFAULT_GATEWAY_TIMEOUT }
    }

    pub fn with_gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = timeout;
        self
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B, G> OrderFlowApi<B, G>
where
    B: GigManagement + OrderManagement,
    G: PaymentGateway,
{
    /// Starts a checkout for the given buyer and gig, creating a gateway order and persisting a
    /// pending order that snapshots the gig's title, price and cover.
    ///
    /// The guarded sequence, in order:
    /// 1. If an incomplete order already exists for the pair, its intent is returned as-is —
    ///    a retried request (say, a page refresh mid-checkout) costs no second gateway call.
    /// 2. If a checkout for the pair is already in flight in this process, the call fails with
    ///    [`OrderFlowError::CheckoutInProgress`] rather than racing a second gateway call.
    /// 3. The gig must exist, must carry a positive price, and must not belong to the buyer.
    /// 4. The gateway call runs under a bounded timeout; misconfiguration, upstream failure and
    ///    timeout all surface as [`OrderFlowError::PaymentGatewayUnavailable`].
    ///
    /// The in-flight lock is released on every exit path.
    pub async fn create_checkout(&self, buyer_id: i64, gig_id: i64) -> Result<CheckoutIntent, OrderFlowError> {
        if let Some(existing) = self.db.fetch_pending_order(buyer_id, gig_id).await? {
            debug!(
                "🔄️📦️ Buyer #{buyer_id} retried checkout for gig #{gig_id}; returning existing intent {}",
                existing.payment_intent
            );
            return Ok(CheckoutIntent {
                order_id: existing.payment_intent.0,
                amount: existing.price,
                currency: INR_CURRENCY_CODE.to_string(),
                title: existing.title,
            });
        }
        let _guard = self.locks.try_acquire(buyer_id, gig_id).ok_or_else(|| {
            debug!("🔄️📦️ Checkout for gig #{gig_id} by buyer #{buyer_id} is already in flight");
            OrderFlowError::CheckoutInProgress
        })?;

        let gig = self.db.fetch_gig(gig_id).await.map_err(|e| OrderFlowError::DatabaseError(e.to_string()))?;
        let gig = gig.ok_or(OrderFlowError::GigNotFound(gig_id))?;
        if !gig.price.is_positive() {
            return Err(OrderFlowError::InvalidGigPrice(gig.price));
        }
        if gig.seller_id == buyer_id {
            return Err(OrderFlowError::SelfPurchase);
        }
        if !self.gateway.is_ready() {
            error!("🔄️📦️ Checkout for gig #{gig_id} refused: the payment gateway is not configured");
            return Err(OrderFlowError::PaymentGatewayUnavailable("gateway is not configured".to_string()));
        }

        let receipt = receipt_label(buyer_id);
        let create = self.gateway.create_remote_order(gig.price, INR_CURRENCY_CODE, &receipt);
        let remote = match tokio::time::timeout(self.gateway_timeout, create).await {
            Ok(Ok(remote)) => remote,
            Ok(Err(e)) => {
                error!("🔄️📦️ Gateway order creation failed for gig #{gig_id}: {e}");
                return Err(e.into());
            },
            Err(_) => {
                error!(
                    "🔄️📦️ Gateway order creation for gig #{gig_id} timed out after {:?}",
                    self.gateway_timeout
                );
                return Err(OrderFlowError::PaymentGatewayUnavailable("gateway call timed out".to_string()));
            },
        };

        let order = NewOrder::for_gig(&gig, buyer_id, PaymentIntentId(remote.id.clone()));
        let order = self.db.insert_order(order).await?;
        debug!(
            "🔄️📦️ Order [{}] created for buyer #{buyer_id} on gig #{gig_id} with intent {}",
            order.id, order.payment_intent
        );
        Ok(CheckoutIntent { order_id: remote.id, amount: remote.amount, currency: remote.currency, title: gig.title })
    }

    /// Applies a signed payment result: verifies the signature, flips the order to completed
    /// and bumps the gig's sales counter (the latter two atomically, in the backend).
    ///
    /// A forged or corrupted signature never touches the ledger. A repeat confirmation finds no
    /// pending order and fails with [`OrderFlowError::OrderNotFoundOrCompleted`], so side
    /// effects are applied at most once.
    pub async fn confirm_payment(&self, confirmation: PaymentConfirmation) -> Result<Order, OrderFlowError> {
        let PaymentConfirmation { order_id, payment_id, signature } = confirmation;
        if !self.gateway.verify_payment_signature(&order_id, &payment_id, &signature) {
            // Log enough to audit the attempt, but never the secret or the expected signature.
            warn!(
                "🔐️ Invalid payment signature for intent {order_id}, payment {payment_id}. Supplied: {}",
                truncated(&signature)
            );
            return Err(OrderFlowError::InvalidPaymentSignature);
        }
        let intent = PaymentIntentId(order_id.clone());
        let order = self
            .db
            .confirm_order(&intent, &payment_id)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFoundOrCompleted(order_id))?;
        info!("🔄️✅️ Order [{}] confirmed with payment {payment_id}. Gig #{} sales bumped.", order.id, order.gig_id);
        Ok(order)
    }

    /// The orders visible to a user. Buyers see all of their orders; sellers see only completed
    /// orders where they are the seller. Newest first.
    pub async fn orders_for_user(&self, user_id: i64, is_seller: bool) -> Result<Vec<Order>, OrderFlowError> {
        if is_seller {
            self.db.fetch_completed_orders_for_seller(user_id).await
        } else {
            self.db.fetch_orders_for_buyer(user_id).await
        }
    }
}
