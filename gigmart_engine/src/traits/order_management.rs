use crate::{
    db_types::{NewOrder, Order, PaymentIntentId},
    OrderFlowError,
};

/// Ledger behaviour for purchase attempts.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// The incomplete order for the given (buyer, gig) pair, if one exists. At most one can:
    /// the ledger enforces this with a conditional write.
    async fn fetch_pending_order(&self, buyer_id: i64, gig_id: i64) -> Result<Option<Order>, OrderFlowError>;

    /// Persists a new pending order. If another writer created a pending order for the same
    /// (buyer, gig) pair in the meantime, fails with
    /// [`OrderFlowError::DuplicatePendingOrder`] rather than violating the one-pending-order
    /// invariant.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;

    /// Atomically flips the order with the given payment intent from pending to completed,
    /// attaches the payment id, and increments the gig's sales counter. Both writes commit
    /// together or not at all.
    ///
    /// Returns `None` when no pending order matches — either it never existed, or it was
    /// already completed. A repeat confirmation therefore cannot re-apply side effects.
    async fn confirm_order(
        &self,
        payment_intent: &PaymentIntentId,
        payment_id: &str,
    ) -> Result<Option<Order>, OrderFlowError>;

    /// All orders placed by the buyer, newest first, regardless of completion state.
    async fn fetch_orders_for_buyer(&self, buyer_id: i64) -> Result<Vec<Order>, OrderFlowError>;

    /// Completed orders where the given user is the seller, newest first. Pending orders are a
    /// buyer-side concern; sellers never see abandoned carts.
    async fn fetch_completed_orders_for_seller(&self, seller_id: i64) -> Result<Vec<Order>, OrderFlowError>;
}
