use log::{debug, warn};
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, PaymentIntentId},
    OrderFlowError,
};

/// Returns the single incomplete order for the (buyer, gig) pair, if any. The partial unique
/// index guarantees there cannot be more than one.
pub async fn fetch_pending_order(
    buyer_id: i64,
    gig_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderFlowError> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE buyer_id = $1 AND gig_id = $2 AND completed = 0")
        .bind(buyer_id)
        .bind(gig_id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Inserts a new pending order. A unique-index violation means another writer created a pending
/// order for the pair (or reused the payment intent) first, and maps to
/// [`OrderFlowError::DuplicatePendingOrder`].
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderFlowError> {
    let result: Result<Order, sqlx::Error> = sqlx::query_as(
        r#"
            INSERT INTO orders (
                gig_id,
                buyer_id,
                seller_id,
                title,
                price,
                cover,
                payment_intent
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(order.gig_id)
    .bind(order.buyer_id)
    .bind(order.seller_id)
    .bind(order.title)
    .bind(order.price.value())
    .bind(order.cover)
    .bind(order.payment_intent.as_str())
    .fetch_one(conn)
    .await;
    match result {
        Ok(order) => {
            debug!("📝️ Order [{}] inserted with intent {}", order.id, order.payment_intent);
            Ok(order)
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(OrderFlowError::DuplicatePendingOrder),
        Err(e) => Err(e.into()),
    }
}

/// Flips the pending order with the given payment intent to completed and increments its gig's
/// sales counter. Run this inside a transaction: both writes must land together.
///
/// Returns `None` when no pending order matches (unknown intent, or already completed).
pub(crate) async fn confirm_order(
    payment_intent: &PaymentIntentId,
    payment_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderFlowError> {
    let order: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders
            SET completed = 1, payment_id = $1, updated_at = CURRENT_TIMESTAMP
            WHERE payment_intent = $2 AND completed = 0
            RETURNING *;
        "#,
    )
    .bind(payment_id)
    .bind(payment_intent.as_str())
    .fetch_optional(&mut *conn)
    .await?;
    if let Some(order) = &order {
        let updated = sqlx::query("UPDATE gigs SET sales = sales + 1, updated_at = CURRENT_TIMESTAMP WHERE id = $1")
            .bind(order.gig_id)
            .execute(&mut *conn)
            .await?;
        if updated.rows_affected() == 0 {
            // The gig was deleted while the order was pending. The completion still stands, but
            // the increment has nowhere to land. Flag it for manual reconciliation.
            warn!(
                "🗃️ Order [{}] confirmed, but gig #{} no longer exists; its sales increment is lost",
                order.id, order.gig_id
            );
        } else {
            debug!("🗃️ Order [{}] completed and sales counter bumped for gig #{}", order.id, order.gig_id);
        }
    }
    Ok(order)
}

pub async fn fetch_orders_for_buyer(buyer_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Order>, OrderFlowError> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE buyer_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(buyer_id)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

pub async fn fetch_completed_orders_for_seller(
    seller_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, OrderFlowError> {
    let orders = sqlx::query_as(
        "SELECT * FROM orders WHERE seller_id = $1 AND completed = 1 ORDER BY created_at DESC, id DESC",
    )
    .bind(seller_id)
    .fetch_all(conn)
    .await?;
    Ok(orders)
}
