//! End-to-end coverage of the checkout and payment-reconciliation flow against a real SQLite
//! database and a deterministic gateway.

mod support;

use std::time::Duration;

use gigmart_engine::{
    db_types::{NewOrder, PaymentIntentId},
    order_objects::PaymentConfirmation,
    test_utils::test_gateway::TestGateway,
    traits::{GigManagement, OrderManagement},
    OrderFlowApi,
    OrderFlowError,
    SqliteDatabase,
};
use gigmart_engine::locks::ProcessingLocks;
use support::{new_test_db, seed_gig, seed_user};

const GATEWAY_SECRET: &str = "test_gateway_secret";

fn order_api(db: &SqliteDatabase, gateway: &TestGateway) -> OrderFlowApi<SqliteDatabase, TestGateway> {
    OrderFlowApi::new(db.clone(), gateway.clone(), ProcessingLocks::new())
}

fn confirmation_for(gateway: &TestGateway, order_id: &str, payment_id: &str) -> PaymentConfirmation {
    PaymentConfirmation {
        order_id: order_id.to_string(),
        payment_id: payment_id.to_string(),
        signature: gateway.sign(order_id, payment_id),
    }
}

#[tokio::test]
async fn free_gigs_cannot_be_checked_out() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_free", true).await;
    let buyer = seed_user(&db, "buyer_free", false).await;
    let gig = seed_gig(&db, seller.id, "I will do it for free", 0.0).await;
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let api = order_api(&db, &gateway);

    let err = api.create_checkout(buyer.id, gig.id).await.expect_err("zero-price checkout should fail");
    assert!(matches!(err, OrderFlowError::InvalidGigPrice(_)), "got {err}");
    assert!(api.orders_for_user(buyer.id, false).await.unwrap().is_empty());
    assert!(gateway.recorded_orders().is_empty());
}

#[tokio::test]
async fn sellers_cannot_buy_their_own_gig() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_self", true).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 350.0).await;
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let api = order_api(&db, &gateway);

    let err = api.create_checkout(seller.id, gig.id).await.expect_err("self-purchase should fail");
    assert!(matches!(err, OrderFlowError::SelfPurchase), "got {err}");
    assert!(api.orders_for_user(seller.id, false).await.unwrap().is_empty());
    assert!(gateway.recorded_orders().is_empty());
}

#[tokio::test]
async fn unknown_gigs_are_rejected() {
    let db = new_test_db().await;
    let buyer = seed_user(&db, "buyer_lost", false).await;
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let api = order_api(&db, &gateway);

    let err = api.create_checkout(buyer.id, 9999).await.expect_err("unknown gig should fail");
    assert!(matches!(err, OrderFlowError::GigNotFound(9999)), "got {err}");
}

#[tokio::test]
async fn retried_checkout_reuses_the_pending_order() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_retry", true).await;
    let buyer = seed_user(&db, "buyer_retry", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 350.0).await;
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let api = order_api(&db, &gateway);

    let first = api.create_checkout(buyer.id, gig.id).await.expect("first checkout should succeed");
    let second = api.create_checkout(buyer.id, gig.id).await.expect("retried checkout should succeed");
    assert_eq!(first.order_id, second.order_id);
    assert_eq!(first.amount, second.amount);
    // Exactly one gateway order and one ledger row
    assert_eq!(gateway.recorded_orders().len(), 1);
    assert_eq!(api.orders_for_user(buyer.id, false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_checkouts_make_exactly_one_gateway_call() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_race", true).await;
    let buyer = seed_user(&db, "buyer_race", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 350.0).await;
    // Enough latency that the second call arrives while the first holds the lock
    let gateway = TestGateway::new(GATEWAY_SECRET).with_latency(Duration::from_millis(100));
    let api = order_api(&db, &gateway);

    let (a, b) = tokio::join!(api.create_checkout(buyer.id, gig.id), api.create_checkout(buyer.id, gig.id));
    let (winner, loser) = if a.is_ok() { (a, b) } else { (b, a) };
    winner.expect("one checkout should win the race");
    assert!(
        matches!(loser, Err(OrderFlowError::CheckoutInProgress)),
        "the losing checkout should see the in-flight lock"
    );
    assert_eq!(gateway.recorded_orders().len(), 1);
    assert_eq!(api.orders_for_user(buyer.id, false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_checkouts_release_the_lock() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_release", true).await;
    let buyer = seed_user(&db, "buyer_release", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 350.0).await;
    let api = OrderFlowApi::new(db.clone(), TestGateway::unready(), ProcessingLocks::new());

    let err = api.create_checkout(buyer.id, gig.id).await.expect_err("unready gateway should fail");
    assert!(matches!(err, OrderFlowError::PaymentGatewayUnavailable(_)), "got {err}");
    // The lock was released on the error path, so a retry reaches the gateway again
    let err = api.create_checkout(buyer.id, gig.id).await.expect_err("still unready");
    assert!(matches!(err, OrderFlowError::PaymentGatewayUnavailable(_)), "got {err}");
}

#[tokio::test]
async fn slow_gateways_surface_as_unavailable() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_slow", true).await;
    let buyer = seed_user(&db, "buyer_slow", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 350.0).await;
    let gateway = TestGateway::new(GATEWAY_SECRET).with_latency(Duration::from_millis(200));
    let api = OrderFlowApi::new(db.clone(), gateway, ProcessingLocks::new())
        .with_gateway_timeout(Duration::from_millis(20));

    let err = api.create_checkout(buyer.id, gig.id).await.expect_err("timed-out gateway should fail");
    assert!(matches!(err, OrderFlowError::PaymentGatewayUnavailable(_)), "got {err}");
    assert!(api.orders_for_user(buyer.id, false).await.unwrap().is_empty());
}

#[tokio::test]
async fn amounts_are_sent_in_minor_units() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_paisa", true).await;
    let buyer = seed_user(&db, "buyer_paisa", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 500.0).await;
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let api = order_api(&db, &gateway);

    let intent = api.create_checkout(buyer.id, gig.id).await.expect("checkout should succeed");
    assert_eq!(intent.amount.value(), 50_000);
    assert_eq!(intent.currency, "INR");
    let calls = gateway.recorded_orders();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount.value(), 50_000);
    assert_eq!(calls[0].currency, "INR");
    assert!(calls[0].receipt.starts_with("rcpt_"));
}

#[tokio::test]
async fn tampered_signatures_never_complete_an_order() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_forge", true).await;
    let buyer = seed_user(&db, "buyer_forge", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 350.0).await;
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let api = order_api(&db, &gateway);

    let intent = api.create_checkout(buyer.id, gig.id).await.expect("checkout should succeed");
    let mut forged = confirmation_for(&gateway, &intent.order_id, "pay_001");
    forged.signature.push('x');
    let err = api.confirm_payment(forged).await.expect_err("forged signature should fail");
    assert!(matches!(err, OrderFlowError::InvalidPaymentSignature), "got {err}");

    // Nothing moved: the order is still pending and no sale was counted
    let orders = api.orders_for_user(buyer.id, false).await.unwrap();
    assert!(!orders[0].completed);
    assert!(orders[0].payment_id.is_none());
    assert_eq!(db.fetch_gig(gig.id).await.unwrap().unwrap().sales, 0);
    assert!(api.orders_for_user(seller.id, true).await.unwrap().is_empty());
}

#[tokio::test]
async fn double_confirmation_applies_side_effects_once() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_twice", true).await;
    let buyer = seed_user(&db, "buyer_twice", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 350.0).await;
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let api = order_api(&db, &gateway);

    let intent = api.create_checkout(buyer.id, gig.id).await.expect("checkout should succeed");
    let confirmation = confirmation_for(&gateway, &intent.order_id, "pay_001");
    let order = api.confirm_payment(confirmation.clone()).await.expect("first confirmation should succeed");
    assert!(order.completed);
    assert_eq!(order.payment_id.as_deref(), Some("pay_001"));

    let err = api.confirm_payment(confirmation).await.expect_err("second confirmation must not re-apply");
    assert!(matches!(err, OrderFlowError::OrderNotFoundOrCompleted(_)), "got {err}");
    assert_eq!(db.fetch_gig(gig.id).await.unwrap().unwrap().sales, 1);
}

#[tokio::test]
async fn a_full_purchase_updates_both_sides() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_happy", true).await;
    let buyer = seed_user(&db, "buyer_happy", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 200.0).await;
    let sales_before = db.fetch_gig(gig.id).await.unwrap().unwrap().sales;
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let api = order_api(&db, &gateway);

    let intent = api.create_checkout(buyer.id, gig.id).await.expect("checkout should succeed");
    assert_eq!(intent.amount.value(), 20_000);
    assert_eq!(intent.title, gig.title);

    // Pending orders are a buyer-side concern; the seller sees nothing yet
    assert_eq!(api.orders_for_user(buyer.id, false).await.unwrap().len(), 1);
    assert!(api.orders_for_user(seller.id, true).await.unwrap().is_empty());

    let order = api
        .confirm_payment(confirmation_for(&gateway, &intent.order_id, "pay_42"))
        .await
        .expect("confirmation should succeed");
    assert!(order.completed);

    assert_eq!(db.fetch_gig(gig.id).await.unwrap().unwrap().sales, sales_before + 1);
    let seller_orders = api.orders_for_user(seller.id, true).await.unwrap();
    assert_eq!(seller_orders.len(), 1);
    assert_eq!(seller_orders[0].id, order.id);
    let buyer_orders = api.orders_for_user(buyer.id, false).await.unwrap();
    assert_eq!(buyer_orders.len(), 1);
    assert!(buyer_orders[0].completed);
}

#[tokio::test]
async fn the_pending_order_constraint_holds_without_the_lock_table() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_durable", true).await;
    let buyer = seed_user(&db, "buyer_durable", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 350.0).await;

    // Simulate another instance winning the race: write directly to the ledger, bypassing the
    // in-memory lock table entirely.
    let first = NewOrder::for_gig(&gig, buyer.id, PaymentIntentId("order_instance_a".to_string()));
    db.insert_order(first).await.expect("first pending order should insert");
    let second = NewOrder::for_gig(&gig, buyer.id, PaymentIntentId("order_instance_b".to_string()));
    let err = db.insert_order(second).await.expect_err("second pending order must violate the constraint");
    assert!(matches!(err, OrderFlowError::DuplicatePendingOrder), "got {err}");
}

#[tokio::test]
async fn orders_survive_gig_deletion() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_gone", true).await;
    let buyer = seed_user(&db, "buyer_gone", false).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 350.0).await;
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let api = order_api(&db, &gateway);

    let intent = api.create_checkout(buyer.id, gig.id).await.expect("checkout should succeed");
    db.delete_gig(gig.id).await.expect("gig deletion should succeed");

    // Confirmation still completes; the lost sales increment is logged, not fatal
    let order = api
        .confirm_payment(confirmation_for(&gateway, &intent.order_id, "pay_7"))
        .await
        .expect("confirmation should survive gig deletion");
    assert!(order.completed);
    assert_eq!(order.title, gig.title);
    assert_eq!(order.price, gig.price);
}
