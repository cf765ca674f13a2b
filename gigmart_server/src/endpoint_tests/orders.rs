use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use gigmart_engine::{
    db_types::{Gig, Json, Order, PaymentIntentId, Rupee},
    locks::ProcessingLocks,
    test_utils::test_gateway::TestGateway,
    OrderFlowApi,
};
use serde_json::{json, Value};

use super::{
    helpers::{get_request, issue_token, post_request, put_request},
    mocks::MockDb,
};
use crate::routes::{ConfirmPaymentRoute, CreateCheckoutRoute, MyOrdersRoute};

const GATEWAY_SECRET: &str = "endpoint-test-gateway";

fn canned_gig(id: i64, seller_id: i64, price_rupees: f64) -> Gig {
    Gig {
        id,
        seller_id,
        title: "I will design a logo".to_string(),
        category: "design".to_string(),
        description: String::new(),
        price: Rupee::from_rupees(price_rupees),
        cover: "cover.webp".to_string(),
        images: Json(vec![]),
        features: Json(vec![]),
        delivery_days: 3,
        revision_count: 2,
        total_stars: 0,
        star_count: 0,
        sales: 0,
        created_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
    }
}

fn canned_order(id: i64, buyer_id: i64, seller_id: i64, completed: bool) -> Order {
    Order {
        id,
        gig_id: 7,
        buyer_id,
        seller_id,
        title: "I will design a logo".to_string(),
        price: Rupee::from_rupees(500.0),
        cover: "cover.webp".to_string(),
        payment_intent: PaymentIntentId(format!("order_test_{id:04}")),
        payment_id: completed.then(|| format!("pay_{id:04}")),
        completed,
        created_at: Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 3, 16, 11, 20, 0).unwrap(),
    }
}

fn configure(db: MockDb) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = OrderFlowApi::new(db, TestGateway::new(GATEWAY_SECRET), ProcessingLocks::new());
        cfg.service(CreateCheckoutRoute::<MockDb, TestGateway>::new())
            .service(MyOrdersRoute::<MockDb, TestGateway>::new())
            .service(ConfirmPaymentRoute::<MockDb, TestGateway>::new())
            .app_data(web::Data::new(api));
    }
}

#[actix_web::test]
async fn orders_require_a_token() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("", "/orders", configure(MockDb::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("authorization token"), "unexpected body: {body}");
}

#[actix_web::test]
async fn buyers_see_all_their_orders() {
    let _ = env_logger::try_init();
    let mut db = MockDb::new();
    db.expect_fetch_orders_for_buyer()
        .returning(|buyer_id| Ok(vec![canned_order(2, buyer_id, 9, false), canned_order(1, buyer_id, 9, true)]));
    let token = issue_token(42, false);

    let (status, body) = get_request(&token, "/orders", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 2);
    assert_eq!(orders[0]["buyer_id"], 42);
}

#[actix_web::test]
async fn sellers_see_only_completed_orders() {
    let _ = env_logger::try_init();
    let mut db = MockDb::new();
    db.expect_fetch_completed_orders_for_seller()
        .returning(|seller_id| Ok(vec![canned_order(1, 42, seller_id, true)]));
    let token = issue_token(9, true);

    let (status, body) = get_request(&token, "/orders", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["completed"], true);
}

#[actix_web::test]
async fn checkout_returns_an_intent() {
    let _ = env_logger::try_init();
    let mut db = MockDb::new();
    db.expect_fetch_pending_order().returning(|_, _| Ok(None));
    db.expect_fetch_gig().returning(|id| Ok(Some(canned_gig(id, 9, 500.0))));
    db.expect_insert_order().returning(|new_order| {
        let mut order = canned_order(1, new_order.buyer_id, new_order.seller_id, false);
        order.payment_intent = new_order.payment_intent;
        Ok(order)
    });
    let token = issue_token(42, false);

    let (status, body) = post_request(&token, "/orders/create-payment-intent/7", &json!({}), configure(db)).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
    let intent: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(intent["orderId"], "order_test_0001");
    assert_eq!(intent["amount"], 50_000);
    assert_eq!(intent["currency"], "INR");
    assert_eq!(intent["title"], "I will design a logo");
}

#[actix_web::test]
async fn self_purchase_is_forbidden() {
    let _ = env_logger::try_init();
    let mut db = MockDb::new();
    db.expect_fetch_pending_order().returning(|_, _| Ok(None));
    db.expect_fetch_gig().returning(|id| Ok(Some(canned_gig(id, 42, 500.0))));
    let token = issue_token(42, true);

    let (status, body) = post_request(&token, "/orders/create-payment-intent/7", &json!({}), configure(db)).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "unexpected body: {body}");
}

#[actix_web::test]
async fn confirmation_requires_all_three_fields() {
    let _ = env_logger::try_init();
    let token = issue_token(42, false);
    let payload = json!({ "razorpay_payment_id": "pay_0001" });

    let (status, body) = put_request(&token, "/orders", &payload, configure(MockDb::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Missing required payment information"), "unexpected body: {body}");
}

#[actix_web::test]
async fn a_valid_confirmation_completes_the_order() {
    let _ = env_logger::try_init();
    let mut db = MockDb::new();
    db.expect_confirm_order()
        .returning(|intent, payment_id| {
            let mut order = canned_order(1, 42, 9, true);
            order.payment_intent = intent.clone();
            order.payment_id = Some(payment_id.to_string());
            Ok(Some(order))
        });
    let gateway = TestGateway::new(GATEWAY_SECRET);
    let token = issue_token(42, false);
    let payload = json!({
        "razorpay_order_id": "order_test_0001",
        "razorpay_payment_id": "pay_0001",
        "razorpay_signature": gateway.sign("order_test_0001", "pay_0001"),
    });

    let (status, body) = put_request(&token, "/orders", &payload, configure(db)).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["order"]["completed"], true);
    assert_eq!(response["order"]["payment_id"], "pay_0001");
}

#[actix_web::test]
async fn a_tampered_signature_is_rejected() {
    let _ = env_logger::try_init();
    let token = issue_token(42, false);
    let payload = json!({
        "razorpay_order_id": "order_test_0001",
        "razorpay_payment_id": "pay_0001",
        "razorpay_signature": "forged",
    });

    let (status, body) = put_request(&token, "/orders", &payload, configure(MockDb::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("signature"), "unexpected body: {body}");
}
