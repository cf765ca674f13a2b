use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use gigmart_engine::{db_types::User, AuthApi};
use serde_json::{json, Value};

use super::{
    helpers::{post_request, test_issuer},
    mocks::MockAuthDb,
};
use crate::routes::{LoginRoute, RegisterRoute};

fn configure(db: MockAuthDb) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = AuthApi::new(db);
        cfg.service(RegisterRoute::<MockAuthDb>::new())
            .service(LoginRoute::<MockAuthDb>::new())
            .app_data(web::Data::new(api));
    }
}

#[actix_web::test]
async fn registration_issues_a_usable_token() {
    let _ = env_logger::try_init();
    let mut db = MockAuthDb::new();
    db.expect_insert_user().returning(|new_user| {
        Ok(User {
            id: 7,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_seller: new_user.is_seller,
            img: new_user.img,
            country: new_user.country,
            description: new_user.description,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    });
    let payload = json!({
        "username": "asha",
        "email": "asha@example.com",
        "password": "correct horse battery staple",
        "is_seller": true,
    });

    let (status, body) = post_request("", "/auth/register", &payload, configure(db)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["user_id"], 7);
    assert_eq!(response["is_seller"], true);
    // The response never echoes the password or its hash
    assert!(!body.contains("password"), "unexpected body: {body}");

    let claims = test_issuer().decode_token(response["token"].as_str().unwrap()).expect("token should validate");
    assert_eq!(claims.user_id, 7);
    assert!(claims.is_seller);
}

#[actix_web::test]
async fn unknown_users_cannot_log_in() {
    let _ = env_logger::try_init();
    let mut db = MockAuthDb::new();
    db.expect_fetch_user_by_username().returning(|_| Ok(None));
    let payload = json!({ "username": "nobody", "password": "whatever" });

    let (status, body) = post_request("", "/auth/login", &payload, configure(db)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Invalid username or password"), "unexpected body: {body}");
}
