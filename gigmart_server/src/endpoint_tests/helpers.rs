use actix_web::{
    http::{header, StatusCode},
    test,
    web,
    web::ServiceConfig,
    App,
};
use chrono::Utc;
use gigmart_engine::db_types::User;
use gm_common::Secret;
use serde::Serialize;

use crate::{auth::TokenIssuer, config::AuthConfig};

pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(&AuthConfig { jwt_secret: Secret::new("endpoint-test-secret-0123456789abcdef".to_string()) })
}

pub fn canned_user(id: i64, is_seller: bool) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        password_hash: "$argon2id$not-a-real-hash".to_string(),
        is_seller,
        img: None,
        country: None,
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn issue_token(user_id: i64, is_seller: bool) -> String {
    test_issuer().issue_token(&canned_user(user_id, is_seller)).expect("Could not issue test token")
}

pub async fn get_request<F>(token: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = test::init_service(App::new().app_data(web::Data::new(test_issuer())).configure(configure)).await;
    let mut req = test::TestRequest::get().uri(path);
    if !token.is_empty() {
        req = req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("Response body was not UTF-8");
    (status, body)
}

pub async fn post_request<F, B>(token: &str, path: &str, body: &B, configure: F) -> (StatusCode, String)
where
    F: FnOnce(&mut ServiceConfig),
    B: Serialize,
{
    send_with_body(test::TestRequest::post(), token, path, body, configure).await
}

pub async fn put_request<F, B>(token: &str, path: &str, body: &B, configure: F) -> (StatusCode, String)
where
    F: FnOnce(&mut ServiceConfig),
    B: Serialize,
{
    send_with_body(test::TestRequest::put(), token, path, body, configure).await
}

async fn send_with_body<F, B>(
    req: test::TestRequest,
    token: &str,
    path: &str,
    body: &B,
    configure: F,
) -> (StatusCode, String)
where
    F: FnOnce(&mut ServiceConfig),
    B: Serialize,
{
    let app = test::init_service(App::new().app_data(web::Data::new(test_issuer())).configure(configure)).await;
    let mut req = req.uri(path).set_json(body);
    if !token.is_empty() {
        req = req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("Response body was not UTF-8");
    (status, body)
}
