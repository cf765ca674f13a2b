mod support;

use gigmart_engine::{AuthApi, AuthApiError, RegisterUser};
use support::new_test_db;

fn registration(username: &str, is_seller: bool) -> RegisterUser {
    RegisterUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "correct horse battery staple".to_string(),
        is_seller,
        img: None,
        country: Some("IN".to_string()),
        description: None,
    }
}

#[tokio::test]
async fn register_then_login() {
    let db = new_test_db().await;
    let api = AuthApi::new(db);

    let user = api.register(registration("asha", true)).await.expect("registration should succeed");
    assert!(user.is_seller);
    // The stored hash is argon2, never the raw password
    assert!(user.password_hash.starts_with("$argon2"));

    let logged_in = api.login("asha", "correct horse battery staple").await.expect("login should succeed");
    assert_eq!(logged_in.id, user.id);

    let err = api.login("asha", "wrong password").await.expect_err("wrong password must fail");
    assert!(matches!(err, AuthApiError::InvalidCredentials), "got {err}");
    let err = api.login("nobody", "correct horse battery staple").await.expect_err("unknown user must fail");
    assert!(matches!(err, AuthApiError::InvalidCredentials), "got {err}");
}

#[tokio::test]
async fn usernames_are_unique() {
    let db = new_test_db().await;
    let api = AuthApi::new(db);

    api.register(registration("ravi", false)).await.expect("first registration should succeed");
    let err = api.register(registration("ravi", false)).await.expect_err("duplicate username must fail");
    assert!(matches!(err, AuthApiError::UsernameTaken), "got {err}");
}
