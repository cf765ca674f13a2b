#![allow(dead_code)]

use gigmart_engine::{
    db_types::{Gig, NewGig, NewUser, Rupee, User},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    traits::{AuthManagement, GigManagement},
    SqliteDatabase,
};

pub async fn new_test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

pub async fn seed_user(db: &SqliteDatabase, username: &str, is_seller: bool) -> User {
    db.insert_user(NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "not-a-real-hash".to_string(),
        is_seller,
        img: None,
        country: None,
        description: None,
    })
    .await
    .expect("Error creating user")
}

pub async fn seed_gig(db: &SqliteDatabase, seller_id: i64, title: &str, price_rupees: f64) -> Gig {
    db.insert_gig(NewGig {
        seller_id,
        title: title.to_string(),
        category: "design".to_string(),
        description: "A bespoke logo, delivered as layered source files".to_string(),
        price: Rupee::from_rupees(price_rupees),
        cover: "cover.webp".to_string(),
        images: vec!["sample1.webp".to_string()],
        features: vec!["source file".to_string(), "commercial use".to_string()],
        delivery_days: 3,
        revision_count: 2,
    })
    .await
    .expect("Error creating gig")
}
