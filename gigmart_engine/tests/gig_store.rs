mod support;

use gigmart_engine::{
    db_types::{GigUpdate, Rupee},
    order_objects::{GigQueryFilter, GigSort},
    GigApi,
    GigApiError,
};
use support::{new_test_db, seed_gig, seed_user};

#[tokio::test]
async fn only_sellers_may_publish() {
    let db = new_test_db().await;
    let buyer = seed_user(&db, "buyer_pub", false).await;
    let api = GigApi::new(db.clone());

    let gig = gigmart_engine::db_types::NewGig {
        seller_id: buyer.id,
        title: "I will try anyway".to_string(),
        category: "design".to_string(),
        description: String::new(),
        price: Rupee::from_rupees(100.0),
        cover: String::new(),
        images: vec![],
        features: vec![],
        delivery_days: 1,
        revision_count: 0,
    };
    let err = api.create_gig(false, gig).await.expect_err("buyers cannot publish");
    assert!(matches!(err, GigApiError::OnlySellers), "got {err}");
}

#[tokio::test]
async fn search_filters_compose() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_search", true).await;
    let other = seed_user(&db, "other_search", true).await;
    seed_gig(&db, seller.id, "I will design a logo", 100.0).await;
    seed_gig(&db, seller.id, "I will design a poster", 300.0).await;
    seed_gig(&db, other.id, "I will write a jingle", 200.0).await;
    let api = GigApi::new(db);

    let all = api.search(GigQueryFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let mine = api.search(GigQueryFilter::default().with_seller_id(seller.id)).await.unwrap();
    assert_eq!(mine.len(), 2);

    let cheap = api.search(GigQueryFilter::default().with_max_price(Rupee::from_rupees(250.0))).await.unwrap();
    assert_eq!(cheap.len(), 2);

    let ranged = api
        .search(
            GigQueryFilter::default()
                .with_min_price(Rupee::from_rupees(150.0))
                .with_max_price(Rupee::from_rupees(250.0)),
        )
        .await
        .unwrap();
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].title, "I will write a jingle");

    let design = api.search(GigQueryFilter::default().with_search("design".to_string())).await.unwrap();
    assert_eq!(design.len(), 2);

    let by_price = api.search(GigQueryFilter::default().sorted_by(GigSort::Price)).await.unwrap();
    assert_eq!(by_price[0].price, Rupee::from_rupees(300.0));
}

#[tokio::test]
async fn owners_alone_may_modify_or_delete() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_own", true).await;
    let intruder = seed_user(&db, "intruder_own", true).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 100.0).await;
    let api = GigApi::new(db);

    let update = GigUpdate { new_price: Some(Rupee::from_rupees(150.0)), ..Default::default() };
    let err = api.update_gig(intruder.id, gig.id, update.clone()).await.expect_err("not the owner");
    assert!(matches!(err, GigApiError::NotOwner), "got {err}");

    let updated = api.update_gig(seller.id, gig.id, update).await.expect("owner update should succeed");
    assert_eq!(updated.price, Rupee::from_rupees(150.0));

    let err = api.delete_gig(intruder.id, gig.id).await.expect_err("not the owner");
    assert!(matches!(err, GigApiError::NotOwner), "got {err}");
    api.delete_gig(seller.id, gig.id).await.expect("owner delete should succeed");
    let err = api.fetch_gig(gig.id).await.expect_err("gig should be gone");
    assert!(matches!(err, GigApiError::GigNotFound(_)), "got {err}");
}

#[tokio::test]
async fn partial_updates_leave_other_fields_alone() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_patch", true).await;
    let gig = seed_gig(&db, seller.id, "I will design a logo", 100.0).await;
    let api = GigApi::new(db);

    let update = GigUpdate {
        new_title: Some("I will design two logos".to_string()),
        new_revision_count: Some(5),
        ..Default::default()
    };
    let updated = api.update_gig(seller.id, gig.id, update).await.unwrap();
    assert_eq!(updated.title, "I will design two logos");
    assert_eq!(updated.revision_count, 5);
    assert_eq!(updated.price, gig.price);
    assert_eq!(updated.category, gig.category);

    // An empty update is a no-op rather than an error
    let unchanged = api.update_gig(seller.id, gig.id, GigUpdate::default()).await.unwrap();
    assert_eq!(unchanged.title, "I will design two logos");
}
