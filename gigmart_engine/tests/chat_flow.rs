mod support;

use gigmart_engine::{ChatApi, ChatApiError};
use support::{new_test_db, seed_user};

#[tokio::test]
async fn threads_are_keyed_on_the_pair() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_chat", true).await;
    let buyer = seed_user(&db, "buyer_chat", false).await;
    let api = ChatApi::new(db);

    let thread = api.start_conversation(buyer.id, false, seller.id).await.expect("thread should open");
    assert_eq!(thread.key, format!("{}:{}", seller.id, buyer.id));
    assert_eq!(thread.seller_id, seller.id);
    assert_eq!(thread.buyer_id, buyer.id);
    // The opener has read it; the other side has not
    assert!(thread.read_by_buyer);
    assert!(!thread.read_by_seller);

    // The same pair cannot open a second thread, regardless of who tries
    let err = api.start_conversation(seller.id, true, buyer.id).await.expect_err("duplicate thread");
    assert!(matches!(err, ChatApiError::ConversationExists(_)), "got {err}");
}

#[tokio::test]
async fn messages_update_the_thread_state() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_msg", true).await;
    let buyer = seed_user(&db, "buyer_msg", false).await;
    let outsider = seed_user(&db, "outsider_msg", false).await;
    let api = ChatApi::new(db);

    let thread = api.start_conversation(buyer.id, false, seller.id).await.unwrap();
    api.send_message(buyer.id, &thread.key, "Hi! Can you do a rush order?".to_string()).await.unwrap();
    api.send_message(seller.id, &thread.key, "Sure, give me two days.".to_string()).await.unwrap();

    let thread = api.conversation(&thread.key).await.unwrap();
    assert_eq!(thread.last_message.as_deref(), Some("Sure, give me two days."));
    // The seller sent the last message, so the buyer side is now unread
    assert!(thread.read_by_seller);
    assert!(!thread.read_by_buyer);

    let messages = api.messages(&thread.key).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender_id, buyer.id);
    assert_eq!(messages[1].sender_id, seller.id);

    let err = api
        .send_message(outsider.id, &thread.key, "Let me in".to_string())
        .await
        .expect_err("outsiders cannot post");
    assert!(matches!(err, ChatApiError::NotParticipant(_)), "got {err}");
}

#[tokio::test]
async fn read_receipts_and_listings() {
    let db = new_test_db().await;
    let seller = seed_user(&db, "seller_list", true).await;
    let buyer_a = seed_user(&db, "buyer_list_a", false).await;
    let buyer_b = seed_user(&db, "buyer_list_b", false).await;
    let api = ChatApi::new(db);

    let thread_a = api.start_conversation(buyer_a.id, false, seller.id).await.unwrap();
    api.start_conversation(buyer_b.id, false, seller.id).await.unwrap();

    assert_eq!(api.conversations_for_user(seller.id, true).await.unwrap().len(), 2);
    assert_eq!(api.conversations_for_user(buyer_a.id, false).await.unwrap().len(), 1);

    let marked = api.mark_read(&thread_a.key, true).await.unwrap();
    assert!(marked.read_by_seller);
    assert!(marked.read_by_buyer);

    let err = api.mark_read("42:4242", true).await.expect_err("unknown thread");
    assert!(matches!(err, ChatApiError::ConversationNotFound(_)), "got {err}");
}
