use sqlx::SqliteConnection;

use crate::{
    db_types::{Conversation, Message, NewConversation, NewMessage},
    ChatApiError,
};

pub async fn insert_conversation(
    conversation: NewConversation,
    conn: &mut SqliteConnection,
) -> Result<Conversation, ChatApiError> {
    let key = conversation.key.clone();
    let result: Result<Conversation, sqlx::Error> = sqlx::query_as(
        r#"
            INSERT INTO conversations ("key", seller_id, buyer_id, read_by_seller, read_by_buyer)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(conversation.key)
    .bind(conversation.seller_id)
    .bind(conversation.buyer_id)
    .bind(conversation.read_by_seller)
    .bind(conversation.read_by_buyer)
    .fetch_one(conn)
    .await;
    match result {
        Ok(conversation) => Ok(conversation),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(ChatApiError::ConversationExists(key)),
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_conversation(key: &str, conn: &mut SqliteConnection) -> Result<Option<Conversation>, ChatApiError> {
    let conversation =
        sqlx::query_as(r#"SELECT * FROM conversations WHERE "key" = $1"#).bind(key).fetch_optional(conn).await?;
    Ok(conversation)
}

pub async fn fetch_conversations_for_user(
    user_id: i64,
    is_seller: bool,
    conn: &mut SqliteConnection,
) -> Result<Vec<Conversation>, ChatApiError> {
    let column = if is_seller { "seller_id" } else { "buyer_id" };
    let conversations = sqlx::query_as(&format!(
        "SELECT * FROM conversations WHERE {column} = $1 ORDER BY updated_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(conn)
    .await?;
    Ok(conversations)
}

pub async fn mark_conversation_read(
    key: &str,
    as_seller: bool,
    conn: &mut SqliteConnection,
) -> Result<Option<Conversation>, ChatApiError> {
    let column = if as_seller { "read_by_seller" } else { "read_by_buyer" };
    let conversation = sqlx::query_as(&format!(
        r#"UPDATE conversations SET {column} = 1 WHERE "key" = $1 RETURNING *"#
    ))
    .bind(key)
    .fetch_optional(conn)
    .await?;
    Ok(conversation)
}

pub(crate) async fn insert_message(message: NewMessage, conn: &mut SqliteConnection) -> Result<Message, ChatApiError> {
    let message = sqlx::query_as(
        r#"
            INSERT INTO messages (conversation_key, sender_id, body)
            VALUES ($1, $2, $3)
            RETURNING *;
        "#,
    )
    .bind(message.conversation_key)
    .bind(message.sender_id)
    .bind(message.body)
    .fetch_one(conn)
    .await?;
    Ok(message)
}

/// Refreshes the thread after a new message: preview, read flags (read for the sender's side,
/// unread for the other) and recency.
pub(crate) async fn touch_conversation(
    key: &str,
    sender_is_seller: bool,
    preview: &str,
    conn: &mut SqliteConnection,
) -> Result<(), ChatApiError> {
    sqlx::query(
        r#"
            UPDATE conversations
            SET last_message = $1, read_by_seller = $2, read_by_buyer = $3, updated_at = CURRENT_TIMESTAMP
            WHERE "key" = $4
        "#,
    )
    .bind(preview)
    .bind(sender_is_seller)
    .bind(!sender_is_seller)
    .bind(key)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn fetch_messages(key: &str, conn: &mut SqliteConnection) -> Result<Vec<Message>, ChatApiError> {
    let messages =
        sqlx::query_as("SELECT * FROM messages WHERE conversation_key = $1 ORDER BY created_at ASC, id ASC")
            .bind(key)
            .fetch_all(conn)
            .await?;
    Ok(messages)
}
