use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Conversation, Message, NewConversation, NewMessage},
    gme_api::errors::ChatApiError,
    helpers::conversation_key,
    traits::ChatManagement,
};

/// Buyer–seller messaging. Threads are keyed deterministically on the pair, so the same two
/// users always share one thread no matter who starts it.
pub struct ChatApi<B> {
    db: B,
}

impl<B> Debug for ChatApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChatApi")
    }
}

impl<B> ChatApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> ChatApi<B>
where B: ChatManagement
{
    /// Opens a thread between the requester and the other party. The side that opens the
    /// thread starts with it marked read; the other side sees it as unread.
    pub async fn start_conversation(
        &self,
        requester_id: i64,
        is_seller: bool,
        other_party: i64,
    ) -> Result<Conversation, ChatApiError> {
        let (seller_id, buyer_id) =
            if is_seller { (requester_id, other_party) } else { (other_party, requester_id) };
        let conversation = NewConversation {
            key: conversation_key(seller_id, buyer_id),
            seller_id,
            buyer_id,
            read_by_seller: is_seller,
            read_by_buyer: !is_seller,
        };
        let conversation = self.db.insert_conversation(conversation).await?;
        debug!("💬️ Conversation [{}] opened between seller #{seller_id} and buyer #{buyer_id}", conversation.key);
        Ok(conversation)
    }

    pub async fn conversation(&self, key: &str) -> Result<Conversation, ChatApiError> {
        self.db.fetch_conversation(key).await?.ok_or_else(|| ChatApiError::ConversationNotFound(key.to_string()))
    }

    pub async fn conversations_for_user(
        &self,
        user_id: i64,
        is_seller: bool,
    ) -> Result<Vec<Conversation>, ChatApiError> {
        self.db.fetch_conversations_for_user(user_id, is_seller).await
    }

    /// Marks the thread read for the calling side.
    pub async fn mark_read(&self, key: &str, as_seller: bool) -> Result<Conversation, ChatApiError> {
        self.db
            .mark_conversation_read(key, as_seller)
            .await?
            .ok_or_else(|| ChatApiError::ConversationNotFound(key.to_string()))
    }

    /// Sends a message in an existing thread. The sender must be one of the two participants.
    pub async fn send_message(&self, sender_id: i64, key: &str, body: String) -> Result<Message, ChatApiError> {
        let conversation = self.conversation(key).await?;
        if sender_id != conversation.seller_id && sender_id != conversation.buyer_id {
            return Err(ChatApiError::NotParticipant(key.to_string()));
        }
        let message = NewMessage { conversation_key: key.to_string(), sender_id, body };
        let message = self.db.insert_message(message).await?;
        trace!("💬️ Message [{}] sent in conversation [{key}] by #{sender_id}", message.id);
        Ok(message)
    }

    pub async fn messages(&self, key: &str) -> Result<Vec<Message>, ChatApiError> {
        // 404 for unknown threads, like the single-conversation fetch
        let _ = self.conversation(key).await?;
        self.db.fetch_messages(key).await
    }
}
