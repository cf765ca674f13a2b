use crate::{
    db_types::{Conversation, Message, NewConversation, NewMessage},
    ChatApiError,
};

/// Storage behaviour for buyer–seller messaging.
#[allow(async_fn_in_trait)]
pub trait ChatManagement {
    /// Persists a new conversation. The key is unique; starting the same thread twice fails
    /// with [`ChatApiError::ConversationExists`].
    async fn insert_conversation(&self, conversation: NewConversation) -> Result<Conversation, ChatApiError>;

    async fn fetch_conversation(&self, key: &str) -> Result<Option<Conversation>, ChatApiError>;

    /// All conversations the user participates in (on the given side), most recently updated
    /// first.
    async fn fetch_conversations_for_user(
        &self,
        user_id: i64,
        is_seller: bool,
    ) -> Result<Vec<Conversation>, ChatApiError>;

    /// Marks the conversation read for the given side. Returns the updated record, or `None`
    /// if the conversation is gone.
    async fn mark_conversation_read(&self, key: &str, as_seller: bool) -> Result<Option<Conversation>, ChatApiError>;

    /// Persists a message and, in the same transaction, updates the conversation's last-message
    /// preview and flips the read flags (read for the sender's side, unread for the other).
    async fn insert_message(&self, message: NewMessage) -> Result<Message, ChatApiError>;

    /// Messages in the conversation, oldest first.
    async fn fetch_messages(&self, key: &str) -> Result<Vec<Message>, ChatApiError>;
}
