use std::fmt::Debug;

use log::trace;
use sqlx::SqlitePool;

use super::{chat, gigs, new_pool, orders, users};
use crate::{
    db_types::{
        Conversation,
        Gig,
        GigUpdate,
        Message,
        NewConversation,
        NewGig,
        NewMessage,
        NewOrder,
        NewUser,
        Order,
        PaymentIntentId,
        User,
    },
    order_objects::GigQueryFilter,
    traits::{AuthManagement, ChatManagement, GigManagement, OrderManagement},
    AuthApiError,
    ChatApiError,
    GigApiError,
    OrderFlowError,
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL from the environment.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = super::db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl GigManagement for SqliteDatabase {
    async fn insert_gig(&self, gig: NewGig) -> Result<Gig, GigApiError> {
        let mut conn = self.pool.acquire().await?;
        gigs::insert_gig(gig, &mut conn).await
    }

    async fn fetch_gig(&self, id: i64) -> Result<Option<Gig>, GigApiError> {
        let mut conn = self.pool.acquire().await?;
        gigs::fetch_gig(id, &mut conn).await
    }

    async fn search_gigs(&self, query: GigQueryFilter) -> Result<Vec<Gig>, GigApiError> {
        let mut conn = self.pool.acquire().await?;
        gigs::search_gigs(query, &mut conn).await
    }

    async fn update_gig(&self, id: i64, update: GigUpdate) -> Result<Option<Gig>, GigApiError> {
        let mut conn = self.pool.acquire().await?;
        gigs::update_gig(id, update, &mut conn).await
    }

    async fn delete_gig(&self, id: i64) -> Result<bool, GigApiError> {
        let mut conn = self.pool.acquire().await?;
        gigs::delete_gig(id, &mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    async fn fetch_pending_order(&self, buyer_id: i64, gig_id: i64) -> Result<Option<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_pending_order(buyer_id, gig_id, &mut conn).await
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_order(order, &mut conn).await
    }

    /// Completion flag and sales counter move in one transaction: either both land, or neither.
    async fn confirm_order(
        &self,
        payment_intent: &PaymentIntentId,
        payment_id: &str,
    ) -> Result<Option<Order>, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::confirm_order(payment_intent, payment_id, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn fetch_orders_for_buyer(&self, buyer_id: i64) -> Result<Vec<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders_for_buyer(buyer_id, &mut conn).await
    }

    async fn fetch_completed_orders_for_seller(&self, seller_id: i64) -> Result<Vec<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_completed_orders_for_seller(seller_id, &mut conn).await
    }
}

impl AuthManagement for SqliteDatabase {
    async fn insert_user(&self, user: NewUser) -> Result<User, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        users::insert_user(user, &mut conn).await
    }

    async fn fetch_user_by_username(&self, username: &str) -> Result<Option<User>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        users::fetch_user_by_username(username, &mut conn).await
    }

    async fn fetch_user_by_id(&self, id: i64) -> Result<Option<User>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        users::fetch_user_by_id(id, &mut conn).await
    }
}

impl ChatManagement for SqliteDatabase {
    async fn insert_conversation(&self, conversation: NewConversation) -> Result<Conversation, ChatApiError> {
        let mut conn = self.pool.acquire().await?;
        chat::insert_conversation(conversation, &mut conn).await
    }

    async fn fetch_conversation(&self, key: &str) -> Result<Option<Conversation>, ChatApiError> {
        let mut conn = self.pool.acquire().await?;
        chat::fetch_conversation(key, &mut conn).await
    }

    async fn fetch_conversations_for_user(
        &self,
        user_id: i64,
        is_seller: bool,
    ) -> Result<Vec<Conversation>, ChatApiError> {
        let mut conn = self.pool.acquire().await?;
        chat::fetch_conversations_for_user(user_id, is_seller, &mut conn).await
    }

    async fn mark_conversation_read(&self, key: &str, as_seller: bool) -> Result<Option<Conversation>, ChatApiError> {
        let mut conn = self.pool.acquire().await?;
        chat::mark_conversation_read(key, as_seller, &mut conn).await
    }

    /// The message row and the thread refresh land in one transaction.
    async fn insert_message(&self, message: NewMessage) -> Result<Message, ChatApiError> {
        let mut tx = self.pool.begin().await?;
        let conversation = chat::fetch_conversation(&message.conversation_key, &mut tx)
            .await?
            .ok_or_else(|| ChatApiError::ConversationNotFound(message.conversation_key.clone()))?;
        let sender_is_seller = message.sender_id == conversation.seller_id;
        let preview = message.body.clone();
        let stored = chat::insert_message(message, &mut tx).await?;
        chat::touch_conversation(&conversation.key, sender_is_seller, &preview, &mut tx).await?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn fetch_messages(&self, key: &str) -> Result<Vec<Message>, ChatApiError> {
        let mut conn = self.pool.acquire().await?;
        chat::fetch_messages(key, &mut conn).await
    }
}
