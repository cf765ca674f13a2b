use gigmart_engine::{
    db_types::{Gig, GigUpdate, NewGig, NewOrder, NewUser, Order, PaymentIntentId, User},
    order_objects::GigQueryFilter,
    traits::{AuthManagement, GigManagement, OrderManagement},
    AuthApiError,
    GigApiError,
    OrderFlowError,
};
use mockall::mock;

mock! {
    pub Db {}
    impl GigManagement for Db {
        async fn insert_gig(&self, gig: NewGig) -> Result<Gig, GigApiError>;
        async fn fetch_gig(&self, id: i64) -> Result<Option<Gig>, GigApiError>;
        async fn search_gigs(&self, query: GigQueryFilter) -> Result<Vec<Gig>, GigApiError>;
        async fn update_gig(&self, id: i64, update: GigUpdate) -> Result<Option<Gig>, GigApiError>;
        async fn delete_gig(&self, id: i64) -> Result<bool, GigApiError>;
    }
    impl OrderManagement for Db {
        async fn fetch_pending_order(&self, buyer_id: i64, gig_id: i64) -> Result<Option<Order>, OrderFlowError>;
        async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;
        async fn confirm_order(&self, payment_intent: &PaymentIntentId, payment_id: &str) -> Result<Option<Order>, OrderFlowError>;
        async fn fetch_orders_for_buyer(&self, buyer_id: i64) -> Result<Vec<Order>, OrderFlowError>;
        async fn fetch_completed_orders_for_seller(&self, seller_id: i64) -> Result<Vec<Order>, OrderFlowError>;
    }
}

mock! {
    pub AuthDb {}
    impl AuthManagement for AuthDb {
        async fn insert_user(&self, user: NewUser) -> Result<User, AuthApiError>;
        async fn fetch_user_by_username(&self, username: &str) -> Result<Option<User>, AuthApiError>;
        async fn fetch_user_by_id(&self, id: i64) -> Result<Option<User>, AuthApiError>;
    }
}
