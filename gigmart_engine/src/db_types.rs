use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

pub use gm_common::{Rupee, INR_CURRENCY_CODE};
pub use sqlx::types::Json;

//--------------------------------------   PaymentIntentId   ---------------------------------------------------------
/// The gateway-assigned order identifier a pending order is keyed on, e.g. "order_9A33XWu170gUtm".
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct PaymentIntentId(pub String);

impl FromStr for PaymentIntentId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for PaymentIntentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for PaymentIntentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PaymentIntentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------        User        ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_seller: bool,
    pub img: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_seller: bool,
    pub img: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
}

//--------------------------------------        Gig         ----------------------------------------------------------
/// A seller's listed service offering.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Gig {
    pub id: i64,
    pub seller_id: i64,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Always in paisa. Decimal rupee values are converted once at the API boundary.
    pub price: Rupee,
    pub cover: String,
    pub images: Json<Vec<String>>,
    pub features: Json<Vec<String>>,
    pub delivery_days: i64,
    pub revision_count: i64,
    pub total_stars: i64,
    pub star_count: i64,
    /// Number of confirmed purchases. Incremented only by payment confirmation.
    pub sales: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGig {
    pub seller_id: i64,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: Rupee,
    pub cover: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub delivery_days: i64,
    pub revision_count: i64,
}

/// A partial update to a gig. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct GigUpdate {
    pub new_title: Option<String>,
    pub new_category: Option<String>,
    pub new_description: Option<String>,
    pub new_price: Option<Rupee>,
    pub new_cover: Option<String>,
    pub new_images: Option<Vec<String>>,
    pub new_features: Option<Vec<String>>,
    pub new_delivery_days: Option<i64>,
    pub new_revision_count: Option<i64>,
}

impl GigUpdate {
    pub fn is_empty(&self) -> bool {
        self.new_title.is_none() &&
            self.new_category.is_none() &&
            self.new_description.is_none() &&
            self.new_price.is_none() &&
            self.new_cover.is_none() &&
            self.new_images.is_none() &&
            self.new_features.is_none() &&
            self.new_delivery_days.is_none() &&
            self.new_revision_count.is_none()
    }
}

//--------------------------------------       Order        ----------------------------------------------------------
/// A buyer's purchase attempt against a gig, tracked through payment completion.
///
/// Title, price and cover are snapshots taken at purchase time, so the order survives edits to
/// the gig as well as its deletion.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub gig_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub title: String,
    pub price: Rupee,
    pub cover: String,
    pub payment_intent: PaymentIntentId,
    /// The gateway payment id. Set only when payment is confirmed.
    pub payment_id: Option<String>,
    /// Monotonic: flips false→true exactly once, and never reverts.
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub gig_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub title: String,
    pub price: Rupee,
    pub cover: String,
    pub payment_intent: PaymentIntentId,
}

impl NewOrder {
    /// Builds the order snapshot for a gig the given buyer is checking out.
    pub fn for_gig(gig: &Gig, buyer_id: i64, payment_intent: PaymentIntentId) -> Self {
        Self {
            gig_id: gig.id,
            buyer_id,
            seller_id: gig.seller_id,
            title: gig.title.clone(),
            price: gig.price,
            cover: gig.cover.clone(),
            payment_intent,
        }
    }
}

//--------------------------------------    Conversation    ----------------------------------------------------------
/// A buyer–seller message thread. The key is the deterministic `"{seller_id}:{buyer_id}"`
/// concatenation, so the same pair always lands in the same thread.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub key: String,
    pub seller_id: i64,
    pub buyer_id: i64,
    pub read_by_seller: bool,
    pub read_by_buyer: bool,
    pub last_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewConversation {
    pub key: String,
    pub seller_id: i64,
    pub buyer_id: i64,
    pub read_by_seller: bool,
    pub read_by_buyer: bool,
}

//--------------------------------------      Message       ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub conversation_key: String,
    pub sender_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub conversation_key: String,
    pub sender_id: i64,
    pub body: String,
}
