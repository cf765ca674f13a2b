use std::fmt::Display;

use gigmart_engine::{
    db_types::{GigUpdate, NewGig, Order, Rupee, User},
    order_objects::{CheckoutIntent, GigQueryFilter, GigSort, PaymentConfirmation},
};
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

//--------------------------------------       Auth DTOs       -------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub is_seller: bool,
}

impl TokenResponse {
    pub fn for_user(user: &User, token: String) -> Self {
        Self { token, user_id: user.id, username: user.username.clone(), is_seller: user.is_seller }
    }
}

//--------------------------------------      Order DTOs       -------------------------------------------------------
/// Field names follow what the gateway's checkout script posts back to the client, so the
/// frontend can forward the callback payload untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmationPayload {
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

impl PaymentConfirmationPayload {
    /// All three fields are required; anything less is a malformed confirmation.
    pub fn into_confirmation(self) -> Result<PaymentConfirmation, ServerError> {
        match (self.razorpay_order_id, self.razorpay_payment_id, self.razorpay_signature) {
            (Some(order_id), Some(payment_id), Some(signature)) => {
                Ok(PaymentConfirmation { order_id, payment_id, signature })
            },
            _ => Err(ServerError::InvalidRequestBody("Missing required payment information".to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: String,
    /// In minor currency units (paisa).
    pub amount: i64,
    pub currency: String,
    pub title: String,
}

impl From<CheckoutIntent> for CheckoutResponse {
    fn from(intent: CheckoutIntent) -> Self {
        Self {
            order_id: intent.order_id,
            amount: intent.amount.value(),
            currency: intent.currency,
            title: intent.title,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmResponse {
    pub message: String,
    pub order: Order,
}

//--------------------------------------       Gig DTOs        -------------------------------------------------------
/// Prices cross the API boundary in decimal rupees and are held in paisa from here on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGigRequest {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Decimal rupees.
    pub price: f64,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub delivery_days: i64,
    #[serde(default)]
    pub revision_count: i64,
}

impl NewGigRequest {
    pub fn into_new_gig(self, seller_id: i64) -> NewGig {
        NewGig {
            seller_id,
            title: self.title,
            category: self.category,
            description: self.description,
            price: Rupee::from_rupees(self.price),
            cover: self.cover,
            images: self.images,
            features: self.features,
            delivery_days: self.delivery_days,
            revision_count: self.revision_count,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGigRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Decimal rupees.
    pub price: Option<f64>,
    pub cover: Option<String>,
    pub images: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub delivery_days: Option<i64>,
    pub revision_count: Option<i64>,
}

impl From<UpdateGigRequest> for GigUpdate {
    fn from(req: UpdateGigRequest) -> Self {
        GigUpdate {
            new_title: req.title,
            new_category: req.category,
            new_description: req.description,
            new_price: req.price.map(Rupee::from_rupees),
            new_cover: req.cover,
            new_images: req.images,
            new_features: req.features,
            new_delivery_days: req.delivery_days,
            new_revision_count: req.revision_count,
        }
    }
}

/// Catalog search query parameters, matching the names the storefront has always sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GigSearchParams {
    #[serde(rename = "userId")]
    pub seller_id: Option<i64>,
    #[serde(rename = "cat")]
    pub category: Option<String>,
    /// Minimum price, decimal rupees.
    pub min: Option<f64>,
    /// Maximum price, decimal rupees.
    pub max: Option<f64>,
    pub search: Option<String>,
    /// One of "sales", "price" or "createdAt".
    pub sort: Option<String>,
}

impl From<GigSearchParams> for GigQueryFilter {
    fn from(params: GigSearchParams) -> Self {
        let sort = params.sort.as_deref().map(|s| match s {
            "sales" => GigSort::Sales,
            "price" => GigSort::Price,
            _ => GigSort::CreatedAt,
        });
        GigQueryFilter {
            seller_id: params.seller_id,
            category: params.category,
            min_price: params.min.map(Rupee::from_rupees),
            max_price: params.max.map(Rupee::from_rupees),
            search: params.search,
            sort,
        }
    }
}

//--------------------------------------       Chat DTOs       -------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConversationRequest {
    /// The other party's user id.
    pub to: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageRequest {
    pub conversation_key: String,
    pub body: String,
}
