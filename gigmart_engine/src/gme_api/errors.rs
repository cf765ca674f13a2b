use gm_common::Rupee;
use thiserror::Error;

use crate::traits::PaymentGatewayError;

//--------------------------------------   OrderFlowError   ----------------------------------------------------------
#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("We have an internal database error (configuration/uptime etc.): {0}")]
    DatabaseError(String),
    #[error("Gig {0} does not exist")]
    GigNotFound(i64),
    #[error("Gig price {0} is not a valid amount for checkout")]
    InvalidGigPrice(Rupee),
    #[error("Sellers cannot purchase their own gigs")]
    SelfPurchase,
    #[error("A checkout for this gig is already in progress, please wait")]
    CheckoutInProgress,
    #[error("A pending order for this gig already exists")]
    DuplicatePendingOrder,
    #[error("The payment system is not available right now. {0}")]
    PaymentGatewayUnavailable(String),
    #[error("The payment signature is invalid")]
    InvalidPaymentSignature,
    #[error("Order {0} was not found, or has already been completed")]
    OrderNotFoundOrCompleted(String),
}

impl From<sqlx::Error> for OrderFlowError {
    fn from(e: sqlx::Error) -> Self {
        OrderFlowError::DatabaseError(e.to_string())
    }
}

impl From<PaymentGatewayError> for OrderFlowError {
    fn from(e: PaymentGatewayError) -> Self {
        OrderFlowError::PaymentGatewayUnavailable(e.to_string())
    }
}

//--------------------------------------    GigApiError     ----------------------------------------------------------
#[derive(Debug, Clone, Error)]
pub enum GigApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Gig {0} does not exist")]
    GigNotFound(i64),
    #[error("Only sellers may publish gigs")]
    OnlySellers,
    #[error("You can only modify your own gigs")]
    NotOwner,
}

impl From<sqlx::Error> for GigApiError {
    fn from(e: sqlx::Error) -> Self {
        GigApiError::DatabaseError(e.to_string())
    }
}

//--------------------------------------    ChatApiError    ----------------------------------------------------------
#[derive(Debug, Clone, Error)]
pub enum ChatApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Conversation {0} does not exist")]
    ConversationNotFound(String),
    #[error("Conversation {0} already exists")]
    ConversationExists(String),
    #[error("You are not a participant in conversation {0}")]
    NotParticipant(String),
}

impl From<sqlx::Error> for ChatApiError {
    fn from(e: sqlx::Error) -> Self {
        ChatApiError::DatabaseError(e.to_string())
    }
}

//--------------------------------------    AuthApiError    ----------------------------------------------------------
#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("That username or email is already registered")]
    UsernameTaken,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("User {0} does not exist")]
    UserNotFound(i64),
    #[error("Could not process the password: {0}")]
    HashingError(String),
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        AuthApiError::DatabaseError(e.to_string())
    }
}
