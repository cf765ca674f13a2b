use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use gigmart_engine::{AuthApiError, ChatApiError, GigApiError, OrderFlowError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error(transparent)]
    OrderFlowError(#[from] OrderFlowError),
    #[error(transparent)]
    GigError(#[from] GigApiError),
    #[error(transparent)]
    ChatError(#[from] ChatApiError),
    #[error(transparent)]
    AccountError(#[from] AuthApiError),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            Self::OrderFlowError(e) => match e {
                OrderFlowError::GigNotFound(_) => StatusCode::NOT_FOUND,
                OrderFlowError::OrderNotFoundOrCompleted(_) => StatusCode::NOT_FOUND,
                OrderFlowError::InvalidGigPrice(_) => StatusCode::BAD_REQUEST,
                OrderFlowError::InvalidPaymentSignature => StatusCode::BAD_REQUEST,
                OrderFlowError::SelfPurchase => StatusCode::FORBIDDEN,
                OrderFlowError::CheckoutInProgress => StatusCode::CONFLICT,
                OrderFlowError::DuplicatePendingOrder => StatusCode::CONFLICT,
                OrderFlowError::PaymentGatewayUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                OrderFlowError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::GigError(e) => match e {
                GigApiError::GigNotFound(_) => StatusCode::NOT_FOUND,
                GigApiError::OnlySellers => StatusCode::FORBIDDEN,
                GigApiError::NotOwner => StatusCode::FORBIDDEN,
                GigApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::ChatError(e) => match e {
                ChatApiError::ConversationNotFound(_) => StatusCode::NOT_FOUND,
                ChatApiError::ConversationExists(_) => StatusCode::CONFLICT,
                ChatApiError::NotParticipant(_) => StatusCode::FORBIDDEN,
                ChatApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::AccountError(e) => match e {
                AuthApiError::UsernameTaken => StatusCode::CONFLICT,
                AuthApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthApiError::UserNotFound(_) => StatusCode::NOT_FOUND,
                AuthApiError::HashingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AuthApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("An authorization token is required.")]
    MissingToken,
    #[error("Auth token is invalid or expired. {0}")]
    ValidationError(String),
    #[error("Auth token is not in the correct format. {0}")]
    PoorlyFormattedToken(String),
}
