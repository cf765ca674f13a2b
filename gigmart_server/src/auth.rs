use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use gigmart_engine::db_types::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// The authenticated identity attached to each request: who is calling, and on which side of
/// the marketplace. Handlers and the engine trust these as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub user_id: i64,
    pub is_seller: bool,
    /// Expiry, in seconds since the epoch.
    pub exp: i64,
}

/// Signs and verifies session tokens (HS256). Registered as app data so the [`JwtClaims`]
/// extractor can reach it.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.reveal().as_bytes();
        Self { encoding_key: EncodingKey::from_secret(secret), decoding_key: DecodingKey::from_secret(secret) }
    }

    /// Issue a new access token for the given account. Credential verification must happen
    /// before this is called.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let exp = (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp();
        let claims = JwtClaims { user_id: user.id, is_seller: user.is_seller, exp };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| AuthError::ValidationError(e.to_string()))
    }

    pub fn decode_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;
        Ok(data.claims)
    }
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req))
    }
}

fn claims_from_request(req: &HttpRequest) -> Result<JwtClaims, ServerError> {
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| ServerError::InitializeError("TokenIssuer is not registered".to_string()))?;
    let header = req.headers().get(header::AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::PoorlyFormattedToken("expected a Bearer token".to_string()))?;
    let claims = issuer.decode_token(token)?;
    trace!("💻️ Request authenticated for user #{}", claims.user_id);
    Ok(claims)
}

#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use gm_common::Secret;

    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig { jwt_secret: Secret::new("a-secret-that-is-long-enough-for-testing".into()) })
    }

    fn user(id: i64, is_seller: bool) -> User {
        User {
            id,
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: String::new(),
            is_seller,
            img: None,
            country: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn tokens_round_trip() {
        let issuer = issuer();
        let token = issuer.issue_token(&user(7, true)).unwrap();
        let claims = issuer.decode_token(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert!(claims.is_seller);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let issuer = issuer();
        let mut token = issuer.issue_token(&user(7, false)).unwrap();
        token.pop();
        assert!(issuer.decode_token(&token).is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let issuer = issuer();
        let exp = (Utc::now() - Duration::hours(2)).timestamp();
        let claims = JwtClaims { user_id: 7, is_seller: false, exp };
        let token = encode(&Header::default(), &claims, &issuer.encoding_key).unwrap();
        assert!(issuer.decode_token(&token).is_err());
    }
}
