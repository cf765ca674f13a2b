use gm_common::Secret;
use log::*;

use crate::RazorpayApiError;

pub const RAZORPAY_API_URL: &str = "https://api.razorpay.com";
/// Live and test key ids both carry this prefix.
pub const KEY_ID_PREFIX: &str = "rzp_";
/// Key ids shorter than this cannot be valid.
pub const MIN_KEY_ID_LEN: usize = 20;

#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// The public half of the API credential pair, e.g. "rzp_test_…".
    pub key_id: String,
    /// The shared secret. Also the HMAC key for payment-signature verification.
    pub key_secret: Secret<String>,
    pub api_url: String,
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self { key_id: String::default(), key_secret: Secret::default(), api_url: RAZORPAY_API_URL.to_string() }
    }
}

impl RazorpayConfig {
    pub fn new_from_env_or_default() -> Self {
        let key_id = std::env::var("RAZORPAY_API_KEY").unwrap_or_else(|_| {
            error!("🔐️ RAZORPAY_API_KEY is not set. Order creation will be unavailable until it is.");
            String::default()
        });
        let key_secret = Secret::new(std::env::var("RAZORPAY_API_SECRET").unwrap_or_else(|_| {
            error!("🔐️ RAZORPAY_API_SECRET is not set. Order creation will be unavailable until it is.");
            String::default()
        }));
        let api_url = std::env::var("RAZORPAY_API_URL").unwrap_or_else(|_| RAZORPAY_API_URL.to_string());
        if !key_id.is_empty() {
            info!("🔐️ Razorpay credentials loaded. key id: {}…", truncate_key(&key_id));
        }
        Self { key_id, key_secret, api_url }
    }

    /// Checks that both halves of the credential pair are present and that the key id matches
    /// Razorpay's prefix/length convention. Called at client construction so the server can fail
    /// fast instead of erroring deep inside order creation.
    pub fn validate(&self) -> Result<(), RazorpayApiError> {
        if self.key_id.is_empty() || self.key_secret.is_empty() {
            return Err(RazorpayApiError::Initialization("Razorpay API credentials are missing".to_string()));
        }
        if !self.key_id.starts_with(KEY_ID_PREFIX) || self.key_id.len() < MIN_KEY_ID_LEN {
            return Err(RazorpayApiError::Initialization(format!(
                "Invalid Razorpay API key format: {}…",
                truncate_key(&self.key_id)
            )));
        }
        Ok(())
    }
}

fn truncate_key(key_id: &str) -> String {
    key_id.chars().take(8).collect()
}

#[cfg(test)]
mod test {
    use gm_common::Secret;

    use super::RazorpayConfig;

    fn config(key_id: &str, secret: &str) -> RazorpayConfig {
        RazorpayConfig {
            key_id: key_id.to_string(),
            key_secret: Secret::new(secret.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_credentials_pass() {
        config("rzp_test_AbCdEfGhIjKlMn", "s3cr3t").validate().expect("should validate");
    }

    #[test]
    fn missing_credentials_fail() {
        assert!(config("", "").validate().is_err());
        assert!(config("rzp_test_AbCdEfGhIjKlMn", "").validate().is_err());
    }

    #[test]
    fn malformed_key_id_fails() {
        assert!(config("sk_live_AbCdEfGhIjKlMn", "s3cr3t").validate().is_err());
        assert!(config("rzp_short", "s3cr3t").validate().is_err());
    }
}
