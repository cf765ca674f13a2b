use std::env;

use gm_common::Secret;
use log::*;
use rand::{distributions::Alphanumeric, Rng};
use razorpay_tools::RazorpayConfig;

use crate::errors::ServerError;

const DEFAULT_GM_HOST: &str = "127.0.0.1";
const DEFAULT_GM_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// Razorpay credentials. Shared out-of-band via the RAZORPAY_* environment variables.
    pub razorpay: RazorpayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GM_HOST.to_string(),
            port: DEFAULT_GM_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
            razorpay: RazorpayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("GM_HOST").ok().unwrap_or_else(|| DEFAULT_GM_HOST.into());
        let port = env::var("GM_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for GM_PORT. {e} Using the default, {DEFAULT_GM_PORT}, instead.");
                    DEFAULT_GM_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_GM_PORT);
        let database_url = env::var("GM_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ GM_DATABASE_URL is not set. Please set it to the URL for the GigMart database.");
            String::default()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to \
                 the default configuration."
            );
            AuthConfig::default()
        });
        let razorpay = RazorpayConfig::new_from_env_or_default();
        Self { host, port, database_url, auth, razorpay }
    }
}

//-------------------------------------------------  AuthConfig  ------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The secret used to sign and verify session JWTs (HS256).
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. Tokens will \
             not survive a restart, and multiple instances will not accept each other's tokens. Set GM_JWT_SECRET in \
             production. 🚨️🚨️🚨️"
        );
        let secret: String = rand::thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect();
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("GM_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [GM_JWT_SECRET]")))?;
        if secret.len() < 32 {
            return Err(ServerError::ConfigurationError(
                "GM_JWT_SECRET must be at least 32 characters long.".to_string(),
            ));
        }
        Ok(Self { jwt_secret: Secret::new(secret) })
    }
}
