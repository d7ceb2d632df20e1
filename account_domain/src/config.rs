//! Process-wide configuration, read once at startup
//!
//! The signing secret is never a literal in code; it is loaded from the
//! environment and injected into the services at construction.

use crate::error::{AuthError, AuthResult};
use chrono::Duration;
use std::env;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Configuration consumed by the auth and account services
pub struct AuthConfig {
    pub token_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Load configuration from the environment
    ///
    /// `TOKEN_SECRET` is required; `TOKEN_TTL_MINUTES` and `BCRYPT_COST`
    /// fall back to safe defaults.
    pub fn from_env() -> AuthResult<Self> {
        let token_secret = env::var("TOKEN_SECRET")
            .map_err(|_| AuthError::Config("TOKEN_SECRET must be set".to_string()))?;

        let ttl_minutes = match env::var("TOKEN_TTL_MINUTES") {
            Ok(v) => v.parse::<i64>().map_err(|_| {
                AuthError::Config("TOKEN_TTL_MINUTES must be an integer".to_string())
            })?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(v) => v
                .parse::<u32>()
                .map_err(|_| AuthError::Config("BCRYPT_COST must be an integer".to_string()))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            token_secret,
            token_ttl: Duration::minutes(ttl_minutes),
            bcrypt_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-wide environment is only touched once.
    #[test]
    fn from_env_requires_secret_and_defaults_the_rest() {
        env::remove_var("TOKEN_SECRET");
        assert!(matches!(
            AuthConfig::from_env(),
            Err(AuthError::Config(_))
        ));

        env::set_var("TOKEN_SECRET", "test-secret");
        env::remove_var("TOKEN_TTL_MINUTES");
        env::remove_var("BCRYPT_COST");

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.token_secret, "test-secret");
        assert_eq!(config.token_ttl, Duration::minutes(30));
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);

        env::set_var("TOKEN_TTL_MINUTES", "5");
        env::set_var("BCRYPT_COST", "10");
        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.token_ttl, Duration::minutes(5));
        assert_eq!(config.bcrypt_cost, 10);

        env::remove_var("TOKEN_SECRET");
        env::remove_var("TOKEN_TTL_MINUTES");
        env::remove_var("BCRYPT_COST");
    }
}
