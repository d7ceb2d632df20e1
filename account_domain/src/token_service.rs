use crate::error::{AuthError, AuthResult};
use crate::models::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Signing algorithm is fixed; only the secret and TTL are configuration.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token configuration, read once at startup and injected at construction
pub struct TokenConfig {
    pub secret: String,
    pub ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: String, ttl: Duration) -> Self {
        Self { secret, ttl }
    }
}

/// Token service for issuing and validating access tokens
///
/// `verify` is the single validation gate: token errors never drive control
/// flow anywhere else in the system.
pub trait TokenService: Send + Sync {
    /// Issue a signed token for a subject with an explicit TTL
    fn issue(&self, subject: &str, ttl: Duration) -> AuthResult<String>;

    /// Issue a signed token with the configured default TTL
    fn issue_default(&self, subject: &str) -> AuthResult<String>;

    /// Validate signature and expiry, returning the claims
    ///
    /// Fails with `TokenExpired` when `exp <= now` and `InvalidToken` when
    /// the signature check fails or the payload is malformed.
    fn verify(&self, token: &str) -> AuthResult<Claims>;
}

/// JWT implementation of TokenService
pub struct JwtTokenService {
    config: TokenConfig,
}

impl JwtTokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &str, ttl: Duration) -> AuthResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        let key = EncodingKey::from_secret(self.config.secret.as_bytes());
        encode(&Header::new(ALGORITHM), &claims, &key).map_err(|e| {
            tracing::error!("Failed to encode token: {}", e);
            AuthError::TokenCreation
        })
    }

    fn issue_default(&self, subject: &str) -> AuthResult<String> {
        self.issue(subject, self.config.ttl)
    }

    fn verify(&self, token: &str) -> AuthResult<Claims> {
        let key = DecodingKey::from_secret(self.config.secret.as_bytes());
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        // The library only rejects exp < now; a token expiring this exact
        // second must already be dead.
        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtTokenService {
        JwtTokenService::new(TokenConfig::new(
            secret.to_string(),
            Duration::minutes(30),
        ))
    }

    #[test]
    fn issued_token_verifies_with_expected_claims() {
        let service = service("test-secret");
        let token = service.issue_default("alice").unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = service("test-secret");
        let token = service.issue("alice", Duration::seconds(-60)).unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn zero_ttl_token_is_rejected() {
        let service = service("test-secret");
        // exp == now at issuance; already dead on the next check.
        let token = service.issue("alice", Duration::zero()).unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn token_signed_with_different_secret_is_rejected() {
        let issuer = service("secret-a");
        let verifier = service("secret-b");
        let token = issuer.issue_default("alice").unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = service("test-secret");

        assert!(matches!(
            service.verify("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(service.verify(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let service = service("test-secret");
        let token = service.issue_default("alice").unwrap();

        // Flip a character inside the payload segment.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = format!("A{}", &parts[1][1..]);
        let tampered = parts.join(".");

        assert!(matches!(
            service.verify(&tampered),
            Err(AuthError::InvalidToken)
        ));
    }
}
