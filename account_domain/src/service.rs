use crate::error::{AuthError, AuthResult};
use crate::hashing_service::HashingService;
use crate::mappers::user_entity_to_user;
use crate::models::User;
use crate::token_service::TokenService;
use account_data::repositories::UserRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Auth service trait defining the session-trust boundary
///
/// Stateless per call; safe to invoke concurrently without locking. The only
/// shared mutable resource is the user store behind `UserRepository`.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check a username/password pair against the store
    ///
    /// Unknown username and wrong password return the same
    /// `InvalidCredentials`; callers cannot tell which check failed.
    async fn authenticate(&self, username: &str, raw_password: &str) -> AuthResult<User>;

    /// Authenticate and issue an access token with the default TTL
    ///
    /// A successful login clears the account's `disabled` flag, re-enabling
    /// a previously disabled account. This is part of the observable
    /// contract and must not be dropped without product sign-off.
    async fn login(&self, username: &str, raw_password: &str) -> AuthResult<String>;

    /// Resolve a bearer token to the current user
    ///
    /// The user is re-fetched fresh from the store on every call, so
    /// disabling an account takes effect on the next request even while the
    /// token itself is still valid.
    async fn resolve(&self, token: &str) -> AuthResult<User>;
}

/// Implementation of AuthService
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    token_service: Arc<dyn TokenService>,
    hashing_service: Arc<dyn HashingService>,
    dummy_digest: String,
}

impl AuthServiceImpl {
    /// Create a new auth service instance
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        token_service: Arc<dyn TokenService>,
        hashing_service: Arc<dyn HashingService>,
    ) -> Self {
        // Verified against on the missing-user path so both credential
        // failures cost one hash comparison. An empty fallback digest still
        // verifies false.
        let dummy_digest = hashing_service
            .hash("missing-user-placeholder")
            .unwrap_or_default();

        Self {
            user_repository,
            token_service,
            hashing_service,
            dummy_digest,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn authenticate(&self, username: &str, raw_password: &str) -> AuthResult<User> {
        let user = self
            .user_repository
            .find_by_username(username)
            .await
            .map_err(|e| {
                error!("Failed to find user by username: {}", e);
                AuthError::Store(e)
            })?;

        let digest = match &user {
            Some(entity) => entity.hashed_password.as_str(),
            None => self.dummy_digest.as_str(),
        };
        let valid = self.hashing_service.verify(raw_password, digest);

        match user {
            Some(entity) if valid => Ok(user_entity_to_user(entity)),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn login(&self, username: &str, raw_password: &str) -> AuthResult<String> {
        let user = self.authenticate(username, raw_password).await?;

        let token = self.token_service.issue_default(&user.username)?;

        // Observable contract: a successful login re-enables the account.
        self.user_repository
            .set_disabled(&user.username, false)
            .await
            .map_err(|e| {
                error!("Failed to clear disabled flag on login: {}", e);
                AuthError::Store(e)
            })?;

        info!(username = %user.username, "login succeeded");

        Ok(token)
    }

    async fn resolve(&self, token: &str) -> AuthResult<User> {
        let claims = self.token_service.verify(token)?;

        let user = self
            .user_repository
            .find_by_username(&claims.sub)
            .await
            .map_err(|e| {
                error!("Failed to find user for token subject: {}", e);
                AuthError::Store(e)
            })?
            .ok_or_else(|| {
                debug!("token subject no longer exists");
                AuthError::Unauthorized
            })?;

        if user.disabled {
            return Err(AuthError::InactiveAccount);
        }

        Ok(user_entity_to_user(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing_service::BcryptHashingService;
    use crate::token_service::{JwtTokenService, TokenConfig};
    use account_data::entities::UserEntity;
    use account_data::repositories::MemoryUserRepository;
    use chrono::Duration;

    const TEST_PASSWORD: &str = "secret1";

    struct Harness {
        service: AuthServiceImpl,
        repo: Arc<MemoryUserRepository>,
        tokens: Arc<JwtTokenService>,
    }

    fn setup() -> Harness {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let repo = Arc::new(MemoryUserRepository::new());
        let tokens = Arc::new(JwtTokenService::new(TokenConfig::new(
            "test-secret".to_string(),
            Duration::minutes(30),
        )));
        // Low bcrypt cost keeps the tests fast.
        let hasher = Arc::new(BcryptHashingService::new(4));

        let service = AuthServiceImpl::new(repo.clone(), tokens.clone(), hasher);

        Harness {
            service,
            repo,
            tokens,
        }
    }

    async fn create_user(harness: &Harness, username: &str, disabled: bool) -> UserEntity {
        let hasher = BcryptHashingService::new(4);
        let mut entity = UserEntity::new(
            username.to_string(),
            format!("{username}@example.com"),
            hasher.hash(TEST_PASSWORD).unwrap(),
        );
        entity.disabled = disabled;
        harness.repo.insert(entity).await.unwrap()
    }

    #[tokio::test]
    async fn login_then_resolve_end_to_end() {
        let harness = setup();
        create_user(&harness, "alice", false).await;

        // The store never holds the raw password.
        let stored = harness
            .repo
            .find_by_username("alice")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.hashed_password, TEST_PASSWORD);

        let token = harness.service.login("alice", TEST_PASSWORD).await.unwrap();

        let user = harness.service.resolve(&token).await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(!user.disabled);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_indistinguishable() {
        let harness = setup();
        create_user(&harness, "alice", false).await;

        let wrong = harness.service.login("alice", "wrong").await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

        let ghost = harness.service.login("ghost", "x").await;
        assert!(matches!(ghost, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn authenticate_returns_user_on_success() {
        let harness = setup();
        create_user(&harness, "alice", false).await;

        let user = harness
            .service
            .authenticate("alice", TEST_PASSWORD)
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn login_reenables_disabled_account() {
        let harness = setup();
        create_user(&harness, "alice", true).await;

        let token = harness.service.login("alice", TEST_PASSWORD).await.unwrap();

        let stored = harness
            .repo
            .find_by_username("alice")
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.disabled);

        // The fresh token resolves cleanly until the account is disabled
        // again.
        let user = harness.service.resolve(&token).await.unwrap();
        assert_eq!(user.username, "alice");

        harness.repo.set_disabled("alice", true).await.unwrap();
        assert!(matches!(
            harness.service.resolve(&token).await,
            Err(AuthError::InactiveAccount)
        ));
    }

    #[tokio::test]
    async fn resolve_rejects_token_for_missing_user() {
        let harness = setup();

        let token = harness.tokens.issue_default("ghost").unwrap();
        assert!(matches!(
            harness.service.resolve(&token).await,
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn resolve_propagates_token_failures() {
        let harness = setup();
        create_user(&harness, "alice", false).await;

        let expired = harness
            .tokens
            .issue("alice", Duration::seconds(-60))
            .unwrap();
        assert!(matches!(
            harness.service.resolve(&expired).await,
            Err(AuthError::TokenExpired)
        ));

        assert!(matches!(
            harness.service.resolve("garbage").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn resolve_refetches_after_delete() {
        let harness = setup();
        let entity = create_user(&harness, "alice", false).await;

        let token = harness.service.login("alice", TEST_PASSWORD).await.unwrap();
        harness.repo.delete(&entity.id.unwrap()).await.unwrap();

        // Token is still cryptographically valid but its subject is gone.
        assert!(matches!(
            harness.service.resolve(&token).await,
            Err(AuthError::Unauthorized)
        ));
    }
}
