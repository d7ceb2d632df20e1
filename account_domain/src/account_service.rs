use crate::error::{AuthError, AuthResult};
use crate::hashing_service::HashingService;
use crate::mappers::user_entity_to_user;
use crate::models::{AccountUpdate, NewAccount, User};
use crate::sanitize::{sanitize_text, validate_email, validate_password, validate_username};
use account_data::entities::{UserEntity, UserUpdateFields};
use account_data::repositories::UserRepository;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info};

/// Account CRUD service
///
/// Writes guard what enters the store: raw passwords pass through the
/// credential hasher and free-text fields through sanitization. Reads and
/// deletes are id-based passthroughs.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and return the stored record
    async fn create(&self, account: NewAccount) -> AuthResult<User>;

    /// Fetch an account by id
    async fn get(&self, id: &str) -> AuthResult<User>;

    /// List all accounts
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Apply a partial update; a present password is re-hashed
    async fn update(&self, id: &str, update: AccountUpdate) -> AuthResult<User>;

    /// Delete an account and return the removed record
    async fn delete(&self, id: &str) -> AuthResult<User>;
}

/// Implementation of AccountService
pub struct AccountServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    hashing_service: Arc<dyn HashingService>,
}

impl AccountServiceImpl {
    /// Create a new account service instance
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        hashing_service: Arc<dyn HashingService>,
    ) -> Self {
        Self {
            user_repository,
            hashing_service,
        }
    }

    fn parse_id(id: &str) -> AuthResult<ObjectId> {
        ObjectId::parse_str(id)
            .map_err(|_| AuthError::InvalidInput("Invalid account id".to_string()))
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn create(&self, account: NewAccount) -> AuthResult<User> {
        validate_username(&account.username)?;
        validate_email(&account.email)?;
        validate_password(&account.password)?;

        let username = sanitize_text(&account.username);
        let email = sanitize_text(&account.email);

        let exists = self
            .user_repository
            .find_by_username(&username)
            .await
            .map_err(|e| {
                error!("Failed to check username existence: {}", e);
                AuthError::Store(e)
            })?
            .is_some();
        if exists {
            return Err(AuthError::UsernameTaken);
        }

        // Hashing and the insert are not separately observable; a failed
        // hash leaves no partial state behind.
        let hashed_password = self.hashing_service.hash(&account.password)?;

        let user = self
            .user_repository
            .insert(UserEntity::new(username, email, hashed_password))
            .await
            .map_err(|e| {
                error!("Failed to insert user: {}", e);
                AuthError::Store(e)
            })?;

        info!(username = %user.username, "account created");

        Ok(user_entity_to_user(user))
    }

    async fn get(&self, id: &str) -> AuthResult<User> {
        let id = Self::parse_id(id)?;
        let user = self
            .user_repository
            .find_by_id(&id)
            .await?
            .ok_or(AuthError::NotFound)?;

        Ok(user_entity_to_user(user))
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let users = self.user_repository.list().await?;
        Ok(users.into_iter().map(user_entity_to_user).collect())
    }

    async fn update(&self, id: &str, update: AccountUpdate) -> AuthResult<User> {
        let id = Self::parse_id(id)?;

        let mut fields = UserUpdateFields::default();

        if let Some(username) = update.username {
            validate_username(&username)?;
            fields.username = Some(sanitize_text(&username));
        }
        if let Some(email) = update.email {
            validate_email(&email)?;
            fields.email = Some(sanitize_text(&email));
        }
        if let Some(password) = update.password {
            validate_password(&password)?;
            fields.hashed_password = Some(self.hashing_service.hash(&password)?);
        }

        let user = self
            .user_repository
            .update(&id, fields)
            .await
            .map_err(|e| {
                error!("Failed to update user: {}", e);
                AuthError::Store(e)
            })?
            .ok_or(AuthError::NotFound)?;

        Ok(user_entity_to_user(user))
    }

    async fn delete(&self, id: &str) -> AuthResult<User> {
        let id = Self::parse_id(id)?;
        let user = self
            .user_repository
            .delete(&id)
            .await?
            .ok_or(AuthError::NotFound)?;

        Ok(user_entity_to_user(user))
    }
}
