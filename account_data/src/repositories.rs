//! Repository implementations for account data access

use crate::entities::{UserEntity, UserUpdateFields};
use crate::error::{AccountDataError, DataResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// User repository trait
///
/// Every mutation is atomic at the single-document level; no multi-document
/// transactions are required by the callers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &ObjectId) -> DataResult<Option<UserEntity>>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str)
        -> DataResult<Option<UserEntity>>;

    /// Insert a new user and return the stored document with its assigned id
    async fn insert(&self, user: UserEntity) -> DataResult<UserEntity>;

    /// Apply a field-level update to a user document and return the updated
    /// document, or `None` if no document matched
    async fn update(
        &self,
        id: &ObjectId,
        fields: UserUpdateFields,
    ) -> DataResult<Option<UserEntity>>;

    /// Set the `disabled` flag on the user with the given username
    ///
    /// Returns whether a document matched.
    async fn set_disabled(&self, username: &str, disabled: bool)
        -> DataResult<bool>;

    /// Delete a user and return the removed document, or `None` if absent
    async fn delete(&self, id: &ObjectId) -> DataResult<Option<UserEntity>>;

    /// List all users
    async fn list(&self) -> DataResult<Vec<UserEntity>>;
}

/// MongoDB implementation of UserRepository
pub struct MongoUserRepository {
    db: Arc<RwLock<Database>>,
    collection_name: String,
}

impl MongoUserRepository {
    /// Create a new MongoDB user repository
    pub fn new(db: Arc<RwLock<Database>>, collection_name: String) -> Self {
        Self {
            db,
            collection_name,
        }
    }

    /// Get the users collection
    async fn collection(&self) -> Collection<UserEntity> {
        self.db.read().await.collection(&self.collection_name)
    }

    fn set_document(fields: UserUpdateFields) -> Document {
        let mut set = doc! { "updated_at": Utc::now() };
        if let Some(username) = fields.username {
            set.insert("username", username);
        }
        if let Some(email) = fields.email {
            set.insert("email", email);
        }
        if let Some(hashed_password) = fields.hashed_password {
            set.insert("hashed_password", hashed_password);
        }
        if let Some(disabled) = fields.disabled {
            set.insert("disabled", disabled);
        }
        set
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> DataResult<Option<UserEntity>> {
        let filter = doc! { "_id": id };
        let coll = self.collection().await;
        let result = coll.find_one(filter).await?;
        Ok(result)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> DataResult<Option<UserEntity>> {
        let filter = doc! { "username": username };
        let coll = self.collection().await;
        let result = coll.find_one(filter).await?;
        Ok(result)
    }

    async fn insert(&self, mut user: UserEntity) -> DataResult<UserEntity> {
        let coll = self.collection().await;
        let result = coll.insert_one(user.clone()).await?;

        user.id = result.inserted_id.as_object_id();
        if user.id.is_none() {
            return Err(AccountDataError::InternalError(
                "insert did not return an ObjectId".to_string(),
            ));
        }

        tracing::debug!(username = %user.username, "user document inserted");

        Ok(user)
    }

    async fn update(
        &self,
        id: &ObjectId,
        fields: UserUpdateFields,
    ) -> DataResult<Option<UserEntity>> {
        let coll = self.collection().await;
        let filter = doc! { "_id": id };
        let update = doc! { "$set": Self::set_document(fields) };

        let result = coll
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(result)
    }

    async fn set_disabled(
        &self,
        username: &str,
        disabled: bool,
    ) -> DataResult<bool> {
        let coll = self.collection().await;
        let filter = doc! { "username": username };
        let update = doc! {
            "$set": {
                "disabled": disabled,
                "updated_at": Utc::now()
            }
        };

        let result = coll.update_one(filter, update).await?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &ObjectId) -> DataResult<Option<UserEntity>> {
        let coll = self.collection().await;
        let filter = doc! { "_id": id };
        let result = coll.find_one_and_delete(filter).await?;

        if result.is_some() {
            tracing::info!(%id, "user document deleted");
        }

        Ok(result)
    }

    async fn list(&self) -> DataResult<Vec<UserEntity>> {
        let coll = self.collection().await;
        let cursor = coll.find(doc! {}).await?;
        let users = cursor.try_collect().await?;
        Ok(users)
    }
}

/// In-memory implementation of UserRepository
///
/// Backs the domain-service tests and local development; mutations take the
/// write lock for the whole call, giving the same single-document atomicity
/// the MongoDB implementation gets from `update_one`.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<ObjectId, UserEntity>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> DataResult<Option<UserEntity>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> DataResult<Option<UserEntity>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, mut user: UserEntity) -> DataResult<UserEntity> {
        let mut users = self.users.write().await;
        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: &ObjectId,
        fields: UserUpdateFields,
    ) -> DataResult<Option<UserEntity>> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(id) else {
            return Ok(None);
        };

        if let Some(username) = fields.username {
            user.username = username;
        }
        if let Some(email) = fields.email {
            user.email = email;
        }
        if let Some(hashed_password) = fields.hashed_password {
            user.hashed_password = hashed_password;
        }
        if let Some(disabled) = fields.disabled {
            user.disabled = disabled;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn set_disabled(
        &self,
        username: &str,
        disabled: bool,
    ) -> DataResult<bool> {
        let mut users = self.users.write().await;
        let Some(user) = users.values_mut().find(|u| u.username == username) else {
            return Ok(false);
        };

        user.disabled = disabled;
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: &ObjectId) -> DataResult<Option<UserEntity>> {
        let mut users = self.users.write().await;
        Ok(users.remove(id))
    }

    async fn list(&self) -> DataResult<Vec<UserEntity>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }
}
