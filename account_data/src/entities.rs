//! Database entities for user accounts

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity for MongoDB
///
/// `hashed_password` is an opaque digest produced by the domain layer; the
/// raw password never appears in a stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub disabled: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl UserEntity {
    pub fn new(username: String, email: String, hashed_password: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            username,
            email,
            hashed_password,
            disabled: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Field-level update for a user document
///
/// Only the fields present are written; everything else is left untouched by
/// a single `$set` on the document.
#[derive(Debug, Clone, Default)]
pub struct UserUpdateFields {
    pub username: Option<String>,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub disabled: Option<bool>,
}
