use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain view of a user account
///
/// Carries no password material; the mapper from the stored entity drops the
/// digest before anything leaves the domain layer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Username
    pub exp: i64,    // Expiration timestamp
    pub iat: i64,    // Issued at timestamp
}

/// Data for creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Data for updating an account
///
/// Absent fields are left unchanged; a present password is re-hashed before
/// persistence.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}
