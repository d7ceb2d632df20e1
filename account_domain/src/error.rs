use account_data::AccountDataError;
use thiserror::Error;

/// Domain-level authentication and account errors
///
/// Bad username and bad password are deliberately the same variant; callers
/// must not be able to tell which check failed. Transport boundaries are
/// responsible for mapping variants to status codes (they may fold
/// `InvalidToken` and `TokenExpired` into a single 401).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Account is inactive")]
    InactiveAccount,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Account not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token creation error")]
    TokenCreation,

    #[error("Password hashing error")]
    Hashing,

    #[error("Store error: {0}")]
    Store(#[from] AccountDataError),
}

/// Result type for domain operations
pub type AuthResult<T> = Result<T, AuthError>;
