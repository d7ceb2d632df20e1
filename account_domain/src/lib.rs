//! Domain layer for the account service
//!
//! Composes credential hashing, token issuance/validation, and the user
//! store into the authentication and account-CRUD services. All failures are
//! typed `AuthError` values; transport boundaries translate them to status
//! codes.

pub mod account_service;
pub mod config;
pub mod error;
pub mod hashing_service;
pub mod models;
pub mod sanitize;
pub mod service;
pub mod token_service;
mod mappers;

pub use account_service::{AccountService, AccountServiceImpl};
pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use hashing_service::{BcryptHashingService, HashingService};
pub use models::{AccountUpdate, Claims, NewAccount, User};
pub use service::{AuthService, AuthServiceImpl};
pub use token_service::{JwtTokenService, TokenConfig, TokenService};
