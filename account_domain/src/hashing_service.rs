use crate::error::{AuthError, AuthResult};

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

pub trait HashingService: Send + Sync {
    /// Hash a raw password into a salted digest
    ///
    /// The salt is random per call, so hashing the same input twice yields
    /// different digests; both verify against the input.
    fn hash(&self, raw_password: &str) -> AuthResult<String>;

    /// Verify a raw password against a stored digest
    ///
    /// A malformed digest verifies false rather than erroring.
    fn verify(&self, raw_password: &str, digest: &str) -> bool;
}

/// bcrypt implementation of HashingService
#[derive(Clone)]
pub struct BcryptHashingService {
    cost: u32,
}

impl BcryptHashingService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHashingService {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl HashingService for BcryptHashingService {
    fn hash(&self, raw_password: &str) -> AuthResult<String> {
        // Cost outside bcrypt's range would silently weaken every stored
        // digest, so it is rejected here rather than clamped.
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.cost) {
            tracing::error!(cost = self.cost, "bcrypt cost out of range");
            return Err(AuthError::Hashing);
        }

        bcrypt::hash(raw_password, self.cost).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            AuthError::Hashing
        })
    }

    fn verify(&self, raw_password: &str, digest: &str) -> bool {
        bcrypt::verify(raw_password, digest).unwrap_or(false)
    }
}
