use crate::auth::PasswordHasher;
use crate::core::errors::StorefrontError;

#[derive(Clone, Debug)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        BcryptHasher { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, raw: &str) -> Result<String, StorefrontError> {
        bcrypt::hash(raw, self.cost)
            .map_err(|e| StorefrontError::InternalServerError(format!("Password hashing error: {}", e)))
    }

    fn verify(&self, raw: &str, hash: &str) -> Result<bool, StorefrontError> {
        bcrypt::verify(raw, hash)
            .map_err(|e| StorefrontError::InternalServerError(format!("Password verification error: {}", e)))
    }
}
