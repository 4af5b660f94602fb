//! Account-flag derivation for [`User`] records.

use crate::core::errors::StorefrontError;
use crate::core::models::user::User;

/// Granted authorities, e.g. `ROLE_USER`.
pub fn authorities(user: &User) -> Vec<String> {
    vec![format!("ROLE_{}", user.role.as_str())]
}

pub fn is_account_usable(user: &User) -> bool {
    user.enabled && !user.locked && !user.account_expired && !user.credentials_expired
}

/// Runs before the password is checked.
pub fn check_pre_authentication(user: &User) -> Result<(), StorefrontError> {
    if user.locked {
        return Err(StorefrontError::AccountLocked);
    }
    if !user.enabled {
        return Err(StorefrontError::AccountDisabled);
    }
    if user.account_expired {
        return Err(StorefrontError::AccountExpired);
    }
    Ok(())
}

/// Runs once the password has verified.
pub fn check_post_authentication(user: &User) -> Result<(), StorefrontError> {
    if user.credentials_expired {
        return Err(StorefrontError::CredentialsExpired);
    }
    Ok(())
}
