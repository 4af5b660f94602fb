use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub enabled: bool,
    pub locked: bool,
    pub credentials_expired: bool,
    pub account_expired: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String, full_name: String, role: Role) -> Self {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash,
            full_name,
            role,
            enabled: true,
            locked: false,
            credentials_expired: false,
            account_expired: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl core::fmt::Debug for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .field("enabled", &self.enabled)
            .field("locked", &self.locked)
            .field("credentials_expired", &self.credentials_expired)
            .field("account_expired", &self.account_expired)
            .finish()
    }
}

/// Fields collected at sign-up. `password` is the raw secret, hashed before storage.
#[derive(Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}
