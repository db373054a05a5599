//! Admin user entity - store staff allowed to log in to the back office

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Admin account. Only the argon2 hash of the password is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AdminUser {
    /// Create a new AdminUser from an already hashed password
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
