//! Admin user database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for admin_users table
#[derive(Debug, Clone, FromRow)]
pub struct AdminUserModel {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
