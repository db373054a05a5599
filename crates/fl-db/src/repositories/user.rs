//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use fl_core::entities::AdminUser;
use fl_core::error::DomainError;
use fl_core::traits::{RepoResult, UserRepository};

use crate::models::AdminUserModel;

use super::error::{map_db_error, map_unique_violation, to_count};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>> {
        let result = sqlx::query_as::<_, AdminUserModel>(
            r"
            SELECT id, username, password_hash, created_at
            FROM admin_users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AdminUser::from))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &AdminUser) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO admin_users (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::ValidationError(format!("username {} already exists", user.username))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(to_count(count))
    }
}
