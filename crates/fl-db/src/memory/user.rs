//! In-memory UserRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use fl_core::entities::AdminUser;
use fl_core::error::DomainError;
use fl_core::traits::{RepoResult, UserRepository};

/// Admin accounts keyed by username
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, AdminUser>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>> {
        Ok(self.users.read().get(username).cloned())
    }

    async fn create(&self, user: &AdminUser) -> RepoResult<()> {
        let mut users = self.users.write();
        if users.contains_key(&user.username) {
            return Err(DomainError::ValidationError(format!(
                "username {} already exists",
                user.username
            )));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn count(&self) -> RepoResult<u64> {
        Ok(self.users.read().len() as u64)
    }
}
