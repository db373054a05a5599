//! Admin user model -> entity mapper

use fl_core::entities::AdminUser;

use crate::models::AdminUserModel;

impl From<AdminUserModel> for AdminUser {
    fn from(model: AdminUserModel) -> Self {
        AdminUser {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}
