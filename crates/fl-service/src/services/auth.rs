//! Admin authentication

use tracing::{info, instrument, warn};

use fl_common::{AppError, PasswordService};

use crate::dto::{LoginRequest, LoginResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
    passwords: PasswordService,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            passwords: PasswordService::new(),
        }
    }

    /// Check admin credentials
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!(username = %request.username, "Login failed: unknown user");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        self.passwords
            .verify_or_error(&request.password, &user.password_hash)
            .inspect_err(|_| warn!(username = %user.username, "Login failed: invalid password"))?;

        info!(username = %user.username, "Admin logged in");
        Ok(LoginResponse {
            success: true,
            message: "Login exitoso".to_string(),
        })
    }
}
