//! User service
//!
//! Profile reads and edits plus password changes.

use tracing::{info, instrument};
use validator::Validate;

use vidshare_common::auth::{hash_password, validate_password_strength, verify_or_reject};
use vidshare_core::entities::User;
use vidshare_core::{DomainError, Snowflake};

use crate::dto::{ChangePasswordRequest, CurrentUserResponse, PublicUserResponse, UpdateUserRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<PublicUserResponse> {
        let user = self.load(user_id).await?;
        Ok(PublicUserResponse::from(&user))
    }

    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self.load(user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    #[instrument(skip(self, request))]
    pub async fn update_current_user(
        &self,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;
        let mut user = self.load(user_id).await?;

        if let Some(email) = request.email.as_deref() {
            if !email.eq_ignore_ascii_case(&user.email)
                && self.ctx.user_repo().email_exists(email).await?
            {
                return Err(DomainError::EmailAlreadyExists.into());
            }
        }

        let avatar_url = request
            .avatar_url
            .map(|url| url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()));
        let full_name = request.full_name.map(|n| n.trim().to_string());

        if user.apply_profile(full_name, request.email.as_deref(), avatar_url) {
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, "User profile updated");
        }

        Ok(CurrentUserResponse::from(&user))
    }

    /// Verify the current password, store the new one and end every session
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        request.validate()?;
        validate_password_strength(&request.new_password)?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        verify_or_reject(&request.current_password, &current_hash)?;

        let new_hash = hash_password(&request.new_password)?;
        self.ctx.user_repo().update_password(user_id, &new_hash).await?;

        let revoked = self.ctx.refresh_token_repo().revoke_all(user_id).await?;
        info!(user_id = %user_id, revoked, "Password changed");

        Ok(())
    }

    async fn load(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::UserNotFound(user_id)))
    }
}
