//! Authentication service
//!
//! Handles registration, login, refresh-token rotation and logout. Refresh
//! tokens are tracked by their `jti` so a rotated or logged-out token can
//! never be replayed.

use tracing::{info, instrument, warn};
use validator::Validate;

use vidshare_common::auth::{hash_password, validate_password_strength, verify_or_reject};
use vidshare_common::AppError;
use vidshare_core::entities::User;
use vidshare_core::{DomainError, Snowflake};

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Usernames are lowercase ascii letters, digits, `_` and `.`
pub(crate) fn validate_username(username: &str) -> Result<(), DomainError> {
    let valid = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidUsername(
            "only letters, digits, '_' and '.' are allowed".to_string(),
        ))
    }
}

pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;
        validate_username(&request.username)?;
        validate_password_strength(&request.password)?;

        let users = self.ctx.user_repo();
        if users.email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if users.username_exists(&request.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = User::new(
            self.ctx.generate_id(),
            &request.username,
            &request.email,
            request.full_name.trim().to_string(),
        );
        users.create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        self.issue_for(&user).await
    }

    /// Login with email (anything containing `@`) or username
    #[instrument(skip(self, request), fields(login = %request.login))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;

        let users = self.ctx.user_repo();
        let found = if request.login.contains('@') {
            users.find_by_email(&request.login).await?
        } else {
            users.find_by_username(&request.login).await?
        };

        let Some(user) = found else {
            warn!("Login failed: unknown account");
            return Err(AppError::InvalidCredentials.into());
        };

        let Some(password_hash) = users.get_password_hash(user.id).await? else {
            warn!(user_id = %user.id, "Login failed: no password hash");
            return Err(AppError::InvalidCredentials.into());
        };

        if let Err(e) = verify_or_reject(&request.password, &password_hash) {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_for(&user).await
    }

    /// Exchange a live refresh token for a new pair; the old one is revoked.
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let tokens = self.ctx.refresh_token_repo();
        if !tokens.is_active(&claims.jti, user_id).await? {
            warn!(user_id = %user_id, "Refresh rejected: token revoked or unknown");
            return Err(AppError::InvalidToken.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        tokens.revoke(&claims.jti).await?;

        info!(user_id = %user.id, "Tokens refreshed");

        self.issue_for(&user).await
    }

    /// Revoke one refresh token, or every token of the user when none is given
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(
        &self,
        user_id: Snowflake,
        refresh_token: Option<String>,
    ) -> ServiceResult<()> {
        let tokens = self.ctx.refresh_token_repo();

        match refresh_token {
            Some(token) => {
                let claims = self.ctx.jwt_service().validate_refresh_token(&token)?;
                if claims.user_id()? != user_id {
                    return Err(AppError::InvalidToken.into());
                }
                tokens.revoke(&claims.jti).await?;
            }
            None => {
                let revoked = tokens.revoke_all(user_id).await?;
                info!(user_id = %user_id, revoked, "All sessions revoked");
            }
        }

        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Validate an access token and return the user ID
    pub fn validate_token(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }

    async fn issue_for(&self, user: &User) -> ServiceResult<AuthResponse> {
        let issued = self.ctx.jwt_service().issue(user.id)?;

        self.ctx
            .refresh_token_repo()
            .store(&issued.refresh_id, user.id, issued.refresh_expires_at)
            .await?;

        Ok(AuthResponse {
            access_token: issued.pair.access_token,
            refresh_token: issued.pair.refresh_token,
            token_type: issued.pair.token_type,
            expires_in: issued.pair.expires_in,
            user: CurrentUserResponse::from(user),
        })
    }
}
