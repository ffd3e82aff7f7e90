//! Service context - dependency container for services
//!
//! Holds the repositories, the media store and the auth/id helpers that
//! every service borrows for the duration of a request.

use std::sync::Arc;

use vidshare_common::auth::JwtService;
use vidshare_core::traits::{
    CommentRepository, MediaStorage, RefreshTokenRepository, UserRepository, VideoRepository,
};
use vidshare_core::{Snowflake, SnowflakeGenerator};
use vidshare_db::{
    MemoryDatabase, PgCommentRepository, PgPool, PgRefreshTokenRepository, PgUserRepository,
    PgVideoRepository,
};

use super::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct ServiceContext {
    /// Present only with the PostgreSQL backend
    pool: Option<PgPool>,

    user_repo: Arc<dyn UserRepository>,
    video_repo: Arc<dyn VideoRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,

    media: Arc<dyn MediaStorage>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn video_repo(&self) -> &dyn VideoRepository {
        self.video_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    // === Media ===

    pub fn media(&self) -> &dyn MediaStorage {
        self.media.as_ref()
    }

    // === Helpers ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Whether the backing database answers. Always true in memory mode.
    pub async fn database_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => vidshare_db::ping(pool).await.is_ok(),
            None => true,
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("backend", &if self.pool.is_some() { "postgres" } else { "memory" })
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ServiceContext`]
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    video_repo: Option<Arc<dyn VideoRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    media: Option<Arc<dyn MediaStorage>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire every repository to PostgreSQL
    pub fn postgres(mut self, pool: PgPool) -> Self {
        self.user_repo = Some(Arc::new(PgUserRepository::new(pool.clone())));
        self.video_repo = Some(Arc::new(PgVideoRepository::new(pool.clone())));
        self.comment_repo = Some(Arc::new(PgCommentRepository::new(pool.clone())));
        self.refresh_token_repo = Some(Arc::new(PgRefreshTokenRepository::new(pool.clone())));
        self.pool = Some(pool);
        self
    }

    /// Wire every repository to one in-memory database
    pub fn memory(mut self, db: &MemoryDatabase) -> Self {
        self.user_repo = Some(Arc::new(db.users()));
        self.video_repo = Some(Arc::new(db.videos()));
        self.comment_repo = Some(Arc::new(db.comments()));
        self.refresh_token_repo = Some(Arc::new(db.refresh_tokens()));
        self.pool = None;
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn video_repo(mut self, repo: Arc<dyn VideoRepository>) -> Self {
        self.video_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    pub fn media(mut self, media: Arc<dyn MediaStorage>) -> Self {
        self.media = Some(media);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: required(self.user_repo, "user_repo")?,
            video_repo: required(self.video_repo, "video_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            refresh_token_repo: required(self.refresh_token_repo, "refresh_token_repo")?,
            media: required(self.media, "media")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
        })
    }
}
