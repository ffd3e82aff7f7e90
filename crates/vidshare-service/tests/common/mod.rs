//! Shared fixtures for service tests: in-memory repositories and media.

#![allow(dead_code)]

use std::sync::Arc;

use vidshare_common::auth::JwtService;
use vidshare_core::Snowflake;
use vidshare_db::MemoryDatabase;
use vidshare_service::dto::{CreateVideoRequest, RegisterRequest, VideoResponse};
use vidshare_service::{AuthService, MediaUpload, ServiceContext, VideoService};
use vidshare_storage::InMemoryMediaStorage;

pub const PASSWORD: &str = "Password123";

pub struct Harness {
    pub ctx: ServiceContext,
    pub media: Arc<InMemoryMediaStorage>,
}

impl Harness {
    pub fn new() -> Self {
        let db = MemoryDatabase::new();
        let media = Arc::new(InMemoryMediaStorage::new("/media"));
        let ctx = ServiceContext::builder()
            .memory(&db)
            .media(media.clone())
            .jwt_service(Arc::new(JwtService::new(
                "service-test-secret-long-enough",
                900,
                3600,
            )))
            .build()
            .unwrap();
        Self { ctx, media }
    }

    pub async fn register(&self, username: &str) -> Snowflake {
        let response = AuthService::new(&self.ctx)
            .register(RegisterRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                full_name: username.to_uppercase(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap();
        Snowflake::parse(&response.user.id).unwrap()
    }

    pub async fn upload(&self, owner: Snowflake, title: &str) -> VideoResponse {
        self.upload_with(owner, title, true).await
    }

    pub async fn upload_with(
        &self,
        owner: Snowflake,
        title: &str,
        published: bool,
    ) -> VideoResponse {
        VideoService::new(&self.ctx)
            .publish_video(
                owner,
                CreateVideoRequest {
                    title: title.to_string(),
                    description: format!("{title} description"),
                    duration_secs: 30.0,
                    is_published: published,
                },
                video_file(),
                Some(thumbnail_file()),
            )
            .await
            .unwrap()
    }
}

pub fn video_file() -> MediaUpload {
    MediaUpload::new(Some("clip.mp4".into()), "video/mp4", b"fake video bytes".to_vec())
}

pub fn thumbnail_file() -> MediaUpload {
    MediaUpload::new(Some("thumb.png".into()), "image/png", b"fake png".to_vec())
}

pub fn id(raw: &str) -> Snowflake {
    Snowflake::parse(raw).unwrap()
}
