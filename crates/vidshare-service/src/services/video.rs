//! Video service
//!
//! Upload, read, list, edit and delete videos. Media bytes go through the
//! `MediaStorage` port; every mutation passes the ownership check first.

use tracing::{info, instrument, warn};
use validator::Validate;

use vidshare_core::entities::{Video, VideoDraft};
use vidshare_core::traits::{PageQuery, VideoQuery, VideoSort};
use vidshare_core::value_objects::MediaRef;
use vidshare_core::{require_owner, DomainError, Snowflake};
use vidshare_storage::{object_key, MediaKind};

use crate::dto::{
    CreateVideoRequest, ListVideosQuery, PaginatedResponse, UpdateVideoRequest, VideoResponse,
    VideoSortParam,
};

use super::context::ServiceContext;
use super::engagement::EngagementService;
use super::error::{non_blank, ServiceError, ServiceResult};

/// One uploaded file as received from the client
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl MediaUpload {
    pub fn new(file_name: Option<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type: content_type.into(),
            data,
        }
    }

    fn check(&self, kind: MediaKind) -> Result<(), DomainError> {
        if self.data.is_empty() {
            return Err(DomainError::ValidationError(format!(
                "{} file is empty",
                kind.prefix()
            )));
        }
        if !kind.accepts(&self.content_type) {
            return Err(DomainError::UnsupportedMedia(self.content_type.clone()));
        }
        Ok(())
    }
}

/// Parse an optional id from a query string
pub(crate) fn parse_cursor(raw: Option<&str>, field: &str) -> ServiceResult<Option<Snowflake>> {
    raw.map(|s| {
        Snowflake::parse(s).map_err(|_| ServiceError::validation(format!("invalid {field}: {s}")))
    })
    .transpose()
}

const TITLE_BLANK: &str = "Title must not be blank";

pub struct VideoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VideoService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store the media, then the video document. Media written before a
    /// failure is released again.
    #[instrument(skip(self, request, file, thumbnail), fields(title = %request.title))]
    pub async fn publish_video(
        &self,
        owner_id: Snowflake,
        request: CreateVideoRequest,
        file: MediaUpload,
        thumbnail: Option<MediaUpload>,
    ) -> ServiceResult<VideoResponse> {
        request.validate()?;
        let title = non_blank(&request.title, TITLE_BLANK)?;
        if !request.duration_secs.is_finite() {
            return Err(ServiceError::validation("Duration must be a finite number"));
        }
        file.check(MediaKind::Video)?;
        if let Some(thumb) = &thumbnail {
            thumb.check(MediaKind::Thumbnail)?;
        }

        let video_file = self.store(MediaKind::Video, owner_id, &file).await?;

        let thumbnail = match thumbnail {
            Some(thumb) => match self.store(MediaKind::Thumbnail, owner_id, &thumb).await {
                Ok(stored) => Some(stored),
                Err(e) => {
                    self.release(&video_file.key).await;
                    return Err(e);
                }
            },
            None => None,
        };

        let video = Video::new(
            self.ctx.generate_id(),
            owner_id,
            VideoDraft {
                title,
                description: request.description,
                video_file,
                thumbnail,
                duration_secs: request.duration_secs,
                is_published: request.is_published,
            },
        );

        if let Err(e) = self.ctx.video_repo().create(&video).await {
            for key in video.media_keys() {
                self.release(key).await;
            }
            return Err(e.into());
        }

        info!(video_id = %video.id, owner_id = %owner_id, "Video published");
        Ok(VideoResponse::from(video))
    }

    /// Fetch a video. An authenticated caller is added to its view set.
    #[instrument(skip(self))]
    pub async fn get_video(
        &self,
        viewer: Option<Snowflake>,
        video_id: Snowflake,
    ) -> ServiceResult<VideoResponse> {
        let video = self.load_visible(video_id, viewer).await?;
        match viewer {
            Some(user_id) => {
                EngagementService::new(self.ctx)
                    .record_view(user_id, video_id)
                    .await
            }
            None => Ok(VideoResponse::from(video)),
        }
    }

    #[instrument(skip(self, query))]
    pub async fn list_videos(
        &self,
        viewer: Option<Snowflake>,
        query: ListVideosQuery,
    ) -> ServiceResult<PaginatedResponse<VideoResponse>> {
        let owner_id = parse_cursor(query.owner_id.as_deref(), "owner_id")?;
        let page = PageQuery {
            before: parse_cursor(query.before.as_deref(), "before")?,
            after: parse_cursor(query.after.as_deref(), "after")?,
            limit: query.limit.unwrap_or(0),
        };
        let limit = page.effective_limit();

        let filter = VideoQuery {
            owner_id,
            search: query.q,
            // owners see their own drafts when listing themselves
            include_unpublished: owner_id.is_some() && owner_id == viewer,
            sort: match query.sort {
                VideoSortParam::Newest => VideoSort::Newest,
                VideoSortParam::Oldest => VideoSort::Oldest,
            },
            page,
        };

        let videos = self.ctx.video_repo().list(&filter).await?;
        let data = videos.iter().map(VideoResponse::from).collect();

        Ok(PaginatedResponse::new(data, limit, videos.iter().map(|v| v.id)))
    }

    #[instrument(skip(self, request))]
    pub async fn update_video(
        &self,
        actor: Snowflake,
        video_id: Snowflake,
        request: UpdateVideoRequest,
    ) -> ServiceResult<VideoResponse> {
        request.validate()?;
        let title = request
            .title
            .as_deref()
            .map(|t| non_blank(t, TITLE_BLANK))
            .transpose()?;
        let mut video = self.load_owned(actor, video_id).await?;

        video.edit(title, request.description);
        self.ctx.video_repo().update(&video).await?;

        info!(video_id = %video_id, "Video updated");
        Ok(VideoResponse::from(video))
    }

    /// Swap the thumbnail; the previous object is released afterwards
    #[instrument(skip(self, thumbnail))]
    pub async fn replace_thumbnail(
        &self,
        actor: Snowflake,
        video_id: Snowflake,
        thumbnail: MediaUpload,
    ) -> ServiceResult<VideoResponse> {
        let mut video = self.load_owned(actor, video_id).await?;
        thumbnail.check(MediaKind::Thumbnail)?;

        let stored = self.store(MediaKind::Thumbnail, actor, &thumbnail).await?;
        let new_key = stored.key.clone();
        let previous = video.replace_thumbnail(stored);

        if let Err(e) = self.ctx.video_repo().update(&video).await {
            self.release(&new_key).await;
            return Err(e.into());
        }
        if let Some(old) = previous {
            self.release(&old.key).await;
        }

        info!(video_id = %video_id, "Thumbnail replaced");
        Ok(VideoResponse::from(video))
    }

    #[instrument(skip(self))]
    pub async fn toggle_publish(
        &self,
        actor: Snowflake,
        video_id: Snowflake,
    ) -> ServiceResult<VideoResponse> {
        let mut video = self.load_owned(actor, video_id).await?;
        let published = video.toggle_publish();
        self.ctx.video_repo().update(&video).await?;

        info!(video_id = %video_id, published, "Publish state toggled");
        Ok(VideoResponse::from(video))
    }

    /// Delete the video with its reactions, views and comments, then release
    /// its media objects.
    #[instrument(skip(self))]
    pub async fn delete_video(&self, actor: Snowflake, video_id: Snowflake) -> ServiceResult<()> {
        let video = self.load_owned(actor, video_id).await?;

        self.ctx.video_repo().delete(video_id).await?;
        for key in video.media_keys() {
            self.release(key).await;
        }

        info!(video_id = %video_id, "Video deleted");
        Ok(())
    }

    /// Load a video the caller may see; hidden drafts read as missing
    pub(crate) async fn load_visible(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Video> {
        self.ctx
            .video_repo()
            .find_by_id(video_id)
            .await?
            .filter(|video| video.is_visible_to(viewer))
            .ok_or_else(|| DomainError::VideoNotFound(video_id).into())
    }

    /// Load a video and check `actor` owns it. Existence is checked first.
    pub(crate) async fn load_owned(
        &self,
        actor: Snowflake,
        video_id: Snowflake,
    ) -> ServiceResult<Video> {
        let video = self
            .ctx
            .video_repo()
            .find_by_id(video_id)
            .await?
            .ok_or(DomainError::VideoNotFound(video_id))?;
        require_owner(actor, &video)?;
        Ok(video)
    }

    async fn store(
        &self,
        kind: MediaKind,
        owner_id: Snowflake,
        upload: &MediaUpload,
    ) -> ServiceResult<MediaRef> {
        let key = object_key(
            kind,
            owner_id,
            upload.file_name.as_deref(),
            &upload.content_type,
        );
        let stored = self
            .ctx
            .media()
            .put(&key, &upload.data, &upload.content_type)
            .await?;
        Ok(stored.media)
    }

    /// Best-effort release; a leaked object is logged, never surfaced
    async fn release(&self, key: &str) {
        if let Err(e) = self.ctx.media().delete(key).await {
            warn!(key, error = %e, "Failed to release media object");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_checks() {
        let empty = MediaUpload::new(None, "video/mp4", Vec::new());
        assert!(matches!(
            empty.check(MediaKind::Video),
            Err(DomainError::ValidationError(_))
        ));

        let wrong = MediaUpload::new(None, "image/png", vec![1]);
        assert!(matches!(
            wrong.check(MediaKind::Video),
            Err(DomainError::UnsupportedMedia(_))
        ));

        let ok = MediaUpload::new(Some("a.png".into()), "image/png", vec![1]);
        assert!(ok.check(MediaKind::Thumbnail).is_ok());
    }

    #[test]
    fn test_parse_cursor() {
        assert_eq!(parse_cursor(None, "before").unwrap(), None);
        assert_eq!(
            parse_cursor(Some("42"), "before").unwrap(),
            Some(Snowflake::new(42))
        );
        assert!(parse_cursor(Some("nope"), "before").is_err());
    }
}
