//! Comment service

use tracing::{info, instrument};
use validator::Validate;

use vidshare_core::entities::Comment;
use vidshare_core::traits::PageQuery;
use vidshare_core::{require_owner, DomainError, Snowflake};

use crate::dto::{CommentResponse, CreateCommentRequest, PaginatedResponse, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::{non_blank, ServiceResult};
use super::video::VideoService;

const CONTENT_BLANK: &str = "Comment must not be blank";

pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        viewer: Option<Snowflake>,
        video_id: Snowflake,
        page: PageQuery,
    ) -> ServiceResult<PaginatedResponse<CommentResponse>> {
        VideoService::new(self.ctx)
            .load_visible(video_id, viewer)
            .await?;

        let limit = page.effective_limit();
        let comments = self.ctx.comment_repo().find_by_video(video_id, page).await?;
        let data = comments.iter().map(CommentResponse::from).collect();

        Ok(PaginatedResponse::new(data, limit, comments.iter().map(|c| c.id)))
    }

    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        author: Snowflake,
        video_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        let content = non_blank(&request.content, CONTENT_BLANK)?;
        VideoService::new(self.ctx)
            .load_visible(video_id, Some(author))
            .await?;

        let comment = Comment::new(self.ctx.generate_id(), video_id, author, content);
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, video_id = %video_id, "Comment added");
        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        actor: Snowflake,
        comment_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        let content = non_blank(&request.content, CONTENT_BLANK)?;
        let mut comment = self.load_owned(actor, comment_id).await?;

        comment.edit(content);
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment_id, "Comment edited");
        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        actor: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<()> {
        self.load_owned(actor, comment_id).await?;
        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    async fn load_owned(&self, actor: Snowflake, comment_id: Snowflake) -> ServiceResult<Comment> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        require_owner(actor, &comment)?;
        Ok(comment)
    }
}
