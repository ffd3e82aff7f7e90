//! Engagement service
//!
//! Reactions and views on a video. The read-modify-write itself happens in
//! one atomic repository call; this layer checks the video is visible to the
//! caller and shapes the result.

use tracing::{debug, info, instrument};

use vidshare_core::ledger::ReactionChange;
use vidshare_core::{ReactionKind, Snowflake};

use crate::dto::{ReactionCountsResponse, ReactionStatusResponse, VideoResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::video::VideoService;

pub struct EngagementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EngagementService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Move `user_id` to `desired` on the video. Asking for the state the user
    /// is already in changes nothing.
    #[instrument(skip(self))]
    pub async fn record_reaction(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
        desired: ReactionKind,
    ) -> ServiceResult<ReactionCountsResponse> {
        self.apply(user_id, video_id, ReactionChange::Set(desired))
            .await
    }

    /// Withdraw whatever reaction `user_id` has on the video
    #[instrument(skip(self))]
    pub async fn clear_reaction(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
    ) -> ServiceResult<ReactionCountsResponse> {
        self.apply(user_id, video_id, ReactionChange::Clear).await
    }

    #[instrument(skip(self))]
    pub async fn get_reaction(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
    ) -> ServiceResult<ReactionStatusResponse> {
        let video = VideoService::new(self.ctx)
            .load_visible(video_id, Some(user_id))
            .await?;
        let state = self.ctx.video_repo().reaction_of(video_id, user_id).await?;

        Ok(ReactionStatusResponse {
            video_id: video_id.to_string(),
            state,
            likes: video.like_count,
            dislikes: video.dislike_count,
        })
    }

    /// Add `user_id` to the video's view set. Repeat views are no-ops.
    #[instrument(skip(self))]
    pub async fn record_view(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
    ) -> ServiceResult<VideoResponse> {
        let video = self.ctx.video_repo().record_view(video_id, user_id).await?;
        debug!(video_id = %video_id, views = video.view_count, "View recorded");
        Ok(VideoResponse::from(video))
    }

    /// Rebuild the cached like/dislike counters from the reaction map
    #[instrument(skip(self))]
    pub async fn reconcile_counts(
        &self,
        actor: Snowflake,
        video_id: Snowflake,
    ) -> ServiceResult<ReactionCountsResponse> {
        let video = VideoService::new(self.ctx)
            .load_owned(actor, video_id)
            .await?;
        let counts = self.ctx.video_repo().reconcile_counts(video_id).await?;

        if counts != video.counts() {
            info!(
                video_id = %video_id,
                stored_likes = video.like_count,
                stored_dislikes = video.dislike_count,
                likes = counts.likes,
                dislikes = counts.dislikes,
                "Reaction counters repaired"
            );
        }
        Ok(counts.into())
    }

    async fn apply(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
        change: ReactionChange,
    ) -> ServiceResult<ReactionCountsResponse> {
        VideoService::new(self.ctx)
            .load_visible(video_id, Some(user_id))
            .await?;

        let outcome = self
            .ctx
            .video_repo()
            .apply_reaction(video_id, user_id, change)
            .await?;

        if outcome.changed() {
            info!(
                video_id = %video_id,
                user_id = %user_id,
                from = ?outcome.previous,
                to = ?outcome.current,
                "Reaction recorded"
            );
        }
        Ok(outcome.counts.into())
    }
}
