use async_trait::async_trait;

use vidshare_core::entities::Video;
use vidshare_core::error::DomainError;
use vidshare_core::ledger::{Engagement, ReactionChange, ReactionOutcome};
use vidshare_core::traits::{RepoResult, VideoQuery, VideoRepository};
use vidshare_core::value_objects::{ReactionCounts, ReactionState, Snowflake};

use super::{MemoryDatabase, VideoRow};

#[derive(Clone, Debug)]
pub struct MemoryVideoRepository {
    db: MemoryDatabase,
}

impl MemoryVideoRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

impl VideoRow {
    /// Copy the ledger's counters onto the stored document
    fn sync_counters(&mut self) {
        let counts = self.engagement.counts();
        self.video.like_count = counts.likes;
        self.video.dislike_count = counts.dislikes;
        self.video.view_count = self.engagement.view_count();
    }
}

fn matches(video: &Video, query: &VideoQuery, needle: Option<&str>) -> bool {
    if !query.include_unpublished && !video.is_published {
        return false;
    }
    if query.owner_id.is_some_and(|owner| owner != video.owner_id) {
        return false;
    }
    if needle.is_some_and(|needle| !video.title.to_lowercase().contains(needle)) {
        return false;
    }
    if query.page.before.is_some_and(|before| video.id >= before) {
        return false;
    }
    if query.page.after.is_some_and(|after| video.id <= after) {
        return false;
    }
    true
}

#[async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>> {
        Ok(self.db.tables.read().videos.get(&id).map(|row| row.video.clone()))
    }

    async fn list(&self, query: &VideoQuery) -> RepoResult<Vec<Video>> {
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let tables = self.db.tables.read();
        let mut videos: Vec<Video> = tables
            .videos
            .values()
            .map(|row| &row.video)
            .filter(|video| matches(video, query, needle.as_deref()))
            .cloned()
            .collect();

        if query.scans_ascending() {
            videos.sort_by(|a, b| a.id.cmp(&b.id));
        } else {
            videos.sort_by(|a, b| b.id.cmp(&a.id));
        }
        videos.truncate(usize::try_from(query.page.effective_limit()).unwrap_or(0));
        if query.needs_reversal() {
            videos.reverse();
        }

        Ok(videos)
    }

    async fn create(&self, video: &Video) -> RepoResult<()> {
        let mut tables = self.db.tables.write();
        let mut row = VideoRow {
            video: video.clone(),
            engagement: Engagement::new(),
        };
        row.sync_counters();
        tables.videos.insert(video.id, row);
        Ok(())
    }

    async fn update(&self, video: &Video) -> RepoResult<()> {
        let mut tables = self.db.tables.write();
        let row = tables
            .videos
            .get_mut(&video.id)
            .ok_or(DomainError::VideoNotFound(video.id))?;

        row.video.title = video.title.clone();
        row.video.description = video.description.clone();
        row.video.thumbnail = video.thumbnail.clone();
        row.video.is_published = video.is_published;
        row.video.updated_at = video.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.db.tables.write();
        tables
            .videos
            .remove(&id)
            .ok_or(DomainError::VideoNotFound(id))?;
        tables.comments.retain(|_, comment| comment.video_id != id);
        Ok(())
    }

    async fn apply_reaction(
        &self,
        video_id: Snowflake,
        user_id: Snowflake,
        change: ReactionChange,
    ) -> RepoResult<ReactionOutcome> {
        let mut tables = self.db.tables.write();
        let row = tables
            .videos
            .get_mut(&video_id)
            .ok_or(DomainError::VideoNotFound(video_id))?;

        let outcome = row.engagement.apply(user_id, change);
        row.sync_counters();
        Ok(outcome)
    }

    async fn reaction_of(
        &self,
        video_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<ReactionState> {
        let tables = self.db.tables.read();
        let row = tables
            .videos
            .get(&video_id)
            .ok_or(DomainError::VideoNotFound(video_id))?;
        Ok(row.engagement.state_of(user_id))
    }

    async fn record_view(&self, video_id: Snowflake, user_id: Snowflake) -> RepoResult<Video> {
        let mut tables = self.db.tables.write();
        let row = tables
            .videos
            .get_mut(&video_id)
            .ok_or(DomainError::VideoNotFound(video_id))?;

        if row.engagement.record_view(user_id) {
            row.sync_counters();
        }
        Ok(row.video.clone())
    }

    async fn reconcile_counts(&self, video_id: Snowflake) -> RepoResult<ReactionCounts> {
        let mut tables = self.db.tables.write();
        let row = tables
            .videos
            .get_mut(&video_id)
            .ok_or(DomainError::VideoNotFound(video_id))?;

        let counts = row.engagement.reconcile();
        row.sync_counters();
        Ok(counts)
    }
}
