//! PostgreSQL implementation of VideoRepository
//!
//! Reaction and view writes each run in one transaction that first takes a
//! row lock on the video, so concurrent calls for the same video serialize
//! and the cached counters never diverge from `video_reactions`/`video_views`.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use vidshare_core::entities::Video;
use vidshare_core::ledger::{ReactionChange, ReactionOutcome};
use vidshare_core::traits::{RepoResult, VideoQuery, VideoRepository};
use vidshare_core::value_objects::{ReactionCounts, ReactionState, Snowflake};

use crate::mappers::{reaction_from_str, reaction_to_str};
use crate::models::{ReactionTallyModel, VideoModel};

use super::error::{map_db_error, map_tx_error, video_not_found};

const VIDEO_COLUMNS: &str = "id, owner_id, title, description, video_key, video_url, \
     thumbnail_key, thumbnail_url, duration_secs, is_published, like_count, dislike_count, \
     view_count, created_at, updated_at";

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>> {
        let result = sqlx::query_as::<_, VideoModel>(
            r"
            SELECT id, owner_id, title, description, video_key, video_url,
                   thumbnail_key, thumbnail_url, duration_secs, is_published,
                   like_count, dislike_count, view_count, created_at, updated_at
            FROM videos
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Video::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &VideoQuery) -> RepoResult<Vec<Video>> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT ");
        qb.push(VIDEO_COLUMNS).push(" FROM videos WHERE TRUE");

        if !query.include_unpublished {
            qb.push(" AND is_published");
        }
        if let Some(owner_id) = query.owner_id {
            qb.push(" AND owner_id = ").push_bind(owner_id.into_inner());
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", escape_like(search.trim()));
            qb.push(" AND title ILIKE ").push_bind(pattern);
        }
        if let Some(before) = query.page.before {
            qb.push(" AND id < ").push_bind(before.into_inner());
        }
        if let Some(after) = query.page.after {
            qb.push(" AND id > ").push_bind(after.into_inner());
        }

        qb.push(if query.scans_ascending() {
            " ORDER BY id ASC"
        } else {
            " ORDER BY id DESC"
        });
        qb.push(" LIMIT ").push_bind(query.page.effective_limit());

        let results = qb
            .build_query_as::<VideoModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut videos: Vec<Video> = results.into_iter().map(Video::from).collect();
        if query.needs_reversal() {
            videos.reverse();
        }
        Ok(videos)
    }

    #[instrument(skip(self, video), fields(video_id = %video.id))]
    async fn create(&self, video: &Video) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO videos (id, owner_id, title, description, video_key, video_url,
                                thumbnail_key, thumbnail_url, duration_secs, is_published,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(video.id.into_inner())
        .bind(video.owner_id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_file.key)
        .bind(&video.video_file.url)
        .bind(video.thumbnail.as_ref().map(|t| t.key.as_str()))
        .bind(video.thumbnail.as_ref().map(|t| t.url.as_str()))
        .bind(video.duration_secs)
        .bind(video.is_published)
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, video), fields(video_id = %video.id))]
    async fn update(&self, video: &Video) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_key = $4, thumbnail_url = $5,
                is_published = $6, updated_at = $7
            WHERE id = $1
            ",
        )
        .bind(video.id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.thumbnail.as_ref().map(|t| t.key.as_str()))
        .bind(video.thumbnail.as_ref().map(|t| t.url.as_str()))
        .bind(video.is_published)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(video_not_found(video.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // reactions, views and comments go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(video_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn apply_reaction(
        &self,
        video_id: Snowflake,
        user_id: Snowflake,
        change: ReactionChange,
    ) -> RepoResult<ReactionOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let stored = sqlx::query_as::<_, ReactionTallyModel>(
            r"
            SELECT like_count AS likes, dislike_count AS dislikes
            FROM videos
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(video_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_tx_error(video_id))?
        .ok_or_else(|| video_not_found(video_id))?;

        let current = sqlx::query_scalar::<_, String>(
            "SELECT reaction FROM video_reactions WHERE video_id = $1 AND user_id = $2",
        )
        .bind(video_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_tx_error(video_id))?;

        let current = ReactionState::from(current.as_deref().map(reaction_from_str).transpose()?);
        let step = change.step(current);

        if step.is_noop() {
            tx.rollback().await.map_err(map_db_error)?;
            debug!(%video_id, %user_id, state = ?current, "reaction unchanged");
            return Ok(ReactionOutcome {
                previous: current,
                current,
                counts: ReactionCounts::new(stored.likes, stored.dislikes),
            });
        }

        match step.next.kind() {
            Some(kind) => {
                sqlx::query(
                    r"
                    INSERT INTO video_reactions (video_id, user_id, reaction, updated_at)
                    VALUES ($1, $2, $3, NOW())
                    ON CONFLICT (video_id, user_id)
                    DO UPDATE SET reaction = EXCLUDED.reaction, updated_at = NOW()
                    ",
                )
                .bind(video_id.into_inner())
                .bind(user_id.into_inner())
                .bind(reaction_to_str(kind))
                .execute(&mut *tx)
                .await
                .map_err(map_tx_error(video_id))?;
            }
            None => {
                sqlx::query("DELETE FROM video_reactions WHERE video_id = $1 AND user_id = $2")
                    .bind(video_id.into_inner())
                    .bind(user_id.into_inner())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_tx_error(video_id))?;
            }
        }

        let counts = sqlx::query_as::<_, ReactionTallyModel>(
            r"
            UPDATE videos
            SET like_count = GREATEST(like_count + $2, 0),
                dislike_count = GREATEST(dislike_count + $3, 0)
            WHERE id = $1
            RETURNING like_count AS likes, dislike_count AS dislikes
            ",
        )
        .bind(video_id.into_inner())
        .bind(step.like_delta)
        .bind(step.dislike_delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_tx_error(video_id))?;

        tx.commit().await.map_err(map_tx_error(video_id))?;

        Ok(ReactionOutcome {
            previous: step.previous,
            current: step.next,
            counts: ReactionCounts::new(counts.likes, counts.dislikes),
        })
    }

    #[instrument(skip(self))]
    async fn reaction_of(
        &self,
        video_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<ReactionState> {
        let reaction = sqlx::query_scalar::<_, String>(
            "SELECT reaction FROM video_reactions WHERE video_id = $1 AND user_id = $2",
        )
        .bind(video_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ReactionState::from(
            reaction.as_deref().map(reaction_from_str).transpose()?,
        ))
    }

    #[instrument(skip(self))]
    async fn record_view(&self, video_id: Snowflake, user_id: Snowflake) -> RepoResult<Video> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM videos WHERE id = $1 FOR UPDATE")
            .bind(video_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_tx_error(video_id))?;
        if exists.is_none() {
            return Err(video_not_found(video_id));
        }

        let inserted = sqlx::query(
            r"
            INSERT INTO video_views (video_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (video_id, user_id) DO NOTHING
            ",
        )
        .bind(video_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_tx_error(video_id))?
        .rows_affected()
            > 0;

        let query = if inserted {
            sqlx::query_as::<_, VideoModel>(
                r"
                UPDATE videos
                SET view_count = view_count + 1
                WHERE id = $1
                RETURNING id, owner_id, title, description, video_key, video_url,
                          thumbnail_key, thumbnail_url, duration_secs, is_published,
                          like_count, dislike_count, view_count, created_at, updated_at
                ",
            )
        } else {
            sqlx::query_as::<_, VideoModel>(
                r"
                SELECT id, owner_id, title, description, video_key, video_url,
                       thumbnail_key, thumbnail_url, duration_secs, is_published,
                       like_count, dislike_count, view_count, created_at, updated_at
                FROM videos
                WHERE id = $1
                ",
            )
        };
        let model = query
            .bind(video_id.into_inner())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_tx_error(video_id))?;

        tx.commit().await.map_err(map_tx_error(video_id))?;

        debug!(%video_id, %user_id, first_view = inserted, "view recorded");
        Ok(Video::from(model))
    }

    #[instrument(skip(self))]
    async fn reconcile_counts(&self, video_id: Snowflake) -> RepoResult<ReactionCounts> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM videos WHERE id = $1 FOR UPDATE")
            .bind(video_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_tx_error(video_id))?;
        if locked.is_none() {
            return Err(video_not_found(video_id));
        }

        let counts = sqlx::query_as::<_, ReactionTallyModel>(
            r"
            UPDATE videos v
            SET like_count = t.likes,
                dislike_count = t.dislikes,
                view_count = (SELECT COUNT(*) FROM video_views WHERE video_id = $1)
            FROM (
                SELECT COUNT(*) FILTER (WHERE reaction = 'like')    AS likes,
                       COUNT(*) FILTER (WHERE reaction = 'dislike') AS dislikes
                FROM video_reactions
                WHERE video_id = $1
            ) t
            WHERE v.id = $1
            RETURNING v.like_count AS likes, v.dislike_count AS dislikes
            ",
        )
        .bind(video_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_tx_error(video_id))?;

        tx.commit().await.map_err(map_tx_error(video_id))?;

        Ok(ReactionCounts::new(counts.likes, counts.dislikes))
    }
}

/// Escape LIKE metacharacters so user input matches literally
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
