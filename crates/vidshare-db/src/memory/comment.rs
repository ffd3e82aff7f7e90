use async_trait::async_trait;

use vidshare_core::entities::Comment;
use vidshare_core::error::DomainError;
use vidshare_core::traits::{CommentRepository, PageQuery, RepoResult};
use vidshare_core::value_objects::Snowflake;

use super::MemoryDatabase;

#[derive(Clone, Debug)]
pub struct MemoryCommentRepository {
    db: MemoryDatabase,
}

impl MemoryCommentRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.db.tables.read().comments.get(&id).cloned())
    }

    async fn find_by_video(
        &self,
        video_id: Snowflake,
        page: PageQuery,
    ) -> RepoResult<Vec<Comment>> {
        let tables = self.db.tables.read();
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.video_id == video_id)
            .filter(|c| page.before.map_or(true, |before| c.id < before))
            .filter(|c| page.after.map_or(true, |after| c.id > after))
            .cloned()
            .collect();

        // `after` pages scan forward from the cursor, then display newest first
        let forward = page.after.is_some() && page.before.is_none();
        if forward {
            comments.sort_by(|a, b| a.id.cmp(&b.id));
        } else {
            comments.sort_by(|a, b| b.id.cmp(&a.id));
        }
        comments.truncate(usize::try_from(page.effective_limit()).unwrap_or(0));
        if forward {
            comments.reverse();
        }

        Ok(comments)
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut tables = self.db.tables.write();
        if !tables.videos.contains_key(&comment.video_id) {
            return Err(DomainError::VideoNotFound(comment.video_id));
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut tables = self.db.tables.write();
        let stored = tables
            .comments
            .get_mut(&comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        stored.content = comment.content.clone();
        stored.updated_at = comment.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.db
            .tables
            .write()
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CommentNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidshare_core::entities::{Video, VideoDraft};
    use vidshare_core::traits::VideoRepository;
    use vidshare_core::value_objects::MediaRef;

    async fn seeded() -> (MemoryDatabase, Snowflake) {
        let db = MemoryDatabase::new();
        let video = Video::new(
            Snowflake::new(100),
            Snowflake::new(1),
            VideoDraft {
                title: "clip".into(),
                description: String::new(),
                video_file: MediaRef::new("v.mp4", "/media/v.mp4"),
                thumbnail: None,
                duration_secs: 1.0,
                is_published: true,
            },
        );
        db.videos().create(&video).await.unwrap();
        (db, video.id)
    }

    #[tokio::test]
    async fn test_comment_requires_existing_video() {
        let db = MemoryDatabase::new();
        let comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(9),
            Snowflake::new(2),
            "hi".into(),
        );
        assert!(matches!(
            db.comments().create(&comment).await,
            Err(DomainError::VideoNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_pagination_cursors() {
        let (db, video_id) = seeded().await;
        let repo = db.comments();
        for id in 1..=5 {
            let c = Comment::new(
                Snowflake::new(id),
                video_id,
                Snowflake::new(2),
                format!("c{id}"),
            );
            repo.create(&c).await.unwrap();
        }

        let ids = |v: Vec<Comment>| v.into_iter().map(|c| c.id.into_inner()).collect::<Vec<_>>();

        let latest = repo
            .find_by_video(
                video_id,
                PageQuery {
                    limit: 2,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(ids(latest), vec![5, 4]);

        let older = repo
            .find_by_video(
                video_id,
                PageQuery {
                    before: Some(Snowflake::new(4)),
                    limit: 2,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(ids(older), vec![3, 2]);

        let newer = repo
            .find_by_video(
                video_id,
                PageQuery {
                    after: Some(Snowflake::new(2)),
                    limit: 2,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(ids(newer), vec![4, 3]);
    }

    #[tokio::test]
    async fn test_video_delete_cascades_to_comments() {
        let (db, video_id) = seeded().await;
        let comment = Comment::new(Snowflake::new(1), video_id, Snowflake::new(2), "hi".into());
        db.comments().create(&comment).await.unwrap();

        db.videos().delete(video_id).await.unwrap();
        assert!(db.comments().find_by_id(comment.id).await.unwrap().is_none());
    }
}
