//! Video entity <-> model mapper

use vidshare_core::entities::Video;
use vidshare_core::value_objects::{MediaRef, Snowflake};

use crate::models::VideoModel;

impl From<VideoModel> for Video {
    fn from(model: VideoModel) -> Self {
        let thumbnail = match (model.thumbnail_key, model.thumbnail_url) {
            (Some(key), Some(url)) => Some(MediaRef { key, url }),
            _ => None,
        };

        Video {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            title: model.title,
            description: model.description,
            video_file: MediaRef {
                key: model.video_key,
                url: model.video_url,
            },
            thumbnail,
            duration_secs: model.duration_secs,
            is_published: model.is_published,
            like_count: model.like_count,
            dislike_count: model.dislike_count,
            view_count: model.view_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
