//! Object key scheme: `{kind}/{owner_id}/{uuid}.{ext}`

use vidshare_core::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Thumbnail,
}

impl MediaKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Video => "videos",
            Self::Thumbnail => "thumbnails",
        }
    }

    /// Whether an upload declared as `content_type` may be stored as this kind
    pub fn accepts(self, content_type: &str) -> bool {
        let top = content_type.split('/').next().unwrap_or_default();
        match self {
            Self::Video => top == "video",
            Self::Thumbnail => top == "image",
        }
    }

    fn default_extension(self) -> &'static str {
        match self {
            Self::Video => "mp4",
            Self::Thumbnail => "jpg",
        }
    }
}

/// Fresh key for an upload. The extension comes from the client file name
/// when it has a sane one, otherwise from the content type.
pub fn object_key(
    kind: MediaKind,
    owner_id: Snowflake,
    file_name: Option<&str>,
    content_type: &str,
) -> String {
    let from_name = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });

    let ext = from_name
        .or_else(|| {
            mime_guess::get_mime_extensions_str(content_type)
                .and_then(|exts| exts.first())
                .map(|ext| (*ext).to_string())
        })
        .unwrap_or_else(|| kind.default_extension().to_string());

    format!(
        "{}/{}/{}.{}",
        kind.prefix(),
        owner_id,
        uuid::Uuid::new_v4().simple(),
        ext
    )
}

/// Keys are relative paths made of plain segments
pub fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('/')
        && !key.contains('\\')
        && key
            .split('/')
            .all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}
