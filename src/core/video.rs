use crate::api::{MetadataClient, VideoRecord};
use crate::error::{Error, Result};

/// Snapshot of a video's public metadata.
///
/// When the identifier does not resolve, the wrapper is still constructed
/// but carries absent title and statistics. This is the typed version of
/// the defensive handling callers expect for deleted or private videos.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    video_id: String,
    pub title: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
}

impl VideoInfo {
    /// Fetches the video record and wraps it. An unresolvable id yields an
    /// absent-field wrapper, not an error; other failures propagate.
    pub async fn fetch(client: &dyn MetadataClient, video_id: &str) -> Result<Self> {
        match client.lookup_video(video_id).await {
            Ok(record) => Ok(Self::from_record(record)),
            Err(Error::NotFound { .. }) => {
                tracing::warn!(video_id, "video did not resolve");
                Ok(Self::absent(video_id))
            }
            Err(err) => Err(err),
        }
    }

    pub fn from_record(record: VideoRecord) -> Self {
        Self {
            video_id: record.id,
            title: Some(record.title),
            view_count: record.view_count,
            like_count: record.like_count,
        }
    }

    /// Wrapper for an identifier that resolved to no record.
    pub fn absent(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            title: None,
            view_count: None,
            like_count: None,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn is_resolved(&self) -> bool {
        self.title.is_some()
    }
}

impl std::fmt::Display for VideoInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{}", title),
            None => write!(f, "<not found>"),
        }
    }
}

/// A video seen as a member of a playlist: the video metadata plus the
/// owning playlist's id and title. Costs one extra playlist lookup.
#[derive(Debug, Clone)]
pub struct PlaylistVideoInfo {
    pub video: VideoInfo,
    pub playlist_id: String,
    pub playlist_title: String,
}

impl PlaylistVideoInfo {
    pub async fn fetch(
        client: &dyn MetadataClient,
        video_id: &str,
        playlist_id: &str,
    ) -> Result<Self> {
        let video = VideoInfo::fetch(client, video_id).await?;
        let playlist = client.lookup_playlist(playlist_id).await?;
        Ok(Self {
            video,
            playlist_id: playlist.id,
            playlist_title: playlist.title,
        })
    }
}

impl std::fmt::Display for PlaylistVideoInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.video, self.playlist_title)
    }
}
