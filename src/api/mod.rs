pub mod types;

use crate::config::Config;
use crate::error::{Error, ResourceKind, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use types::{
    ChannelResource, ListResponse, PlaylistItemResource, PlaylistResource, VideoResource,
};

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The largest `id` batch (and `maxResults` page) the Data API accepts.
pub const MAX_BATCH_SIZE: usize = 50;

/// A channel record normalized out of a `channels.list` response.
#[derive(Debug, Clone)]
pub struct ChannelRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
}

/// A video record normalized out of a `videos.list` response.
#[derive(Debug, Clone)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub view_count: Option<u64>,
    /// Absent when the uploader hides ratings.
    pub like_count: Option<u64>,
    /// ISO-8601 compact duration string, absent without `contentDetails`.
    pub duration: Option<String>,
}

/// A playlist record normalized out of a `playlists.list` response.
#[derive(Debug, Clone)]
pub struct PlaylistRecord {
    pub id: String,
    pub title: String,
}

/// Read-only access to YouTube metadata, by identifier.
///
/// The aggregation core talks to this trait so that it can run against the
/// live Data API or an in-memory double in tests.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Fails with [`Error::NotFound`] when the id resolves to no channel.
    async fn lookup_channel(&self, id: &str) -> Result<ChannelRecord>;

    /// Fails with [`Error::NotFound`] when the id resolves to no video.
    async fn lookup_video(&self, id: &str) -> Result<VideoRecord>;

    /// Fails with [`Error::NotFound`] when the id resolves to no playlist.
    async fn lookup_playlist(&self, id: &str) -> Result<PlaylistRecord>;

    /// Returns one page of member video ids, in playlist order.
    /// `page_size` is capped at [`MAX_BATCH_SIZE`].
    async fn list_playlist_members(
        &self,
        playlist_id: &str,
        page_size: u32,
    ) -> Result<Vec<String>>;

    /// Batched statistics lookup for up to [`MAX_BATCH_SIZE`] ids.
    ///
    /// Identifiers that do not resolve are simply missing from the result;
    /// the response order is not guaranteed to match the request order.
    async fn lookup_videos_batch(&self, ids: &[String]) -> Result<Vec<VideoRecord>>;
}

/// `MetadataClient` backed by the YouTube Data API v3.
///
/// Construct this once at startup from a resolved [`Config`] and pass it by
/// reference into every component that needs it. It is immutable after
/// construction and safe to share.
pub struct YouTubeDataClient {
    client: reqwest::Client,
    api_key: String,
}

impl YouTubeDataClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(Error::MissingApiKey)?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, api_key })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let mut url = Url::parse(&format!("{}/{}", API_BASE, resource))?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("key", &self.api_key);
        }

        tracing::debug!("GET {}/{}", API_BASE, resource);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MetadataClient for YouTubeDataClient {
    async fn lookup_channel(&self, id: &str) -> Result<ChannelRecord> {
        let response: ListResponse<ChannelResource> = self
            .get("channels", &[("part", "snippet,statistics"), ("id", id)])
            .await?;

        let channel = response.items.into_iter().next().ok_or_else(|| Error::NotFound {
            kind: ResourceKind::Channel,
            id: id.to_string(),
        })?;

        Ok(ChannelRecord {
            id: channel.id,
            title: channel.snippet.title,
            description: channel.snippet.description,
            subscriber_count: parse_count(channel.statistics.subscriber_count).unwrap_or(0),
            video_count: parse_count(channel.statistics.video_count).unwrap_or(0),
            view_count: parse_count(channel.statistics.view_count).unwrap_or(0),
        })
    }

    async fn lookup_video(&self, id: &str) -> Result<VideoRecord> {
        let response: ListResponse<VideoResource> = self
            .get(
                "videos",
                &[("part", "snippet,statistics,contentDetails"), ("id", id)],
            )
            .await?;

        let video = response.items.into_iter().next().ok_or_else(|| Error::NotFound {
            kind: ResourceKind::Video,
            id: id.to_string(),
        })?;

        Ok(normalize_video(video))
    }

    async fn lookup_playlist(&self, id: &str) -> Result<PlaylistRecord> {
        let response: ListResponse<PlaylistResource> = self
            .get("playlists", &[("part", "snippet"), ("id", id)])
            .await?;

        let playlist = response.items.into_iter().next().ok_or_else(|| Error::NotFound {
            kind: ResourceKind::Playlist,
            id: id.to_string(),
        })?;

        Ok(PlaylistRecord {
            id: playlist.id,
            title: playlist.snippet.title,
        })
    }

    async fn list_playlist_members(
        &self,
        playlist_id: &str,
        page_size: u32,
    ) -> Result<Vec<String>> {
        let page_size = page_size.min(MAX_BATCH_SIZE as u32).to_string();
        let response: ListResponse<PlaylistItemResource> = self
            .get(
                "playlistItems",
                &[
                    ("part", "contentDetails"),
                    ("playlistId", playlist_id),
                    ("maxResults", &page_size),
                ],
            )
            .await?;

        tracing::debug!(
            playlist_id,
            members = response.items.len(),
            more_pages = response.next_page_token.is_some(),
            "listed playlist members"
        );

        Ok(response
            .items
            .into_iter()
            .map(|item| item.content_details.video_id)
            .collect())
    }

    async fn lookup_videos_batch(&self, ids: &[String]) -> Result<Vec<VideoRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let response: ListResponse<VideoResource> = self
            .get(
                "videos",
                &[
                    ("part", "snippet,statistics,contentDetails"),
                    ("id", &joined),
                ],
            )
            .await?;

        if response.items.len() < ids.len() {
            tracing::warn!(
                requested = ids.len(),
                resolved = response.items.len(),
                "some video ids did not resolve"
            );
        }

        Ok(response.items.into_iter().map(normalize_video).collect())
    }
}

fn normalize_video(video: VideoResource) -> VideoRecord {
    let (view_count, like_count) = match video.statistics {
        Some(stats) => (parse_count(stats.view_count), parse_count(stats.like_count)),
        None => (None, None),
    };

    VideoRecord {
        id: video.id,
        title: video.snippet.title,
        view_count,
        like_count,
        duration: video.content_details.map(|details| details.duration),
    }
}

/// The API reports counters as strings; a missing or non-numeric value
/// normalizes to `None`.
fn parse_count(raw: Option<String>) -> Option<u64> {
    raw.and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("1234".to_string())), Some(1234));
        assert_eq!(parse_count(Some("not a number".to_string())), None);
        assert_eq!(parse_count(None), None);
    }

    #[test]
    fn test_video_list_response_decoding() {
        let json = r#"{
            "kind": "youtube#videoListResponse",
            "pageInfo": { "totalResults": 1, "resultsPerPage": 1 },
            "items": [{
                "id": "dQw4w9WgXcQ",
                "snippet": { "title": "Test Video" },
                "statistics": { "viewCount": "1000", "likeCount": "50" },
                "contentDetails": { "duration": "PT4M3S" }
            }]
        }"#;

        let response: ListResponse<VideoResource> = serde_json::from_str(json).unwrap();
        let record = normalize_video(response.items.into_iter().next().unwrap());

        assert_eq!(record.id, "dQw4w9WgXcQ");
        assert_eq!(record.title, "Test Video");
        assert_eq!(record.view_count, Some(1000));
        assert_eq!(record.like_count, Some(50));
        assert_eq!(record.duration.as_deref(), Some("PT4M3S"));
    }

    #[test]
    fn test_empty_items_key_is_optional() {
        let json = r#"{ "kind": "youtube#videoListResponse" }"#;
        let response: ListResponse<VideoResource> = serde_json::from_str(json).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_hidden_like_count_normalizes_to_none() {
        let json = r#"{
            "items": [{
                "id": "abc",
                "snippet": { "title": "Ratings Hidden" },
                "statistics": { "viewCount": "10" },
                "contentDetails": { "duration": "PT30S" }
            }]
        }"#;

        let response: ListResponse<VideoResource> = serde_json::from_str(json).unwrap();
        let record = normalize_video(response.items.into_iter().next().unwrap());
        assert_eq!(record.like_count, None);
        assert_eq!(record.view_count, Some(10));
    }
}
