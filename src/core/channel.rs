use crate::api::{ChannelRecord, MetadataClient};
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

const CHANNEL_URL_BASE: &str = "https://www.youtube.com/channel";

/// Snapshot of a channel's public metadata, read-only after construction.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelInfo {
    channel_id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
}

impl ChannelInfo {
    /// Fetches the channel record and wraps it. One remote call.
    pub async fn fetch(client: &dyn MetadataClient, channel_id: &str) -> Result<Self> {
        let record = client.lookup_channel(channel_id).await?;
        Ok(Self::from_record(record))
    }

    pub fn from_record(record: ChannelRecord) -> Self {
        let url = format!("{}/{}", CHANNEL_URL_BASE, record.id);
        Self {
            channel_id: record.id,
            title: record.title,
            description: record.description,
            url,
            subscriber_count: record.subscriber_count,
            video_count: record.video_count,
            view_count: record.view_count,
        }
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Sum of this channel's and `other`'s subscriber counts.
    pub fn combined_subscribers(&self, other: &ChannelInfo) -> u64 {
        self.subscriber_count + other.subscriber_count
    }

    /// Whether this channel has strictly more subscribers than `other`.
    pub fn has_more_subscribers_than(&self, other: &ChannelInfo) -> bool {
        self.subscriber_count > other.subscriber_count
    }

    /// Writes the channel snapshot to `path` as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        tracing::info!("saved channel snapshot to {}", path.display());
        Ok(())
    }
}

impl std::fmt::Display for ChannelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "YouTube channel: {}", self.title)
    }
}
