use crate::api::{MetadataClient, VideoRecord, MAX_BATCH_SIZE};
use crate::core::duration::parse_duration;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::time::Duration;

const PLAYLIST_URL_BASE: &str = "https://www.youtube.com/playlist?list=";
const SHORT_LINK_BASE: &str = "https://youtu.be";

/// What any playlist-like entity must be able to report.
pub trait PlaylistOverview {
    fn title(&self) -> &str;
    fn url(&self) -> String;
    fn total_duration(&self) -> Result<Duration>;
    fn best_video_url(&self) -> Result<String>;
}

/// One playlist member with the statistics needed for aggregation.
#[derive(Debug, Clone)]
pub struct PlaylistMember {
    pub video_id: String,
    pub title: String,
    /// ISO-8601 compact duration string as fetched.
    pub duration: Option<String>,
    pub like_count: Option<u64>,
}

impl From<VideoRecord> for PlaylistMember {
    fn from(record: VideoRecord) -> Self {
        Self {
            video_id: record.id,
            title: record.title,
            duration: record.duration,
            like_count: record.like_count,
        }
    }
}

/// A playlist and its member statistics, fetched as one snapshot.
///
/// The aggregate accessors are pure over that snapshot; call
/// [`PlaylistInfo::fetch`] again for fresh numbers.
#[derive(Debug, Clone)]
pub struct PlaylistInfo {
    playlist_id: String,
    title: String,
    members: Vec<PlaylistMember>,
}

impl PlaylistInfo {
    /// Fetches the playlist record, its member listing and batched member
    /// statistics (one `videos.list` call per [`MAX_BATCH_SIZE`] ids).
    ///
    /// Only the first page of members is considered: a playlist longer
    /// than `page_size` entries (capped at [`MAX_BATCH_SIZE`]) is
    /// truncated to its first page. Member ids the batch lookup cannot
    /// resolve are excluded from the snapshot, so they contribute to
    /// neither aggregate.
    pub async fn fetch(
        client: &dyn MetadataClient,
        playlist_id: &str,
        page_size: u32,
    ) -> Result<Self> {
        let record = client.lookup_playlist(playlist_id).await?;
        let member_ids = client
            .list_playlist_members(playlist_id, page_size.min(MAX_BATCH_SIZE as u32))
            .await?;

        let mut records: HashMap<String, VideoRecord> = HashMap::new();
        for chunk in member_ids.chunks(MAX_BATCH_SIZE) {
            for video in client.lookup_videos_batch(chunk).await? {
                records.insert(video.id.clone(), video);
            }
        }

        // The listing and the batch lookup need not agree on order, so
        // correlate by id while keeping the playlist's own ordering.
        let mut members = Vec::with_capacity(member_ids.len());
        for id in &member_ids {
            match records.get(id) {
                Some(video) => members.push(PlaylistMember::from(video.clone())),
                None => tracing::warn!(video_id = %id, "member excluded: id did not resolve"),
            }
        }

        tracing::debug!(
            playlist_id = %record.id,
            members = members.len(),
            "fetched playlist snapshot"
        );

        Ok(Self {
            playlist_id: record.id,
            title: record.title,
            members,
        })
    }

    pub fn playlist_id(&self) -> &str {
        &self.playlist_id
    }

    pub fn members(&self) -> &[PlaylistMember] {
        &self.members
    }
}

impl PlaylistOverview for PlaylistInfo {
    fn title(&self) -> &str {
        &self.title
    }

    fn url(&self) -> String {
        format!("{}{}", PLAYLIST_URL_BASE, self.playlist_id)
    }

    /// Sum of all member durations. Order-independent.
    ///
    /// A single malformed member duration fails the whole aggregate with
    /// [`Error::MalformedDuration`].
    fn total_duration(&self) -> Result<Duration> {
        let mut total = Duration::ZERO;
        for member in &self.members {
            let raw = member.duration.as_deref().ok_or_else(|| {
                Error::MalformedDuration(format!("{}: no duration in record", member.video_id))
            })?;
            total += parse_duration(raw)?;
        }
        Ok(total)
    }

    /// Short link to the member with the strictly greatest like count.
    ///
    /// Fails with [`Error::EmptyPlaylist`] only when there are no members
    /// at all; a member with zero likes can still win.
    fn best_video_url(&self) -> Result<String> {
        select_best_video(&self.members)
            .map(|member| format!("{}/{}", SHORT_LINK_BASE, member.video_id))
            .ok_or(Error::EmptyPlaylist)
    }
}

/// Picks the member with the greatest like count, earliest wins on ties.
/// A missing like count counts as zero. `None` only for an empty slice.
pub fn select_best_video(members: &[PlaylistMember]) -> Option<&PlaylistMember> {
    let mut best: Option<&PlaylistMember> = None;
    for member in members {
        match best {
            // Strictly-greater keeps the earliest entry on ties.
            Some(current) if member.like_count.unwrap_or(0) <= current.like_count.unwrap_or(0) => {}
            _ => best = Some(member),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, likes: Option<u64>, duration: &str) -> PlaylistMember {
        PlaylistMember {
            video_id: id.to_string(),
            title: format!("Video {}", id),
            duration: Some(duration.to_string()),
            like_count: likes,
        }
    }

    #[test]
    fn test_selector_earliest_wins_on_tie() {
        let members = vec![
            member("a", Some(5), "PT1M"),
            member("b", Some(5), "PT1M"),
            member("c", Some(3), "PT1M"),
        ];
        assert_eq!(select_best_video(&members).unwrap().video_id, "a");
    }

    #[test]
    fn test_selector_empty_input() {
        assert!(select_best_video(&[]).is_none());
    }

    #[test]
    fn test_selector_zero_like_member_can_win() {
        let members = vec![member("only", Some(0), "PT1M")];
        assert_eq!(select_best_video(&members).unwrap().video_id, "only");
    }

    #[test]
    fn test_selector_missing_likes_count_as_zero() {
        let members = vec![member("a", None, "PT1M"), member("b", Some(1), "PT1M")];
        assert_eq!(select_best_video(&members).unwrap().video_id, "b");
    }

    #[test]
    fn test_selector_order_invariant_without_ties() {
        let mut members = vec![
            member("a", Some(3), "PT1M"),
            member("b", Some(20), "PT1M"),
            member("c", Some(10), "PT1M"),
        ];
        assert_eq!(select_best_video(&members).unwrap().video_id, "b");
        members.reverse();
        assert_eq!(select_best_video(&members).unwrap().video_id, "b");
    }

    fn playlist(members: Vec<PlaylistMember>) -> PlaylistInfo {
        PlaylistInfo {
            playlist_id: "PLtest".to_string(),
            title: "Test Playlist".to_string(),
            members,
        }
    }

    #[test]
    fn test_total_duration_sums_members() {
        let info = playlist(vec![
            member("a", Some(1), "PT4M3S"),
            member("b", Some(2), "PT1M0S"),
        ]);
        assert_eq!(info.total_duration().unwrap(), Duration::from_secs(303));
    }

    #[test]
    fn test_total_duration_is_permutation_invariant() {
        let forward = playlist(vec![
            member("a", None, "PT1H"),
            member("b", None, "PT2M"),
            member("c", None, "PT3S"),
        ]);
        let backward = playlist(vec![
            member("c", None, "PT3S"),
            member("b", None, "PT2M"),
            member("a", None, "PT1H"),
        ]);
        assert_eq!(
            forward.total_duration().unwrap(),
            backward.total_duration().unwrap()
        );
    }

    #[test]
    fn test_total_duration_empty_playlist_is_zero() {
        assert_eq!(playlist(vec![]).total_duration().unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_total_duration_aborts_on_malformed_member() {
        let info = playlist(vec![
            member("a", None, "PT1M"),
            member("b", None, "4 minutes"),
        ]);
        assert!(matches!(
            info.total_duration(),
            Err(Error::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_best_video_url_uses_short_link() {
        let info = playlist(vec![
            member("v1", Some(10), "PT4M3S"),
            member("v2", Some(20), "PT1M0S"),
        ]);
        assert_eq!(info.best_video_url().unwrap(), "https://youtu.be/v2");
    }

    #[test]
    fn test_best_video_on_empty_playlist_fails() {
        assert!(matches!(
            playlist(vec![]).best_video_url(),
            Err(Error::EmptyPlaylist)
        ));
    }

    #[test]
    fn test_playlist_url_is_derived_from_id() {
        let info = playlist(vec![]);
        assert_eq!(info.url(), "https://www.youtube.com/playlist?list=PLtest");
    }
}
