use thiserror::Error;

/// What kind of resource an identifier failed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Channel,
    Video,
    Playlist,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Channel => write!(f, "channel"),
            Self::Video => write!(f, "video"),
            Self::Playlist => write!(f, "playlist"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// The duration string is not a valid `PT#H#M#S` encoding.
    #[error("malformed duration string: {0:?}")]
    MalformedDuration(String),
    /// The identifier resolved to no record.
    #[error("{kind} not found: {id}")]
    NotFound { kind: ResourceKind, id: String },
    /// Best-video was requested on a playlist with no members.
    #[error("playlist has no videos")]
    EmptyPlaylist,
    /// The API answered with a non-success status code.
    #[error("YouTube API returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode API response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no API key: set YOUTUBE_API_KEY or pass --api-key")]
    MissingApiKey,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
