pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use api::{MetadataClient, YouTubeDataClient, MAX_BATCH_SIZE};
pub use self::core::{ChannelInfo, PlaylistInfo, PlaylistOverview, PlaylistVideoInfo, VideoInfo};
pub use error::{Error, ResourceKind, Result};
