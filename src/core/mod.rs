pub mod channel;
pub mod duration;
pub mod playlist;
pub mod video;

pub use channel::ChannelInfo;
pub use duration::parse_duration;
pub use playlist::{select_best_video, PlaylistInfo, PlaylistMember, PlaylistOverview};
pub use video::{PlaylistVideoInfo, VideoInfo};
