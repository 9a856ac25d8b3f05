use crate::api::YouTubeDataClient;
use crate::config::Config;
use crate::core::{ChannelInfo, PlaylistInfo, PlaylistOverview, PlaylistVideoInfo, VideoInfo};
use crate::error::Error;
use crate::utils::format_duration;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "yt-meta-ng")]
#[command(about = "YouTube channel, video and playlist metadata")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API key (overrides the config file and YOUTUBE_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show channel metadata
    Channel {
        /// Channel ID
        id: String,

        /// Write the channel snapshot to a JSON file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },
    /// Show video metadata
    Video {
        /// Video ID
        id: String,

        /// Playlist the video belongs to
        #[arg(short, long)]
        playlist: Option<String>,
    },
    /// Show playlist aggregates: total watch-time and most-liked video
    Playlist {
        /// Playlist ID
        id: String,
    },
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load(),
        };
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }

        // One client for the whole invocation; every fetch borrows it.
        let client = YouTubeDataClient::new(&config)?;

        match &self.command {
            Command::Channel { id, save } => {
                let channel = ChannelInfo::fetch(&client, id).await?;

                println!("{}", channel);
                println!("URL: {}", channel.url);
                println!("Subscribers: {}", channel.subscriber_count);
                println!("Videos: {}", channel.video_count);
                println!("Views: {}", channel.view_count);

                if let Some(path) = save {
                    channel.save_json(path)?;
                    println!("Saved snapshot to: {}", path.display());
                }
            }
            Command::Video { id, playlist } => match playlist {
                Some(playlist_id) => {
                    let member = PlaylistVideoInfo::fetch(&client, id, playlist_id).await?;
                    println!("{}", member);
                    print_video_stats(&member.video);
                }
                None => {
                    let video = VideoInfo::fetch(&client, id).await?;
                    println!("{}", video);
                    print_video_stats(&video);
                }
            },
            Command::Playlist { id } => {
                let playlist = PlaylistInfo::fetch(&client, id, config.page_size).await?;

                println!("Playlist: {}", playlist.title());
                println!("URL: {}", playlist.url());
                println!("Videos: {}", playlist.members().len());
                println!(
                    "Total duration: {}",
                    format_duration(playlist.total_duration()?)
                );
                match playlist.best_video_url() {
                    Ok(url) => println!("Best video: {}", url),
                    Err(Error::EmptyPlaylist) => println!("Best video: none (playlist is empty)"),
                    Err(err) => return Err(err.into()),
                }
            }
        }

        Ok(())
    }
}

fn print_video_stats(video: &VideoInfo) {
    if !video.is_resolved() {
        println!("Video {} did not resolve", video.video_id());
        return;
    }
    if let Some(views) = video.view_count {
        println!("Views: {}", views);
    }
    match video.like_count {
        Some(likes) => println!("Likes: {}", likes),
        None => println!("Likes: hidden"),
    }
}
