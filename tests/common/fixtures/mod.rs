//! Sample ids and media used across the integration tests

use std::time::Duration;

use serenity::model::id::{ChannelId, GuildId, UserId};
use zedia::commands::music::audio_sources::{PlayableSource, SearchHit, TrackMetadata};

pub const GUILD: GuildId = GuildId::new(1);
pub const TEXT_CHANNEL: ChannelId = ChannelId::new(10);
pub const LOUNGE: ChannelId = ChannelId::new(100);
pub const STUDIO: ChannelId = ChannelId::new(200);

/// Caller sitting in `LOUNGE`
pub const ALICE: UserId = UserId::new(1000);
/// Caller sitting in `STUDIO`
pub const BOB: UserId = UserId::new(2000);
/// Caller not in any voice channel
pub const CAROL: UserId = UserId::new(3000);

pub const SONG_A: &str = "https://www.youtube.com/watch?v=aaaaaaaaaaa";
pub const SONG_B: &str = "https://www.youtube.com/watch?v=bbbbbbbbbbb";
pub const SONG_C: &str = "https://www.youtube.com/watch?v=ccccccccccc";

/// Stream URL the fake resolver hands out for a page URL
pub fn stream_url(identifier: &str) -> String {
    format!("{}&stream=1", identifier)
}

pub fn track(identifier: &str) -> TrackMetadata {
    TrackMetadata {
        title: format!("Title of {}", identifier),
        duration: Some(Duration::from_secs(213)),
        uploader: "Uploader".to_string(),
        uploader_id: Some("@uploader".to_string()),
        uploader_url: Some("https://www.youtube.com/@uploader".to_string()),
        source: PlayableSource {
            stream_url: stream_url(identifier),
        },
    }
}

pub fn hits(count: usize) -> Vec<SearchHit> {
    (1..=count)
        .map(|n| SearchHit {
            title: format!("Result {}", n),
            url: format!("https://www.youtube.com/watch?v=result{:05}", n),
            uploader: format!("Channel {}", n),
        })
        .collect()
}
