//! Outcomes the session reports back to the text channel, and the trait that
//! delivers them.

use serenity::async_trait;
use serenity::model::id::{ChannelId, MessageId};
use thiserror::Error;

use super::music_manager::MusicError;
use crate::commands::music::audio_sources::{SearchHit, TrackMetadata};

/// Something to show the user. Rendering is up to the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Placeholder posted before slow work, edited by the next reply
    Loading,
    Help,
    SearchResults { query: String, hits: Vec<SearchHit> },
    NowPlaying { identifier: String, track: TrackMetadata },
    Queued { identifier: String, length: usize },
    QueueListing(Vec<String>),
    QueueEmpty,
    QueueCleared,
    Stopped,
    Disconnected,
    Error(MusicError),
}

/// Errors raised while delivering a reply
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

#[async_trait]
pub trait ChatSurface: Send + Sync {
    /// Posts a new message and returns its id
    async fn send(&self, channel: ChannelId, reply: &Reply) -> Result<MessageId, SurfaceError>;

    /// Replaces the content of a message posted earlier
    async fn edit(
        &self,
        channel: ChannelId,
        message: MessageId,
        reply: &Reply,
    ) -> Result<(), SurfaceError>;
}
