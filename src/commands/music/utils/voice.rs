//! Traits the session uses to reach a voice channel, and to ask the gateway
//! where a user currently is.

use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId, UserId};
use thiserror::Error;

use crate::commands::music::audio_sources::PlayableSource;

/// Errors raised by a voice transport
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to join voice channel: {0}")]
    Join(String),

    #[error("Failed to leave voice channel: {0}")]
    Leave(String),

    #[error("Failed to start playback: {0}")]
    Playback(String),

    #[error("Failed to get voice manager")]
    NoVoiceManager,
}

/// Opens voice connections. `connect` either yields a live connection or nothing.
#[async_trait]
pub trait VoiceTransport: Send + Sync {
    async fn connect(
        &self,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<Box<dyn VoiceConnection>, TransportError>;
}

/// A live connection to one voice channel.
#[async_trait]
pub trait VoiceConnection: Send + Sync {
    /// Channel this connection is bound to
    fn channel(&self) -> ChannelId;

    /// Stops whatever is playing. Safe to call when nothing is.
    async fn stop(&mut self);

    /// Starts a source, replacing any previous one
    async fn play(&mut self, source: PlayableSource) -> Result<(), TransportError>;

    /// Whether audio is currently being produced (paused counts as producing)
    async fn is_producing_audio(&self) -> bool;

    /// Leaves the channel
    async fn disconnect(&mut self) -> Result<(), TransportError>;
}

/// Gateway-side lookup of members' voice channels.
#[async_trait]
pub trait VoiceRoster: Send + Sync {
    async fn voice_channel_of(&self, guild: GuildId, user: UserId) -> Option<ChannelId>;

    /// Number of members, the bot included, currently in a voice channel
    async fn members_in(&self, guild: GuildId, channel: ChannelId) -> usize;
}
