//! State of the single playback session and the per-command context.

use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

use super::music_manager::MusicError;
use super::queue_manager::TrackQueue;
use super::voice::VoiceConnection;

/// Playback state, owned by the dispatch loop.
///
/// `connection` is set iff the bot is bound to a voice channel, and
/// `current_track` is set iff that channel is expected to be producing audio.
#[derive(Default)]
pub struct Session {
    pub connection: Option<Box<dyn VoiceConnection>>,
    pub current_track: Option<String>,
    pub queue: TrackQueue,
    /// Loading message to edit with the next report
    pub placeholder: Option<MessageId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn connected_channel(&self) -> Option<ChannelId> {
        self.connection.as_ref().map(|c| c.channel())
    }

    pub fn awaiting_response(&self) -> bool {
        self.placeholder.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("channel", &self.connected_channel())
            .field("current_track", &self.current_track)
            .field("queue", &self.queue)
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

/// Context of one command, computed when it is dequeued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub guild: GuildId,
    pub text_channel: ChannelId,
    /// Caller's voice channel at dequeue time
    pub voice_channel: Option<ChannelId>,
    pub caller: UserId,
}

impl Invocation {
    pub fn voice_channel(&self) -> Result<ChannelId, MusicError> {
        self.voice_channel.ok_or(MusicError::UserNotInVoiceChannel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert!(!session.is_connected());
        assert!(!session.awaiting_response());
        assert_eq!(session.connected_channel(), None);
        assert!(session.queue.is_empty());
    }

    #[test]
    fn test_invocation_without_voice() {
        let inv = Invocation {
            guild: GuildId::new(1),
            text_channel: ChannelId::new(2),
            voice_channel: None,
            caller: UserId::new(3),
        };
        assert_matches!(inv.voice_channel(), Err(MusicError::UserNotInVoiceChannel));
    }
}
