use std::sync::Arc;

use serenity::model::id::{ChannelId, GuildId};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::chat_surface::{ChatSurface, Reply};
use super::command_queue::Origin;
use super::session::{Invocation, Session};
use super::voice::{TransportError, VoiceRoster, VoiceTransport};
use crate::commands::music::audio_sources::{MediaResolver, SearchHit};

/// Errors reported to users. The display text is what they see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MusicError {
    #[error("Invalid number of arguments for this command")]
    ArgumentCount,

    #[error("Unrecognized command")]
    UnrecognizedCommand,

    #[error("Not playing audio")]
    NotConnected,

    #[error("You're not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("You and the bot aren't in the same voice channel")]
    ChannelMismatch,

    #[error("Failed to load results for \"{0}\"")]
    SearchFailed(String),

    #[error("Failed to load audio from \"{0}\"")]
    AudioFailed(String),

    #[error("Voice connection error: {0}")]
    Transport(String),

    #[error("Something went wrong while running that command")]
    Unexpected,
}

impl From<TransportError> for MusicError {
    fn from(err: TransportError) -> Self {
        MusicError::Transport(err.to_string())
    }
}

/// Result type for command handlers
pub type CommandResult = Result<(), MusicError>;

/// External collaborators the session talks to.
#[derive(Clone)]
pub struct Services {
    pub resolver: Arc<dyn MediaResolver>,
    pub transport: Arc<dyn VoiceTransport>,
    pub surface: Arc<dyn ChatSurface>,
    pub roster: Arc<dyn VoiceRoster>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSettings {
    /// Number of hits shown by `search`
    pub search_results: usize,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self { search_results: 5 }
    }
}

/// Outcome of one idle evaluation of the dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advancement {
    /// Nothing to do
    Idle,
    /// Audio is still being produced
    Busy,
    /// Next queued track started
    Started(String),
    /// Next queued track could not be played
    Failed(String),
    /// Playback ended with nothing queued
    Finished,
}

/// Owns the session and performs every state transition on it.
pub struct MusicManager {
    session: Session,
    services: Services,
    settings: PlayerSettings,
    // Context of the most recent command, reused by advancement
    last_invocation: Option<Invocation>,
}

impl MusicManager {
    pub fn new(services: Services, settings: PlayerSettings) -> Self {
        Self {
            session: Session::new(),
            services,
            settings,
            last_invocation: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Computes the context of a command at dequeue time.
    pub async fn bind(&mut self, origin: &Origin) -> Invocation {
        let voice_channel = self
            .services
            .roster
            .voice_channel_of(origin.guild, origin.author)
            .await;

        let invocation = Invocation {
            guild: origin.guild,
            text_channel: origin.channel,
            voice_channel,
            caller: origin.author,
        };
        self.last_invocation = Some(invocation);
        invocation
    }

    /// Delivers a reply, editing the loading placeholder if one is pending.
    /// Delivery failures are logged and otherwise ignored.
    pub async fn report(&mut self, inv: &Invocation, reply: Reply) {
        let surface = self.services.surface.clone();

        if let Some(placeholder) = self.session.placeholder.take() {
            match surface.edit(inv.text_channel, placeholder, &reply).await {
                Ok(()) => return,
                Err(err) => warn!("Failed to edit loading message {}: {}", placeholder, err),
            }
        }

        if let Err(err) = surface.send(inv.text_channel, &reply).await {
            warn!("Failed to send reply to {}: {}", inv.text_channel, err);
        }
    }

    /// Posts the loading placeholder unless one is already pending.
    pub async fn show_loading(&mut self, inv: &Invocation) {
        if self.session.awaiting_response() {
            return;
        }

        match self
            .services
            .surface
            .send(inv.text_channel, &Reply::Loading)
            .await
        {
            Ok(message) => self.session.placeholder = Some(message),
            Err(err) => warn!("Failed to post loading message: {}", err),
        }
    }

    /// Runs a ranked search with the configured result count.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MusicError> {
        match self
            .services
            .resolver
            .search(query, self.settings.search_results)
            .await
        {
            Ok(hits) if !hits.is_empty() => Ok(hits),
            Ok(_) => Err(MusicError::SearchFailed(query.to_string())),
            Err(err) => {
                warn!("Search for \"{}\" failed: {}", query, err);
                Err(MusicError::SearchFailed(query.to_string()))
            }
        }
    }

    /// Resolves `identifier` and starts it in the caller's voice channel.
    ///
    /// On resolution failure nothing about the connection or current track changes.
    pub async fn play(&mut self, inv: &Invocation, identifier: &str) -> CommandResult {
        let channel = inv.voice_channel()?;

        self.show_loading(inv).await;

        let track = match self.services.resolver.resolve(identifier).await {
            Ok(track) => track,
            Err(err) => {
                warn!("Failed to resolve {}: {}", identifier, err);
                return Err(MusicError::AudioFailed(identifier.to_string()));
            }
        };

        self.ensure_connection(inv.guild, channel).await?;
        let connection = self
            .session
            .connection
            .as_mut()
            .ok_or(MusicError::NotConnected)?;

        connection.stop().await;
        self.session.current_track = None;
        connection.play(track.source.clone()).await?;
        self.session.current_track = Some(identifier.to_string());

        info!("Now playing {} ({})", track.title, identifier);
        self.report(
            inv,
            Reply::NowPlaying {
                identifier: identifier.to_string(),
                track,
            },
        )
        .await;

        Ok(())
    }

    /// Makes sure the session is connected to `channel`, moving if needed.
    pub async fn ensure_connection(&mut self, guild: GuildId, channel: ChannelId) -> CommandResult {
        match self.session.connected_channel() {
            Some(current) if current == channel => return Ok(()),
            Some(current) => {
                debug!("Moving from voice channel {} to {}", current, channel);
                self.disconnect().await?;
            }
            None => {}
        }

        let connection = self.services.transport.connect(guild, channel).await?;
        info!("Connected to voice channel {}", channel);
        self.session.connection = Some(connection);
        Ok(())
    }

    /// Stops the current audio. The connection stays open.
    pub async fn stop_audio(&mut self) {
        if let Some(connection) = self.session.connection.as_mut() {
            connection.stop().await;
        }
        self.session.current_track = None;
    }

    /// Stops audio and leaves the voice channel, if connected.
    ///
    /// The connection is dropped from the session even when leaving fails.
    pub async fn disconnect(&mut self) -> CommandResult {
        self.session.current_track = None;

        let Some(mut connection) = self.session.connection.take() else {
            return Ok(());
        };

        connection.stop().await;
        connection.disconnect().await?;
        info!("Left voice channel {}", connection.channel());
        Ok(())
    }

    /// Checks that the bot is connected and the caller shares its channel.
    pub fn require_shared_channel(&self, inv: &Invocation) -> CommandResult {
        let bot_channel = self
            .session
            .connected_channel()
            .ok_or(MusicError::NotConnected)?;
        let caller_channel = inv.voice_channel()?;

        if bot_channel != caller_channel {
            return Err(MusicError::ChannelMismatch);
        }
        Ok(())
    }

    /// One idle evaluation: starts the next queued track when nothing is
    /// playing, or clears the current track once playback has ended.
    pub async fn advance(&mut self) -> Advancement {
        let producing = match self.session.connection.as_ref() {
            Some(connection) => Some(connection.is_producing_audio().await),
            None => None,
        };

        match producing {
            Some(true) => Advancement::Busy,
            None if self.session.queue.is_empty() => Advancement::Idle,
            Some(false) if self.session.queue.is_empty() => {
                if self.session.current_track.take().is_some() {
                    debug!("Playback finished with an empty queue");
                    Advancement::Finished
                } else {
                    Advancement::Idle
                }
            }
            _ => self.play_next().await,
        }
    }

    async fn play_next(&mut self) -> Advancement {
        let Some(mut context) = self.last_invocation else {
            return Advancement::Idle;
        };
        // While connected, follow the bot's channel rather than the last caller's
        if let Some(channel) = self.session.connected_channel() {
            context.voice_channel = Some(channel);
        }

        let Some(identifier) = self.session.queue.pop_next() else {
            return Advancement::Idle;
        };
        debug!("Advancing queue to {}", identifier);

        match self.play(&context, &identifier).await {
            Ok(()) => Advancement::Started(identifier),
            Err(err) => {
                self.report(&context, Reply::Error(err)).await;
                Advancement::Failed(identifier)
            }
        }
    }

    /// Leaves the voice channel once the bot is alone in it.
    /// Returns whether the session was torn down.
    pub async fn on_membership_changed(&mut self, guild: GuildId, channel: ChannelId) -> bool {
        if self.session.connected_channel() != Some(channel) {
            return false;
        }
        let members = self.services.roster.members_in(guild, channel).await;
        if members > 1 {
            return false;
        }

        info!("Voice channel {} is empty, disconnecting", channel);
        self.session.current_track = None;
        self.session.queue.clear();
        if let Err(err) = self.disconnect().await {
            warn!("Failed to leave empty voice channel: {}", err);
        }
        true
    }
}
