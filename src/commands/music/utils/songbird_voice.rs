//! Voice transport built on songbird.

use std::sync::Arc;

use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use serenity::prelude::Mutex;
use songbird::input::HttpRequest;
use songbird::tracks::{PlayMode, TrackHandle};
use songbird::{Call, Event, Songbird, TrackEvent};
use tokio::sync::Notify;
use tracing::{debug, warn};

use super::event_handlers::TrackEndNotifier;
use super::voice::{TransportError, VoiceConnection, VoiceTransport};
use crate::HTTP_CLIENT;
use crate::commands::music::audio_sources::PlayableSource;

pub struct SongbirdTransport {
    manager: Arc<Songbird>,
    finished: Arc<Notify>,
}

impl SongbirdTransport {
    /// `finished` is notified whenever a track started through this transport ends
    pub fn new(manager: Arc<Songbird>, finished: Arc<Notify>) -> Self {
        Self { manager, finished }
    }
}

#[async_trait]
impl VoiceTransport for SongbirdTransport {
    async fn connect(
        &self,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<Box<dyn VoiceConnection>, TransportError> {
        let call = self
            .manager
            .join(guild, channel)
            .await
            .map_err(|e| TransportError::Join(e.to_string()))?;

        Ok(Box::new(SongbirdConnection {
            guild,
            channel,
            call,
            manager: self.manager.clone(),
            current: None,
            finished: self.finished.clone(),
        }))
    }
}

pub struct SongbirdConnection {
    guild: GuildId,
    channel: ChannelId,
    call: Arc<Mutex<Call>>,
    manager: Arc<Songbird>,
    current: Option<TrackHandle>,
    finished: Arc<Notify>,
}

#[async_trait]
impl VoiceConnection for SongbirdConnection {
    fn channel(&self) -> ChannelId {
        self.channel
    }

    async fn stop(&mut self) {
        if let Some(track) = self.current.take() {
            // Already-finished tracks report an error here; nothing to do about it
            let _ = track.stop();
        }
        self.call.lock().await.stop();
    }

    async fn play(&mut self, source: PlayableSource) -> Result<(), TransportError> {
        let input = HttpRequest::new(HTTP_CLIENT.clone(), source.stream_url);

        let track = self.call.lock().await.play_input(input.into());
        for event in [TrackEvent::End, TrackEvent::Error] {
            track
                .add_event(
                    Event::Track(event),
                    TrackEndNotifier {
                        finished: self.finished.clone(),
                    },
                )
                .map_err(|e| TransportError::Playback(e.to_string()))?;
        }

        debug!("Started track {} in guild {}", track.uuid(), self.guild);
        self.current = Some(track);
        Ok(())
    }

    async fn is_producing_audio(&self) -> bool {
        let Some(track) = &self.current else {
            return false;
        };

        match track.get_info().await {
            Ok(state) => matches!(state.playing, PlayMode::Play | PlayMode::Pause),
            Err(_) => false,
        }
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        self.current = None;
        if let Err(e) = self.manager.remove(self.guild).await {
            warn!("Songbird failed to leave guild {}: {}", self.guild, e);
            return Err(TransportError::Leave(e.to_string()));
        }
        Ok(())
    }
}
