//! Mock and recording implementations of the session's collaborators

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

use zedia::commands::music::audio_sources::{
    MediaResolver, PlayableSource, ResolveError, SearchHit, TrackMetadata,
};
use zedia::commands::music::utils::chat_surface::{ChatSurface, Reply, SurfaceError};
use zedia::commands::music::utils::voice::{
    TransportError, VoiceConnection, VoiceRoster, VoiceTransport,
};

mock! {
    pub Resolver {}

    #[async_trait]
    impl MediaResolver for Resolver {
        async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>, ResolveError>;
        async fn resolve(&self, identifier: &str) -> Result<TrackMetadata, ResolveError>;
    }
}

/// Everything the fake voice transport was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    Connect(ChannelId),
    Stop(ChannelId),
    Play(ChannelId, String),
    Disconnect(ChannelId),
}

/// Shared state between the fake transport and the test
#[derive(Debug, Default)]
pub struct VoiceLog {
    events: Mutex<Vec<VoiceEvent>>,
    producing: AtomicBool,
    fail_connect: AtomicBool,
    fail_disconnect: AtomicBool,
}

impl VoiceLog {
    pub fn events(&self) -> Vec<VoiceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Simulates the current track ending (or resuming)
    pub fn set_producing(&self, producing: bool) {
        self.producing.store(producing, Ordering::SeqCst);
    }

    pub fn fail_connect(&self, fail: bool) {
        self.fail_connect.store(fail, Ordering::SeqCst);
    }

    pub fn fail_disconnect(&self, fail: bool) {
        self.fail_disconnect.store(fail, Ordering::SeqCst);
    }

    fn push(&self, event: VoiceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct FakeTransport {
    pub log: Arc<VoiceLog>,
}

#[async_trait]
impl VoiceTransport for FakeTransport {
    async fn connect(
        &self,
        _guild: GuildId,
        channel: ChannelId,
    ) -> Result<Box<dyn VoiceConnection>, TransportError> {
        if self.log.fail_connect.load(Ordering::SeqCst) {
            return Err(TransportError::Join("gateway timed out".to_string()));
        }

        self.log.push(VoiceEvent::Connect(channel));
        Ok(Box::new(FakeConnection {
            channel,
            log: self.log.clone(),
        }))
    }
}

pub struct FakeConnection {
    channel: ChannelId,
    log: Arc<VoiceLog>,
}

#[async_trait]
impl VoiceConnection for FakeConnection {
    fn channel(&self) -> ChannelId {
        self.channel
    }

    async fn stop(&mut self) {
        self.log.push(VoiceEvent::Stop(self.channel));
        self.log.set_producing(false);
    }

    async fn play(&mut self, source: PlayableSource) -> Result<(), TransportError> {
        self.log.push(VoiceEvent::Play(self.channel, source.stream_url));
        self.log.set_producing(true);
        Ok(())
    }

    async fn is_producing_audio(&self) -> bool {
        self.log.producing.load(Ordering::SeqCst)
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        if self.log.fail_disconnect.load(Ordering::SeqCst) {
            return Err(TransportError::Leave("voice gateway closed".to_string()));
        }

        self.log.push(VoiceEvent::Disconnect(self.channel));
        self.log.set_producing(false);
        Ok(())
    }
}

/// One call made on the chat surface
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Sent(MessageId, Reply),
    Edited(MessageId, Reply),
}

/// Chat surface that remembers every send and edit
#[derive(Debug)]
pub struct RecordingSurface {
    deliveries: Mutex<Vec<Delivery>>,
    next_id: AtomicU64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(5000),
        }
    }
}

impl RecordingSurface {
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Messages as a user would see them now: posting order, latest content
    pub fn visible(&self) -> Vec<Reply> {
        let mut order = Vec::new();
        let mut content: HashMap<MessageId, Reply> = HashMap::new();

        for delivery in self.deliveries() {
            match delivery {
                Delivery::Sent(id, reply) => {
                    order.push(id);
                    content.insert(id, reply);
                }
                Delivery::Edited(id, reply) => {
                    content.insert(id, reply);
                }
            }
        }

        order
            .into_iter()
            .filter_map(|id| content.remove(&id))
            .collect()
    }

    pub fn last_visible(&self) -> Option<Reply> {
        self.visible().pop()
    }

    pub fn clear(&self) {
        self.deliveries.lock().unwrap().clear();
    }
}

#[async_trait]
impl ChatSurface for RecordingSurface {
    async fn send(&self, _channel: ChannelId, reply: &Reply) -> Result<MessageId, SurfaceError> {
        let id = MessageId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.deliveries
            .lock()
            .unwrap()
            .push(Delivery::Sent(id, reply.clone()));
        Ok(id)
    }

    async fn edit(
        &self,
        _channel: ChannelId,
        message: MessageId,
        reply: &Reply,
    ) -> Result<(), SurfaceError> {
        self.deliveries
            .lock()
            .unwrap()
            .push(Delivery::Edited(message, reply.clone()));
        Ok(())
    }
}

/// Map of who sits in which voice channel. The bot itself is counted as one
/// extra member of any channel.
#[derive(Debug, Default)]
pub struct StaticRoster {
    seats: Mutex<HashMap<UserId, ChannelId>>,
}

impl StaticRoster {
    pub fn seat(&self, user: UserId, channel: Option<ChannelId>) {
        let mut seats = self.seats.lock().unwrap();
        match channel {
            Some(channel) => seats.insert(user, channel),
            None => seats.remove(&user),
        };
    }
}

#[async_trait]
impl VoiceRoster for StaticRoster {
    async fn voice_channel_of(&self, _guild: GuildId, user: UserId) -> Option<ChannelId> {
        self.seats.lock().unwrap().get(&user).copied()
    }

    async fn members_in(&self, _guild: GuildId, channel: ChannelId) -> usize {
        let seated = self
            .seats
            .lock()
            .unwrap()
            .values()
            .filter(|&&seat| seat == channel)
            .count();
        seated + 1
    }
}
