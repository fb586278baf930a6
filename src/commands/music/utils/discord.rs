//! Serenity-backed implementations of the chat surface and voice roster.

use std::sync::Arc;

use serenity::all::{Cache, Context, CreateMessage, EditMessage, Http};
use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

use super::chat_surface::{ChatSurface, Reply, SurfaceError};
use super::embedded_messages::{self, Addressing};
use super::voice::VoiceRoster;

/// Talks to Discord through the REST client and reads voice states from the cache.
pub struct DiscordGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
    addressing: Addressing,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>, addressing: Addressing) -> Self {
        Self {
            http,
            cache,
            addressing,
        }
    }

    pub fn from_context(ctx: &Context, addressing: Addressing) -> Self {
        Self::new(ctx.http.clone(), ctx.cache.clone(), addressing)
    }
}

#[async_trait]
impl ChatSurface for DiscordGateway {
    async fn send(&self, channel: ChannelId, reply: &Reply) -> Result<MessageId, SurfaceError> {
        let embed = embedded_messages::render(reply, &self.addressing);
        let message = channel
            .send_message(self.http.as_ref(), CreateMessage::new().embed(embed))
            .await?;
        Ok(message.id)
    }

    async fn edit(
        &self,
        channel: ChannelId,
        message: MessageId,
        reply: &Reply,
    ) -> Result<(), SurfaceError> {
        let embed = embedded_messages::render(reply, &self.addressing);
        channel
            .edit_message(self.http.as_ref(), message, EditMessage::new().embed(embed))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl VoiceRoster for DiscordGateway {
    async fn voice_channel_of(&self, guild: GuildId, user: UserId) -> Option<ChannelId> {
        self.cache
            .guild(guild)
            .and_then(|guild| guild.voice_states.get(&user).and_then(|state| state.channel_id))
    }

    async fn members_in(&self, guild: GuildId, channel: ChannelId) -> usize {
        self.cache
            .guild(guild)
            .map(|guild| {
                guild
                    .voice_states
                    .values()
                    .filter(|state| state.channel_id == Some(channel))
                    .count()
            })
            .unwrap_or(0)
    }
}
