//! Gateway event handling: turns messages into queued commands and voice
//! state updates into membership notices for the dispatch loop.

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use serenity::{ChannelId, GuildId};
use tracing::{debug, warn};

use crate::Error;
use crate::commands::music::utils::chat_surface::{ChatSurface, Reply};
use crate::commands::music::utils::command_queue::{Command, Origin};
use crate::commands::music::utils::discord::DiscordGateway;
use crate::commands::music::utils::dispatch::SessionHandle;
use crate::commands::parser::CommandParser;

/// Shared state handed to every event
pub struct Data {
    pub session: SessionHandle,
    pub parser: CommandParser,
    pub gateway: Arc<DiscordGateway>,
    pub guild_filter: Option<GuildId>,
}

impl Data {
    fn accepts(&self, guild: GuildId) -> bool {
        self.guild_filter.is_none_or(|only| only == guild)
    }
}

pub async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => on_message(data, new_message).await,
        serenity::FullEvent::VoiceStateUpdate { old, new } => {
            on_voice_state_update(data, old.as_ref(), new)
        }
        _ => Ok(()),
    }
}

async fn on_message(data: &Data, message: &serenity::Message) -> Result<(), Error> {
    if message.author.bot {
        return Ok(());
    }
    let Some(guild) = message.guild_id else {
        return Ok(());
    };
    if !data.accepts(guild) {
        return Ok(());
    }

    let parsed = match data.parser.parse(&message.content) {
        None => return Ok(()),
        Some(Ok(parsed)) => parsed,
        Some(Err(err)) => {
            debug!("Rejected message from {}: {}", message.author.id, err);
            if let Err(e) = data.gateway.send(message.channel_id, &Reply::Error(err)).await {
                warn!("Failed to report parse error: {}", e);
            }
            return Ok(());
        }
    };

    let origin = Origin {
        guild,
        channel: message.channel_id,
        author: message.author.id,
    };
    data.session
        .submit(Command::new(parsed.verb, parsed.args, origin))?;
    Ok(())
}

fn on_voice_state_update(
    data: &Data,
    old: Option<&serenity::VoiceState>,
    new: &serenity::VoiceState,
) -> Result<(), Error> {
    let Some(guild) = new.guild_id.or_else(|| old.and_then(|o| o.guild_id)) else {
        return Ok(());
    };
    if !data.accepts(guild) {
        return Ok(());
    }

    for channel in affected_channels(old.and_then(|o| o.channel_id), new.channel_id) {
        data.session.membership_changed(guild, channel)?;
    }
    Ok(())
}

/// Channels whose member count may have changed
fn affected_channels(before: Option<ChannelId>, after: Option<ChannelId>) -> Vec<ChannelId> {
    match (before, after) {
        (Some(a), Some(b)) if a == b => vec![a],
        (before, after) => before.into_iter().chain(after).collect(),
    }
}
