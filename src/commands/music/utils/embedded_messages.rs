use serenity::all::CreateEmbed;

use super::chat_surface::Reply;
use super::format_duration;
use crate::commands::music::audio_sources::{SearchHit, TrackMetadata};
use crate::commands::parser::Verb;

const HELP_COLOR: u32 = 0x3333cc;
const SEARCH_COLOR: u32 = 0xcccc33;
const PLAYING_COLOR: u32 = 0x33cc33;
const ERROR_COLOR: u32 = 0xcc3333;

/// How the bot is addressed, needed by help and error texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addressing {
    pub mention: String,
    pub prefix: String,
}

/// Render any reply as an embed
pub fn render(reply: &Reply, addressing: &Addressing) -> CreateEmbed {
    match reply {
        Reply::Loading => simple("Loading..."),
        Reply::Help => help(addressing),
        Reply::SearchResults { query, hits } => search_results(query, hits, addressing),
        Reply::NowPlaying { identifier, track } => now_playing(identifier, track),
        Reply::Queued { identifier, length } => simple(&format!(
            "Added \"{}\" to queue\nLength of queue: {}",
            identifier, length
        )),
        Reply::QueueListing(items) => simple(&format_queue_listing(items)),
        Reply::QueueEmpty => simple("Queue is empty"),
        Reply::QueueCleared => simple("Queue cleared"),
        Reply::Stopped => simple("Audio stopped"),
        Reply::Disconnected => simple("Disconnected"),
        Reply::Error(err) => error(&err.to_string(), addressing),
    }
}

/// Create a plain embed with just a description
fn simple(description: &str) -> CreateEmbed {
    CreateEmbed::new().description(description)
}

/// Create the help embed, one field per verb
pub fn help(addressing: &Addressing) -> CreateEmbed {
    Verb::ALL.into_iter().fold(
        CreateEmbed::new().title("ℹ️ Help").color(HELP_COLOR),
        |embed, verb| {
            embed.field(
                verb.summary(),
                verb.usage(&addressing.mention, &addressing.prefix),
                false,
            )
        },
    )
}

/// Create the search results embed
pub fn search_results(query: &str, hits: &[SearchHit], addressing: &Addressing) -> CreateEmbed {
    CreateEmbed::new()
        .title("🔍 Search Results")
        .description(format!(
            "To play one of the results, right-click the link and click \"Copy Link\", then use:\n- {} play {{*link*}}",
            addressing.mention
        ))
        .field("Search query", query, false)
        .field("Top Results", format_search_results(hits), false)
        .color(SEARCH_COLOR)
}

/// Create the embed shown when a track starts
pub fn now_playing(identifier: &str, track: &TrackMetadata) -> CreateEmbed {
    let duration = track
        .duration
        .map(format_duration)
        .unwrap_or_else(|| "Unknown duration".to_string());

    CreateEmbed::new()
        .title("🔉 Playing")
        .field("Source URL", identifier, false)
        .field("Title", &track.title, false)
        .field("Duration", duration, false)
        .field("Uploader", format_uploader(track), false)
        .color(PLAYING_COLOR)
}

/// Create an error embed pointing at the help command
pub fn error(message: &str, addressing: &Addressing) -> CreateEmbed {
    CreateEmbed::new()
        .title("🚫 Error")
        .description(format!(
            "{}\n\nUse \"{} help\" for more info",
            message, addressing.mention
        ))
        .color(ERROR_COLOR)
}

/// `N. [title](url) by uploader`, one line per hit, numbered from 1
pub fn format_search_results(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| format!("{}. [{}]({}) by {}", i + 1, hit.title, hit.url, hit.uploader))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Queue length followed by the numbered URLs
pub fn format_queue_listing(items: &[String]) -> String {
    let mut message = format!("Length of queue: {}", items.len());
    for (i, url) in items.iter().enumerate() {
        message.push_str(&format!("\n{}. {}", i + 1, url));
    }
    message
}

fn format_uploader(track: &TrackMetadata) -> String {
    match (&track.uploader_id, &track.uploader_url) {
        (Some(id), Some(url)) => format!("{}\n[{}]({})", track.uploader, id, url),
        (None, Some(url)) => format!("{}\n{}", track.uploader, url),
        _ => track.uploader.clone(),
    }
}
