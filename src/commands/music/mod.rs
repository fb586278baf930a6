//! Command handlers, one per verb, plus the single entry point the dispatch
//! loop calls.

pub(crate) mod clear_queue;
pub(crate) mod exit;
pub(crate) mod go;
pub(crate) mod help;
pub(crate) mod list_queue;
pub(crate) mod play;
pub(crate) mod queue;
pub(crate) mod reload;
pub(crate) mod search;
pub(crate) mod skip;

pub mod audio_sources;
pub mod utils;

use tracing::debug;

use crate::commands::parser::Verb;
use utils::chat_surface::Reply;
use utils::music_manager::{CommandResult, MusicManager};
use utils::session::Invocation;

/// Runs one command to completion. Failures are reported through the chat
/// surface like any other outcome.
pub async fn execute(manager: &mut MusicManager, verb: Verb, inv: &Invocation, args: &[String]) {
    let result = run(manager, verb, inv, args).await;

    if let Err(err) = result {
        debug!("{} failed: {}", verb, err);
        manager.report(inv, Reply::Error(err)).await;
    }
}

async fn run(
    manager: &mut MusicManager,
    verb: Verb,
    inv: &Invocation,
    args: &[String],
) -> CommandResult {
    verb.arity().check(args)?;

    match verb {
        Verb::Help => help::help(manager, inv).await,
        Verb::Search => search::search(manager, inv, args).await,
        Verb::Go => go::go(manager, inv, args).await,
        Verb::Play => play::play(manager, inv, args).await,
        Verb::Exit => exit::exit(manager, inv).await,
        Verb::Reload => reload::reload(manager, inv).await,
        Verb::Queue => queue::queue(manager, inv, args).await,
        Verb::Skip => skip::skip(manager, inv).await,
        Verb::ListQueue => list_queue::list_queue(manager, inv).await,
        Verb::ClearQueue => clear_queue::clear_queue(manager, inv).await,
    }
}
