use super::utils::chat_surface::Reply;
use super::utils::music_manager::{CommandResult, MusicManager};
use super::utils::session::Invocation;

/// List the queued URLs in play order
pub async fn list_queue(manager: &mut MusicManager, inv: &Invocation) -> CommandResult {
    manager.require_shared_channel(inv)?;

    let queue = &manager.session().queue;
    let reply = if queue.is_empty() {
        Reply::QueueEmpty
    } else {
        Reply::QueueListing(queue.to_vec())
    };

    manager.report(inv, reply).await;
    Ok(())
}
