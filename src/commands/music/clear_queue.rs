use super::utils::chat_surface::Reply;
use super::utils::music_manager::{CommandResult, MusicManager};
use super::utils::session::Invocation;

/// Remove every URL from the queue
pub async fn clear_queue(manager: &mut MusicManager, inv: &Invocation) -> CommandResult {
    manager.require_shared_channel(inv)?;

    let queue = &mut manager.session_mut().queue;
    let reply = if queue.is_empty() {
        Reply::QueueEmpty
    } else {
        queue.clear();
        Reply::QueueCleared
    };

    manager.report(inv, reply).await;
    Ok(())
}
