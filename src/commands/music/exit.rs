use tracing::info;

use super::utils::chat_surface::Reply;
use super::utils::music_manager::{CommandResult, MusicManager};
use super::utils::session::Invocation;

/// Clear the queue, stop audio and leave the voice channel
pub async fn exit(manager: &mut MusicManager, inv: &Invocation) -> CommandResult {
    manager.require_shared_channel(inv)?;

    info!("Exit requested by {}", inv.caller);
    manager.session_mut().queue.clear();
    manager.stop_audio().await;
    manager.disconnect().await?;

    manager.report(inv, Reply::Disconnected).await;
    Ok(())
}
