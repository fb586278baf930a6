use super::utils::chat_surface::Reply;
use super::utils::music_manager::{CommandResult, MusicManager};
use super::utils::session::Invocation;

/// Stop the current track. The dispatch loop starts the next one once idle.
pub async fn skip(manager: &mut MusicManager, inv: &Invocation) -> CommandResult {
    manager.require_shared_channel(inv)?;

    manager.stop_audio().await;
    manager.report(inv, Reply::Stopped).await;
    Ok(())
}
