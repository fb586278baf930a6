use tracing::info;

use super::utils::chat_surface::Reply;
use super::utils::music_manager::{CommandResult, MusicError, MusicManager};
use super::utils::session::Invocation;

/// Append a URL to the track queue
pub async fn queue(manager: &mut MusicManager, inv: &Invocation, args: &[String]) -> CommandResult {
    let url = args.first().ok_or(MusicError::ArgumentCount)?;
    inv.voice_channel()?;

    let length = manager.session_mut().queue.push(url.clone());
    info!("Queued {} (length {})", url, length);

    manager
        .report(
            inv,
            Reply::Queued {
                identifier: url.clone(),
                length,
            },
        )
        .await;
    Ok(())
}
