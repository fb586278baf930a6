use tracing::info;

use super::utils::music_manager::{CommandResult, MusicError, MusicManager};
use super::utils::session::Invocation;

/// Play audio from a URL in the caller's voice channel
pub async fn play(manager: &mut MusicManager, inv: &Invocation, args: &[String]) -> CommandResult {
    let url = args.first().ok_or(MusicError::ArgumentCount)?;
    inv.voice_channel()?;

    info!("Play requested by {}: {}", inv.caller, url);
    manager.play(inv, url).await
}
