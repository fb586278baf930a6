use super::utils::music_manager::{CommandResult, MusicError, MusicManager};
use super::utils::session::Invocation;

/// Restart the current track from the beginning
pub async fn reload(manager: &mut MusicManager, inv: &Invocation) -> CommandResult {
    manager.require_shared_channel(inv)?;

    // Connected but idle: there is nothing to reload
    let current = manager
        .session()
        .current_track
        .clone()
        .ok_or(MusicError::NotConnected)?;

    manager.play(inv, &current).await
}
