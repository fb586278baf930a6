use super::utils::chat_surface::Reply;
use super::utils::music_manager::{CommandResult, MusicManager};
use super::utils::session::Invocation;

/// Show every command with both syntaxes
pub async fn help(manager: &mut MusicManager, inv: &Invocation) -> CommandResult {
    manager.report(inv, Reply::Help).await;
    Ok(())
}
