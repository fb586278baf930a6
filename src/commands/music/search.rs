use tracing::info;

use super::utils::chat_surface::Reply;
use super::utils::music_manager::{CommandResult, MusicManager};
use super::utils::session::Invocation;

/// Search YouTube and list the top results
pub async fn search(manager: &mut MusicManager, inv: &Invocation, args: &[String]) -> CommandResult {
    let query = args.join(" ");
    info!("Search requested by {}: {}", inv.caller, query);

    manager.show_loading(inv).await;
    let hits = manager.search(&query).await?;

    manager.report(inv, Reply::SearchResults { query, hits }).await;
    Ok(())
}
